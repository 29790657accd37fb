use std::str::FromStr;

use crate::error::CommandError;
use crate::i18n::Locale;
use crate::render::View;
use crate::snapshot::Control;

pub const HELP: &str = "\
commands:
  toggle <ventilation|irrigation|lighting|auto>   flip a switch
  fan +  | fan -                                  nudge fan speed by 10% (manual mode)
  fan flip                                        reverse fan direction (manual mode)
  lang <en|es|hi>                                 change language
  view <dashboard|ventilation>                    change screen
  tick                                            refresh readings now
  help                                            show this list
  quit                                            leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(Control),
    FanFaster,
    FanSlower,
    FanFlip,
    SetLocale(Locale),
    SetView(View),
    Tick,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();

        match head.to_ascii_lowercase().as_str() {
            "toggle" | "t" => {
                let raw = arg.ok_or(CommandError::MissingArgument {
                    command: "toggle",
                    expected: "ventilation, irrigation, lighting or auto",
                })?;
                Control::parse(raw)
                    .map(Command::Toggle)
                    .ok_or_else(|| CommandError::InvalidArgument {
                        command: "toggle",
                        value: raw.to_string(),
                        expected: "ventilation, irrigation, lighting or auto",
                    })
            }
            "fan" | "f" => match arg {
                Some("+") | Some("up") | Some("faster") => Ok(Command::FanFaster),
                Some("-") | Some("down") | Some("slower") => Ok(Command::FanSlower),
                Some("flip") | Some("reverse") => Ok(Command::FanFlip),
                Some(other) => Err(CommandError::InvalidArgument {
                    command: "fan",
                    value: other.to_string(),
                    expected: "+, - or flip",
                }),
                None => Err(CommandError::MissingArgument {
                    command: "fan",
                    expected: "+, - or flip",
                }),
            },
            "+" => Ok(Command::FanFaster),
            "-" => Ok(Command::FanSlower),
            "lang" | "locale" => {
                let raw = arg.ok_or(CommandError::MissingArgument {
                    command: "lang",
                    expected: "en, es or hi",
                })?;
                raw.parse::<Locale>()
                    .map(Command::SetLocale)
                    .map_err(|err| CommandError::InvalidArgument {
                        command: "lang",
                        value: err.value,
                        expected: "en, es or hi",
                    })
            }
            "view" | "v" => {
                let raw = arg.ok_or(CommandError::MissingArgument {
                    command: "view",
                    expected: "dashboard or ventilation",
                })?;
                raw.parse::<View>()
                    .map(Command::SetView)
                    .map_err(|err| CommandError::InvalidArgument {
                        command: "view",
                        value: err.value,
                        expected: "dashboard or ventilation",
                    })
            }
            "tick" | "refresh" => Ok(Command::Tick),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
