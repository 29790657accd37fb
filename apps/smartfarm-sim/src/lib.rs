pub mod alerts;
pub mod classify;
pub mod cli;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod i18n;
pub mod render;
pub mod session;
pub mod simulator;
pub mod snapshot;
