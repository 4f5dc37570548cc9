#![warn(clippy::pedantic)]

mod config;
pub mod log;
pub mod notification;
pub mod reminder;

pub use config::Config;
