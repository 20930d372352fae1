pub mod args;
pub mod chart;
pub mod commands;
mod config;
mod error;
pub mod model;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
