pub mod config;
pub mod error;
pub mod global;
pub mod logger;
pub mod tracing_handler;

pub use global::{
    debug, default, error, error_with, info, log, log_attrs, notice, set_default, warn, with,
};
