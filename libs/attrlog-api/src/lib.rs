pub mod args;
pub mod attr;
pub mod error;
pub mod handler;
pub mod json;
pub mod kind;
pub mod level;
pub mod record;
pub mod resolve;
pub mod text;
pub mod value;

mod display;

pub use attrlog_api_derive::LogValue;
