//! Command-line driver tying the lexer, parser, semantic validators, and
//! code generator into one `mylc` binary.

pub mod config;
pub mod error;
pub mod session;
pub mod source_map;

pub use config::Config;
pub use error::{DriverError, DriverResult};
pub use session::Session;
