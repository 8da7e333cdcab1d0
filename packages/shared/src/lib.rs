//! Utilities shared by the Yamabiko packages.

pub mod logger;
pub mod time;
