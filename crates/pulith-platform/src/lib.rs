pub use error::{Error, Result};

pub mod arch;
pub mod command;
mod error;
