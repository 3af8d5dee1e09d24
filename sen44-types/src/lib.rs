//! Type definitions for sen44

pub mod channel;
pub mod error;
pub mod measurement;

pub use channel::Channel;
pub use error::{Error, Result};
pub use measurement::Measurement;
