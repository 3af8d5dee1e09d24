//! # sen44-core
//!
//! Core protocol implementation for the Sensirion SEN44 UART interface.
//!
//! This crate provides the low-level protocol primitives:
//! - Response frame validation and decoding
//! - Request frame encoding
//! - CRC-8 calculation
//! - Frame assembly from a byte stream
//! - Protocol constants

pub mod assembler;
pub mod checksum;
pub mod constants;
pub mod error;
pub mod frame;

pub use assembler::{AssemblyMode, FrameAssembler};
pub use error::{Error, Result};
pub use frame::{RequestFrame, ResponseFrame};

pub use sen44_types::{Channel, Measurement};
