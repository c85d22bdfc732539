//! Core types for stock-analyzer
//!
//! This crate defines the error taxonomy every component reports through.
//! Component crates keep their own error enums and convert into [`Error`]
//! at their public boundary.

pub mod error;

pub use error::{Error, Result};
