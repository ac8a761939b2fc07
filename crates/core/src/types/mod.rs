//! Core types for Marquee.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod price;

pub use address::Address;
pub use id::*;
pub use price::{Price, PriceError};
