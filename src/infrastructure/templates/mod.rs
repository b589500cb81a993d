//! Embedded artifact templates

pub mod embedded;

pub use embedded::*;
