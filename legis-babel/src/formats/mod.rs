//! Format implementations
//!
//! Each format lives in its own module and implements [crate::format::Format].

pub mod akn;
pub mod json;
pub mod text;
