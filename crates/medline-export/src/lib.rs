//! medline-export
//!
//! Report layout (wrapping + pagination) and PDF rendering.

pub mod error;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod styles;
