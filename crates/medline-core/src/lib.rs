//! medline-core
//!
//! Pure domain types: the validated intake record, the clinic directory and
//! the failure taxonomy shared by every other crate.
//! No network or rendering dependency. This is the shared vocabulary of MediLine.

pub mod error;
pub mod models;
