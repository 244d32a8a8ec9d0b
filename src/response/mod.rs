//! Response writing and error classification.
//!
//! - [`writer`]: envelope, redirect and HTML responses
//! - [`classify`]: maps application errors onto envelopes

pub mod classify;
pub mod writer;

pub use classify::ErrorClass;
pub use writer::accept_all_request;
