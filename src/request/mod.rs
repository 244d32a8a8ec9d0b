//! Request decoding.
//!
//! - [`decoder`]: JSON and form body decoding, optional validation
//! - [`extract`]: the [`Decoded`] axum extractor

pub mod decoder;
pub mod extract;

pub use decoder::{decode_form, decode_json};
pub use extract::Decoded;
