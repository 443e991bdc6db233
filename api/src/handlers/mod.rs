//! Mapping from domain results to HTTP responses

pub mod error;

pub use error::{handle_domain_error, handle_rejection, handle_validation_errors};
