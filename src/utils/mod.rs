//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`url_validator`] - Destination URL checks

pub mod code_generator;
pub mod url_validator;
