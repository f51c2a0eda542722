//! Form Toolkit Validation
//!
//! Pure validation predicates over string input.
//! Used by the DOM-facing toolkit for real-time validation and by the WASM
//! bindings for direct calls from JavaScript.

pub mod date;
pub mod email;
pub mod password;
pub mod rules;
pub mod string;

// Re-export all validators
pub use date::*;
pub use email::*;
pub use password::*;
pub use rules::*;
pub use string::*;
