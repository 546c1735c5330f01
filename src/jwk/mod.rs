//! Signing-key resolution and token verification.

mod config;
mod error;
mod key;
mod resolver;
mod verifier;

pub use error::*;

pub use config::*;
pub use key::*;
pub use resolver::*;
pub use verifier::*;
