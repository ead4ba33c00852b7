//! Authentication module
//!
//! Supports HTTP Basic or no authentication.
//!
//! The credential header value is computed once, when the `Authenticator`
//! is built, and attached unchanged to every request afterwards.

mod authenticator;
mod types;

pub use authenticator::{generate_basic_token, Authenticator};
pub use types::AuthConfig;
