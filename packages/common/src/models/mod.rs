//! Records mirrored from the award-program API, plus the form payloads sent back to it.
//!
//! Field names follow the API's camelCase JSON. Identifiers are opaque strings.

pub mod application;
pub mod auth;
pub mod award;
pub mod journalist;
pub mod project;
pub mod reference;
pub mod score;
pub mod shared;

pub use application::*;
pub use auth::*;
pub use award::*;
pub use journalist::*;
pub use project::*;
pub use reference::*;
pub use score::*;
pub use shared::*;
