//! Typed client for the award-program REST API.
//!
//! Every call returns a [`PendingRequest`]: await it for the response, or
//! cancel it through its handle. A [`RequestScope`] ties a group of requests to
//! the lifetime of whatever issued them.

pub mod error;
pub mod http;
pub mod request;
pub mod services;
pub mod session;

pub use error::{ClientError, GENERIC_ERROR_MESSAGE};
pub use http::ApiClient;
pub use request::{CancelHandle, PendingRequest, RequestScope};
pub use session::{Claims, Session, SessionError};
