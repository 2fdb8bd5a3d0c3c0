//! Request/response types and errors shared by `jwe-service` and its clients.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
