//! HTTP middleware for the catalog server.
//!
//! - `auth` - bearer-token guard, applied per-handler via the [`auth::CurrentUser`] extractor
//! - `request_id` - request correlation IDs

pub mod auth;
pub mod request_id;

pub use auth::CurrentUser;
pub use request_id::request_id_middleware;
