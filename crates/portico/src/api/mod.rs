//! HTTP surface: proxied `/api` routes, session endpoints and the site bundle.

pub mod error;
pub mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
