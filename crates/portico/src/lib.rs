//! Portico: serves the site bundle, guards the admin pages and proxies the
//! `/api` surface to the remote backend.

pub mod api;
pub mod config;
pub mod guard;
pub mod models;
pub mod proxy;
pub mod session;
