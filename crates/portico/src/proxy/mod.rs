//! Backend proxy layer.
//!
//! Every API route is an instance of one parameterized call: a method, a backend
//! path, a body transform, a success shape and a default error message. The
//! client forwards it exactly once and normalizes the outcome.

mod call;
mod client;
mod envelope;
mod error;
mod form;
mod slots;

pub use call::{OutboundBody, ProxyCall, ProxyReply, SuccessShape};
pub use client::Upstream;
pub use envelope::Envelope;
pub use error::{NON_JSON_MESSAGE, NOT_CONFIGURED_MESSAGE, ProxyError, TRANSPORT_MESSAGE};
pub use form::{FormField, FormValue, forwarded_field_name, read_multipart};
pub use slots::tally_time_slots;
