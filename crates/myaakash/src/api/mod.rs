//! HTTP transport for the session, LMS, channel, and exam services.
//!
//! Every reply is decoded once here into an "OK" payload or a rejection
//! message; the clients above never look at raw responses.

mod client;
mod endpoints;
mod envelope;

pub(crate) use client::ApiClient;
pub(crate) use endpoints::*;
pub(crate) use envelope::{decode, field};
