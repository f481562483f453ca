//! Webhook submission module.
//!
//! This module provides the `WebhookClient` for delivering logged entries to
//! the configured remote endpoint as JSON over HTTP POST.
//!
//! There is no authentication and no queueing: a failed submission is
//! reported to the user and retried manually.

pub mod client;
pub mod error;

pub use client::WebhookClient;
pub use error::ApiError;
