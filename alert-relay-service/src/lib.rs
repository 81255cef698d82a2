//! Relays deployment alert webhooks to a blink(1) status light.
//!
//! `POST /alert` takes `{"reason", "message"}`; known reasons become a
//! `/set` or `/blink` call on the configured blink1-server.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
