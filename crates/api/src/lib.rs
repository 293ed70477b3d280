//! Herdlink API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! WebSocket infrastructure, alert pipeline) so integration tests and the
//! binary entrypoint can both access them.

pub mod alerts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod response;
pub mod routes;
pub mod state;
pub mod ws;
