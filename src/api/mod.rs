//! API Module
//!
//! HTTP handlers and routing for the server REST API.
//!
//! # Endpoints
//! - `GET /status` - Executor status snapshot
//! - `GET /stats` - Result cache statistics
//! - `DELETE /cache` - Clear the result cache
//! - `GET /profile/:user_id` - Read a profile (cached)
//! - `PUT /profile/:user_id` - Register an empty profile
//! - `POST /reward` - Credit points for an action
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
