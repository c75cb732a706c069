//! # Courseflow API
//!
//! The process-boundary surface: a small axum server carrying the tagged
//! message contract over HTTP POST and WebSocket, plus server-initiated
//! notification broadcasts. Dispatch is an exhaustive match over the
//! request enum; unknown request types get an explicit error response.

mod router;
mod server;
mod state;
mod ws;

pub use router::{dispatch, parse_request};
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
