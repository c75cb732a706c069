//! # Courseflow Client
//!
//! The Canvas REST client: an injected authenticated [`Transport`], link-
//! header pagination with hard ceilings, raw upstream record shapes, and
//! the pure normalizers that map them into the internal model.

mod client;
mod normalize;
mod pagination;
mod raw;
mod transport;

pub use client::CanvasClient;
pub use pagination::parse_next_link;
pub use transport::{HttpTransport, Transport, TransportResponse};
