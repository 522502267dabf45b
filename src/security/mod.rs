//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response (success or error):
//!     → cors.rs (Access-Control-* headers, preflight answers)
//!     → headers.rs (hardening headers)
//!     → Client
//! ```
//!
//! # Design Decisions
//! - Both layers sit outside the error responder so error responses carry
//!   the same headers as successful ones

pub mod cors;
pub mod headers;

pub use cors::cors_layer;
pub use headers::{security_header_layers, security_headers};
