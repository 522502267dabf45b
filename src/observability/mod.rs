//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request produces:
//!     → access_log.rs (TraceLayer span, mode-dependent verbosity)
//!     → pipeline::audit (one structured `audit` event)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty in development, JSON lines in production)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line
//! - Test mode keeps the subscriber but attaches no request logging

pub mod access_log;
pub mod logging;
pub mod metrics;

pub use access_log::access_log_layer;
pub use logging::{init_logging, log_startup};
