//! The request pipeline.
//!
//! # Data Flow
//! ```text
//! request
//!     → external middleware (compression, request id, CORS, headers, access log)
//!     → stages (Outcome::Continue | Respond | Fail)
//!     → route dispatch under the mount prefix
//!
//! any failure
//!     → normalize.rs (Failure → ApiError)
//!     → not_found.rs (only when no route matched)
//!     → responder.rs (JSON { message, stack }, terminal)
//! ```

pub mod audit;
pub mod builder;
pub mod method_override;
pub mod normalize;
pub mod not_found;
pub mod responder;
pub mod stage;

pub use builder::PipelineBuilder;
pub use method_override::{MethodOverride, OriginalMethod};
pub use normalize::normalize;
pub use responder::{ErrorBody, ErrorResponder};
pub use stage::{Outcome, RequestContext, Stage};
