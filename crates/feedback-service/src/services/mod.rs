//! Feedback use cases
//!
//! Each service borrows the shared [`ServiceContext`], checks request shape,
//! and delegates to the engine, which owns every domain rule.

pub mod comment;
pub mod context;
pub mod error;
pub mod reaction;
pub mod timeline;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use timeline::TimelineService;
