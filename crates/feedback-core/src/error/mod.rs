//! Domain errors

mod feedback_error;

pub use feedback_error::{FeedbackError, FeedbackResult};
