//! Comment service
//!
//! Handles timeline comments (post, list).

use feedback_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment anchored at a timeline position
    #[instrument(skip(self, request), fields(author_id = %request.author_id))]
    pub fn create_comment(
        &self,
        target_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let event = self.ctx.engine().post_comment(
            target_id,
            request.author_id,
            &request.body,
            request.position,
        )?;

        info!(comment_id = %event.id, "Comment created");

        CommentResponse::from_event(&event)
            .ok_or_else(|| ServiceError::internal("posted event is not a comment"))
    }

    /// Every comment on a target in timeline order
    #[instrument(skip(self))]
    pub fn get_comments(&self, target_id: Snowflake) -> Vec<CommentResponse> {
        self.ctx
            .engine()
            .comments_for(target_id)
            .iter()
            .filter_map(CommentResponse::from_event)
            .collect()
    }
}
