//! Timeline service
//!
//! Groups feedback by timeline position: the window around one moment and the
//! clustered peaks across a whole target.

use feedback_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{FeedbackGroupResponse, GroupAroundQuery, PeaksQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Timeline service
pub struct TimelineService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimelineService<'a> {
    /// Create a new TimelineService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Feedback within the query window of one position
    #[instrument(skip(self))]
    pub fn group_around(
        &self,
        target_id: Snowflake,
        query: GroupAroundQuery,
    ) -> ServiceResult<FeedbackGroupResponse> {
        let group = self
            .ctx
            .engine()
            .group_around(target_id, query.position, query.window)?;

        Ok(FeedbackGroupResponse::for_viewer(&group, query.viewer_id))
    }

    /// Every peak group on a target in timeline order
    #[instrument(skip(self))]
    pub fn peaks(
        &self,
        target_id: Snowflake,
        query: PeaksQuery,
    ) -> ServiceResult<Vec<FeedbackGroupResponse>> {
        let peaks = self
            .ctx
            .engine()
            .groups_for_all_peaks(target_id, query.window)?;

        let groups: Vec<_> = peaks
            .map(|group| FeedbackGroupResponse::for_viewer(&group, query.viewer_id))
            .collect();

        debug!(groups = groups.len(), "Computed peak groups");

        Ok(groups)
    }
}
