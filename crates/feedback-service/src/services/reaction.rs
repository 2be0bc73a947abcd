//! Reaction service
//!
//! Handles timeline reactions (toggle, counts, active set, history).

use feedback_core::{ReactionKey, ReactionType, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ActiveReactionResponse, FeedbackEventResponse, ReactionResponse, ToggleReactionRequest,
    ToggleReactionResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle `reaction` for the requesting author at a timeline position
    ///
    /// The response carries the new state of the key plus the full set of
    /// active reactions on the target, with `me` set for the author.
    #[instrument(skip(self))]
    pub fn toggle_reaction(
        &self,
        target_id: Snowflake,
        reaction: &str,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ToggleReactionResponse> {
        let result = self.ctx.engine().toggle_reaction(
            target_id,
            request.author_id,
            reaction,
            request.position,
        )?;

        info!(
            target_id = %target_id,
            author_id = %request.author_id,
            reaction = %reaction,
            active = result.active,
            "Reaction toggled"
        );

        let reactions = self
            .ctx
            .engine()
            .ledger()
            .reaction_counts(target_id, Some(request.author_id))
            .iter()
            .map(ReactionResponse::from)
            .collect();

        Ok(ToggleReactionResponse {
            active: result.active,
            event: FeedbackEventResponse::from(&result.event),
            reactions,
            active_reactions: result
                .reactions
                .iter()
                .map(ActiveReactionResponse::from)
                .collect(),
        })
    }

    /// Per-kind counts of active reactions on a target
    #[instrument(skip(self))]
    pub fn get_reactions(
        &self,
        target_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> Vec<ReactionResponse> {
        self.ctx
            .engine()
            .ledger()
            .reaction_counts(target_id, viewer_id)
            .iter()
            .map(ReactionResponse::from)
            .collect()
    }

    /// Every active reaction on a target, ordered by author then kind
    #[instrument(skip(self))]
    pub fn get_active_reactions(&self, target_id: Snowflake) -> Vec<ActiveReactionResponse> {
        self.ctx
            .engine()
            .ledger()
            .active_reactions(target_id)
            .iter()
            .map(ActiveReactionResponse::from)
            .collect()
    }

    /// Whether an author currently has `reaction` active on a target
    #[instrument(skip(self))]
    pub fn is_active(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        reaction: &str,
    ) -> ServiceResult<bool> {
        let reaction_type: ReactionType = reaction.parse()?;
        Ok(self
            .ctx
            .engine()
            .ledger()
            .is_active(ReactionKey::new(target_id, author_id, reaction_type)))
    }

    /// Every toggle of one key, oldest first
    #[instrument(skip(self))]
    pub fn get_history(
        &self,
        target_id: Snowflake,
        author_id: Snowflake,
        reaction: &str,
    ) -> ServiceResult<Vec<FeedbackEventResponse>> {
        let reaction_type: ReactionType = reaction.parse()?;
        let history = self
            .ctx
            .engine()
            .ledger()
            .history(ReactionKey::new(target_id, author_id, reaction_type));

        Ok(history.iter().map(FeedbackEventResponse::from).collect())
    }
}
