//! Data transfer objects for transport requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for transport inputs
//! - Response DTOs for serializing engine outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateCommentRequest, GroupAroundQuery, PeaksQuery, ToggleReactionRequest};

pub use responses::{
    ActiveReactionResponse, ApiResponse, CommentResponse, FeedbackEventResponse,
    FeedbackGroupResponse, ReactionResponse, ToggleReactionResponse,
};
