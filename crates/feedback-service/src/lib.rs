//! # feedback-service
//!
//! Application layer sitting between a transport and the feedback engine:
//! request validation, response DTOs, and the reaction, comment, and timeline
//! use cases.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TimelineService,
};
