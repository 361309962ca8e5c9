//! Error types for the selection engine.

use thiserror::Error;

use crate::types::RewardId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Caller passed a reward id the project does not list.
    #[error("Reward {reward_id} not found in project {project_id}")]
    RewardNotFound { project_id: u64, reward_id: RewardId },

    #[error("Selection session has not been configured with a project")]
    NotConfigured,

    #[error("Selection session has been torn down")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, SelectionError>;
