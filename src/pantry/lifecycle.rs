use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("List is already archived")]
    AlreadyArchived,

    #[error("List is not archived")]
    NotArchived,

    #[error("Archived lists are read-only")]
    ReadOnly,
}

/// `Active <-> Archived`. Archiving is a soft delete; archived lists keep
/// their items but refuse item changes until restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    Active,
    Archived,
}

impl ListStatus {
    pub fn from_archived(archived: bool) -> Self {
        if archived {
            ListStatus::Archived
        } else {
            ListStatus::Active
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, ListStatus::Archived)
    }

    pub fn archive(self) -> Result<Self, TransitionError> {
        match self {
            ListStatus::Active => Ok(ListStatus::Archived),
            ListStatus::Archived => Err(TransitionError::AlreadyArchived),
        }
    }

    pub fn restore(self) -> Result<Self, TransitionError> {
        match self {
            ListStatus::Archived => Ok(ListStatus::Active),
            ListStatus::Active => Err(TransitionError::NotArchived),
        }
    }

    pub fn ensure_mutable(self) -> Result<(), TransitionError> {
        match self {
            ListStatus::Active => Ok(()),
            ListStatus::Archived => Err(TransitionError::ReadOnly),
        }
    }
}
