pub mod memory;
pub mod repository;
pub mod service;

use std::fmt;

use uuid::Uuid;

pub use memory::InMemoryStore;
pub use service::PlanningService;

/// Entity kinds, used to say which record an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Trip,
    Hotel,
    Flight,
    Activity,
    Booking,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Trip => "trip",
            EntityKind::Hotel => "hotel",
            EntityKind::Flight => "flight",
            EntityKind::Activity => "activity",
            EntityKind::Booking => "booking",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures reported by a storage gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no {entity} found with id {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("corrupt {entity} row: {reason}")]
    Corrupt { entity: EntityKind, reason: String },

    /// Driver or constraint failure, labelled with the statement that hit it.
    #[error("{operation}: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub fn backend<E>(operation: &'static str, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StoreError::Backend {
            operation,
            source: err.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the planning service. Every variant names the
/// operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("{operation}: {message}")]
    Validation {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: {entity} with id {id} not found")]
    NotFound {
        operation: &'static str,
        entity: EntityKind,
        id: Uuid,
    },

    #[error("{operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl PlanningError {
    pub(crate) fn invalid(operation: &'static str, message: impl Into<String>) -> Self {
        PlanningError::Validation {
            operation,
            message: message.into(),
        }
    }

    /// Wraps a gateway error for `operation`, keeping not-found distinguishable.
    pub(crate) fn from_store(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |err| match err {
            StoreError::NotFound { entity, id } => PlanningError::NotFound {
                operation,
                entity,
                id,
            },
            other => PlanningError::Storage {
                operation,
                source: other,
            },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PlanningError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanningError::NotFound { .. })
    }

    /// Which entity was missing, for not-found errors.
    pub fn missing_entity(&self) -> Option<EntityKind> {
        match self {
            PlanningError::NotFound { entity, .. } => Some(*entity),
            _ => None,
        }
    }
}

pub type CoreResult<T> = Result<T, PlanningError>;
