//! Error types for the Deluge storage engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Out-of-range ids are not errors: `has`, `remove` and `destroy` report
//! them as `false`. Only presence and layout failures surface here.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Result alias used throughout Deluge.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Deluge operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: EntityId, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a late registration error.
    #[must_use]
    pub fn late_registration(component: &'static str, registered: usize) -> Self {
        Self::new(ErrorKind::LateRegistration {
            component,
            registered,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this is a component not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::ComponentNotFound { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No component of the requested type is present on the entity.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// Type name of the component that was not found.
        component: &'static str,
    },

    /// A new component type was used after the layout was frozen.
    #[error("late registration of {component}: layout is frozen at {registered} component types")]
    LateRegistration {
        /// Type name of the rejected component.
        component: &'static str,
        /// Number of component types registered when the layout was frozen.
        registered: usize,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the operation that failed.
    pub operation: Option<&'static str>,
    /// Entity the operation targeted.
    pub entity: Option<EntityId>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the target entity.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(entity) = self.entity {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "on {entity}")?;
        }
        Ok(())
    }
}
