//! Errors
//!
//! Two layers: [`StaError`] for what goes wrong while turning loose input
//! into records, and [`ExError`], the structured error every store and CLI
//! operation returns. A `StaError` converts into an `ExError` with `?`.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StaError>;

/// Failure to build a record from loosely typed input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaError {
    /// A numeric field held something that is not an integer
    #[error("Field '{field}' is not an integer: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Present, but the wrong JSON type or an undecodable value
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for StaError {
    fn from(err: serde_json::Error) -> Self {
        StaError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Classification of an [`ExError`]
///
/// The codes returned by [`ExErrorKind::code`] are stable and are what the
/// CLI prints and what tests match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    InvalidInput,
    MissingField,
    /// A unique name index rejected a write, or a migration checksum differs
    ConstraintViolation,
    Io,
    Serialization,
    Persistence,
    /// Gave up waiting on another connection's lock
    Timeout,
}

impl ExErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
        }
    }
}

impl fmt::Display for ExErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured error returned by store and CLI operations
///
/// Rendered as `[CODE] in operation 'op': message (entity: name)`, leaving
/// out whichever parts are unset. The entity is a collection, a field or a
/// migration id depending on where the error came from.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            message: String::new(),
        }
    }

    pub fn with_op(self, op: impl Into<String>) -> Self {
        Self {
            op: Some(op.into()),
            ..self
        }
    }

    pub fn with_entity(self, entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match &self.entity {
            Some(entity) => write!(f, " (entity: {})", entity),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ExError {}

impl From<StaError> for ExError {
    fn from(err: StaError) -> Self {
        let message = err.to_string();
        let converted = match err {
            StaError::InvalidNumber { field, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("coerce_int")
                .with_entity(field),
            StaError::MissingField { field } => {
                ExError::new(ExErrorKind::MissingField).with_entity(field)
            }
            StaError::InvalidField { field, .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_entity(field)
            }
            StaError::Serialization { .. } => ExError::new(ExErrorKind::Serialization),
        };
        converted.with_message(message)
    }
}
