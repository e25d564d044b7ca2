use panelstore_core_types::RequestId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using PanelError
pub type Result<T> = std::result::Result<T, PanelError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, an HTTP
/// boundary) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsErrorKind {
    // Snapshot storage
    /// An input or derived snapshot file does not exist
    SnapshotNotFound,
    /// A snapshot file exists but does not decode as the expected schema
    SnapshotCorrupt,

    // Logical
    /// No row carries the requested key
    NotFound,
    /// Caller passed an argument the operation refuses to interpret
    InvalidArgument,

    // Integration/IO
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl PsErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            PsErrorKind::SnapshotNotFound => "ERR_SNAPSHOT_NOT_FOUND",
            PsErrorKind::SnapshotCorrupt => "ERR_SNAPSHOT_CORRUPT",
            PsErrorKind::NotFound => "ERR_NOT_FOUND",
            PsErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            PsErrorKind::Io => "ERR_IO",
            PsErrorKind::Serialization => "ERR_SERIALIZATION",
            PsErrorKind::Config => "ERR_CONFIG",
            PsErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus optional
/// context for debugging: the operation that failed, the panel id involved
/// and the snapshot path that was being read or written.
#[derive(Debug, Clone)]
pub struct PsError {
    kind: PsErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<PathBuf>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<PsError>>,
}

impl PsError {
    /// Create a new error with the specified kind
    pub fn new(kind: PsErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add snapshot path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: PsError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> PsErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&PsError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for PsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for PsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for the solar-panel store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// Expected snapshot file is absent
    #[error("Snapshot not found: {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    /// Snapshot file is present but unreadable as the expected schema
    #[error("Snapshot corrupt: {}: {reason}", path.display())]
    SnapshotCorrupt { path: PathBuf, reason: String },

    /// No panel row carries the requested id
    #[error("SolarPanel with id {id} not found")]
    RecordNotFound { id: i64 },

    /// Programming error at the call site (e.g. a zero page size)
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<PanelError> for PsError {
    fn from(err: PanelError) -> Self {
        let message = err.to_string();
        match err {
            PanelError::SnapshotNotFound { path } => PsError::new(PsErrorKind::SnapshotNotFound)
                .with_path(path)
                .with_message(message),

            PanelError::SnapshotCorrupt { path, .. } => {
                PsError::new(PsErrorKind::SnapshotCorrupt)
                    .with_path(path)
                    .with_message(message)
            }

            PanelError::RecordNotFound { id } => PsError::new(PsErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message(message),

            PanelError::InvalidArgument { .. } => {
                PsError::new(PsErrorKind::InvalidArgument).with_message(message)
            }

            PanelError::Io { .. } => PsError::new(PsErrorKind::Io).with_message(message),

            PanelError::Serialization { .. } => {
                PsError::new(PsErrorKind::Serialization).with_message(message)
            }

            PanelError::Config { .. } => PsError::new(PsErrorKind::Config).with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            PsErrorKind::SnapshotNotFound,
            PsErrorKind::SnapshotCorrupt,
            PsErrorKind::NotFound,
            PsErrorKind::InvalidArgument,
            PsErrorKind::Io,
            PsErrorKind::Serialization,
            PsErrorKind::Config,
            PsErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = PsError::new(PsErrorKind::NotFound)
            .with_op("find_one")
            .with_entity_id("7")
            .with_message("SolarPanel with id 7 not found");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("find_one"));
        assert!(rendered.contains("entity_id: 7"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = PsError::new(PsErrorKind::Io).with_message("disk full");
        let outer = PsError::new(PsErrorKind::Serialization).with_source(inner);

        let source = std::error::Error::source(&outer).unwrap();
        assert!(source.to_string().contains("disk full"));
    }
}
