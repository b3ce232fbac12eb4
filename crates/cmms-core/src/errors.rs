use thiserror::Error;

/// Result type alias using CmmsError
pub type Result<T> = std::result::Result<T, CmmsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and rendering by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidLabel,
    InvalidDate,
    MissingField,
    NotFound,
    ConstraintViolation,

    // Lifecycle
    /// The persistence context has not been opened (or was closed)
    NotInitialized,
    /// The persisted database image could not be decoded or restored
    ImageCorrupt,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidLabel => "ERR_INVALID_LABEL",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::NotInitialized => "ERR_NOT_INITIALIZED",
            ExErrorKind::ImageCorrupt => "ERR_IMAGE_CORRUPT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, entity, record id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (table) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add record ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain and validation errors raised before anything reaches storage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CmmsError {
    /// A display label does not belong to the status/priority domain
    #[error("Unknown {domain} label: {label}")]
    UnknownLabel { domain: String, label: String },

    /// A date field could not be parsed as YYYY-MM-DD
    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: String, value: String },

    /// A timestamp field could not be parsed
    #[error("Invalid timestamp for {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    /// A required text field is empty or whitespace-only
    #[error("Missing required field {field} on {entity}")]
    MissingField { entity: String, field: String },

    /// Unknown entity name at an input boundary
    #[error("Unknown entity: {name}")]
    UnknownEntity { name: String },

    /// Record lookup by id failed
    #[error("{entity} not found: {id}")]
    RecordNotFound { entity: String, id: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<CmmsError> for ExError {
    fn from(err: CmmsError) -> Self {
        let message = err.to_string();
        match err {
            CmmsError::UnknownLabel { domain, .. } => ExError::new(ExErrorKind::InvalidLabel)
                .with_entity(domain)
                .with_message(message),

            CmmsError::InvalidDate { .. } | CmmsError::InvalidTimestamp { .. } => {
                ExError::new(ExErrorKind::InvalidDate).with_message(message)
            }

            CmmsError::MissingField { entity, .. } => ExError::new(ExErrorKind::MissingField)
                .with_entity(entity)
                .with_message(message),

            CmmsError::UnknownEntity { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            CmmsError::RecordNotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),

            CmmsError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CmmsError {
    fn from(err: serde_json::Error) -> Self {
        CmmsError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Reject empty or whitespace-only required text
pub fn require_text(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CmmsError::MissingField {
            entity: entity.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Like [`require_text`] for a patch field; `None` means "not being changed"
pub fn require_patch_text(entity: &str, field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => require_text(entity, field, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotInitialized, "ERR_NOT_INITIALIZED"),
            (ExErrorKind::ImageCorrupt, "ERR_IMAGE_CORRUPT"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_source() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Persistence)
            .with_op("persist")
            .with_source(inner);
        let rendered = outer.to_string();
        assert!(rendered.starts_with("[ERR_PERSISTENCE] in operation 'persist'"));
        assert!(rendered.contains("disk gone"));
    }

    #[test]
    fn test_require_patch_text_skips_absent_fields() {
        assert!(require_patch_text("technician", "email", None).is_ok());
        assert!(require_patch_text("technician", "email", Some("a@b.fr")).is_ok());
        assert!(require_patch_text("technician", "email", Some(" ")).is_err());
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("equipment", "name", "Linac").is_ok());
        assert_eq!(
            require_text("equipment", "name", "  \t"),
            Err(CmmsError::MissingField {
                entity: "equipment".to_string(),
                field: "name".to_string(),
            })
        );
    }
}
