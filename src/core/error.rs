use thiserror::Error;

use super::types::{AuthorizationId, InvoiceId, PartnerId};

/// Errors raised by authorization management and invoice numbering.
///
/// Every variant aborts the operation that produced it and leaves the
/// registry, the invoice book and the invoice itself untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthorizationError {
    /// An active authorization with the same partner, document type, entity
    /// and emission point already exists.
    #[error(
        "an active authorization for document type {code} ({entity}-{emission_point}) already exists for partner {partner}"
    )]
    DuplicateActiveAuthorization {
        partner: PartnerId,
        code: String,
        entity: String,
        emission_point: String,
    },

    /// The authorization is referenced by at least one invoice.
    #[error("authorization {0} is related to a document")]
    AuthorizationInUse(AuthorizationId),

    /// No active authorization matches the requested document type.
    #[error("no active authorization found for document type {0}")]
    NoActiveAuthorization(String),

    /// The document kind is not one of the catalogued kinds.
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    /// The authorization number printed on a received document has an
    /// unexpected length.
    #[error("authorization number has {len} characters, expected one of {expected:?}")]
    InvalidAuthorizationFormat { len: usize, expected: Vec<usize> },

    /// A sequence produced a value that is not a plain zero-padded number.
    #[error("sequence must yield exactly {width} digits, got '{value}'")]
    SequenceFormat { value: String, width: usize },

    /// An action was invoked on the wrong selection or in the wrong context.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Input rules failed on a new authorization.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storage-level uniqueness of (partner, expiration date, document type).
    #[error("authorization, expiration date and voucher type must be unique: {0}")]
    UniqueViolation(String),

    /// Storage-level uniqueness of (reference, kind, partner, state).
    #[error("invoice number {reference} must be unique (conflicts with invoice {existing})")]
    DuplicateInvoiceNumber {
        reference: String,
        existing: InvoiceId,
    },

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The authorization has no sequence to draw outbound numbers from.
    #[error("authorization {0} has no sequence attached")]
    MissingSequence(AuthorizationId),

    /// The sequence has handed out its last value.
    #[error("sequence exhausted after {0}")]
    SequenceExhausted(u64),

    /// The journal has no authorization configured for the document kind.
    #[error("journal has no authorization configured for {0}")]
    MissingJournalAuthorization(String),

    /// The invoice is not in a state that allows the operation.
    #[error("invalid invoice state: {0}")]
    InvalidState(String),

    /// Engine configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthorizationError {
    pub(crate) fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the invalid field (e.g. "emission_point").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Non-fatal outcome of editing an invoice reference.
///
/// The reference has already been cleared when this is returned; the user
/// is expected to enter a different number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMismatchWarning {
    pub title: String,
    pub message: String,
}

impl RangeMismatchWarning {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RangeMismatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
