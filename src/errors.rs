//! Error types with rich diagnostics using miette
//!
//! Negative classification outcomes are not errors; see
//! [`NotCombination`](crate::combination::NotCombination). Everything here is
//! either a programming error, a bad configuration, or a failure of the
//! drawing collaborator.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;
use crate::zoning::ZoningType;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Invariant Errors
// ============================================================================

/// A normalizer was called in a way its caller should have ruled out.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("tag {tag:?} ({zoning}) does not occur in label {label:?}")]
    #[diagnostic(
        code(zonelabel::invariant::tag_absent),
        help("classify the label before normalizing it")
    )]
    TagAbsent {
        label: String,
        zoning: ZoningType,
        tag: String,
    },

    #[error("{zoning} labels are not normalized by the {normalizer} normalizer")]
    #[diagnostic(code(zonelabel::invariant::wrong_normalizer))]
    WrongNormalizer {
        zoning: ZoningType,
        normalizer: &'static str,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Rejected zoning vocabulary or displacement
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("tag for {zoning} is empty")]
    #[diagnostic(code(zonelabel::config::empty_tag))]
    EmptyTag { zoning: ZoningType },

    #[error("tag {tag:?} for {zoning} contains a digit")]
    #[diagnostic(
        code(zonelabel::config::digit_in_tag),
        help("digits are reserved for the numeric prefix")
    )]
    DigitInTag { zoning: ZoningType, tag: String },

    #[error("tag {tag:?} for {zoning} contains the delimiter {delimiter:?}")]
    #[diagnostic(code(zonelabel::config::delimiter_in_tag))]
    DelimiterInTag {
        zoning: ZoningType,
        tag: String,
        delimiter: char,
    },

    #[error("{first} and {second} share the tag {tag:?}")]
    #[diagnostic(code(zonelabel::config::duplicate_tag))]
    DuplicateTag {
        first: ZoningType,
        second: ZoningType,
        tag: String,
    },

    #[error("invalid delimiter {delimiter:?}")]
    #[diagnostic(
        code(zonelabel::config::invalid_delimiter),
        help("the delimiter must keep its case and must not be a digit or whitespace")
    )]
    InvalidDelimiter { delimiter: char },

    #[error("invalid displacement: {source}")]
    #[diagnostic(code(zonelabel::config::invalid_displacement))]
    InvalidDisplacement {
        #[source]
        source: NumericError,
    },

    #[error("prefix pattern for {zoning} failed to compile")]
    #[diagnostic(code(zonelabel::config::pattern))]
    Pattern {
        zoning: ZoningType,
        #[source]
        source: regex_lite::Error,
    },
}

// ============================================================================
// Sheet Errors
// ============================================================================

/// Errors that occur while reading a sheet listing
#[derive(Error, Diagnostic, Debug)]
pub enum SheetError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(zonelabel::sheet::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(zonelabel::sheet::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("duplicate handle {handle:?}")]
    #[diagnostic(
        code(zonelabel::sheet::duplicate_handle),
        help("every entity needs a unique handle; omit it to have one assigned")
    )]
    DuplicateHandle {
        handle: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("already used")]
        span: SourceSpan,
    },
}

// ============================================================================
// Drawing Errors
// ============================================================================

/// Failures reported by the drawing collaborator
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DrawingError {
    #[error("no text entity with handle {handle:?}")]
    #[diagnostic(code(zonelabel::drawing::unknown_handle))]
    UnknownHandle { handle: String },

    #[error("drawing backend failed: {message}")]
    #[diagnostic(code(zonelabel::drawing::backend))]
    Backend { message: String },
}

// ============================================================================
// Label Errors
// ============================================================================

/// A single label could not be processed
#[derive(Error, Diagnostic, Debug)]
pub enum LabelError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Drawing(#[from] DrawingError),
}
