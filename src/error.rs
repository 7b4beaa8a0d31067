//! Error types for `templatedoc`
//!
//! Only a descriptor without a template label is recoverable (it is
//! skipped with a warning). Everything here aborts the run.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `templatedoc` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Configuration error (unreadable or invalid settings file)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Descriptor error (malformed document, missing key in a known kind)
    pub const DESCRIPTOR_ERROR: i32 = 4;

    /// Page template error (unterminated or mismatched section)
    pub const RENDER_ERROR: i32 = 5;

    /// Usage error (invalid arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `templatedoc` operations.
#[derive(Debug, Error)]
pub enum TemplateDocError {
    /// Settings loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Descriptor parsing or field access error
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Page template rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// I/O error on a specific file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),
}

impl TemplateDocError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Descriptor(_) => ExitCode::DESCRIPTOR_ERROR,
            Self::Render(_) => ExitCode::RENDER_ERROR,
            Self::Io { .. } => ExitCode::IO_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Settings file loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("cannot read settings file {path}: {source}")]
    Read {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings YAML could not be parsed
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path to the settings file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },
}

// ============================================================================
// Descriptor Errors
// ============================================================================

/// Errors raised while parsing a descriptor or extracting its tables.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// JSON or YAML parsing failed
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path to the descriptor
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// A key the extractor reads is absent
    #[error("{kind} '{object}' is missing required field '{field}'")]
    MissingField {
        /// Object kind (or `Parameter`)
        kind: &'static str,
        /// Object or parameter name
        object: String,
        /// Dotted path of the missing field
        field: &'static str,
    },

    /// Source-strategy builder image with no documentation link
    #[error("no documentation link configured for builder image '{0}'")]
    UnknownBuilderImage(String),

    /// Build strategy other than `Source` or `Docker`
    #[error("BuildConfig '{object}' uses unsupported strategy '{strategy}'")]
    UnsupportedStrategy {
        /// BuildConfig name
        object: String,
        /// Strategy type found
        strategy: String,
    },
}

impl DescriptorError {
    /// Shorthand for [`DescriptorError::MissingField`].
    pub fn missing(kind: &'static str, object: &str, field: &'static str) -> Self {
        Self::MissingField {
            kind,
            object: object.to_string(),
            field,
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Page template errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `${#name}` without a matching `${/name}`
    #[error("unterminated section '{0}'")]
    UnterminatedSection(String),

    /// `${/name}` that closes nothing
    #[error("unexpected section close '{0}'")]
    UnexpectedClose(String),

    /// Page data could not be converted for rendering
    #[error("invalid page data: {0}")]
    Data(#[from] serde_json::Error),
}
