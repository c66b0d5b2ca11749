//! Error types for spaceport.
//!
//! Every fallible operation in the crate returns [`Error`]. Startup code
//! propagates it to `main`; request handlers hand it to the dispatcher, which
//! turns it into an HTTP status and a JSON body (see [`Error::status`]).

use std::path::PathBuf;

use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A row of the `companies` table.
    Company,
    /// A row of the `rockets` table.
    Rocket,
    /// A row of the `launches` table.
    Launch,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Company => write!(f, "company"),
            Self::Rocket => write!(f, "rocket"),
            Self::Launch => write!(f, "launch"),
        }
    }
}

/// The main error type for spaceport operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to create one of the tables.
    #[error("failed to create table {table}: {source}")]
    SchemaCreate {
        /// Name of the table.
        table: &'static str,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    // === Request Errors ===
    /// No record with the requested id exists.
    #[error("{entity} with id {id} doesn't exist")]
    NotFound {
        /// Kind of record that was looked up.
        entity: Entity,
        /// The id that was requested.
        id: i64,
    },

    /// A path id that isn't a non-negative integer.
    #[error("{entity} with id '{raw}' doesn't exist")]
    MalformedId {
        /// Kind of record that was looked up.
        entity: Entity,
        /// The path segment as received.
        raw: String,
    },

    /// The request body or path couldn't be extracted at all.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the rejection.
        message: String,
    },

    /// A submitted field is missing or could not be coerced to its type.
    #[error("invalid value for field '{field}': {message}")]
    InvalidField {
        /// Name of the form field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// A launch date did not match `YYYY-MM-DDTHH:MM`.
    #[error("invalid launch date '{input}': {source}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// The underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// A foreign reference points at a row that doesn't exist.
    #[error("field '{field}' references unknown {entity} {id}")]
    UnknownReference {
        /// Name of the referencing field.
        field: &'static str,
        /// Kind of record that was referenced.
        entity: Entity,
        /// The dangling id.
        id: i64,
    },

    // === Rendering Errors ===
    /// Loading or rendering an HTML template failed.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for spaceport operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(entity: Entity, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// The HTTP status this error maps to when it escapes a request handler.
    #[must_use]
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            Self::NotFound { .. } | Self::MalformedId { .. } => StatusCode::NOT_FOUND,
            Self::InvalidField { .. }
            | Self::InvalidTimestamp { .. }
            | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
