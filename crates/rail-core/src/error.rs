//! Error types for rail-core

use std::fmt;

/// Result type for rail-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of service entity named in a lookup or translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Plan,
    Run,
    Suite,
    Section,
    Status,
    Config,
    User,
    CaseType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Project => "project",
            EntityKind::Plan => "plan",
            EntityKind::Run => "run",
            EntityKind::Suite => "testsuite",
            EntityKind::Section => "section",
            EntityKind::Status => "status",
            EntityKind::Config => "config",
            EntityKind::User => "user",
            EntityKind::CaseType => "case type",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in rail-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named entity could not be resolved
    #[error("Could not find {kind} {name:?}")]
    NotFound { kind: EntityKind, name: String },

    /// A name could not be translated to a provider identifier
    #[error("Unknown {kind} name {name:?}")]
    UnknownName { kind: EntityKind, name: String },

    /// More than one of match / no-match / orphans was requested
    #[error("Conflicting match modes: {}", modes.join(", "))]
    ConflictingModes { modes: Vec<&'static str> },

    /// A record needs a service id for the requested mutation
    #[error("Case {title:?} has no id")]
    MissingId { title: String },

    /// Failure reported by the service client
    #[error("Service error: {message}")]
    Client { message: String },

    /// Filesystem error from rail-fs
    #[error(transparent)]
    Fs(#[from] rail_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn unknown(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }
}
