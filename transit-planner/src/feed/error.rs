//! Feed loading error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors that can occur while reading or assembling a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A feed document could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A feed document is not valid TOML for its kind
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    /// A definition names an entity the feed doesn't contain
    #[error("{referenced_by} references unknown {kind} '{id}'")]
    UnknownReference {
        kind: &'static str,
        id: String,
        referenced_by: String,
    },

    /// Two definitions of the same kind share an id
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// Route stops are keyed by something other than an integer
    #[error("route '{route}' has invalid stop sequence '{sequence}'")]
    InvalidSequence { route: String, sequence: String },

    /// A definition violates a domain invariant
    #[error("invalid {kind} '{id}': {source}")]
    Invalid {
        kind: &'static str,
        id: String,
        #[source]
        source: DomainError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::UnknownReference {
            kind: "node",
            id: "xyz".into(),
            referenced_by: "transfer 't1'".into(),
        };
        assert_eq!(err.to_string(), "transfer 't1' references unknown node 'xyz'");

        let err = FeedError::DuplicateId {
            kind: "route",
            id: "ic1".into(),
        };
        assert_eq!(err.to_string(), "duplicate route id 'ic1'");

        let err = FeedError::InvalidSequence {
            route: "ic1".into(),
            sequence: "first".into(),
        };
        assert_eq!(
            err.to_string(),
            "route 'ic1' has invalid stop sequence 'first'"
        );

        let err = FeedError::Invalid {
            kind: "route",
            id: "ic1".into(),
            source: DomainError::EmptyRoute,
        };
        assert_eq!(
            err.to_string(),
            "invalid route 'ic1': route must have at least one stop"
        );

        let err = FeedError::Io {
            path: PathBuf::from("data/nodes.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read data/nodes.toml: denied");
    }
}
