use std::time::Duration;

use url::Url;

use crate::local::OperationKind;

/// Failures of the introspection round trip.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("introspection request to {url} timed out after {timeout:?}")]
    Timeout { url: Url, timeout: Duration },

    #[error("could not complete introspection request to {url}: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Everything that can make a remote operation incompatible, or keep us from finding out.
///
/// Where a variant carries `expected` and `got`, `expected` is what the local schema declares
/// and `got` is what the remote schema provides.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("could not decode the introspection response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the remote server rejected the introspection query: {}", .0.join("; "))]
    IntrospectionFailed(Vec<String>),

    #[error("could not find valid data in the introspection response")]
    MissingData,

    #[error("invalid custom operation: {0}")]
    InvalidOperation(String),

    #[error("found a {0} operation, only query and mutation operations are supported")]
    UnsupportedOperationKind(OperationKind),

    #[error("{operation} `{field}` is not present in the remote schema")]
    RemoteFieldNotFound { operation: OperationKind, field: String },

    #[error("{operation} `{field}`: argument `{argument}` is not present in the remote {operation}")]
    RemoteArgumentNotFound {
        operation: OperationKind,
        field: String,
        argument: String,
    },

    #[error("{operation} `{field}`: return type mismatch, expected `{expected}` but got `{got}`")]
    ReturnTypeMismatch {
        operation: OperationKind,
        field: String,
        expected: String,
        got: String,
    },

    #[error("{operation} `{field}`: variable `{variable}` is missing from the field arguments")]
    MissingVariable {
        operation: OperationKind,
        field: String,
        variable: String,
    },

    #[error("{operation} `{field}`: type mismatch for argument `{argument}`, expected `{expected}` but got `{got}`")]
    ArgTypeMismatch {
        operation: OperationKind,
        field: String,
        argument: String,
        expected: String,
        got: String,
    },

    #[error("{operation} `{field}`: required argument `{argument}` is missing")]
    RequiredArgMissing {
        operation: OperationKind,
        field: String,
        argument: String,
    },

    #[error("arguments are only supported for custom operations on root fields, `{parent_type}.{field}` is not one")]
    NonRootArgumentsUnsupported { parent_type: String, field: String },

    #[error("unable to find the type `{0}` in the remote schema")]
    RemoteTypeNotFound(String),

    #[error("unable to find the remote type `{0}` in the local schema")]
    LocalTypeNotFound(String),

    #[error("field `{field}` of the remote type `{type_name}` is not present in the local type `{type_name}`")]
    LocalFieldNotFound { type_name: String, field: String },

    #[error("type mismatch for the field `{type_name}.{field}`, expected `{expected}` but got `{got}`")]
    FieldTypeMismatch {
        type_name: String,
        field: String,
        expected: String,
        got: String,
    },
}

impl Error {
    /// True for failures of the network round trip, timeouts included.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Timeout { .. }))
    }
}
