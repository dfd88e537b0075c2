//! The local side of the check: the schema the custom operation lives in, and the operation
//! itself. Both are built from already parsed documents.

mod operation;
mod schema;

pub use operation::{ArgumentValue, OperationKind, RemoteOperation, RootSelection, SelectionArgument};
pub use schema::{LocalArgument, LocalField, LocalSchema, LocalType, LocalTypeKind, BUILTIN_SCALARS};
