//! Checks that a custom operation delegating a field to a remote GraphQL endpoint is compatible with
//! that endpoint, ahead of runtime. The intended workflow is the following:
//!
//! - Convert the parsed local schema into a [LocalSchema] and the parsed custom operation into a
//!   [RemoteOperation].
//! - Build a [RemoteOperationContext] for the field the operation is attached to.
//! - Run [validate_remote_operation()], which introspects the endpoint and runs
//!   [check_remote_operation()] on the result.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod check;
mod config;
mod error;
mod expand;
pub mod introspection;
mod local;

pub use check::{check_remote_operation, RemoteOperationContext};
pub use config::{IntrospectionConfig, DEFAULT_TIMEOUT};
pub use error::{Error, TransportError};
pub use expand::{expand, ExpandedField, ExpandedTypes};
pub use introspection::{introspect, IntrospectionSchema, INTROSPECTION_QUERY};
pub use local::*;

/// Introspects the remote endpoint of `ctx` and checks the custom operation against it.
#[tracing::instrument(
    skip_all,
    fields(url = %ctx.url, operation = %ctx.operation.kind, field = %ctx.operation.selection.name)
)]
pub async fn validate_remote_operation(
    client: &reqwest::Client,
    ctx: &RemoteOperationContext<'_>,
    config: &IntrospectionConfig,
) -> Result<(), Error> {
    let remote = introspect(client, ctx.url, config).await?;

    check_remote_operation(ctx, &remote)
}
