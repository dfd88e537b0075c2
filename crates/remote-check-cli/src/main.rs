#![cfg_attr(test, allow(unused_crate_dependencies))]

use anyhow::Context;
use remote_graphql_check::{validate_remote_operation, RemoteOperationContext};
use tokio::runtime;

mod args;

fn main() -> anyhow::Result<()> {
    let args = args::parse();
    args.init_logging();

    let config = args.config()?;
    let schema = args.local_schema()?;
    let operation = args.remote_operation()?;

    let parent_type = args.parent_type(&schema, &operation);

    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;

    runtime.block_on(async {
        let ctx = RemoteOperationContext::new(&schema, parent_type, &args.field, &operation, &args.url)
            .with_context(|| format!("{}: cannot attach the custom operation", args.schema.display()))?;

        validate_remote_operation(&reqwest::Client::new(), &ctx, &config)
            .await
            .with_context(|| {
                format!(
                    "{}: custom {} on `{}.{}` is not compatible with {}",
                    args.schema.display(),
                    operation.kind,
                    parent_type,
                    args.field,
                    args.url
                )
            })?;

        tracing::info!(
            "custom {} on `{}.{}` is compatible with {}",
            operation.kind,
            parent_type,
            args.field,
            args.url
        );

        Ok::<(), anyhow::Error>(())
    })
}
