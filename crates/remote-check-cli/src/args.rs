use std::{fs, path::PathBuf};

use anyhow::anyhow;
use clap::Parser;
use remote_graphql_check::{IntrospectionConfig, LocalSchema, OperationKind, RemoteOperation};
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer};
use url::Url;

mod log;

use self::log::{LogLevel, LogStyle};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "remote-check", version)]
#[command(arg_required_else_help = true)]
/// Checks that a custom GraphQL operation is compatible with the schema of the remote endpoint it
/// delegates to.
pub(crate) struct Args {
    /// Path to the local schema SDL
    #[arg(long, short, env = "REMOTE_CHECK_SCHEMA_PATH")]
    pub schema: PathBuf,
    /// Path to a file holding the custom query or mutation
    #[arg(long, short)]
    pub operation: PathBuf,
    /// The local type containing the custom field, the root type matching the operation by default
    #[arg(long)]
    parent_type: Option<String>,
    /// The field the custom operation is attached to
    #[arg(long, short)]
    pub field: String,
    /// URL of the remote GraphQL endpoint
    #[arg(long, short)]
    pub url: Url,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "REMOTE_CHECK_CONFIG_PATH")]
    pub config: Option<PathBuf>,
    /// Set the logging level
    #[arg(long = "log", env = "REMOTE_CHECK_LOG", value_enum, default_value = "info")]
    log_level: LogLevel,
    /// Set the style of log output
    #[arg(long, env = "REMOTE_CHECK_LOG_STYLE", value_enum, default_value = "text")]
    log_style: LogStyle,
}

impl Args {
    /// Introspection settings from the configuration file, defaults without one.
    pub fn config(&self) -> anyhow::Result<IntrospectionConfig> {
        let Some(path) = &self.config else {
            return Ok(IntrospectionConfig::default());
        };

        let config = fs::read_to_string(path).map_err(|e| anyhow!("error loading config {}:\n{e}", path.display()))?;

        toml::from_str(&config).map_err(|e| anyhow!("error parsing config {}:\n{e}", path.display()))
    }

    pub fn local_schema(&self) -> anyhow::Result<LocalSchema> {
        let sdl = fs::read_to_string(&self.schema)
            .map_err(|e| anyhow!("error loading schema {}:\n{e}", self.schema.display()))?;

        let document = async_graphql_parser::parse_schema(sdl)
            .map_err(|e| anyhow!("error parsing schema {}:\n{e}", self.schema.display()))?;

        Ok(document.into())
    }

    pub fn remote_operation(&self) -> anyhow::Result<RemoteOperation> {
        let source = fs::read_to_string(&self.operation)
            .map_err(|e| anyhow!("error loading operation {}:\n{e}", self.operation.display()))?;

        let document = async_graphql_parser::parse_query(source)
            .map_err(|e| anyhow!("error parsing operation {}:\n{e}", self.operation.display()))?;

        Ok(document.try_into()?)
    }

    /// The type the custom field lives on. Without `--parent-type` a custom mutation is looked up on
    /// the local mutation root, anything else on the query root.
    pub fn parent_type<'a>(&'a self, schema: &'a LocalSchema, operation: &RemoteOperation) -> &'a str {
        match (&self.parent_type, operation.kind) {
            (Some(parent_type), _) => parent_type,
            (None, OperationKind::Mutation) => schema.mutation_type(),
            (None, _) => schema.query_type(),
        }
    }

    pub fn init_logging(&self) {
        tracing_subscriber::registry()
            .with(self.log_format())
            .with(self.log_level.env_filter())
            .init();
    }

    fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stderr) => layer.with_ansi(true).boxed(),
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from([
            "remote-check",
            "--schema",
            "schema.graphql",
            "--operation",
            "get_post.graphql",
            "--field",
            "getPost",
            "--url",
            "http://localhost:4000/graphql",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.parent_type, None);
        assert_eq!(args.field, "getPost");
        assert_eq!(args.url.as_str(), "http://localhost:4000/graphql");
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_style, LogStyle::Text);
        assert!(args.config.is_none());
    }

    #[test]
    fn without_config_file_uses_defaults() {
        let args = Args::try_parse_from([
            "remote-check",
            "-s",
            "schema.graphql",
            "-o",
            "op.graphql",
            "-f",
            "getPost",
            "-u",
            "http://localhost:4000/graphql",
        ])
        .unwrap();

        let config = args.config().unwrap();

        assert_eq!(config.timeout, remote_graphql_check::DEFAULT_TIMEOUT);
    }

    #[test]
    fn parent_type_defaults_to_the_matching_root() {
        let schema: LocalSchema = async_graphql_parser::parse_schema(indoc::indoc! {r"
            schema {
                query: RootQuery
                mutation: RootMutation
            }

            type RootQuery {
                getPost(id: ID!): String
            }

            type RootMutation {
                addPost(title: String!): String
            }
        "})
        .unwrap()
        .into();

        let query: RemoteOperation = async_graphql_parser::parse_query("query { getPost(id: $id) }")
            .unwrap()
            .try_into()
            .unwrap();
        let mutation: RemoteOperation = async_graphql_parser::parse_query("mutation { addPost(title: $title) }")
            .unwrap()
            .try_into()
            .unwrap();

        let args = Args::try_parse_from([
            "remote-check",
            "-s",
            "schema.graphql",
            "-o",
            "op.graphql",
            "-f",
            "getPost",
            "-u",
            "http://localhost:4000/graphql",
        ])
        .unwrap();

        assert_eq!(args.parent_type(&schema, &query), "RootQuery");
        assert_eq!(args.parent_type(&schema, &mutation), "RootMutation");

        let args = Args::try_parse_from([
            "remote-check",
            "-s",
            "schema.graphql",
            "-o",
            "op.graphql",
            "--parent-type",
            "Post",
            "-f",
            "comments",
            "-u",
            "http://localhost:4000/graphql",
        ])
        .unwrap();

        assert_eq!(args.parent_type(&schema, &mutation), "Post");
    }
}
