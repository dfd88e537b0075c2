//! Fetching and decoding the schema of the remote endpoint.

mod schema;
mod type_ref;

use reqwest::header::USER_AGENT;
use url::Url;

pub use schema::{Directive, EnumValue, Field, FullType, InputValue, IntrospectionSchema, RootType};
pub use type_ref::{InvalidTypeRef, TypeKind, TypeRef};

use crate::{
    error::{Error, TransportError},
    IntrospectionConfig,
};

/// The canonical introspection query. Remote servers answer it with their standard introspection
/// handler, so it must not be altered.
pub const INTROSPECTION_QUERY: &str = r"
    query {
      __schema {
        queryType { name }
        mutationType { name }
        subscriptionType { name }
        types {
          ...FullType
        }
        directives {
          name
          locations
          args {
            ...InputValue
          }
        }
      }
    }
    fragment FullType on __Type {
      kind
      name
      fields(includeDeprecated: true) {
        name
        args {
          ...InputValue
        }
        type {
          ...TypeRef
        }
        isDeprecated
        deprecationReason
      }
      inputFields {
        ...InputValue
      }
      interfaces {
        ...TypeRef
      }
      enumValues(includeDeprecated: true) {
        name
        isDeprecated
        deprecationReason
      }
      possibleTypes {
        ...TypeRef
      }
    }
    fragment InputValue on __InputValue {
      name
      type { ...TypeRef }
      defaultValue
    }
    fragment TypeRef on __Type {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
                ofType {
                  kind
                  name
                  ofType {
                    kind
                    name
                  }
                }
              }
            }
          }
        }
      }
    }
";

#[derive(Debug, serde::Serialize)]
struct Request {
    query: &'static str,
}

#[derive(Debug, serde::Deserialize)]
struct Data {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, serde::Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// Sends [`INTROSPECTION_QUERY`] to `url` and decodes the answer. One attempt, bounded by the
/// configured timeout.
pub async fn introspect(
    client: &reqwest::Client,
    url: &Url,
    config: &IntrospectionConfig,
) -> Result<IntrospectionSchema, Error> {
    let transport_error = |source: reqwest::Error| -> Error {
        if source.is_timeout() {
            TransportError::Timeout {
                url: url.clone(),
                timeout: config.timeout,
            }
            .into()
        } else {
            TransportError::Request {
                url: url.clone(),
                source,
            }
            .into()
        }
    };

    let mut request_builder = client
        .post(url.clone())
        .header(USER_AGENT, config.user_agent.as_str())
        .timeout(config.timeout)
        .json(&Request {
            query: INTROSPECTION_QUERY,
        });

    for (name, value) in &config.headers {
        request_builder = request_builder.header(name.as_str(), value.as_str());
    }

    tracing::debug!(%url, timeout = ?config.timeout, "sending introspection query");

    let body = request_builder
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(transport_error)?
        .bytes()
        .await
        .map_err(transport_error)?;

    let response: Response = serde_json::from_slice(&body)?;

    match response {
        Response { data: Some(data), .. } => {
            tracing::debug!(%url, types = data.schema.types.len(), "decoded remote schema");
            Ok(data.schema)
        }
        Response {
            data: None,
            errors: Some(errors),
        } if !errors.is_empty() => Err(Error::IntrospectionFailed(
            errors.into_iter().map(|error| error.message).collect(),
        )),
        Response { data: None, .. } => Err(Error::MissingData),
    }
}
