use std::{collections::BTreeMap, time::Duration};

/// Upper bound for the whole introspection round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_USER_AGENT: &str = "remote-graphql-check";

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Settings for the introspection request sent to the remote endpoint.
pub struct IntrospectionConfig {
    /// Timeout for the introspection request. Default: 5 seconds.
    #[serde(deserialize_with = "duration_str::deserialize_duration")]
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Extra headers sent with the request, e.g. for authentication.
    pub headers: BTreeMap<String, String>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: BTreeMap::new(),
        }
    }
}
