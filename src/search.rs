//! Search indexing settings and the indexing descriptor.
//!
//! Queries are passed through to the indexing plugin untouched; this crate
//! never computes index contents.

use crate::capability::{Capability, SEARCH_INDEXING};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Records pushed per indexing request. The plugin default is 1000; larger
/// batches mean fewer round-trips for big content sets.
pub const DEFAULT_CHUNK_SIZE: u32 = 10_000;

/// Application ID of the hosted search service.
pub const DEFAULT_APP_ID: &str = "6RCFK5TOI5";

/// One query definition handed to the indexing plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchQuery {
    /// GraphQL query selecting the records to index.
    pub query: String,
    /// Target index name.
    #[serde(rename = "indexName", alias = "index_name")]
    pub index_name: String,
    /// Index settings forwarded verbatim.
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub settings: toml::Table,
}

/// Search section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub app_id: String,
    pub chunk_size: u32,
    pub queries: Vec<SearchQuery>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            queries: default_queries(),
        }
    }
}

fn default_queries() -> Vec<SearchQuery> {
    vec![SearchQuery {
        query: r#"{
    allMarkdownRemark {
        edges {
            node {
                objectID: id
                frontmatter { title }
                fields { slug }
                excerpt(pruneLength: 5000)
            }
        }
    }
}"#
        .to_string(),
        index_name: "docs".to_string(),
        settings: toml::Table::new(),
    }]
}

/// Build the indexing descriptor for `settings` authenticated with `admin_key`.
pub fn search_descriptor(settings: &SearchSettings, admin_key: &str) -> Capability {
    Capability::configured(
        SEARCH_INDEXING,
        json!({
            "appId": settings.app_id,
            "apiKey": admin_key,
            "queries": settings.queries,
            "chunkSize": settings.chunk_size,
        }),
    )
}
