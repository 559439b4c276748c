//! The final build configuration handed to the site framework.

use crate::assemble::{BuildDecision, assemble};
use crate::capability::CapabilityList;
use crate::config::SiteSettings;
use crate::env::{Environment, SITE_URL};
use crate::plugins::base_plugins;
use serde::{Deserialize, Serialize};

/// Metadata exposed to page templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    pub title: String,
    pub site_url: String,
    pub description: String,
}

/// `{ siteMetadata, plugins }` as consumed by the framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub site_metadata: SiteMetadata,
    pub plugins: CapabilityList,
}

/// Resolve site metadata. A non-empty `SITE_URL` replaces the configured URL.
pub fn site_metadata(settings: &SiteSettings, env: &Environment) -> SiteMetadata {
    let site_url = env
        .non_empty(SITE_URL)
        .unwrap_or(settings.site.site_url.as_str())
        .to_string();
    SiteMetadata {
        title: settings.site.title.clone(),
        site_url,
        description: settings.site.description.clone(),
    }
}

/// Assemble the complete configuration for one build.
pub fn build_config(settings: &SiteSettings, env: &Environment) -> BuildConfig {
    let decision = BuildDecision::from_env(env);
    tracing::debug!(
        search = decision.enable_search_indexing,
        remove_service_worker = decision.remove_service_worker,
        "build decision"
    );
    BuildConfig {
        site_metadata: site_metadata(settings, env),
        plugins: assemble(&base_plugins(settings), env, &settings.search),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{INSTALL_OFFLINE, REMOVE_OFFLINE, SEARCH_INDEXING};
    use crate::env::{ALGOLIA, ALGOLIA_ADMIN_KEY, SERVICE_WORKER_KILL_SWITCH};
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        pairs.iter().copied().collect()
    }

    #[test]
    fn site_url_from_env_wins() {
        let meta = site_metadata(
            &SiteSettings::default(),
            &env(&[(SITE_URL, "https://staging.example.com")]),
        );
        assert_eq!(meta.site_url, "https://staging.example.com");
    }

    #[test]
    fn empty_site_url_falls_back_to_config() {
        let meta = site_metadata(&SiteSettings::default(), &env(&[(SITE_URL, "")]));
        assert_eq!(meta.site_url, "https://docs.qazana.net");
    }

    #[test]
    fn build_config_appends_toggles_after_base() {
        let settings = SiteSettings::default();
        let base_len = base_plugins(&settings).len();
        let config = build_config(
            &settings,
            &env(&[
                (ALGOLIA, "1"),
                (ALGOLIA_ADMIN_KEY, "abc123"),
                (SERVICE_WORKER_KILL_SWITCH, "true"),
            ]),
        );
        assert_eq!(config.plugins.len(), base_len + 2);
        assert_eq!(config.plugins[base_len].name(), SEARCH_INDEXING);
        assert_eq!(config.plugins[base_len + 1].name(), REMOVE_OFFLINE);
    }

    #[test]
    fn build_config_serializes_camel_case() {
        let config = build_config(&SiteSettings::default(), &Environment::empty());
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["siteMetadata"]["siteUrl"], "https://docs.qazana.net");
        let plugins = value["plugins"].as_array().unwrap();
        assert_eq!(plugins.last(), Some(&json!(INSTALL_OFFLINE)));
    }
}
