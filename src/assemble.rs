//! Environment-driven plugin list assembly.
//!
//! Two independent toggles decide what gets appended after the fixed base
//! list:
//!
//! ```text
//! base list
//!   + search indexing     if (hook == "Algolia" || ALGOLIA) && admin key valid
//!   + offline decision    remove if SERVICE_WORKER_KILL_SWITCH == "true", else install
//! ```
//!
//! Every branch fails closed. An unset, empty or malformed value lands on the
//! disabled side, so a missing flag can never turn on a capability that needs
//! a secret. Assembly itself cannot fail.

use crate::capability::{Capability, CapabilityList, INSTALL_OFFLINE, REMOVE_OFFLINE};
use crate::env::{
    ALGOLIA, ALGOLIA_ADMIN_KEY, Environment, INCOMING_HOOK_TITLE, SERVICE_WORKER_KILL_SWITCH,
};
use crate::search::{SearchSettings, search_descriptor};

/// Hook title that requests an indexing build.
const SEARCH_HOOK_TITLE: &str = "Algolia";

/// Unfilled template value for the admin key.
const PLACEHOLDER_KEY: &str = "<key>";

/// True when this build was asked to push search records.
pub fn should_enable_search_indexing(env: &Environment) -> bool {
    env.get(INCOMING_HOOK_TITLE) == Some(SEARCH_HOOK_TITLE) || env.is_truthy(ALGOLIA)
}

/// True when the admin key is set, non-empty and not the `<key>` placeholder.
///
/// The placeholder check is a plain substring match: a real key that happens
/// to contain `<key>` is rejected too.
pub fn has_valid_search_credential(env: &Environment) -> bool {
    env.non_empty(ALGOLIA_ADMIN_KEY)
        .is_some_and(|key| !key.contains(PLACEHOLDER_KEY))
}

/// The two toggles, computed once per assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildDecision {
    pub enable_search_indexing: bool,
    pub remove_service_worker: bool,
}

impl BuildDecision {
    pub fn from_env(env: &Environment) -> Self {
        Self {
            enable_search_indexing: should_enable_search_indexing(env)
                && has_valid_search_credential(env),
            remove_service_worker: env.get(SERVICE_WORKER_KILL_SWITCH) == Some("true"),
        }
    }

    /// The offline descriptor this decision selects.
    pub fn offline_capability(&self) -> Capability {
        if self.remove_service_worker {
            Capability::named(REMOVE_OFFLINE)
        } else {
            Capability::named(INSTALL_OFFLINE)
        }
    }
}

/// Produce the final plugin list: a copy of `base`, then the search descriptor
/// if enabled, then exactly one offline descriptor.
pub fn assemble(base: &[Capability], env: &Environment, search: &SearchSettings) -> CapabilityList {
    let decision = BuildDecision::from_env(env);
    let mut plugins = base.to_vec();

    if decision.enable_search_indexing {
        // enable_search_indexing implies a non-empty key
        let key = env.non_empty(ALGOLIA_ADMIN_KEY).unwrap_or_default();
        plugins.push(search_descriptor(search, key));
    }

    if decision.remove_service_worker {
        tracing::info!("Remove service worker plugin");
    } else {
        tracing::info!("Install service worker plugin");
    }
    plugins.push(decision.offline_capability());

    plugins
}
