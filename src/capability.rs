//! Capability descriptors: the units of the plugin list handed to the site
//! framework.
//!
//! A descriptor is opaque to the assembler. Its serialized form matches what
//! the framework expects in its plugin array:
//!
//! ```text
//! "gatsby-plugin-sharp"                                   ← bare name
//! { "resolve": "gatsby-plugin-algolia", "options": {…} }   ← with options
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image processing plugin.
pub const IMAGE_PROCESSING: &str = "gatsby-plugin-sharp";
/// Search indexing plugin.
pub const SEARCH_INDEXING: &str = "gatsby-plugin-algolia";
/// Installs the offline-support service worker.
pub const INSTALL_OFFLINE: &str = "gatsby-plugin-offline";
/// Unregisters any previously installed service worker.
pub const REMOVE_OFFLINE: &str = "gatsby-plugin-remove-serviceworker";

/// One entry in the framework's plugin list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capability {
    /// Plugin referenced by name with no options.
    Named(String),
    /// Plugin with an options object.
    Configured {
        resolve: String,
        options: Map<String, Value>,
    },
}

/// Ordered plugin list. Order is application order in the framework.
pub type CapabilityList = Vec<Capability>;

impl Capability {
    pub fn named(name: impl Into<String>) -> Self {
        Capability::Named(name.into())
    }

    /// Build a configured descriptor. `options` must serialize to a JSON
    /// object; anything else is stored as an empty options map.
    pub fn configured(name: impl Into<String>, options: Value) -> Self {
        let options = match options {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Capability::Configured {
            resolve: name.into(),
            options,
        }
    }

    /// Plugin name regardless of shape.
    pub fn name(&self) -> &str {
        match self {
            Capability::Named(name) => name,
            Capability::Configured { resolve, .. } => resolve,
        }
    }

    /// Options object, if this descriptor carries one.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            Capability::Named(_) => None,
            Capability::Configured { options, .. } => Some(options),
        }
    }

    /// Whether this descriptor is one of the two offline-support decisions.
    pub fn is_offline_decision(&self) -> bool {
        matches!(self.name(), INSTALL_OFFLINE | REMOVE_OFFLINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn named_serializes_as_bare_string() {
        let cap = Capability::named(IMAGE_PROCESSING);
        assert_eq!(serde_json::to_value(&cap).unwrap(), json!("gatsby-plugin-sharp"));
    }

    #[test]
    fn configured_serializes_with_resolve_and_options() {
        let cap = Capability::configured("gatsby-source-filesystem", json!({ "name": "images" }));
        assert_eq!(
            serde_json::to_value(&cap).unwrap(),
            json!({ "resolve": "gatsby-source-filesystem", "options": { "name": "images" } })
        );
    }

    #[test]
    fn deserializes_both_shapes() {
        let list: CapabilityList = serde_json::from_value(json!([
            "gatsby-plugin-offline",
            { "resolve": "gatsby-plugin-algolia", "options": { "chunkSize": 10000 } }
        ]))
        .unwrap();
        assert_eq!(list[0], Capability::named(INSTALL_OFFLINE));
        assert_eq!(list[1].name(), SEARCH_INDEXING);
        assert_eq!(list[1].options().unwrap()["chunkSize"], json!(10000));
    }

    #[test]
    fn non_object_options_become_empty() {
        let cap = Capability::configured("x", json!([1, 2]));
        assert!(cap.options().unwrap().is_empty());
    }

    #[test]
    fn offline_decision_detection() {
        assert!(Capability::named(INSTALL_OFFLINE).is_offline_decision());
        assert!(Capability::named(REMOVE_OFFLINE).is_offline_decision());
        assert!(!Capability::named(IMAGE_PROCESSING).is_offline_decision());
    }
}
