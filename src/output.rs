//! CLI output formatting for the `check` command.
//!
//! Each section has a `format_*` function returning lines (pure, testable) and
//! [`print_check_output`] writes them to stdout.
//!
//! ```text
//! Site
//!     Qazana Documentation
//!     URL: https://docs.qazana.net
//!
//! Decisions
//!     Search indexing: disabled
//!     Offline support: install
//!
//! Plugins
//! 001 gatsby-source-filesystem
//!     path: content
//! 002 gatsby-plugin-sharp
//! ...
//! ```

use crate::assemble::BuildDecision;
use crate::capability::Capability;
use crate::site::BuildConfig;
use serde_json::Value;

/// Option keys worth echoing under a plugin header, in display order.
const SUMMARY_KEYS: &[&str] = &["path", "name", "appId", "chunkSize", "baseUrl"];

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn format_site(config: &BuildConfig) -> Vec<String> {
    vec![
        "Site".to_string(),
        format!("{}{}", indent(1), config.site_metadata.title),
        format!("{}URL: {}", indent(1), config.site_metadata.site_url),
    ]
}

pub fn format_decision(decision: &BuildDecision) -> Vec<String> {
    let search = if decision.enable_search_indexing {
        "enabled"
    } else {
        "disabled"
    };
    let offline = if decision.remove_service_worker {
        "remove"
    } else {
        "install"
    };
    vec![
        "Decisions".to_string(),
        format!("{}Search indexing: {search}", indent(1)),
        format!("{}Offline support: {offline}", indent(1)),
    ]
}

/// One header per plugin, with scalar summary options as context lines.
/// Secrets are never printed.
pub fn format_plugins(plugins: &[Capability]) -> Vec<String> {
    let mut lines = vec!["Plugins".to_string()];
    for (i, plugin) in plugins.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), plugin.name()));
        let Some(options) = plugin.options() else {
            continue;
        };
        for key in SUMMARY_KEYS {
            if let Some(value) = options.get(*key).and_then(scalar) {
                lines.push(format!("{}{key}: {value}", indent(1)));
            }
        }
    }
    lines
}

pub fn format_check_output(config: &BuildConfig, decision: &BuildDecision) -> Vec<String> {
    let mut lines = format_site(config);
    lines.push(String::new());
    lines.extend(format_decision(decision));
    lines.push(String::new());
    lines.extend(format_plugins(&config.plugins));
    lines
}

pub fn print_check_output(config: &BuildConfig, decision: &BuildDecision) {
    for line in format_check_output(config, decision) {
        println!("{}", line);
    }
}
