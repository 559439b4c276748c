//! # docsite
//!
//! Build configuration for a static documentation site. The site itself is
//! generated by an external framework; this crate decides *what that
//! framework is told to do*: site metadata plus an ordered plugin list.
//!
//! # Pipeline
//!
//! ```text
//! config.toml ──► SiteSettings ──► base plugin list ─┐
//!                                                   ├─► assemble ──► BuildConfig (JSON)
//! process env + .env.<NODE_ENV> ──► Environment ────┘
//! ```
//!
//! The environment is captured once and injected. Nothing below `main`
//! reads process-wide state, so every decision is a pure function of its
//! inputs and can be tested with a hand-built [`env::Environment`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`env`] | Immutable environment snapshot, dotenv layering |
//! | [`capability`] | Plugin descriptors and their framework JSON shape |
//! | [`assemble`] | Search-indexing and offline-support toggles, final list assembly |
//! | [`plugins`] | The fixed base plugin list |
//! | [`search`] | Search query definitions and the indexing descriptor |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`site`] | Site metadata and the complete `BuildConfig` |
//! | [`faq`] | FAQ list-item rendering |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | tracing subscriber setup |
//!
//! # Fail-Closed Toggles
//!
//! Search indexing needs a secret. It is only enabled when a build explicitly
//! asks for it *and* a usable admin key is present; the `<key>` template
//! placeholder counts as absent. The service worker is removed only when the
//! kill switch is exactly `"true"`. Anything else, including typos, keeps the
//! default: no indexing, offline support installed.

pub mod assemble;
pub mod capability;
pub mod config;
pub mod env;
pub mod faq;
pub mod logging;
pub mod output;
pub mod plugins;
pub mod search;
pub mod site;
