//! The fixed base plugin list.
//!
//! Everything here is declarative: each entry names a framework plugin and the
//! options it receives. The order is the framework's application order and is
//! kept exactly:
//!
//! 1. Content: Markdown sources, images, image processing, Markdown and YAML
//!    transformers, data files, link handling
//! 2. Utility: web manifest, document head, sitemap, trailing slashes
//! 3. Display: CSS pipeline, SVG loader, remote CMS source

use crate::capability::{Capability, IMAGE_PROCESSING};
use crate::config::{CmsConfig, ContentConfig, ManifestConfig, SiteSettings, SitemapConfig};
use serde_json::{Value, json};

const SOURCE_FILESYSTEM: &str = "gatsby-source-filesystem";
const MARKDOWN_COLLECTION: &str = "markdown-pages";

/// Build the base list for `settings`. Pure; no environment access.
pub fn base_plugins(settings: &SiteSettings) -> Vec<Capability> {
    let mut plugins = content_plugins(&settings.content);
    plugins.extend(utility_plugins(&settings.manifest, &settings.sitemap));
    plugins.extend(display_plugins(&settings.cms));
    plugins
}

fn filesystem_source(path: &str, name: Option<&str>) -> Capability {
    let mut options = json!({ "path": path });
    if let Some(name) = name {
        options["name"] = json!(name);
    }
    Capability::configured(SOURCE_FILESYSTEM, options)
}

fn content_plugins(content: &ContentConfig) -> Vec<Capability> {
    let root = content.root.trim_end_matches('/');
    let mut plugins = vec![filesystem_source(root, Some(MARKDOWN_COLLECTION))];
    plugins.extend(
        content
            .sections
            .iter()
            .map(|section| filesystem_source(&format!("{root}/{section}"), Some(MARKDOWN_COLLECTION))),
    );
    plugins.push(filesystem_source(&content.images, Some("images")));
    plugins.push(Capability::named(IMAGE_PROCESSING));
    plugins.push(Capability::named("gatsby-transformer-sharp"));
    plugins.push(markdown_transformer());
    plugins.push(Capability::named("gatsby-transformer-yaml"));
    plugins.push(filesystem_source(&content.data, None));
    plugins.push(Capability::named("gatsby-plugin-catch-links"));
    plugins
}

fn markdown_transformer() -> Capability {
    Capability::configured(
        "gatsby-transformer-remark",
        json!({
            "plugins": [
                {
                    "resolve": "gatsby-remark-images",
                    "options": { "sizeByPixelDensity": true, "withWebp": true },
                },
                "gatsby-remark-autolink-headers",
                "gatsby-remark-code-titles",
                "gatsby-remark-prismjs",
                "gatsby-remark-external-links",
            ]
        }),
    )
}

fn utility_plugins(manifest: &ManifestConfig, sitemap: &SitemapConfig) -> Vec<Capability> {
    vec![
        Capability::configured(
            "gatsby-plugin-manifest",
            json!({
                "name": manifest.name,
                "short_name": manifest.short_name,
                "start_url": manifest.start_url,
                "background_color": manifest.background_color,
                "theme_color": manifest.theme_color,
                "display": manifest.display,
                "icon": manifest.icon,
            }),
        ),
        Capability::named("gatsby-plugin-react-helmet"),
        Capability::configured(
            "gatsby-plugin-advanced-sitemap",
            json!({
                "query": SITEMAP_QUERY,
                "mapping": { "allMarkdownRemark": { "sitemap": "pages" } },
                "exclude": sitemap.exclude,
            }),
        ),
        Capability::named("gatsby-plugin-force-trailing-slashes"),
    ]
}

const SITEMAP_QUERY: &str = r#"{
    allMarkdownRemark {
        edges {
            node {
                id
                frontmatter {
                    published_at: date
                    feature_image: image
                }
                fields {
                    slug
                }
            }
        }
    }
}"#;

/// PostCSS steps in application order. Each is `(plugin, options)`.
fn postcss_steps() -> Vec<(&'static str, Value)> {
    vec![
        ("autoprefixer", json!({ "browsers": ["last 2 versions"] })),
        ("postcss-easy-import", json!({})),
        ("postcss-css-variables", json!({})),
        ("postcss-color-mod-function", json!({})),
        ("postcss-custom-properties", json!({ "preserve": false })),
        ("postcss-custom-media", json!({})),
        ("cssnano", json!({ "zindex": false })),
    ]
}

fn display_plugins(cms: &CmsConfig) -> Vec<Capability> {
    let steps: Vec<Value> = postcss_steps()
        .into_iter()
        .map(|(name, options)| json!({ "plugin": name, "options": options }))
        .collect();

    vec![
        Capability::configured("gatsby-plugin-postcss", json!({ "postCssPlugins": steps })),
        Capability::configured(
            "gatsby-plugin-react-svg",
            json!({ "rule": { "include": "/icons/" } }),
        ),
        Capability::configured(
            "gatsby-source-wordpress",
            json!({
                "baseUrl": cms.base_url,
                "protocol": cms.protocol,
                "hostingWPCOM": cms.hosting_wpcom,
                "verboseOutput": cms.verbose_output,
                "includedRoutes": cms.included_routes,
            }),
        ),
    ]
}
