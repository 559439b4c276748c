//! FAQ list-item rendering.
//!
//! Maps a post to a linked title plus an optional one-paragraph excerpt:
//!
//! ```html
//! <a href="/faq/{slug}/" class="f5 db tdn">
//!   <h4 class="... link blue fw5">{title} »</h4>
//!   <p class="... ma0 f8 lh-copy middarkgrey mb10">{excerpt}</p>   <!-- only with an excerpt -->
//! </a>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/), so titles and excerpts are escaped.

use maud::{Markup, html};
use serde::Deserialize;

/// Shared typography classes.
mod style {
    pub const P: &str = "f5 f4-l lh-copy";
    pub const SMALL: &str = "f7 f6-l lh-copy";
}

/// Words kept when an excerpt is cut from the plain-text body.
const EXCERPT_WORDS: usize = 33;

/// The subset of a CMS post the FAQ item needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub custom_excerpt: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub plaintext: Option<String>,
}

pub fn post_url(post: &Post) -> String {
    format!("/faq/{}/", post.slug)
}

/// Pick the excerpt shown under the title.
///
/// First non-blank of: `custom_excerpt`, `excerpt`, then the first
/// [`EXCERPT_WORDS`] words of `plaintext` (with `…` when cut).
pub fn post_excerpt(post: &Post) -> Option<String> {
    let non_blank = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    non_blank(&post.custom_excerpt)
        .or_else(|| non_blank(&post.excerpt))
        .or_else(|| {
            let text = non_blank(&post.plaintext)?;
            let words: Vec<&str> = text.split_whitespace().collect();
            if words.len() <= EXCERPT_WORDS {
                Some(words.join(" "))
            } else {
                Some(format!("{}…", words[..EXCERPT_WORDS].join(" ")))
            }
        })
}

/// Render one FAQ list item.
pub fn render_faq_item(post: &Post) -> Markup {
    let url = post_url(post);
    let excerpt = post_excerpt(post);
    html! {
        a href=(url) class="f5 db tdn" {
            h4 class={ (style::P) " link blue fw5" } { (post.title) " »" }
            @if let Some(excerpt) = excerpt {
                p class={ (style::SMALL) " ma0 f8 lh-copy middarkgrey mb10" } { (excerpt) }
            }
        }
    }
}

/// Render a list of FAQ items in the given order.
pub fn render_faq_list(posts: &[Post]) -> Markup {
    html! {
        div class="faq-list" {
            @for post in posts {
                (render_faq_item(post))
            }
        }
    }
}
