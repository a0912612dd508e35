//! Static pages: About and the 404 document.

use super::layout::{Head, Section, base_document};
use crate::config::SiteConfig;
use crate::types::Category;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

fn default_about(config: &SiteConfig) -> Markup {
    html! {
        h2 { "Hello, I'm a wanderer." }
        p {
            "Welcome to " (config.site.title) ", a space where travel stories come to life. "
            "From bustling city streets to remote mountain trails, I share every adventure, "
            "discovery, and lesson learned along the way."
        }
        h3 { "Why I travel" }
        p {
            "Travel has a way of reshaping how we see the world and ourselves. Every destination "
            "offers a new perspective, a new flavour, and new friendships."
        }
        h3 { "What you'll find here" }
        p {
            "Honest travel stories, practical tips, cultural insights, and photography from "
            "around the globe. No sponsored fluff, just real experiences."
        }
    }
}

/// Render Markdown to HTML. Raw HTML in the source passes through, matching
/// how post content is trusted.
fn markdown(source: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(source));
    out
}

/// The About page. `body` is the Markdown from `about.md` when present.
pub fn about(config: &SiteConfig, categories: &[Category], body: Option<&str>) -> Markup {
    let text = match body {
        Some(source) => PreEscaped(markdown(source)),
        None => default_about(config),
    };
    let description = format!(
        "Learn about {} and the person behind the stories.",
        config.site.title
    );

    let content = html! {
        div.page-header {
            div.container {
                h1 { "About" }
                p { "The story behind the stories" }
            }
        }
        section.section {
            div.container.about-container {
                div.about-content {
                    div.about-image {
                        img src=(config.images.about_photo) alt="About photo" loading="lazy";
                    }
                    div.about-text {
                        (text)
                        p.about-cta { a.btn href="/blog/" { "Read the Blog →" } }
                    }
                }
            }
        }
    };

    let head = Head {
        title: "About",
        description: Some(description.as_str()),
        canonical: config.canonical_url("/about/"),
    };
    base_document(config, categories, &head, Section::About, content)
}

/// The root-level `404.html`.
pub fn not_found(config: &SiteConfig, categories: &[Category]) -> Markup {
    let content = html! {
        div.not-found {
            h1 { "404" }
            p { "Looks like this path leads nowhere." }
            a.btn href="/" { "Back to Home" }
        }
    };

    let head = Head {
        title: "404 — Page Not Found",
        ..Default::default()
    };
    base_document(config, categories, &head, Section::None, content)
}
