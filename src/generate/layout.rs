//! Shared page chrome: document shell, header, footer, and post cards.

use crate::config::SiteConfig;
use crate::derive::CategoryIndex;
use crate::format::{css_url, query_component, short_date};
use crate::types::{Category, Post};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const NAV_JS: &str = include_str!("../../static/nav.js");

const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Playfair+Display:ital,wght@0,400;0,600;0,700;1,400&family=Inter:wght@300;400;500;600&family=Lora:ital,wght@0,400;0,500;1,400&display=swap";

/// Which top-level section a page belongs to, for the header highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Blog,
    About,
    None,
}

/// Per-page `<head>` values.
#[derive(Debug, Default)]
pub struct Head<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub canonical: Option<String>,
}

/// Renders the full HTML document: head, site header, `content`, footer.
pub fn base_document(
    config: &SiteConfig,
    categories: &[Category],
    head: &Head,
    section: Section,
    content: Markup,
) -> Markup {
    let description = head.description.filter(|d| !d.trim().is_empty());
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (head.title) " | " (config.site.title) }
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                @if let Some(canonical) = &head.canonical {
                    link rel="canonical" href=(canonical);
                }
                link rel="preconnect" href="https://fonts.googleapis.com";
                link rel="stylesheet" href=(FONTS_HREF);
                link rel="stylesheet" href=(config.site.stylesheet);
            }
            body {
                (site_header(config, section))
                (content)
                (site_footer(config, categories))
                script type="module" { (PreEscaped(NAV_JS)) }
            }
        }
    }
}

/// Logo, main navigation, and the mobile menu toggle.
fn site_header(config: &SiteConfig, section: Section) -> Markup {
    let links = [
        ("/", "Home", Section::Home),
        ("/blog/", "Blog", Section::Blog),
        ("/about/", "About", Section::About),
    ];
    html! {
        header.site-header {
            div.container {
                a.logo href="/" {
                    span.logo-icon { "✦" }
                    " " (config.site.title)
                }
                nav.main-nav {
                    @for (href, label, target) in links {
                        a href=(href) class=[(section == target).then_some("active")] { (label) }
                    }
                }
                button.mobile-toggle type="button" aria-label="Menu" aria-expanded="false" {
                    span {}
                    span {}
                    span {}
                }
            }
        }
    }
}

/// Site blurb, quick links, and one filter link per category.
fn site_footer(config: &SiteConfig, categories: &[Category]) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                div.footer-grid {
                    div.footer-col {
                        h3 { "✦ " (config.site.title) }
                        p { (config.site.description) }
                    }
                    div.footer-col {
                        h4 { "Quick Links" }
                        a href="/" { "Home" }
                        a href="/blog/" { "Blog" }
                        a href="/about/" { "About" }
                    }
                    div.footer-col {
                        h4 { "Categories" }
                        @if categories.is_empty() {
                            a href="/blog/" { "All Posts" }
                        }
                        @for category in categories {
                            a href=(category_filter_href(category)) { (category.name) }
                        }
                    }
                }
                div.footer-bottom {
                    p {
                        "© "
                        @if let Some(year) = config.site.copyright_year {
                            (year) " "
                        }
                        (config.site.title) ". All rights reserved."
                    }
                }
            }
        }
    }
}

/// `/blog/?category=<id>`: the listing with that category pre-selected.
pub fn category_filter_href(category: &Category) -> String {
    format!("/blog/?category={}", query_component(&category.id))
}

/// `/blog/<slug>/`
pub fn post_href(post: &Post) -> String {
    format!("/blog/{}/", post.slug)
}

/// The card image, falling back to the configured default.
pub fn card_image<'a>(post: &'a Post, config: &'a SiteConfig) -> &'a str {
    post.featured_image().unwrap_or(&config.images.fallback)
}

/// `background-image` declaration for a card or hero.
pub fn background_image(url: &str) -> String {
    format!("background-image:{}", css_url(url))
}

/// A post summary card used on the home and listing pages.
pub fn post_card(post: &Post, categories: &CategoryIndex, config: &SiteConfig) -> Markup {
    let href = post_href(post);
    html! {
        article.post-card {
            a.post-card-image href=(href) style=(background_image(card_image(post, config))) {
                @if let Some(category) = categories.of(post) {
                    span.post-card-category { (category.name) }
                }
            }
            div.post-card-content {
                time datetime=(post.created_at) { (short_date(&post.created_at)) }
                h3 { a href=(href) { (post.title) } }
                p { (post.excerpt) }
                a.read-more href=(href) { "Read More →" }
            }
        }
    }
}
