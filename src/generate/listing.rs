//! Blog listing: every published post as a card, plus the dataset the
//! page's script re-filters by category and free-text query.
//!
//! The server-rendered cards and the embedded dataset come from the same
//! timeline, so the page is complete without JavaScript and the client never
//! sees an unpublished post.

use super::layout::{Head, Section, base_document, post_card};
use crate::config::SiteConfig;
use crate::derive::Relations;
use crate::format::{json_for_script, short_date};
use crate::types::{Category, Post};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

const BLOG_JS: &str = include_str!("../../static/blog.js");

/// One post as seen by the client-side filter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub excerpt: &'a str,
    /// Raw value; the client applies `fallbackImage` when empty.
    pub featured_image: &'a str,
    pub category_id: Option<&'a str>,
    pub tags: &'a [String],
    pub created_at: &'a str,
    /// Pre-formatted so client-rendered cards match server-rendered ones.
    pub display_date: String,
}

impl<'a> From<&'a Post> for ListingEntry<'a> {
    fn from(post: &'a Post) -> Self {
        ListingEntry {
            id: &post.id,
            title: &post.title,
            slug: &post.slug,
            excerpt: &post.excerpt,
            featured_image: &post.featured_image,
            category_id: post.category_id.as_deref(),
            tags: &post.tags,
            created_at: &post.created_at,
            display_date: short_date(&post.created_at),
        }
    }
}

/// The complete payload embedded in `#blog-data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDataset<'a> {
    pub posts: Vec<ListingEntry<'a>>,
    pub categories: &'a [Category],
    pub fallback_image: &'a str,
}

impl<'a> ListingDataset<'a> {
    pub fn new(relations: &Relations<'a>, config: &'a SiteConfig) -> Self {
        ListingDataset {
            posts: relations
                .timeline
                .posts()
                .iter()
                .map(|p| ListingEntry::from(*p))
                .collect(),
            categories: relations.categories.all(),
            fallback_image: &config.images.fallback,
        }
    }
}

/// "3 adventures and counting"
fn story_count(n: usize) -> String {
    let noun = if n == 1 { "adventure" } else { "adventures" };
    format!("{n} {noun} and counting")
}

pub fn render(relations: &Relations, config: &SiteConfig) -> Result<Markup, serde_json::Error> {
    let timeline = &relations.timeline;
    let categories = relations.categories.all();
    let dataset = json_for_script(&ListingDataset::new(relations, config))?;

    let content = html! {
        div.page-header {
            div.container {
                h1 { "All Stories" }
                p { (story_count(timeline.len())) }
            }
        }
        section.section {
            div.container {
                div.blog-toolbar {
                    form.search-form action="/blog/" method="get" role="search" {
                        input id="search" type="text" name="q" placeholder="Search stories…" autocomplete="off";
                        button type="submit" { "Search" }
                    }
                    div.filter-bar {
                        button.filter-btn.active type="button" data-category="" { "All" }
                        @for category in categories {
                            button.filter-btn type="button" data-category=(category.id) { (category.name) }
                        }
                    }
                }
                div.post-grid id="grid" {
                    @if timeline.is_empty() {
                        div.empty-state { "No posts yet — check back soon!" }
                    }
                    @for post in timeline.posts() {
                        (post_card(post, &relations.categories, config))
                    }
                }
            }
        }
        script id="blog-data" type="application/json" { (PreEscaped(dataset)) }
        script type="module" { (PreEscaped(BLOG_JS)) }
    };

    let head = Head {
        title: "Blog — All Stories",
        description: Some("Browse all travel stories and adventures."),
        canonical: config.canonical_url("/blog/"),
    };
    Ok(base_document(config, categories, &head, Section::Blog, content))
}
