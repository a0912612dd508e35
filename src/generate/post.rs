//! Single post page.
//!
//! Content is stored pre-rendered by the authoring tool and is inserted
//! verbatim. Every other field is plain text and escaped.

use super::layout::{Head, Section, background_image, base_document, category_filter_href, post_href};
use crate::config::SiteConfig;
use crate::derive::{Neighbors, Relations};
use crate::format::{long_date, parse_timestamp, query_component, short_date, video_id};
use crate::types::Post;
use crate::write::Route;
use maud::{Markup, PreEscaped, html};

const EMBED_ALLOW: &str =
    "accelerometer;autoplay;clipboard-write;encrypted-media;gyroscope;picture-in-picture";

/// `/blog/?q=<tag>`: the listing pre-filtered to a tag.
pub fn tag_href(tag: &str) -> String {
    format!("/blog/?q={}", query_component(tag))
}

/// Short date for the "Updated" marker, or `None` when the post was never
/// edited or the edit timestamp is unreadable.
///
/// Timestamps that parse are compared as instants, so `2024-02-10T12:00:00Z`
/// and `2024-02-10T12:00:00.000Z` count as the same moment.
fn updated_marker(post: &Post) -> Option<String> {
    let updated = post.updated_at.as_deref()?;
    let changed = match (parse_timestamp(updated), parse_timestamp(&post.created_at)) {
        (Some(u), Some(c)) => u != c,
        _ => updated != post.created_at,
    };
    if !changed {
        return None;
    }
    Some(short_date(updated)).filter(|d| !d.is_empty())
}

fn video_embed(post: &Post) -> Markup {
    html! {
        @if let Some(id) = video_id(&post.youtube_url) {
            div.video-embed {
                iframe
                    src=(format!("https://www.youtube.com/embed/{id}"))
                    title=(post.title)
                    allow=(EMBED_ALLOW)
                    allowfullscreen
                    loading="lazy" {}
            }
        }
    }
}

fn post_navigation(neighbors: &Neighbors) -> Markup {
    html! {
        nav.post-navigation {
            @match neighbors.older {
                Some(older) => {
                    a.nav-prev href=(post_href(older)) {
                        span { "← Previous" }
                        strong { (older.title) }
                    }
                }
                None => { span {} }
            }
            @match neighbors.newer {
                Some(newer) => {
                    a.nav-next href=(post_href(newer)) {
                        span { "Next →" }
                        strong { (newer.title) }
                    }
                }
                None => { span {} }
            }
        }
    }
}

pub fn render(
    post: &Post,
    neighbors: Neighbors,
    relations: &Relations,
    config: &SiteConfig,
) -> Markup {
    let category = relations.categories.of(post);
    let updated = updated_marker(post);

    let content = html! {
        article.single-post {
            @match post.featured_image() {
                Some(image) => { div.post-hero style=(background_image(image)) {} }
                None => { div.header-spacer {} }
            }
            div.post-container {
                header.post-header {
                    @if let Some(category) = category {
                        a.post-category-link href=(category_filter_href(category)) { (category.name) }
                    }
                    h1 { (post.title) }
                    div.post-meta {
                        time datetime=(post.created_at) { (long_date(&post.created_at)) }
                        @if let Some(updated) = &updated {
                            span.meta-sep { "·" }
                            span.post-updated { "Updated " (updated) }
                        }
                    }
                }
                div.post-content {
                    (PreEscaped(&post.content))
                    (video_embed(post))
                }
                @if !post.tags.is_empty() {
                    div.post-tags {
                        @for tag in &post.tags {
                            a.tag href=(tag_href(tag)) { "#" (tag) }
                        }
                    }
                }
                (post_navigation(&neighbors))
            }
        }
    };

    let route = Route::Post(post.slug.clone());
    let head = Head {
        title: &post.title,
        description: Some(post.excerpt.as_str()),
        canonical: config.canonical_url(&route.url_path()),
    };
    base_document(
        config,
        relations.categories.all(),
        &head,
        Section::Blog,
        content,
    )
}
