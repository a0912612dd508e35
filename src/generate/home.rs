//! Home page: the newest post as a featured hero, then recent stories.

use super::layout::{Head, Section, base_document, card_image, post_card, post_href};
use crate::config::SiteConfig;
use crate::derive::Relations;
use crate::format::css_url;
use maud::{Markup, html};

const HERO_SHADE: &str = "linear-gradient(to top,rgba(0,0,0,.7) 0,rgba(0,0,0,.2) 60%,transparent)";

pub fn render(relations: &Relations, config: &SiteConfig) -> Markup {
    let timeline = &relations.timeline;
    let recent = timeline.after_newest(config.home.recent_count);

    let hero = match timeline.newest() {
        Some(featured) => {
            let style = format!(
                "background-image:{HERO_SHADE},{}",
                css_url(card_image(featured, config))
            );
            html! {
                section.hero style=(style) {
                    div.hero-content {
                        span.hero-label { "Featured" }
                        h1 { (featured.title) }
                        p { (featured.excerpt) }
                        a.btn href=(post_href(featured)) { "Read Story" }
                    }
                }
            }
        }
        None => html! {
            section.hero.hero-placeholder {
                div.hero-content {
                    h1 { (config.site.title) }
                    p { (config.site.tagline) }
                    a.btn href="/about/" { "About This Blog" }
                }
            }
        },
    };

    let content = html! {
        (hero)
        @if !recent.is_empty() {
            section.section {
                div.container {
                    div.section-header {
                        h2 { "Recent Stories" }
                        a.view-all href="/blog/" { "View All →" }
                    }
                    div.post-grid {
                        @for post in recent {
                            (post_card(post, &relations.categories, config))
                        }
                    }
                }
            }
        }
    };

    let head = Head {
        title: "Home",
        description: Some(config.site.description.as_str()),
        canonical: config.canonical_url("/"),
    };
    base_document(
        config,
        relations.categories.all(),
        &head,
        Section::Home,
        content,
    )
}
