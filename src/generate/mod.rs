//! HTML site generation.
//!
//! Stage 3 of the build pipeline. Takes the derived [`Relations`] and renders
//! every page of the site in memory. Nothing here touches the filesystem;
//! [`crate::write`] persists the result.
//!
//! ## Generated Pages
//!
//! - **Home** (`/`): newest post as a featured hero, then recent stories
//! - **Listing** (`/blog/`): every published post as a card, plus an embedded
//!   JSON dataset the page script filters by category and query
//! - **Post pages** (`/blog/<slug>/`): full content with previous/next links
//! - **About** (`/about/`): optional `about.md` rendered from Markdown
//! - **Not found** (`/404.html`)
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Interpolated values are escaped automatically; post content is the only
//! field inserted with `PreEscaped`.
//!
//! ## JavaScript
//!
//! `static/nav.js` (mobile menu) and `static/blog.js` (listing filter) are
//! embedded at compile time and inlined as module scripts, so the output tree
//! has no asset dependencies besides the stylesheet and uploaded images.

pub mod home;
pub mod layout;
pub mod listing;
pub mod pages;
pub mod post;

use crate::config::SiteConfig;
use crate::derive::Relations;
use crate::write::Route;
use rayon::prelude::*;

/// One rendered page, ready to be written.
#[derive(Debug, Clone)]
pub struct Page {
    pub route: Route,
    /// Human-readable label for build output.
    pub title: String,
    pub html: String,
}

/// Every route a build of `relations` produces, in output order.
pub fn routes(relations: &Relations) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::Listing];
    routes.extend(
        relations
            .timeline
            .posts()
            .iter()
            .map(|p| Route::Post(p.slug.clone())),
    );
    routes.push(Route::About);
    routes.push(Route::NotFound);
    routes
}

/// Render the whole site.
///
/// Pages come back in a fixed order: home, listing, posts newest first,
/// about, 404. Post pages render in parallel on the current rayon pool.
pub fn render_site(
    relations: &Relations,
    config: &SiteConfig,
    about: Option<&str>,
) -> Result<Vec<Page>, serde_json::Error> {
    let categories = relations.categories.all();
    let mut site = Vec::with_capacity(relations.timeline.len() + 4);

    site.push(Page {
        route: Route::Home,
        title: "Home".to_string(),
        html: home::render(relations, config).into_string(),
    });
    site.push(Page {
        route: Route::Listing,
        title: "Blog".to_string(),
        html: listing::render(relations, config)?.into_string(),
    });

    let posts: Vec<Page> = relations
        .timeline
        .posts()
        .par_iter()
        .enumerate()
        .map(|(index, entry)| {
            let neighbors = relations.timeline.neighbors(index);
            Page {
                route: Route::Post(entry.slug.clone()),
                title: entry.title.clone(),
                html: post::render(entry, neighbors, relations, config).into_string(),
            }
        })
        .collect();
    site.extend(posts);

    site.push(Page {
        route: Route::About,
        title: "About".to_string(),
        html: pages::about(config, categories, about).into_string(),
    });
    site.push(Page {
        route: Route::NotFound,
        title: "Not found".to_string(),
        html: pages::not_found(config, categories).into_string(),
    });

    tracing::debug!(pages = site.len(), "rendered site");
    Ok(site)
}
