//! Build orchestration.
//!
//! Runs the stages in order and reports what was produced:
//!
//! ```text
//! 1. Load      data/*.json       →  Snapshot     (store)
//! 2. Derive    Snapshot          →  Relations    (derive)
//! 3. Generate  Relations         →  Vec<Page>    (generate)
//! 4. Write     Vec<Page>         →  docs/        (write)
//! ```
//!
//! Relations are derived exactly once per build and shared by every
//! generator. Rendering happens entirely in memory before the first write, so
//! a render failure leaves the previous output tree untouched.

use crate::config::{self, ConfigError, SiteConfig};
use crate::derive::Relations;
use crate::generate::{self, Page};
use crate::store::{self, LoadError};
use crate::write::{OutputWriter, Route, WriteError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

/// Inputs for a full build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding `posts.json`, `categories.json`, and the optional
    /// `config.toml` and `about.md`.
    pub data_dir: PathBuf,
    /// Root of the generated tree.
    pub output_dir: PathBuf,
    /// Remove stale post directories instead of only reporting them.
    pub prune: bool,
}

/// A page as written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    pub route: Route,
    pub title: String,
    /// Path relative to the output root.
    pub file: PathBuf,
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// In write order: home, listing, posts newest first, about, 404.
    pub pages: Vec<BuiltPage>,
    /// Post directories still on disk with no current route.
    pub stale: Vec<Route>,
    /// Stale post directories removed by this build.
    pub pruned: Vec<Route>,
    /// Whether pruning was requested.
    pub prune_requested: bool,
}

impl BuildReport {
    pub fn post_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.route, Route::Post(_)))
            .count()
    }
}

/// The result of loading and deriving without writing anything.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub routes: Vec<Route>,
    pub total_posts: usize,
    pub published: usize,
    pub categories: usize,
    /// `(post slug, category id)` for published posts whose category is missing.
    pub dangling: Vec<(String, String)>,
    pub has_about: bool,
}

/// Run the complete build.
pub fn build(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let _span = tracing::info_span!("build", data = %options.data_dir.display()).entered();

    let config = config::load_config(&options.data_dir)?;
    let snapshot = store::load(&options.data_dir)?;
    let about = store::load_about(&options.data_dir)?;

    let relations = Relations::derive(&snapshot);
    let pages = generate::render_site(&relations, &config, about.as_deref())?;
    let routes: Vec<Route> = pages.iter().map(|p| p.route.clone()).collect();

    let writer = OutputWriter::new(&options.output_dir);
    let built = write_pages(&writer, pages)?;

    let mut stale = writer.stale_routes(&routes)?;
    let pruned = if options.prune {
        writer.prune(&stale)?
    } else {
        Vec::new()
    };
    stale.retain(|route| !pruned.contains(route));
    for route in &stale {
        tracing::warn!(%route, "stale route left from an earlier build");
    }

    Ok(BuildReport {
        output_dir: options.output_dir.clone(),
        pages: built,
        stale,
        pruned,
        prune_requested: options.prune,
    })
}

fn write_pages(writer: &OutputWriter, pages: Vec<Page>) -> Result<Vec<BuiltPage>, WriteError> {
    let _span = tracing::info_span!("write", root = %writer.root().display()).entered();
    pages
        .into_iter()
        .map(|page| {
            writer.write(&page.route, &page.html)?;
            tracing::debug!(route = %page.route, bytes = page.html.len(), "wrote page");
            Ok(BuiltPage {
                file: page.route.file_path(),
                route: page.route,
                title: page.title,
            })
        })
        .collect()
}

/// Load config and data, derive relations, and list the routes a build
/// would write.
pub fn check(data_dir: &Path) -> Result<CheckReport, BuildError> {
    let _span = tracing::info_span!("check", data = %data_dir.display()).entered();

    let config: SiteConfig = config::load_config(data_dir)?;
    tracing::debug!(title = %config.site.title, "config ok");
    let snapshot = store::load(data_dir)?;
    let about = store::load_about(data_dir)?;
    let relations = Relations::derive(&snapshot);

    let dangling = relations
        .timeline
        .posts()
        .iter()
        .filter_map(|post| match &post.category_id {
            Some(id) if relations.categories.get(id).is_none() => {
                Some((post.slug.clone(), id.clone()))
            }
            _ => None,
        })
        .collect();

    Ok(CheckReport {
        routes: generate::routes(&relations),
        total_posts: snapshot.posts.len(),
        published: relations.timeline.len(),
        categories: snapshot.categories.len(),
        dangling,
        has_about: about.is_some(),
    })
}
