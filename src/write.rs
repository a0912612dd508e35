//! Output tree layout and page writing.
//!
//! Every logical page has a [`Route`]. Routes map to clean URLs by writing an
//! `index.html` inside a directory named after the routing key, so a plain
//! static file server resolves `/blog/kyoto/` without rewrite rules:
//!
//! ```text
//! docs/
//! ├── index.html                 # Home            → /
//! ├── 404.html                   # Not found       → /404.html
//! ├── about/index.html           # About           → /about/
//! └── blog/
//!     ├── index.html             # Listing         → /blog/
//!     └── kyoto-in-autumn/
//!         └── index.html         # Single post     → /blog/kyoto-in-autumn/
//! ```
//!
//! Writes overwrite in place. Post directories left behind by deleted posts
//! are detected with [`OutputWriter::stale_routes`]; removing them is an
//! explicit, separate step ([`OutputWriter::prune`]).

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const BLOG_DIR: &str = "blog";
const INDEX_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Creating directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Writing {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Scanning {path}: {source}")]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Removing stale route {path}: {source}")]
    Prune { path: PathBuf, source: io::Error },
}

/// A page's place in the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Listing,
    Post(String),
    About,
    NotFound,
}

impl Route {
    /// Site-relative URL, e.g. `/blog/kyoto/`.
    pub fn url_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Listing => format!("/{BLOG_DIR}/"),
            Route::Post(slug) => format!("/{BLOG_DIR}/{slug}/"),
            Route::About => "/about/".to_string(),
            Route::NotFound => "/404.html".to_string(),
        }
    }

    /// Output file relative to the tree root, e.g. `blog/kyoto/index.html`.
    pub fn file_path(&self) -> PathBuf {
        match self {
            Route::Home => PathBuf::from(INDEX_FILE),
            Route::Listing => Path::new(BLOG_DIR).join(INDEX_FILE),
            Route::Post(slug) => Path::new(BLOG_DIR).join(slug).join(INDEX_FILE),
            Route::About => Path::new("about").join(INDEX_FILE),
            Route::NotFound => PathBuf::from("404.html"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_path())
    }
}

/// Whether `slug` can be used as a single directory name under `blog/`.
///
/// Rejects empty slugs, `.`/`..`, path separators, and characters that would
/// change the meaning of the URL.
pub fn is_routable_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control() || c.is_whitespace())
}

/// Writes rendered pages under a root directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputWriter { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `html` at `route`, creating parent directories as needed.
    /// Returns the written file path.
    pub fn write(&self, route: &Route, html: &str) -> Result<PathBuf, WriteError> {
        let path = self.root.join(route.file_path());
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
                path: dir.to_owned(),
                source,
            })?;
        }
        fs::write(&path, html).map_err(|source| WriteError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Post routes present on disk under `blog/` but absent from `current`.
    ///
    /// Sorted by slug so reports are stable.
    pub fn stale_routes(&self, current: &[Route]) -> Result<Vec<Route>, WriteError> {
        let blog = self.root.join(BLOG_DIR);
        if !blog.is_dir() {
            return Ok(Vec::new());
        }
        let live: HashSet<&str> = current
            .iter()
            .filter_map(|r| match r {
                Route::Post(slug) => Some(slug.as_str()),
                _ => None,
            })
            .collect();

        let mut stale = Vec::new();
        for entry in WalkDir::new(&blog).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| WriteError::Scan {
                path: blog.clone(),
                source,
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("ignoring non-UTF-8 directory {}", entry.path().display());
                continue;
            };
            if !live.contains(name) {
                stale.push(Route::Post(name.to_string()));
            }
        }
        stale.sort_by(|a, b| a.url_path().cmp(&b.url_path()));
        Ok(stale)
    }

    /// Remove the directories of the given post routes.
    ///
    /// Returns the routes that are no longer on disk. Names that are not a
    /// single safe path segment are left alone with a warning.
    pub fn prune(&self, stale: &[Route]) -> Result<Vec<Route>, WriteError> {
        let mut removed = Vec::with_capacity(stale.len());
        for route in stale {
            let Route::Post(slug) = route else {
                continue;
            };
            if !is_routable_slug(slug) {
                tracing::warn!("not pruning {:?}: not a plain directory name", slug);
                continue;
            }
            let dir = self.root.join(BLOG_DIR).join(slug);
            match fs::remove_dir_all(&dir) {
                Ok(()) => tracing::info!("pruned {}", dir.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(WriteError::Prune { path: dir, source }),
            }
            removed.push(route.clone());
        }
        Ok(removed)
    }
}
