//! Content store loading.
//!
//! Stage 1 of the build pipeline. Reads the flat-file store written by the
//! authoring surface into an immutable [`Snapshot`]:
//!
//! ```text
//! data/
//! ├── config.toml        # Site configuration (optional)
//! ├── about.md           # About page body (optional)
//! ├── posts.json         # [Post, ...]
//! └── categories.json    # [Category, ...]
//! ```
//!
//! A missing collection file means "no records yet" and yields an empty
//! collection. A file that exists but cannot be read, is not valid JSON, or is
//! not an array is fatal: a silently empty site is worse than a failed build.
//! Within a valid array, bad field values fall back to empty defaults and a
//! record that is not an object at all is skipped with a warning.

use crate::types::{Category, Post, Snapshot};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const POSTS_FILE: &str = "posts.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const ABOUT_FILE: &str = "about.md";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Reading {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Parsing {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read the full content store once.
pub fn load(data_dir: &Path) -> Result<Snapshot, LoadError> {
    let posts: Vec<Post> = read_collection(&data_dir.join(POSTS_FILE))?;
    let categories: Vec<Category> = read_collection(&data_dir.join(CATEGORIES_FILE))?;
    tracing::info!(
        posts = posts.len(),
        categories = categories.len(),
        "loaded content store from {}",
        data_dir.display()
    );
    Ok(Snapshot { posts, categories })
}

/// Read the optional `about.md` body.
pub fn load_about(data_dir: &Path) -> Result<Option<String>, LoadError> {
    let path = data_dir.join(ABOUT_FILE);
    match fs::read_to_string(&path) {
        Ok(body) => Ok(Some(body)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(LoadError::Io { path, source }),
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_owned(),
            source,
        })?;
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value(record) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!("{}: skipping record {index}: {e}", path.display()),
        }
    }
    Ok(items)
}
