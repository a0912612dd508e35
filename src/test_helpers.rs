//! Shared test utilities for the wanderpress test suite.
//!
//! Provides fixture setup, record builders, and lookups that panic with a
//! clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let posts = vec![
//!     published("kyoto", "2024-03-03T09:15:00Z"),
//!     draft("oaxaca", "2024-04-01T08:00:00Z"),
//! ];
//! let categories = vec![category("c-asia", "Asia")];
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Category, Post, PostStatus};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/data/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Record builders
// =========================================================================

/// A published post whose slug, title, and excerpt derive from `id`.
pub fn published(id: &str, created_at: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        slug: id.to_string(),
        content: format!("<p>Body of {id}</p>"),
        excerpt: format!("Excerpt of {id}"),
        status: PostStatus::Published,
        created_at: created_at.to_string(),
        ..Default::default()
    }
}

/// Like [`published`] but with draft status.
pub fn draft(id: &str, created_at: &str) -> Post {
    Post {
        status: PostStatus::Draft,
        ..published(id, created_at)
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

// =========================================================================
// Markup assertions
// =========================================================================

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Assert that `html` contains `needle`, showing the document on failure.
pub fn assert_contains(html: &str, needle: &str) {
    assert!(
        html.contains(needle),
        "expected to find {needle:?} in:\n{html}"
    );
}

/// Assert that `html` does not contain `needle`, showing the document on failure.
pub fn assert_not_contains(html: &str, needle: &str) {
    assert!(
        !html.contains(needle),
        "expected not to find {needle:?} in:\n{html}"
    );
}
