//! # Wanderpress
//!
//! A static site generator for a single-author travel blog. The authoring tool
//! keeps posts and categories in two JSON files; Wanderpress turns one
//! snapshot of them into a complete, self-contained HTML tree.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Load      data/*.json  →  Snapshot    (immutable, read once)
//! 2. Derive    Snapshot     →  Relations   (timeline, neighbours, categories)
//! 3. Generate  Relations    →  pages       (in-memory HTML)
//! 4. Write     pages        →  docs/       (clean-URL directory tree)
//! ```
//!
//! Each stage is a plain function of the previous stage's output, so unit
//! tests exercise ordering and rendering without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Post`, `Category`, `Snapshot` serde models |
//! | [`store`] | Stage 1: reads `posts.json`, `categories.json`, and `about.md` |
//! | [`derive`] | Stage 2: published timeline, prev/next neighbours, category lookup |
//! | [`generate`] | Stage 3: home, listing, post, about and 404 pages using Maud |
//! | [`write`] | Stage 4: routes, output tree, stale-route detection and pruning |
//! | [`pipeline`] | Runs the stages and reports what was built |
//! | [`config`] | `config.toml` loading, validation, merging, stock defaults |
//! | [`format`] | Escaping, dates, video ids, script-safe JSON |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Every interpolated
//! value is escaped unless explicitly wrapped in `PreEscaped`, and the only
//! field that is wrapped is post content, which the authoring tool stores as
//! markup. A title can never inject markup into a page.
//!
//! ## Deterministic Output
//!
//! The same snapshot and config always produce byte-identical files. Nothing
//! reads the clock: dates come from the posts, and the footer year is a config
//! value. Post pages render in parallel but are collected in timeline order.
//!
//! ## Clean URLs
//!
//! Each page is an `index.html` inside a directory named after its route, so
//! `/blog/kyoto-in-autumn/` works on any static host without rewrite rules.
//!
//! ## Stale Routes Are Reported, Not Silently Deleted
//!
//! Writes overwrite in place. A post that was deleted or unpublished leaves
//! its old directory behind; the build lists those and only removes them when
//! asked with `build --prune`.

pub mod config;
pub mod derive;
pub mod format;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod store;
pub mod types;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
