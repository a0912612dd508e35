//! CLI output formatting for the build and check commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every page leads with
//! its semantic identity (post title and timeline position) and the written
//! file follows after `→`. This makes the output readable as a content
//! inventory while still letting users find the files on disk.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Blog → blog/index.html
//!
//! Posts
//! 001 Kyoto in Autumn → blog/kyoto-in-autumn/index.html
//! 002 Lisbon by Tram → blog/lisbon-by-tram/index.html
//!
//! Pages
//! About → about/index.html
//! Not found → 404.html
//!
//! Stale routes (not pruned, rerun with --prune)
//!     /blog/deleted-post/
//!
//! Built 2 posts, 6 pages into docs
//! ```
//!
//! ## Check
//!
//! ```text
//! Content
//!     4 posts (3 published)
//!     3 categories
//!     About: about.md
//!
//! Dangling categories
//!     street-food-night-markets → c-deleted
//!
//! Routes
//! 001 /
//! 002 /blog/
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::{BuildReport, BuiltPage, CheckReport};
use crate::write::Route;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `Title → relative/file.html`, with forward slashes on every platform.
fn page_line(label: &str, file: &Path) -> String {
    let file: Vec<String> = file
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{} \u{2192} {}", label, file.join("/"))
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format build output: every written page, stale routes, and a summary.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    let (posts, fixed): (Vec<&BuiltPage>, Vec<&BuiltPage>) = report
        .pages
        .iter()
        .partition(|p| matches!(p.route, Route::Post(_)));

    for page in fixed
        .iter()
        .filter(|p| matches!(p.route, Route::Home | Route::Listing))
    {
        lines.push(page_line(&page.title, &page.file));
    }

    if !posts.is_empty() {
        lines.push(String::new());
        lines.push("Posts".to_string());
        for (idx, page) in posts.iter().enumerate() {
            let label = format!("{} {}", format_index(idx + 1), page.title);
            lines.push(page_line(&label, &page.file));
        }
    }

    lines.push(String::new());
    lines.push("Pages".to_string());
    for page in fixed
        .iter()
        .filter(|p| matches!(p.route, Route::About | Route::NotFound))
    {
        lines.push(page_line(&page.title, &page.file));
    }

    if !report.pruned.is_empty() {
        lines.push(String::new());
        lines.push("Stale routes (pruned)".to_string());
        for route in &report.pruned {
            lines.push(format!("    {}", route));
        }
    }
    if !report.stale.is_empty() {
        lines.push(String::new());
        if report.prune_requested {
            lines.push("Stale routes (left in place, not a plain directory name)".to_string());
        } else {
            lines.push("Stale routes (not pruned, rerun with --prune)".to_string());
        }
        for route in &report.stale {
            lines.push(format!("    {}", route));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Built {}, {} into {}",
        plural(posts.len(), "post", "posts"),
        plural(report.pages.len(), "page", "pages"),
        report.output_dir.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format check output: content counts, dangling references, planned routes.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        "Content".to_string(),
        format!(
            "    {} ({} published)",
            plural(report.total_posts, "post", "posts"),
            report.published
        ),
        format!("    {}", plural(report.categories, "category", "categories")),
        format!(
            "    About: {}",
            if report.has_about {
                crate::store::ABOUT_FILE
            } else {
                "built-in text"
            }
        ),
    ];

    if !report.dangling.is_empty() {
        lines.push(String::new());
        lines.push("Dangling categories".to_string());
        for (slug, category) in &report.dangling {
            lines.push(format!("    {} \u{2192} {}", slug, category));
        }
    }

    lines.push(String::new());
    lines.push("Routes".to_string());
    for (idx, route) in report.routes.iter().enumerate() {
        lines.push(format!("{} {}", format_index(idx + 1), route));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
