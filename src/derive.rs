//! Relation derivation.
//!
//! Stage 2 of the build pipeline. Turns the unordered snapshot into the views
//! every page generator shares:
//!
//! - [`Timeline`]: published posts, newest first. Ties on the creation
//!   timestamp keep their collection order (the sort is stable), and posts
//!   whose timestamp does not parse sort after all dated posts.
//! - [`Neighbors`]: the older/newer post for each timeline position.
//! - [`CategoryIndex`]: id → category lookup that tolerates dangling references.
//!
//! [`Relations::derive`] runs once per build. Generators receive a shared
//! reference and never sort or filter posts themselves, so all pages of one
//! build agree on a single ordering.

use crate::format::parse_timestamp;
use crate::types::{Category, Post, Snapshot};
use crate::write::is_routable_slug;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Everything derived from one snapshot.
#[derive(Debug)]
pub struct Relations<'a> {
    pub timeline: Timeline<'a>,
    pub categories: CategoryIndex<'a>,
}

impl<'a> Relations<'a> {
    pub fn derive(snapshot: &'a Snapshot) -> Self {
        let timeline = Timeline::derive(&snapshot.posts);
        let categories = CategoryIndex::new(&snapshot.categories);
        for post in timeline.posts() {
            match &post.category_id {
                Some(id) if categories.get(id).is_none() => {
                    tracing::debug!(post = %post.slug, category = %id, "dangling category reference");
                }
                _ => {}
            }
        }
        Relations {
            timeline,
            categories,
        }
    }
}

/// The published posts of a snapshot, newest first.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    posts: Vec<&'a Post>,
}

/// The chronological neighbours of a post within the [`Timeline`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    /// The next post back in time ("previous").
    pub older: Option<&'a Post>,
    /// The next post forward in time ("next").
    pub newer: Option<&'a Post>,
}

impl<'a> Timeline<'a> {
    pub fn derive(posts: &'a [Post]) -> Self {
        let mut published: Vec<&'a Post> = posts
            .iter()
            .filter(|p| p.is_published())
            .filter(|p| {
                let routable = is_routable_slug(&p.slug);
                if !routable {
                    tracing::warn!(id = %p.id, slug = %p.slug, "skipping published post with unroutable slug");
                }
                routable
            })
            .collect();
        for post in published.iter().filter(|p| parse_timestamp(&p.created_at).is_none()) {
            tracing::debug!(post = %post.slug, created_at = %post.created_at, "unparseable timestamp");
        }
        // Stable: equal keys keep collection order. `None` (unparseable) sorts last.
        published.sort_by_cached_key(|p| Reverse(parse_timestamp(&p.created_at)));
        Timeline { posts: published }
    }

    pub fn posts(&self) -> &[&'a Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The most recent published post.
    pub fn newest(&self) -> Option<&'a Post> {
        self.posts.first().copied()
    }

    /// Up to `count` posts following the newest one.
    pub fn after_newest(&self, count: usize) -> &[&'a Post] {
        let rest = self.posts.get(1..).unwrap_or_default();
        &rest[..rest.len().min(count)]
    }

    /// Neighbours of the post at `index`. Out-of-range indices have none.
    pub fn neighbors(&self, index: usize) -> Neighbors<'a> {
        if index >= self.posts.len() {
            return Neighbors::default();
        }
        Neighbors {
            older: self.posts.get(index + 1).copied(),
            newer: index
                .checked_sub(1)
                .and_then(|i| self.posts.get(i))
                .copied(),
        }
    }
}

/// Category lookup by id, in collection order for navigation.
#[derive(Debug, Clone)]
pub struct CategoryIndex<'a> {
    all: &'a [Category],
    by_id: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            // First definition wins, matching a linear find.
            by_id.entry(category.id.as_str()).or_insert(category);
        }
        CategoryIndex {
            all: categories,
            by_id,
        }
    }

    pub fn all(&self) -> &'a [Category] {
        self.all
    }

    pub fn get(&self, id: &str) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    /// The category a post belongs to, if its reference resolves.
    pub fn of(&self, post: &Post) -> Option<&'a Category> {
        post.category_id.as_deref().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{category, draft, published};

    fn ids<'a>(timeline: &Timeline<'a>) -> Vec<&'a str> {
        timeline.posts().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn timeline_contains_only_published() {
        let posts = vec![
            published("a", "2024-01-01T00:00:00Z"),
            draft("b", "2024-02-01T00:00:00Z"),
            published("c", "2024-03-01T00:00:00Z"),
        ];
        let timeline = Timeline::derive(&posts);
        assert_eq!(ids(&timeline), vec!["c", "a"]);
    }

    #[test]
    fn timeline_sorted_newest_first() {
        let posts = vec![
            published("mid", "2024-02-01T00:00:00Z"),
            published("old", "2023-05-01T00:00:00Z"),
            published("new", "2024-06-01T00:00:00Z"),
        ];
        assert_eq!(ids(&Timeline::derive(&posts)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn equal_timestamps_keep_collection_order() {
        let posts = vec![
            published("first", "2024-02-10T12:00:00.000Z"),
            published("newest", "2024-03-01T00:00:00Z"),
            published("second", "2024-02-10T12:00:00.000Z"),
            published("third", "2024-02-10T12:00:00Z"),
        ];
        assert_eq!(
            ids(&Timeline::derive(&posts)),
            vec!["newest", "first", "second", "third"]
        );
    }

    #[test]
    fn timestamps_compared_as_instants() {
        let posts = vec![
            published("utc", "2024-03-03T09:00:00Z"),
            published("offset", "2024-03-03T10:00:00+02:00"), // 08:00 UTC
        ];
        assert_eq!(ids(&Timeline::derive(&posts)), vec!["utc", "offset"]);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let posts = vec![
            published("broken", "yesterday"),
            published("dated", "2020-01-01T00:00:00Z"),
            published("empty", ""),
        ];
        assert_eq!(
            ids(&Timeline::derive(&posts)),
            vec!["dated", "broken", "empty"]
        );
    }

    #[test]
    fn unroutable_slugs_are_excluded() {
        let mut bad = published("bad", "2024-01-01T00:00:00Z");
        bad.slug = "../escape".to_string();
        let mut empty = published("empty", "2024-01-02T00:00:00Z");
        empty.slug = String::new();
        let posts = vec![bad, empty, published("ok", "2024-01-03T00:00:00Z")];
        assert_eq!(ids(&Timeline::derive(&posts)), vec!["ok"]);
    }

    #[test]
    fn neighbors_at_every_position() {
        let posts = vec![
            published("p0", "2024-03-01T00:00:00Z"),
            published("p1", "2024-02-01T00:00:00Z"),
            published("p2", "2024-01-01T00:00:00Z"),
        ];
        let timeline = Timeline::derive(&posts);
        for i in 0..timeline.len() {
            let n = timeline.neighbors(i);
            let newer = n.newer.map(|p| p.id.as_str());
            let older = n.older.map(|p| p.id.as_str());
            let expected_newer = i.checked_sub(1).map(|j| timeline.posts()[j].id.as_str());
            let expected_older = timeline.posts().get(i + 1).map(|p| p.id.as_str());
            assert_eq!(newer, expected_newer, "newer at {i}");
            assert_eq!(older, expected_older, "older at {i}");
        }
        assert!(timeline.neighbors(0).newer.is_none());
        assert!(timeline.neighbors(2).older.is_none());
    }

    #[test]
    fn neighbors_out_of_range_are_empty() {
        let posts = vec![published("only", "2024-03-01T00:00:00Z")];
        let timeline = Timeline::derive(&posts);
        let n = timeline.neighbors(5);
        assert!(n.older.is_none() && n.newer.is_none());
        let n = timeline.neighbors(0);
        assert!(n.older.is_none() && n.newer.is_none());
    }

    #[test]
    fn newest_and_following() {
        let posts: Vec<Post> = (0..9)
            .map(|i| published(&format!("p{i}"), &format!("2024-01-{:02}T00:00:00Z", 20 - i)))
            .collect();
        let timeline = Timeline::derive(&posts);
        assert_eq!(timeline.newest().map(|p| p.id.as_str()), Some("p0"));
        let recent: Vec<&str> = timeline.after_newest(6).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(recent, vec!["p1", "p2", "p3", "p4", "p5", "p6"]);
    }

    #[test]
    fn following_shrinks_with_few_posts() {
        let posts = vec![
            published("a", "2024-03-01T00:00:00Z"),
            published("b", "2024-02-01T00:00:00Z"),
        ];
        let timeline = Timeline::derive(&posts);
        assert_eq!(timeline.after_newest(6).len(), 1);

        let empty = Timeline::derive(&[]);
        assert!(empty.newest().is_none());
        assert!(empty.after_newest(6).is_empty());
    }

    #[test]
    fn category_lookup_tolerates_dangling_reference() {
        let categories = vec![category("c1", "Asia")];
        let index = CategoryIndex::new(&categories);

        let mut post = published("a", "2024-01-01T00:00:00Z");
        post.category_id = Some("c1".to_string());
        assert_eq!(index.of(&post).map(|c| c.name.as_str()), Some("Asia"));

        post.category_id = Some("deleted".to_string());
        assert!(index.of(&post).is_none());

        post.category_id = None;
        assert!(index.of(&post).is_none());
    }

    #[test]
    fn duplicate_category_ids_resolve_to_first() {
        let categories = vec![category("c1", "First"), category("c1", "Second")];
        let index = CategoryIndex::new(&categories);
        assert_eq!(index.get("c1").map(|c| c.name.as_str()), Some("First"));
        assert_eq!(index.all().len(), 2);
    }

    #[test]
    fn relations_derive_from_snapshot() {
        let snapshot = Snapshot {
            posts: vec![published("a", "2024-01-01T00:00:00Z")],
            categories: vec![category("c1", "Asia")],
        };
        let relations = Relations::derive(&snapshot);
        assert_eq!(relations.timeline.len(), 1);
        assert!(relations.categories.get("c1").is_some());
    }
}
