//! Content records shared by every pipeline stage.
//!
//! These mirror the JSON written by the authoring surface (`posts.json`,
//! `categories.json`). Every field is optional on the wire: missing, `null`,
//! or wrongly typed values deserialize to empty defaults so a sparse or
//! damaged record never aborts a build.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lifecycle state of a post. Only [`PostStatus::Published`] posts are rendered.
///
/// Anything other than the string `"published"` is treated as a draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    #[default]
    #[serde(other)]
    Draft,
}

/// A blog post as stored by the authoring surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(deserialize_with = "nullable_string")]
    pub title: String,
    /// Routing key: the post lives at `/blog/<slug>/`.
    #[serde(deserialize_with = "nullable_string")]
    pub slug: String,
    /// Pre-rendered markup from the rich-text editor. Inserted verbatim.
    #[serde(deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(deserialize_with = "nullable_string")]
    pub excerpt: String,
    /// Path to an uploaded image, e.g. `/uploads/kyoto.jpg`. May be empty.
    #[serde(deserialize_with = "nullable_string")]
    pub featured_image: String,
    /// Free-form video URL. May be empty.
    #[serde(deserialize_with = "nullable_string")]
    pub youtube_url: String,
    #[serde(deserialize_with = "lenient_status")]
    pub status: PostStatus,
    #[serde(deserialize_with = "optional_id")]
    pub category_id: Option<String>,
    #[serde(deserialize_with = "unique_tags")]
    pub tags: Vec<String>,
    /// ISO-8601 creation timestamp.
    #[serde(deserialize_with = "nullable_string")]
    pub created_at: String,
    #[serde(deserialize_with = "optional_id")]
    pub updated_at: Option<String>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// The featured image path, or `None` when the post has none.
    pub fn featured_image(&self) -> Option<&str> {
        let path = self.featured_image.trim();
        (!path.is_empty()).then_some(path)
    }
}

/// A post category. Posts reference categories by `id`; categories do not
/// know their posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "nullable_string")]
    pub id: String,
    #[serde(deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub slug: String,
}

/// The immutable, once-read copy of the content store used for one build.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
}

/// Strings pass through; `null` and every other JSON type become empty.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// `null`, missing, blank, and non-string values all mean "no value".
fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = nullable_string(deserializer)?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

fn lenient_status<'de, D>(deserializer: D) -> Result<PostStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s == "published" => PostStatus::Published,
        _ => PostStatus::Draft,
    })
}

/// Tags keep their authored order; blanks, repeats, and non-strings are
/// dropped. A non-array value means no tags.
fn unique_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in &raw {
        let Some(tag) = tag.as_str().map(str::trim) else {
            continue;
        };
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}
