use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{BackendLocal, StorageManager};

pub const BOOKMARKS_FILE: &str = "bookmarks.json";
const DEFAULT_TAG_COLOR: &str = "#3B82F6";

fn default_tag_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub name: String,
    #[serde(default = "default_tag_color")]
    pub color: String,
}

#[cfg(test)]
impl TagRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: default_tag_color(),
        }
    }
}

/// A bookmark as kept by the surrounding application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBookmark {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Read access to stored bookmarks.
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks, or only those of `owner_id` when given.
    fn list(&self, owner_id: Option<u64>) -> anyhow::Result<Vec<StoredBookmark>>;
}

fn owned_by(bookmark: &StoredBookmark, owner_id: Option<u64>) -> bool {
    owner_id.map_or(true, |owner| bookmark.owner_id == Some(owner))
}

impl BookmarkStore for Vec<StoredBookmark> {
    fn list(&self, owner_id: Option<u64>) -> anyhow::Result<Vec<StoredBookmark>> {
        Ok(self
            .iter()
            .filter(|b| owned_by(b, owner_id))
            .cloned()
            .collect())
    }
}

/// Bookmarks exported as a JSON array into the data directory.
pub struct JsonBookmarkStore {
    storage: Box<dyn StorageManager>,
    ident: String,
}

impl JsonBookmarkStore {
    pub fn new(base_path: &str) -> anyhow::Result<Self> {
        let storage = BackendLocal::new(base_path)
            .with_context(|| format!("failed to open data directory {base_path}"))?;
        Ok(Self::with_storage(Box::new(storage), BOOKMARKS_FILE))
    }

    pub fn with_storage(storage: Box<dyn StorageManager>, ident: &str) -> Self {
        Self {
            storage,
            ident: ident.to_string(),
        }
    }
}

impl BookmarkStore for JsonBookmarkStore {
    fn list(&self, owner_id: Option<u64>) -> anyhow::Result<Vec<StoredBookmark>> {
        if !self.storage.exists(&self.ident) {
            log::debug!("{} not found, no bookmarks to compare", self.ident);
            return Ok(vec![]);
        }

        let raw = self
            .storage
            .read(&self.ident)
            .with_context(|| format!("failed to read {}", self.ident))?;
        let bookmarks: Vec<StoredBookmark> = serde_json::from_slice(&raw)
            .with_context(|| format!("{} is malformed", self.ident))?;

        Ok(bookmarks
            .into_iter()
            .filter(|b| owned_by(b, owner_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: u64, owner_id: Option<u64>) -> StoredBookmark {
        StoredBookmark {
            id,
            owner_id,
            url: format!("https://example.com/{id}"),
            title: format!("Bookmark {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_vec_store_filters_by_owner() {
        let store = vec![bookmark(1, Some(1)), bookmark(2, Some(2)), bookmark(3, None)];

        assert_eq!(store.list(None).unwrap().len(), 3);
        let owned = store.list(Some(2)).unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, 2);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonBookmarkStore::new(dir.path().to_str().unwrap()).unwrap();
        assert!(store.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_json_store_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        let raw = r#"[
            {"id": 1, "owner_id": 7, "url": "https://github.com/a", "title": "A",
             "tags": [{"name": "rust"}], "created_at": "2024-05-01T10:00:00Z"},
            {"id": 2, "url": "https://github.com/b"}
        ]"#;
        BackendLocal::new(base)
            .unwrap()
            .write(BOOKMARKS_FILE, raw.as_bytes())
            .unwrap();

        let store = JsonBookmarkStore::new(base).unwrap();
        let all = store.list(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tags, vec![TagRef::new("rust")]);
        assert_eq!(all[0].tags[0].color, DEFAULT_TAG_COLOR);
        assert!(all[0].created_at.is_some());
        assert_eq!(all[1].title, "");

        let owned = store.list(Some(7)).unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, 1);
    }

    #[test]
    fn test_json_store_malformed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();
        BackendLocal::new(base)
            .unwrap()
            .write(BOOKMARKS_FILE, b"{not json")
            .unwrap();

        let err = JsonBookmarkStore::new(base).unwrap().list(None).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
