//! Chromium profile reader.
//!
//! Parses the profile's `Bookmarks` JSON file into the tree shape that
//! `chrome.bookmarks.getTree()` hands to an extension: a single untitled root
//! whose children are the bookmark bar, other bookmarks and mobile bookmarks.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::platform::host::BookmarkSource;
use crate::types::bookmark::BookmarkNode;
use crate::types::errors::SyncError;

/// Milliseconds between 1601-01-01 and 1970-01-01.
const WINDOWS_TO_UNIX_EPOCH_MS: i64 = 11_644_473_600_000;

#[derive(Debug, Deserialize)]
struct BookmarksFile {
    roots: Roots,
}

#[derive(Debug, Deserialize)]
struct Roots {
    bookmark_bar: Option<ChromiumNode>,
    other: Option<ChromiumNode>,
    synced: Option<ChromiumNode>,
}

#[derive(Debug, Deserialize)]
struct ChromiumNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    #[serde(default)]
    children: Vec<ChromiumNode>,
}

/// Reads bookmarks from a Chromium-family profile directory.
pub struct ChromiumProfile {
    bookmarks_path: PathBuf,
}

impl ChromiumProfile {
    pub fn new(profile_dir: &Path) -> Self {
        Self {
            bookmarks_path: profile_dir.join("Bookmarks"),
        }
    }

    /// Parses the content of a `Bookmarks` file.
    pub fn parse(content: &str) -> Result<Vec<BookmarkNode>, SyncError> {
        let file: BookmarksFile = serde_json::from_str(content)
            .map_err(|e| SyncError::Host(format!("invalid Bookmarks file: {}", e)))?;

        let mut top_level = Vec::new();
        for root in [file.roots.bookmark_bar, file.roots.other, file.roots.synced]
            .into_iter()
            .flatten()
        {
            top_level.push(convert(root)?);
        }

        Ok(vec![BookmarkNode::folder(Some(""), top_level)])
    }
}

impl BookmarkSource for ChromiumProfile {
    fn read_tree(&self) -> Result<Vec<BookmarkNode>, SyncError> {
        let content = fs::read_to_string(&self.bookmarks_path).map_err(|e| {
            SyncError::Host(format!("{}: {}", self.bookmarks_path.display(), e))
        })?;
        let tree = Self::parse(&content)?;
        tracing::debug!(path = %self.bookmarks_path.display(), "read chromium bookmarks");
        Ok(tree)
    }

    fn location(&self) -> &Path {
        &self.bookmarks_path
    }
}

fn convert(node: ChromiumNode) -> Result<BookmarkNode, SyncError> {
    let date_added = node
        .date_added
        .as_deref()
        .map(webkit_to_unix_millis)
        .transpose()?
        .flatten();

    match node.kind.as_str() {
        "url" => {
            let url = node.url.ok_or_else(|| {
                SyncError::Traversal(format!(
                    "url node '{}' has no url",
                    node.name.as_deref().unwrap_or_default()
                ))
            })?;
            Ok(BookmarkNode {
                title: node.name,
                url: Some(url),
                date_added,
                children: None,
            })
        }
        "folder" => {
            let children = node
                .children
                .into_iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(BookmarkNode {
                title: node.name,
                url: None,
                date_added,
                children: Some(children),
            })
        }
        other => Err(SyncError::Traversal(format!("unknown node type '{}'", other))),
    }
}

/// Converts Chromium's microseconds-since-1601 string into Unix milliseconds.
/// `"0"` means unset.
pub fn webkit_to_unix_millis(raw: &str) -> Result<Option<i64>, SyncError> {
    let micros: i64 = raw
        .trim()
        .parse()
        .map_err(|_| SyncError::Traversal(format!("invalid date_added '{}'", raw)))?;
    if micros == 0 {
        return Ok(None);
    }
    Ok(Some(micros / 1000 - WINDOWS_TO_UNIX_EPOCH_MS))
}
