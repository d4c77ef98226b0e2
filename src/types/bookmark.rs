use serde::{Deserialize, Serialize};

/// One node of the host's bookmark tree, in the shape the extension API returns.
///
/// A node with a non-empty `url` is a leaf; every other node is a container,
/// whether or not it carries children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Creation time in Unix epoch milliseconds.
    #[serde(rename = "dateAdded", default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    pub fn leaf(title: &str, url: &str, date_added: Option<i64>) -> Self {
        Self {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            date_added,
            children: None,
        }
    }

    pub fn folder(title: Option<&str>, children: Vec<BookmarkNode>) -> Self {
        Self {
            title: title.map(str::to_string),
            url: None,
            date_added: None,
            children: Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// A leaf bookmark annotated with the `/`-joined titles of its ancestor folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatBookmarkRecord {
    pub title: String,
    pub url: String,
    pub folder_path: String,
    /// ISO-8601 UTC with millisecond precision, e.g. `2023-11-14T22:13:20.000Z`.
    pub created_at: Option<String>,
}
