//! Tree Flattener.
//!
//! Turns the host's nested bookmark tree into an ordered list of leaf records,
//! each annotated with the path of folders above it. The walk is depth-first
//! pre-order with sibling order preserved, and uses an explicit stack so tree
//! depth is not bounded by the call stack.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::bookmark::{BookmarkNode, FlatBookmarkRecord};
use crate::types::errors::SyncError;

/// Title used for containers that have none.
pub const UNTITLED_FOLDER: &str = "Folder";

/// Flattens `roots` into leaf records in pre-order.
///
/// Containers contribute only their descendants; a leaf directly in `roots`
/// gets an empty folder path. The first malformed leaf aborts the walk.
pub fn flatten(roots: &[BookmarkNode]) -> Result<Vec<FlatBookmarkRecord>, SyncError> {
    let mut records = Vec::new();
    let mut stack = vec![(roots.iter(), String::new())];

    while let Some((siblings, path)) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };

        if node.is_leaf() {
            records.push(to_record(node, path)?);
        } else if let Some(children) = node.children.as_deref() {
            let child_path = child_folder_path(path, node.title.as_deref());
            stack.push((children.iter(), child_path));
        }
    }

    Ok(records)
}

/// Path handed to the children of a container titled `title` under `parent`.
pub fn child_folder_path(parent: &str, title: Option<&str>) -> String {
    let name = title.filter(|t| !t.is_empty()).unwrap_or(UNTITLED_FOLDER);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Renders epoch milliseconds as ISO-8601 UTC; zero or absent yields `None`.
pub fn created_at(date_added: Option<i64>) -> Result<Option<String>, SyncError> {
    match date_added {
        None | Some(0) => Ok(None),
        Some(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .map(|dt| Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .ok_or_else(|| SyncError::Traversal(format!("dateAdded out of range: {}", ms))),
    }
}

fn to_record(node: &BookmarkNode, folder_path: &str) -> Result<FlatBookmarkRecord, SyncError> {
    Ok(FlatBookmarkRecord {
        title: node.title.clone().unwrap_or_default(),
        url: node.url.clone().unwrap_or_default(),
        folder_path: folder_path.to_string(),
        created_at: created_at(node.date_added)?,
    })
}
