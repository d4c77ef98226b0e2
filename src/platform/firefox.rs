//! Firefox profile reader.
//!
//! Rebuilds the `browser.bookmarks.getTree()` view from the profile's
//! `places.sqlite`, opened read-only so a running browser keeps its lock.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::platform::host::BookmarkSource;
use crate::types::bookmark::BookmarkNode;
use crate::types::errors::SyncError;

const TYPE_BOOKMARK: i64 = 1;
const TYPE_FOLDER: i64 = 2;
const TAGS_ROOT_GUID: &str = "tags________";

/// Titles the extension API reports for the built-in roots.
fn builtin_root_title(guid: &str) -> Option<&'static str> {
    match guid {
        "root________" => Some(""),
        "menu________" => Some("Bookmarks Menu"),
        "toolbar_____" => Some("Bookmarks Toolbar"),
        "unfiled_____" => Some("Other Bookmarks"),
        "mobile______" => Some("Mobile Bookmarks"),
        _ => None,
    }
}

struct PlacesRow {
    kind: i64,
    parent: i64,
    title: Option<String>,
    url: Option<String>,
    date_added: Option<i64>,
    guid: String,
}

/// Reads bookmarks from a Firefox profile directory.
pub struct FirefoxProfile {
    places_path: PathBuf,
}

impl FirefoxProfile {
    pub fn new(profile_dir: &Path) -> Self {
        Self {
            places_path: profile_dir.join("places.sqlite"),
        }
    }

    /// Finds the default profile under `data_dir` via its `profiles.ini`.
    pub fn discover(data_dir: &Path) -> Result<Self, SyncError> {
        let ini_path = data_dir.join("profiles.ini");
        let content = fs::read_to_string(&ini_path)
            .map_err(|e| SyncError::Host(format!("{}: {}", ini_path.display(), e)))?;
        let profile_dir = default_profile_dir(&content, data_dir).ok_or_else(|| {
            SyncError::Host(format!("no Firefox profile listed in {}", ini_path.display()))
        })?;
        Ok(Self::new(&profile_dir))
    }

    /// Loads the bookmark tree from an open `places.sqlite` connection.
    pub fn read_from(conn: &Connection) -> Result<Vec<BookmarkNode>, SyncError> {
        let mut stmt = conn
            .prepare(
                "SELECT b.id, b.type, b.parent, b.title, p.url, b.dateAdded, b.guid \
                 FROM moz_bookmarks b \
                 LEFT JOIN moz_places p ON b.fk = p.id \
                 WHERE b.type IN (1, 2) \
                 ORDER BY b.parent, b.position",
            )
            .map_err(|e| SyncError::Host(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    PlacesRow {
                        kind: row.get(1)?,
                        parent: row.get(2)?,
                        title: row.get(3)?,
                        url: row.get(4)?,
                        date_added: row.get(5)?,
                        guid: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                    },
                ))
            })
            .map_err(|e| SyncError::Host(e.to_string()))?;

        let mut items: HashMap<i64, PlacesRow> = HashMap::new();
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut root = None;
        for row in rows {
            let (id, row) = row.map_err(|e| SyncError::Host(e.to_string()))?;
            if row.parent == 0 {
                root = Some(id);
            } else {
                children.entry(row.parent).or_default().push(id);
            }
            items.insert(id, row);
        }

        let root = root.ok_or_else(|| SyncError::Host("places root not found".to_string()))?;
        let tree = build_node(root, &mut items, &children)?;
        Ok(tree.into_iter().collect())
    }
}

impl BookmarkSource for FirefoxProfile {
    fn read_tree(&self) -> Result<Vec<BookmarkNode>, SyncError> {
        // Use read-only mode to avoid locking issues
        let conn = Connection::open_with_flags(
            &self.places_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| SyncError::Host(format!("{}: {}", self.places_path.display(), e)))?;
        let tree = Self::read_from(&conn)?;
        tracing::debug!(path = %self.places_path.display(), "read firefox bookmarks");
        Ok(tree)
    }

    fn location(&self) -> &Path {
        &self.places_path
    }
}

/// Builds the subtree rooted at `id`. Each row is consumed once, so a corrupt
/// parent chain cannot loop.
fn build_node(
    id: i64,
    items: &mut HashMap<i64, PlacesRow>,
    children: &HashMap<i64, Vec<i64>>,
) -> Result<Option<BookmarkNode>, SyncError> {
    let Some(row) = items.remove(&id) else {
        return Ok(None);
    };
    if row.guid == TAGS_ROOT_GUID {
        return Ok(None);
    }

    let date_added = row.date_added.filter(|us| *us != 0).map(|us| us / 1000);

    match row.kind {
        TYPE_BOOKMARK => Ok(Some(BookmarkNode {
            title: row.title,
            url: row.url,
            date_added,
            children: None,
        })),
        TYPE_FOLDER => {
            let mut nodes = Vec::new();
            for child in children.get(&id).map(Vec::as_slice).unwrap_or_default() {
                if let Some(node) = build_node(*child, items, children)? {
                    nodes.push(node);
                }
            }
            let title = match builtin_root_title(&row.guid) {
                Some(builtin) => Some(builtin.to_string()),
                None => row.title,
            };
            Ok(Some(BookmarkNode {
                title,
                url: None,
                date_added,
                children: Some(nodes),
            }))
        }
        other => Err(SyncError::Traversal(format!(
            "unexpected bookmark type {} for id {}",
            other, id
        ))),
    }
}

/// Picks the default profile directory out of a `profiles.ini` document.
///
/// Preference order: the `Default=` of an `[Install…]` section, then the
/// `[Profile…]` marked `Default=1`, then the first profile listed.
pub fn default_profile_dir(ini: &str, data_dir: &Path) -> Option<PathBuf> {
    let mut install_default: Option<String> = None;
    let mut profiles: Vec<(String, bool, bool)> = Vec::new(); // (path, relative, default)
    let mut section = String::new();

    for line in ini.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.to_string();
            if section.starts_with("Profile") {
                profiles.push((String::new(), true, false));
            }
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        if section.starts_with("Install") && key == "Default" && install_default.is_none() {
            install_default = Some(value.to_string());
        } else if section.starts_with("Profile") {
            if let Some(profile) = profiles.last_mut() {
                match key {
                    "Path" => profile.0 = value.to_string(),
                    "IsRelative" => profile.1 = value == "1",
                    "Default" => profile.2 = value == "1",
                    _ => {}
                }
            }
        }
    }

    let resolve = |path: &str, relative: bool| {
        if relative {
            data_dir.join(path)
        } else {
            PathBuf::from(path)
        }
    };

    if let Some(path) = install_default {
        let relative = profiles
            .iter()
            .find(|(p, _, _)| *p == path)
            .map_or(true, |(_, relative, _)| *relative);
        return Some(resolve(&path, relative));
    }

    profiles
        .iter()
        .filter(|(path, _, _)| !path.is_empty())
        .find(|(_, _, default)| *default)
        .or_else(|| profiles.iter().find(|(path, _, _)| !path.is_empty()))
        .map(|(path, relative, _)| resolve(path, *relative))
}
