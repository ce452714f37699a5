use super::error::{error_context, ioerr};
use super::{ExcludeList, Node, TreeError, MAX_DEPTH};

use abst_fs::{self as fs, object_type_at, AbstPath, ObjectType};
use tracing::{debug, info, warn};

use std::path::{Path, PathBuf};

fn not_a_dir(path: &Path) -> TreeError {
    TreeError::NotADirectory {
        path: AbstPath::from(path).to_string(),
    }
}

/// Build the tree of the directory at path. Below the root, symlinks are leaves
/// and are never followed. Any failure below the root fails the whole scan
pub fn scan(root: &AbstPath, exclude_list: &ExcludeList) -> Result<Node, TreeError> {
    let root_path = root.to_path_buf();
    // The root is the only symlink that gets followed
    let target: PathBuf = match object_type_at(&root_path) {
        Some(ObjectType::Dir) => root_path,
        Some(ObjectType::SymLink) if root_path.is_dir() => {
            let errctx = error_context(format!("could not scan directory at path {root}"));
            std::fs::canonicalize(&root_path).map_err(ioerr(errctx("resolve symlink")))?
        }
        _ => return Err(not_a_dir(&root_path)),
    };
    let name = root.last().cloned().unwrap_or_default();
    let tree = scan_rec(&target, name, &AbstPath::single("."), exclude_list, 0)?;
    info!(
        path = %root,
        files = tree.file_count(),
        dirs = tree.dir_count(),
        "scanned tree"
    );
    Ok(tree)
}

fn scan_rec(
    path: &Path,
    name: String,
    rel_path: &AbstPath,
    exclude_list: &ExcludeList,
    depth: usize,
) -> Result<Node, TreeError> {
    let shown = path.display();
    let errctx = error_context(format!("could not scan directory at path {shown}"));
    if depth > MAX_DEPTH {
        return Err(TreeError::TooDeep {
            path: shown.to_string(),
            limit: MAX_DEPTH,
        });
    }

    let entries = fs::list_dir_content(path).map_err(|err| {
        // The directory might have vanished or been replaced since its parent
        //	was listed
        match object_type_at(path) {
            Some(ObjectType::Dir) => ioerr(errctx("list content of dir"))(err),
            _ => not_a_dir(path),
        }
    })?;
    debug!(path = %shown, entries = entries.len(), "scanning directory");

    let mut children: Vec<Node> = Vec::with_capacity(entries.len());
    for entry in entries {
        let shown_entry = entry.display();
        let object_type = object_type_at(&entry).ok_or_else(|| TreeError::Io {
            src: errctx(format!("get type of child at path {shown_entry}").as_str()),
            err: "child was listed but doesn't exist anymore".to_string(),
        })?;
        // Names that are not valid unicode only get a lossy rendition in the
        // tree, the entry itself is still reached through its real path
        let file_name = entry
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| TreeError::Io {
                src: errctx(format!("get filename of child at path {shown_entry}").as_str()),
                err: "child path might be ending in `..`".to_string(),
            })?;
        let rel_subpath = rel_path.add_last(&file_name);
        if exclude_list.should_exclude(&rel_subpath.to_string(), object_type == ObjectType::Dir)
        {
            debug!(path = %rel_subpath, "excluded");
            continue;
        }

        let node = match object_type {
            ObjectType::Dir => scan_rec(&entry, file_name, &rel_subpath, exclude_list, depth + 1)?,
            ObjectType::File | ObjectType::SymLink | ObjectType::Other => {
                if object_type == ObjectType::Other {
                    warn!(path = %shown_entry, "special file treated as a plain file");
                }
                let size = fs::object_size(&entry).map_err(ioerr(errctx(
                    format!("get size of child at path {shown_entry}").as_str(),
                )))?;
                Node::file(file_name, size)
            }
        };
        children.push(node);
    }

    Node::dir(name, children)
}
