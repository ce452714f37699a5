use super::{error_context, generr, inerr, object_type_at, wrgobj, AbstPath, Error, ObjectType};

use std::path::{Path, PathBuf};

/// Create a directory if it doesn't exist (creating subpaths recursively if needed)
pub fn create_dir(path: &AbstPath) -> Result<(), Error> {
    let errctx = error_context(format!("could not create directory at path {path}"));
    match path.object_type() {
        Some(ObjectType::Dir) => Ok(()),
        None => {
            std::fs::create_dir_all(path.to_path_buf()).map_err(inerr(errctx("create directory")))
        }
        _ => Err(generr(
            errctx("create directory"),
            "objet already exists but is not a directory",
        )),
    }
}

/// Ensures that the parent directory of an object exists, creating all the subpath
/// if it doesn't
pub fn ensure_parent(path: &AbstPath) -> Result<(), Error> {
    let errctx = error_context(format!(
        "could not ensure parent directory at path {}",
        path
    ));
    match path.parent() {
        Some(parent) if !parent.is_empty() && !parent.exists() => {
            create_dir(&parent).map_err(inerr(errctx("create parent")))
        }
        _ => Ok(()),
    }
}

/// Attempts to list the contents of a directory, in the order given by the
/// platform. The paths are the ones given by the platform, so they point at the
/// real objects even when their names are not valid unicode
pub fn list_dir_content<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, Error> {
    let path = path.as_ref();
    let errmsg = format!("could not list content of dir at path {}", path.display());
    let errctx = error_context(errmsg.clone());
    match object_type_at(path) {
        Some(ObjectType::Dir) => {}
        None => {
            return Err(wrgobj(
                errmsg + "\nDirectory doesn't exist",
                "object doesn't exist",
            ));
        }
        _ => {
            return Err(wrgobj(
                errmsg + "\nPath is not a dir",
                "object is not a directory",
            ));
        }
    }
    let mut dir_content: Vec<PathBuf> = Vec::new();
    let res = std::fs::read_dir(path).map_err(inerr(errctx("read dir")))?;
    for entry in res {
        let entry = entry.map_err(inerr(errctx("retrieve value of entry")))?;
        dir_content.push(entry.path());
    }

    Ok(dir_content)
}

#[cfg(test)]
mod tests {
    use super::{create_dir, ensure_parent, list_dir_content, AbstPath, ObjectType};

    #[test]
    fn test() {
        let tmp = tempfile::tempdir().unwrap();
        let path = AbstPath::from(tmp.path()).add_last("root");

        // create_dir
        assert!(!path.exists());
        create_dir(&path).expect("could not create dir");
        assert_eq!(path.object_type(), Some(ObjectType::Dir));
        create_dir(&path).expect("creating an existing dir should be a no-op");

        // list_dir_content
        assert!(list_dir_content(path.to_path_buf()).unwrap().is_empty());

        let file1 = path.add_last("file1.txt");
        let file2 = path.add_last("file2.png");
        let dir1 = path.add_last("dir1");
        std::fs::File::create(file1.to_path_buf()).unwrap();
        std::fs::File::create(file2.to_path_buf()).unwrap();
        create_dir(&dir1).unwrap();

        let mut dir_list = list_dir_content(path.to_path_buf())
            .unwrap()
            .into_iter()
            .map(|path| AbstPath::from(path).to_string())
            .collect::<Vec<String>>();
        dir_list.sort();

        let mut artificialdir_list = vec![file1.clone(), file2, dir1]
            .into_iter()
            .map(|path| path.to_string())
            .collect::<Vec<String>>();
        artificialdir_list.sort();

        assert_eq!(dir_list, artificialdir_list);

        assert!(list_dir_content(file1.to_path_buf()).is_err());
        assert!(list_dir_content(path.add_last("missing").to_path_buf()).is_err());
        assert!(create_dir(&file1).is_err());

        // ensure_parent
        let parent = path.add_last("test").add_last("something");
        let child = parent.add_last("file.txt");
        assert!(!parent.exists());
        ensure_parent(&child).expect("could not ensure parent directory");
        assert_eq!(parent.object_type(), Some(ObjectType::Dir));
    }
}
