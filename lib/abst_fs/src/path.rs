use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

trait LossyToString {
    fn lossy_to_string(&self) -> String;
}
impl LossyToString for std::ffi::OsStr {
    fn lossy_to_string(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ObjectType {
    File,
    SymLink,
    Dir,
    /// Sockets, fifos, devices and whatever else the platform can hold
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstPath(VecDeque<String>);
impl AbstPath {
    pub fn single<S: std::string::ToString>(path: S) -> AbstPath {
        AbstPath(VecDeque::from([path.to_string()]))
    }
    pub fn from<T: AsRef<Path>>(path: T) -> AbstPath {
        let components: Vec<String> = path
            .as_ref()
            .components()
            .map(|comp| comp.as_os_str().lossy_to_string())
            .collect();

        AbstPath(components.into())
    }
    pub fn to_path_buf(&self) -> PathBuf {
        let AbstPath(abst_path) = self;
        PathBuf::from_iter(abst_path)
    }

    pub fn is_empty(&self) -> bool {
        let AbstPath(path) = self;
        path.is_empty()
    }
    /// Last component as written, so that `.` or `/` still have a name
    pub fn last(&self) -> Option<&String> {
        let AbstPath(path) = self;
        path.back()
    }

    pub fn add_last<S: std::string::ToString>(&self, suffix: S) -> AbstPath {
        let AbstPath(mut path) = self.clone();
        path.push_back(suffix.to_string());
        AbstPath(path)
    }
    /// Append a raw suffix to the last component, eg: to add an extension
    pub fn append_to_last<S: std::string::ToString>(&self, suffix: S) -> AbstPath {
        let AbstPath(mut path) = self.clone();
        match path.back_mut() {
            Some(last) => last.push_str(&suffix.to_string()),
            None => path.push_back(suffix.to_string()),
        }
        AbstPath(path)
    }

    pub fn parent(&self) -> Option<AbstPath> {
        // NOTE: rely on the built in parent function to work around os specific
        //	cases, eg: the parent of ["c:", "/"] is not ["c:"]
        Some(AbstPath::from(self.to_path_buf().parent()?))
    }
    pub fn extension(&self) -> Option<&str> {
        let last = self.last()?;
        let last_dot_occurrence = last.rfind('.')?;
        let ext = &last[last_dot_occurrence + 1..];
        match ext.is_empty() {
            true => None,
            false => Some(ext),
        }
    }

    pub fn exists(&self) -> bool {
        self.object_type().is_some()
    }
    /// Type of the object at path. Symlinks are never followed, so a symlink to
    /// a directory is a `SymLink` and a dangling symlink still exists
    pub fn object_type(&self) -> Option<ObjectType> {
        object_type_at(self.to_path_buf())
    }
}

/// Same as [`AbstPath::object_type`], for platform paths that might not be
/// valid unicode
pub fn object_type_at<P: AsRef<Path>>(path: P) -> Option<ObjectType> {
    let metadata = std::fs::symlink_metadata(path).ok()?;
    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        Some(ObjectType::SymLink)
    } else if file_type.is_dir() {
        Some(ObjectType::Dir)
    } else if file_type.is_file() {
        Some(ObjectType::File)
    } else {
        Some(ObjectType::Other)
    }
}
impl std::fmt::Display for AbstPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path_buf().as_os_str().lossy_to_string())
    }
}
