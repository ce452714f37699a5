use super::{error_context, inerr, object_type_at, wrgobj, Error};

use std::path::Path;

/// Size in bytes of the object at path, as reported by the platform. Symlinks
/// are not followed: the size is the one of the link itself
pub fn object_size<P: AsRef<Path>>(path: P) -> Result<u64, Error> {
    let path = path.as_ref();
    let errmsg = format!("could not get size of object at path {}", path.display());
    let errctx = error_context(errmsg.clone());
    if object_type_at(path).is_none() {
        return Err(wrgobj(
            errmsg + "\nObject doesn't exist",
            "object doesn't exist",
        ));
    }
    let metadata = std::fs::symlink_metadata(path).map_err(inerr(errctx("read metadata")))?;
    Ok(metadata.len())
}
