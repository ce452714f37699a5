use super::{
    ensure_parent, error_context, generr, inerr, unkext, unparsable, AbstPath, Error,
};

use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, PartialEq)]
enum Ext {
    Bin,
    Toml,
    Yaml,
}
fn get_ext(path: &AbstPath) -> Option<Ext> {
    let ext = path.extension()?;
    match ext.to_ascii_lowercase().as_str() {
        "bin" => Some(Ext::Bin),
        "toml" => Some(Ext::Toml),
        "yaml" | "yml" => Some(Ext::Yaml),
        _ => None,
    }
}

/// Whether [`load`] and [`save`] know how to handle the extension of path
pub fn has_known_ext(path: &AbstPath) -> bool {
    get_ext(path).is_some()
}

/// Load the data from a file, interpreting the content of the file based on the
/// extension (see [`Ext`] for the possible extensions) of the file and deserializing
/// the content to the generic type T
pub fn load<T: DeserializeOwned>(path: &AbstPath) -> Result<T, Error> {
    let errctx = error_context(format!("could not load file at path {}", path));
    if !path.exists() {
        return Err(generr(errctx("open file"), "file doesn't exist"));
    }
    // Symlinks are followed, as long as they end up on a file
    if !path.to_path_buf().is_file() {
        return Err(generr(errctx("open file"), "object at path is not a file"));
    }

    match get_ext(path) {
        Some(Ext::Toml) => {
            let serialized = std::fs::read_to_string(path.to_path_buf())
                .map_err(inerr(errctx("read content to string")))?;
            toml::from_str(&serialized).map_err(unparsable(errctx("deserialize content from toml")))
        }
        Some(Ext::Yaml) => {
            let serialized = std::fs::read_to_string(path.to_path_buf())
                .map_err(inerr(errctx("read content to string")))?;
            serde_yaml::from_str(&serialized)
                .map_err(unparsable(errctx("deserialize content from yaml")))
        }
        Some(Ext::Bin) => {
            let file =
                std::fs::File::open(path.to_path_buf()).map_err(inerr(errctx("open file")))?;
            bincode::deserialize_from(file)
                .map_err(unparsable(errctx("deserialize content from binary")))
        }
        None => Err(unkext(path)),
    }
}
/// Save a serializable data structure of generic type T to a file, encoding the
/// serialized data based on the extension of the file (see [`Ext`] for the possible
/// extensions)
pub fn save<T: Serialize>(path: &AbstPath, content: &T) -> Result<(), Error> {
    let errctx = error_context(format!("could not save file at path {}", path));
    let serialized = match get_ext(path) {
        Some(Ext::Toml) => toml::to_string(content)
            .map_err(inerr(errctx("serialize content to toml")))?
            .into_bytes(),
        Some(Ext::Yaml) => serde_yaml::to_string(content)
            .map_err(inerr(errctx("serialize content to yaml")))?
            .into_bytes(),
        Some(Ext::Bin) => {
            bincode::serialize(content).map_err(inerr(errctx("serialize content to binary")))?
        }
        None => return Err(unkext(path)),
    };
    ensure_parent(path)?;
    std::fs::write(path.to_path_buf(), serialized).map_err(inerr(errctx("write content to file")))
}
