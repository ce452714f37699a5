mod error;
use error::{error_context, generr, inerr, unkext, unparsable, wrgobj};
pub use error::Error;

mod path;
pub use path::{object_type_at, AbstPath, ObjectType};

mod directory;
pub use directory::{create_dir, ensure_parent, list_dir_content};

mod file;
pub use file::object_size;

mod saveload;
pub use saveload::{has_known_ext, load, save};

mod env;
pub use env::home_dir;
