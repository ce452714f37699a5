mod aggregate;
mod codec;
mod csub;
mod display;
mod error;
mod exclude;
mod node;
mod scan;

pub use aggregate::Rollup;
pub use codec::{load, save, PersistedNode};
pub use csub::{csub, csub_fold};
pub use display::{comma, Renderer};
pub use error::TreeError;
pub use exclude::{ExcludeList, ExcludeListError};
pub use node::{compare, Node};
pub use scan::scan;

/// Maximum nesting accepted when scanning or decoding a tree
pub const MAX_DEPTH: usize = 512;
