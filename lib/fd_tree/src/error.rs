use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("File Tree Error: path is not a directory\npath: {path}")]
    NotADirectory { path: String },

    #[error("File Tree Error: cannot subtract trees, {side} operand is not a directory\nname: {name}")]
    TypeMismatch { side: &'static str, name: String },

    #[error("File Tree Error: two children share the same name and type\nname: {name}")]
    DuplicateEntry { name: String },

    #[error("File Tree Error: no directory at subtree path\npath: {path}")]
    SubtreeNotFound { path: String },

    #[error("File Tree Error: tree is nested deeper than {limit} levels\npath: {path}")]
    TooDeep { path: String, limit: usize },

    #[error("File Tree Error: malformed persisted tree.\nSource: {src}\nError: {err}")]
    Format { src: String, err: String },

    #[error("File Tree Error: filesystem access failed.\nSource: {src}\nError: {err}")]
    Io { src: String, err: String },
}

pub fn ioerr<S: std::string::ToString, E: std::error::Error>(src: S) -> impl Fn(E) -> TreeError {
    move |err: E| -> TreeError {
        TreeError::Io {
            src: src.to_string(),
            err: err.to_string(),
        }
    }
}
pub fn fmterr<S: std::string::ToString, T: std::string::ToString>(src: S, err: T) -> TreeError {
    TreeError::Format {
        src: src.to_string(),
        err: err.to_string(),
    }
}
pub fn error_context<S: std::string::ToString>(context: S) -> impl Fn(&str) -> String {
    move |failure: &str| -> String { format!("{}\nFailed to {}", context.to_string(), failure) }
}
