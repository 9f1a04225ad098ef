use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("failed to write output \"{name}\": {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
