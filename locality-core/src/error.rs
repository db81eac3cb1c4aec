use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalityError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, LocalityError>;
