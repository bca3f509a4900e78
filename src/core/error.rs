use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
