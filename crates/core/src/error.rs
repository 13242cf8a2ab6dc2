use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Invalid rule id: {0}")]
    InvalidId(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
