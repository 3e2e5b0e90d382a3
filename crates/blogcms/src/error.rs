use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Api Error: {0}")]
    Api(String),
}

impl BlogError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        BlogError::NotFound {
            kind: "Post",
            id: id.into(),
        }
    }

    pub fn category_not_found(id: impl Into<String>) -> Self {
        BlogError::NotFound {
            kind: "Category",
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
