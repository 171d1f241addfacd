use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty {0}")]
    EmptyLibrary(&'static str),
}
