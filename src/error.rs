use thiserror::Error;

pub type GuideResult<T> = Result<T, GuideError>;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Unknown page '{0}'")]
    UnknownPage(String),

    #[error("Unknown item '{item}' on page '{page}'")]
    UnknownItem { page: String, item: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

