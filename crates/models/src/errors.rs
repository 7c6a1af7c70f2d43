use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("missing required field `{field}`"))
    }
}
