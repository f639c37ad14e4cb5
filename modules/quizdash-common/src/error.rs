use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizDashError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Reference error in step {step}: no node for key {key}")]
    Reference { step: String, key: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl QuizDashError {
    /// Attach the loader step that raised a reference failure.
    pub fn in_step(self, step: &str) -> Self {
        match self {
            QuizDashError::Reference { key, .. } => QuizDashError::Reference {
                step: step.to_string(),
                key,
            },
            other => other,
        }
    }
}
