use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Invalid score format: {0:?}")]
    InvalidFormat(String),

    #[error("New score {proposed} is less than the current score {current}")]
    Regression { current: i64, proposed: i64 },
}

impl From<ScoreError> for AppError {
    fn from(error: ScoreError) -> Self {
        match error {
            ScoreError::InvalidFormat(_) => AppError::BadRequest("Invalid score format".to_string()),
            ScoreError::Regression { .. } => AppError::NotAcceptable(
                "New score is less than the current one, UNACCEPTABLE!".to_string(),
            ),
        }
    }
}
