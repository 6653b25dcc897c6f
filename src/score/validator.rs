use super::errors::ScoreError;

/// Parses a submitted score as a decimal `i64`.
///
/// Negative values parse; stored scores are never negative, so `validate_update` rejects them.
pub fn parse_score(raw: &str) -> Result<i64, ScoreError> {
    raw.parse::<i64>()
        .map_err(|_| ScoreError::InvalidFormat(raw.to_string()))
}

/// Scores may stay level or go up, never down. Returns the value to store.
pub fn validate_update(current: i64, proposed: i64) -> Result<i64, ScoreError> {
    if proposed < current {
        return Err(ScoreError::Regression { current, proposed });
    }
    Ok(proposed)
}
