use serde::{Deserialize, Serialize};

use super::{models::PlayerScore, statistics::ScoreStatistics};

/// Serde adapter writing an `i64` as a JSON string so 64-bit scores survive JSON consumers
pub mod decimal_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Same as [`decimal_string`] for a list of values
pub mod decimal_strings {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[i64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|value| value.to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|raw| raw.parse().map_err(de::Error::custom))
            .collect()
    }
}

/// Request payload for submitting a new score
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateScoreRequest {
    /// Decimal string, parsed by the score validator
    #[serde(default)]
    pub score: String,
}

/// Response for a successful join; the fresh score is always the number 0
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JoinGameResponse {
    pub message: String,
    pub score: i64,
}

/// Response for a successful score update
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoreResponse {
    #[serde(with = "decimal_string")]
    pub score: i64,
}

/// One row of a game's leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(with = "decimal_string")]
    pub score: i64,
}

impl From<PlayerScore> for LeaderboardEntry {
    fn from(score: PlayerScore) -> Self {
        Self {
            username: score.username,
            score: score.value,
        }
    }
}

/// Response for the statistics endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatisticsResponse {
    #[serde(with = "decimal_string")]
    pub mean: i64,
    #[serde(with = "decimal_string")]
    pub median: i64,
    #[serde(with = "decimal_strings")]
    pub mode: Vec<i64>,
}

impl From<ScoreStatistics> for StatisticsResponse {
    fn from(stats: ScoreStatistics) -> Self {
        Self {
            mean: stats.mean,
            median: stats.median,
            mode: stats.mode,
        }
    }
}
