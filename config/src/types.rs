use keepnet_schedule::ScheduleError;

/// Rewards deployment configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("interval duration must be > 0")]
    ZeroIntervalDuration,

    #[error("configuration must define at least one interval weight")]
    NoIntervalWeights,

    #[error("interval weight at index {index} is {weight_bps} bps, must be in 1..=10000")]
    InvalidWeight { index: usize, weight_bps: u32 },

    #[error("minimum keep count must be > 0")]
    ZeroMinimumKeepCount,

    #[error("total rewards must be > 0")]
    ZeroTotalRewards,

    #[error("first interval start {0} precedes the unix epoch")]
    PreEpochStart(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Helper module for serializing [u8; 32] as hex strings in JSON.
pub(crate) mod hex_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}
