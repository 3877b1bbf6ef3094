use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use keepnet_schedule::{AllocationCurve, IntervalCalendar, TokenAmount};

use crate::types::*;

/// Token decimals of the reward token.
pub const TOKEN_DECIMALS: u32 = 18;

/// One whole token in the smallest unit.
pub const TOKEN_UNIT: TokenAmount = 10u128.pow(TOKEN_DECIMALS);

/// Everything governance fixes for one rewards deployment: the
/// interval calendar, the release curve, the participation floor, the
/// funded pool size, and the application keeps must be opened for.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RewardsConfig {
    /// Human-readable deployment identifier.
    pub network: String,
    /// When the first interval begins.
    pub first_interval_start: DateTime<Utc>,
    /// Uniform interval duration in seconds.
    pub interval_duration_secs: u64,
    /// Release curve, one basis-point weight per interval. The table
    /// length fixes the interval count.
    pub interval_weights_bps: Vec<u32>,
    /// Floor for the per-interval eligible keep count.
    pub minimum_keep_count: u64,
    /// Pool the ledger will be funded with, in the smallest unit.
    pub total_rewards: TokenAmount,
    /// Keeps opened for any other application earn nothing.
    #[serde(with = "hex_serde")]
    pub sanctioned_application: [u8; 32],
    /// Hash of the canonical config (computed, not trusted from file).
    #[serde(with = "hex_serde")]
    pub config_hash: [u8; 32],
}

impl RewardsConfig {
    /// Load a rewards config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: RewardsConfig = serde_json::from_str(&contents)?;
        config.config_hash = config.compute_config_hash();
        Ok(config)
    }

    /// Save the rewards config to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate all invariants of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_duration_secs == 0 {
            return Err(ConfigError::ZeroIntervalDuration);
        }
        if self.interval_weights_bps.is_empty() {
            return Err(ConfigError::NoIntervalWeights);
        }
        for (index, &weight_bps) in self.interval_weights_bps.iter().enumerate() {
            if weight_bps == 0 || weight_bps > 10_000 {
                return Err(ConfigError::InvalidWeight { index, weight_bps });
            }
        }
        if self.minimum_keep_count == 0 {
            return Err(ConfigError::ZeroMinimumKeepCount);
        }
        if self.total_rewards == 0 {
            return Err(ConfigError::ZeroTotalRewards);
        }
        if self.first_interval_start.timestamp() < 0 {
            return Err(ConfigError::PreEpochStart(
                self.first_interval_start.to_rfc3339(),
            ));
        }
        Ok(())
    }

    /// Number of intervals in the schedule.
    pub fn interval_count(&self) -> u32 {
        self.interval_weights_bps.len() as u32
    }

    /// Build the interval calendar this config describes.
    pub fn build_calendar(&self) -> Result<IntervalCalendar, ConfigError> {
        self.validate()?;
        Ok(IntervalCalendar::new(
            self.first_interval_start.timestamp() as u64,
            self.interval_duration_secs,
            self.interval_count(),
        )?)
    }

    /// Build the allocation curve this config describes.
    pub fn build_curve(&self) -> Result<AllocationCurve, ConfigError> {
        self.validate()?;
        Ok(AllocationCurve::new(self.interval_weights_bps.clone())?)
    }

    /// Compute a SHA-256 hash of the canonical JSON representation.
    pub fn compute_config_hash(&self) -> [u8; 32] {
        let canonical = CanonicalConfig {
            network: &self.network,
            first_interval_start: &self.first_interval_start,
            interval_duration_secs: self.interval_duration_secs,
            interval_weights_bps: &self.interval_weights_bps,
            minimum_keep_count: self.minimum_keep_count,
            total_rewards: self.total_rewards,
            sanctioned_application: hex::encode(self.sanctioned_application),
        };
        let json = serde_json::to_string(&canonical).expect("config serialization should not fail");
        let digest = Sha256::digest(json.as_bytes());
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash
    }

    /// The reference mainnet deployment: 24 thirty-day intervals from
    /// Sep 14 2020, front-loaded 4/8/10/12% then a flat 15% of the
    /// remainder, a floor of 4 keeps, and a 178.2M token pool.
    pub fn default_mainnet() -> Self {
        let mut interval_weights_bps = vec![400, 800, 1000, 1200];
        interval_weights_bps.extend(std::iter::repeat(1500).take(20));

        // The sanctioned application's 20-byte address, left-aligned.
        let mut sanctioned_application = [0u8; 32];
        sanctioned_application[..20].copy_from_slice(&[
            0xe2, 0x0a, 0x5c, 0x79, 0xb3, 0x9b, 0xc8, 0xc3, 0x63, 0xf0, 0xf4, 0x9a, 0xdc, 0xfa,
            0x82, 0xc2, 0xa0, 0x1a, 0xb6, 0x4a,
        ]);

        let mut config = Self {
            network: "keepnet-mainnet".to_string(),
            first_interval_start: DateTime::from_timestamp(1_600_041_600, 0)
                .expect("reference start timestamp is valid"),
            interval_duration_secs: 30 * 24 * 60 * 60,
            interval_weights_bps,
            minimum_keep_count: 4,
            total_rewards: 178_200_000 * TOKEN_UNIT,
            sanctioned_application,
            config_hash: [0u8; 32],
        };
        config.config_hash = config.compute_config_hash();
        config
    }
}

/// Internal type for canonical hashing (excludes config_hash field).
#[derive(serde::Serialize)]
struct CanonicalConfig<'a> {
    network: &'a str,
    first_interval_start: &'a DateTime<Utc>,
    interval_duration_secs: u64,
    interval_weights_bps: &'a [u32],
    minimum_keep_count: u64,
    total_rewards: TokenAmount,
    sanctioned_application: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn default_mainnet_is_valid() {
        let config = RewardsConfig::default_mainnet();
        config.validate().unwrap();
        assert_eq!(config.interval_count(), 24);
        assert_eq!(config.minimum_keep_count, 4);
        assert_eq!(config.total_rewards, 178_200_000 * TOKEN_UNIT);
    }

    #[test]
    fn default_mainnet_builds_schedule_parts() {
        let config = RewardsConfig::default_mainnet();
        let calendar = config.build_calendar().unwrap();
        let curve = config.build_curve().unwrap();

        assert_eq!(calendar.first_interval_start(), 1_600_041_600);
        assert_eq!(calendar.interval_count(), 24);
        assert_eq!(curve.len(), 24);
        assert_eq!(curve.weight_bps(0).unwrap(), 400);
        assert_eq!(curve.weight_bps(23).unwrap(), 1500);
    }

    #[test]
    fn validate_zero_duration_fails() {
        let mut config = RewardsConfig::default_mainnet();
        config.interval_duration_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroIntervalDuration)
        ));
    }

    #[test]
    fn validate_empty_weights_fails() {
        let mut config = RewardsConfig::default_mainnet();
        config.interval_weights_bps.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoIntervalWeights)
        ));
    }

    #[test]
    fn validate_overweight_entry_fails() {
        let mut config = RewardsConfig::default_mainnet();
        config.interval_weights_bps[3] = 10_001;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                index: 3,
                weight_bps: 10_001,
            })
        ));
    }

    #[test]
    fn validate_zero_minimum_fails() {
        let mut config = RewardsConfig::default_mainnet();
        config.minimum_keep_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroMinimumKeepCount)
        ));
    }

    #[test]
    fn validate_zero_pool_fails() {
        let mut config = RewardsConfig::default_mainnet();
        config.total_rewards = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTotalRewards)
        ));
    }

    #[test]
    fn config_hash_is_deterministic() {
        let c1 = RewardsConfig::default_mainnet();
        let c2 = RewardsConfig::default_mainnet();
        assert_eq!(c1.compute_config_hash(), c2.compute_config_hash());
        assert_ne!(c1.config_hash, [0u8; 32]);
    }

    #[test]
    fn config_hash_changes_with_data() {
        let c1 = RewardsConfig::default_mainnet();
        let mut c2 = c1.clone();
        c2.minimum_keep_count = 5;
        assert_ne!(c1.compute_config_hash(), c2.compute_config_hash());
    }

    #[test]
    fn serde_roundtrip() {
        let config = RewardsConfig::default_mainnet();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let config2: RewardsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.network, config2.network);
        assert_eq!(config.interval_weights_bps, config2.interval_weights_bps);
        assert_eq!(config.total_rewards, config2.total_rewards);
        assert_eq!(config.config_hash, config2.config_hash);
    }

    #[test]
    fn file_roundtrip() {
        let config = RewardsConfig::default_mainnet();
        let dir = env::temp_dir().join(format!("keepnet_config_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("rewards.json");

        config.to_file(&path).unwrap();
        let loaded = RewardsConfig::from_file(&path).unwrap();

        assert_eq!(config.network, loaded.network);
        assert_eq!(config.first_interval_start, loaded.first_interval_start);
        assert_eq!(config.config_hash, loaded.config_hash);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
