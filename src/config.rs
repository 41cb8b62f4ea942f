//! Learner Configuration
//!
//! Parameters of the [`RandomTreeLearner`](crate::RandomTreeLearner) and helpers
//! to read and write them as json.
use crate::constants::DEFAULT_LEAF_SIZE;
use crate::errors::RandomTreeError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_leaf_size() -> usize {
    DEFAULT_LEAF_SIZE
}

/// Configuration for the `RandomTreeLearner`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Maximum number of samples aggregated into a leaf.
    #[serde(default = "default_leaf_size")]
    pub leaf_size: usize,
    /// Seed for the split search. Without one, every fit is seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Log the learner state after construction and after every fit.
    #[serde(default)]
    pub verbose: bool,
    /// Predict rows in parallel.
    #[serde(default)]
    pub parallel: bool,
    /// Replace the existing tree on fit, instead of appending to it.
    #[serde(default)]
    pub reset: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            leaf_size: DEFAULT_LEAF_SIZE,
            seed: None,
            verbose: false,
            parallel: false,
            reset: false,
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save a config as a json object to a file.
    ///
    /// * `path` - Path to save the config.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), RandomTreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| RandomTreeError::UnableToWrite(e.to_string()))
    }

    /// Dump a config as a json object
    fn json_dump(&self) -> Result<String, RandomTreeError> {
        serde_json::to_string(self).map_err(|e| RandomTreeError::UnableToWrite(e.to_string()))
    }

    /// Load a config from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, RandomTreeError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| RandomTreeError::UnableToRead(e.to_string()))
    }

    /// Load a config from a path to a json object.
    ///
    /// * `path` - Path to load the config from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, RandomTreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| RandomTreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for LearnerConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_learner_config_default() {
        let config = LearnerConfig::default();
        assert_eq!(config.leaf_size, 1);
        assert_eq!(config.seed, None);
        assert!(!config.verbose);
        assert!(!config.parallel);
        assert!(!config.reset);
    }

    #[test]
    fn test_config_io_json() {
        let config = LearnerConfig {
            leaf_size: 5,
            seed: Some(42),
            ..LearnerConfig::default()
        };
        let json = config.json_dump().unwrap();
        let config2 = LearnerConfig::from_json(&json).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_config_partial_json() {
        let config = LearnerConfig::from_json(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.leaf_size, 1);
        assert_eq!(config.seed, Some(7));

        let config = LearnerConfig::from_json(r#"{"leaf_size": 4, "parallel": true, "seed": null}"#).unwrap();
        assert_eq!(config.leaf_size, 4);
        assert!(config.parallel);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_config_bad_json() {
        assert!(matches!(
            LearnerConfig::from_json(r#"{"leaf_size": -1}"#),
            Err(RandomTreeError::UnableToRead(_))
        ));
    }

    #[test]
    fn test_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("learner.json");
        let config = LearnerConfig {
            leaf_size: 3,
            reset: true,
            ..LearnerConfig::default()
        };
        config.save_config(&file_path).unwrap();
        let config2 = LearnerConfig::load_config(&file_path).unwrap();
        assert_eq!(config, config2);

        assert!(LearnerConfig::load_config(dir.path().join("missing.json")).is_err());
    }
}
