use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::ConfigError;
use crate::loss::loss_type::LossType;

/// Topology and hyperparameters for one training run.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "hidden_layer_count": 2, "hidden_layer_size": 8, "learning_rate": 0.01 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_layer_count: usize,
    pub hidden_layer_size: usize,
    /// Rows per batch; `1` gives online gradient descent.
    pub batch_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    pub loss: LossType,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
    /// Seeds the weight initializers; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            hidden_layer_count: 1,
            hidden_layer_size: 3,
            batch_size: 1,
            learning_rate: 0.1,
            epochs: 2,
            loss: LossType::L2,
            hidden_activation: ActivationFunction::ReLU,
            output_activation: ActivationFunction::ReLU,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn from_json_str(json: &str) -> Result<TrainConfig, ConfigError> {
        let config: TrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json(path: &str) -> Result<TrainConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if self.hidden_layer_size == 0 {
            return Err(ConfigError::Invalid("hidden_layer_size must be at least 1".into()));
        }
        Ok(())
    }
}
