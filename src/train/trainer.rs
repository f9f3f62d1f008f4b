use crate::data::dataset::Dataset;
use crate::data::normalization::Normalization;
use crate::error::NetworkError;
use crate::init::initializer::{GlorotNormal, Initializer, Zeros};
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// Attaches `dataset` and fills every layer slot described by `config`.
///
/// Weights use Glorot-normal initialization sized to each layer's fan-in and
/// fan-out, biases start at zero. With `config.seed` set, layer `i` draws
/// from `seed + i`. Callers should run `TrainConfig::validate` first.
pub fn build_network(
    config: &TrainConfig,
    dataset: Dataset,
) -> Result<(Network, Normalization), NetworkError> {
    let mut network = Network::new(
        config.hidden_layer_count,
        config.hidden_layer_size,
        config.loss.build(),
        config.learning_rate,
    );
    let normalization = network.load_data(dataset, config.batch_size)?;

    let last = network.expected_layer_count() - 1;
    for slot in 0..=last {
        let (fan_in, fan_out) = network.next_layer_shape()?;
        let weight_init: Box<dyn Initializer> = match config.seed {
            Some(seed) => Box::new(GlorotNormal::with_seed(fan_in, fan_out, seed.wrapping_add(slot as u64))),
            None => Box::new(GlorotNormal::new(fan_in, fan_out)),
        };
        let activation = if slot == last { config.output_activation } else { config.hidden_activation };

        network.add_dense_layer(Box::new(activation), weight_init, Box::new(Zeros))?;
    }

    Ok((network, normalization))
}
