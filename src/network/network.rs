use std::time::Instant;

use tracing::{debug, info, trace};

use crate::activation::activation::Activation;
use crate::data::dataset::Dataset;
use crate::data::normalization::Normalization;
use crate::error::{DatasetError, NetworkError};
use crate::init::initializer::Initializer;
use crate::layers::dense::Layer;
use crate::loss::Loss;
use crate::math::matrix::Matrix;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;

/// Everything the backward pass needs from one forward pass.
///
/// `steps[0]` is the input and `steps[i + 1]` the activated output of layer
/// `i`. `pre_activations[i]` is layer `i`'s `x · W + b`.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    steps: Vec<Matrix>,
    pre_activations: Vec<Matrix>,
}

impl ForwardPass {
    pub fn steps(&self) -> &[Matrix] {
        &self.steps
    }

    pub fn pre_activations(&self) -> &[Matrix] {
        &self.pre_activations
    }

    /// The final activated output (the input itself for a network with no layers).
    pub fn output(&self) -> &Matrix {
        // steps always starts with the input
        &self.steps[self.steps.len() - 1]
    }

    pub fn into_output(mut self) -> Matrix {
        self.steps.pop().unwrap_or_default()
    }
}

/// A stack of dense layers trained by batched gradient descent.
///
/// The topology is `hidden_layer_count + 2` layers: an input-adjacent layer
/// (`input_count → hidden_layer_size`), the hidden layers
/// (`hidden_layer_size → hidden_layer_size`) and the output layer
/// (`hidden_layer_size → output_count`). Widths come from the attached dataset.
#[derive(Debug)]
pub struct Network {
    hidden_layer_count: usize,
    hidden_layer_size: usize,
    layer_count: usize,
    layers: Vec<Layer>,
    loss: Box<dyn Loss>,
    optimizer: Sgd,
    dataset: Option<Dataset>,
}

impl Network {
    pub fn new(
        hidden_layer_count: usize,
        hidden_layer_size: usize,
        loss: Box<dyn Loss>,
        learning_rate: f64,
    ) -> Network {
        Network {
            hidden_layer_count,
            hidden_layer_size,
            layer_count: hidden_layer_count + 2,
            layers: Vec::new(),
            loss,
            optimizer: Sgd::new(learning_rate),
            dataset: None,
        }
    }

    /// Wraps already-built layers, e.g. with fixed weights. The network is
    /// complete as given, whatever the number of layers.
    pub fn with_layers(layers: Vec<Layer>, loss: Box<dyn Loss>, learning_rate: f64) -> Network {
        Network {
            hidden_layer_count: layers.len().saturating_sub(2),
            hidden_layer_size: layers.first().map(Layer::size).unwrap_or(0),
            layer_count: layers.len(),
            layers,
            loss,
            optimizer: Sgd::new(learning_rate),
            dataset: None,
        }
    }

    /// Sets up `dataset` with `batch_size` and attaches it for training.
    pub fn load_data(
        &mut self,
        mut dataset: Dataset,
        batch_size: usize,
    ) -> Result<Normalization, DatasetError> {
        let normalization = dataset.setup(batch_size)?;
        self.dataset = Some(dataset);
        Ok(normalization)
    }

    /// `(input_size, size)` of the layer the next `add_dense_layer` call would create.
    pub fn next_layer_shape(&self) -> Result<(usize, usize), NetworkError> {
        let slot = self.layers.len();
        let expected = self.expected_layer_count();
        if slot >= expected {
            return Err(NetworkError::TopologyFull { expected });
        }
        let dataset = self.dataset.as_ref().ok_or(NetworkError::MissingDataset)?;

        let rows = if slot == 0 { dataset.input_count() } else { self.hidden_layer_size };
        let cols = if slot == expected - 1 { dataset.output_count() } else { self.hidden_layer_size };
        Ok((rows, cols))
    }

    /// Appends the next layer of the declared topology and seeds it.
    ///
    /// Fails without touching the network once all slots are filled.
    pub fn add_dense_layer(
        &mut self,
        activation: Box<dyn Activation>,
        weight_initializer: Box<dyn Initializer>,
        bias_initializer: Box<dyn Initializer>,
    ) -> Result<(), NetworkError> {
        let (rows, cols) = self.next_layer_shape()?;
        debug!(slot = self.layers.len(), rows, cols, "adding dense layer");
        self.layers.push(Layer::new(rows, cols, activation, weight_initializer, bias_initializer));
        Ok(())
    }

    /// Runs `x` through every layer, keeping each intermediate matrix.
    pub fn forward(&self, x: &Matrix) -> Result<ForwardPass, NetworkError> {
        let mut steps = Vec::with_capacity(self.layers.len() + 1);
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        steps.push(x.clone());

        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.pre_activation(&steps[i])?;
            let a = layer.activation().apply_matrix(&z);
            trace!(layer = i, rows = a.rows, cols = a.cols, "forward");
            pre_activations.push(z);
            steps.push(a);
        }

        Ok(ForwardPass { steps, pre_activations })
    }

    /// Forward pass keeping only the output.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix, NetworkError> {
        Ok(self.forward(x)?.into_output())
    }

    /// Backpropagates `target` through the recorded pass and steps every layer.
    ///
    /// All gradients are computed from the current (pre-update) parameters;
    /// the new parameters are installed together once the walk is finished.
    pub fn backward(&mut self, pass: &ForwardPass, target: &Matrix) -> Result<(), NetworkError> {
        let n = self.layers.len();
        if pass.steps.len() != n + 1 {
            return Err(NetworkError::StepCount {
                record: "steps",
                expected: n + 1,
                found: pass.steps.len(),
            });
        }
        if pass.pre_activations.len() != n {
            return Err(NetworkError::StepCount {
                record: "pre-activations",
                expected: n,
                found: pass.pre_activations.len(),
            });
        }

        let mut error = self.loss.gradient(pass.output(), target)?;
        let mut updates = Vec::with_capacity(n);

        for i in (0..n).rev() {
            let layer = &self.layers[i];

            let act_derivative = layer.activation().derivative_matrix(&pass.pre_activations[i]);
            let delta = error.hadamard(&act_derivative)?;

            let weight_grad = pass.steps[i].transpose().multiply(&delta)?;
            let bias_grad = delta.sum_columns();

            if i > 0 {
                error = delta.multiply(&layer.weight().transpose())?;
            }

            updates.push((
                self.optimizer.step(layer.weight(), &weight_grad)?,
                self.optimizer.step(layer.bias(), &bias_grad)?,
            ));
        }

        for (layer, (weight, bias)) in self.layers.iter_mut().zip(updates.into_iter().rev()) {
            layer.replace_parameters(weight, bias)?;
        }

        Ok(())
    }

    /// One atomic training step. Returns the mean loss of the batch before the update.
    pub fn train_batch(&mut self, x: &Matrix, y: &Matrix) -> Result<f64, NetworkError> {
        let pass = self.forward(x)?;
        let loss = self.loss.mean(pass.output(), y)?;
        debug!(rows = x.rows, loss, "batch");
        self.backward(&pass, y)?;
        Ok(loss)
    }

    /// Trains over every batch of the attached dataset `epochs` times.
    ///
    /// Stops at the first error; layers keep whatever updates were already applied.
    pub fn train_epochs(&mut self, epochs: usize) -> Result<Vec<EpochStats>, NetworkError> {
        let expected = self.expected_layer_count();
        if self.layers.len() != expected {
            return Err(NetworkError::IncompleteTopology { expected, found: self.layers.len() });
        }

        // Detach the dataset so batches can be pulled while layers are mutated.
        let mut dataset = self.dataset.take().ok_or(NetworkError::MissingDataset)?;
        let result = self.run_epochs(&mut dataset, epochs);
        dataset.reset();
        self.dataset = Some(dataset);
        result
    }

    fn run_epochs(
        &mut self,
        dataset: &mut Dataset,
        epochs: usize,
    ) -> Result<Vec<EpochStats>, NetworkError> {
        if !dataset.is_ready() {
            return Err(DatasetError::NotReady.into());
        }

        let mut history = Vec::with_capacity(epochs);

        for epoch in 1..=epochs {
            let t_start = Instant::now();
            let mut total_loss = 0.0;
            let mut batches = 0;

            while !dataset.completed() {
                let (x, y) = dataset.get_batch()?;
                total_loss += self.train_batch(&x, &y)?;
                batches += 1;
            }
            dataset.reset();

            let stats = EpochStats {
                epoch,
                total_epochs: epochs,
                mean_loss: if batches > 0 { total_loss / batches as f64 } else { 0.0 },
                batches,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            info!(
                epoch,
                total_epochs = epochs,
                mean_loss = stats.mean_loss,
                batches,
                elapsed_ms = stats.elapsed_ms,
                "epoch finished"
            );
            history.push(stats);
        }

        Ok(history)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn expected_layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn is_complete(&self) -> bool {
        self.layers.len() == self.expected_layer_count()
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.hidden_layer_count
    }

    pub fn hidden_layer_size(&self) -> usize {
        self.hidden_layer_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn loss(&self) -> &dyn Loss {
        self.loss.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn normalization(&self) -> Option<&Normalization> {
        self.dataset.as_ref().and_then(Dataset::normalization)
    }
}
