pub mod error;
pub mod math;
pub mod activation;
pub mod init;
pub mod loss;
pub mod data;
pub mod layers;
pub mod optim;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{ConfigError, DatasetError, MathError, NetworkError};
pub use math::matrix::Matrix;
pub use activation::activation::{Activation, ActivationFunction};
pub use init::initializer::{Constant, GlorotNormal, HeNormal, Initializer, Ones, Zeros};
pub use loss::{L2Loss, Loss, LossType, MseLoss};
pub use data::{Batch, Dataset, Normalization};
pub use layers::dense::Layer;
pub use network::network::{ForwardPass, Network};
pub use optim::sgd::Sgd;
pub use train::{build_network, EpochStats, TrainConfig};
