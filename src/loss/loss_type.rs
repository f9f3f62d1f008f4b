use serde::{Serialize, Deserialize};

use crate::loss::{L2Loss, Loss, MseLoss};

/// Selects which loss function the training loop uses.
///
/// - `L2`  — half squared error per output column (the default).
/// - `Mse` — mean squared error; twice `L2` for the same batch.
///
/// Both hand `predicted - expected` to the backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    L2,
    Mse,
}

impl LossType {
    pub fn build(self) -> Box<dyn Loss> {
        match self {
            LossType::L2 => Box::new(L2Loss),
            LossType::Mse => Box::new(MseLoss),
        }
    }
}
