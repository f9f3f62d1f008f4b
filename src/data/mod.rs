pub mod dataset;
pub mod normalization;

pub use dataset::{Batch, Dataset};
pub use normalization::Normalization;
