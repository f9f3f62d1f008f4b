pub mod initializer;

pub use initializer::{seed, Constant, GlorotNormal, HeNormal, Initializer, Ones, Zeros};
