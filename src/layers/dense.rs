use crate::activation::activation::Activation;
use crate::error::MathError;
use crate::init::initializer::{seed, Initializer};
use crate::math::matrix::Matrix;

/// A fully-connected layer: `activation(x · weight + bias)`.
///
/// `weight` is `input_size × size`, `bias` is `1 × size`. Shapes are fixed at
/// construction; the owning `Network` replaces the values after each batch.
#[derive(Debug)]
pub struct Layer{
    weight: Matrix,
    bias: Matrix,
    activation: Box<dyn Activation>,
    weight_initializer: Option<Box<dyn Initializer>>,
    bias_initializer: Option<Box<dyn Initializer>>,
}

impl Layer {
    /// Allocates and seeds a layer from the given initializers.
    pub fn new(
        input_size: usize,
        size: usize,
        activation: Box<dyn Activation>,
        weight_initializer: Box<dyn Initializer>,
        bias_initializer: Box<dyn Initializer>,
    ) -> Layer {
        let mut layer = Layer {
            weight: Matrix::zeros(input_size, size),
            bias: Matrix::zeros(1, size),
            activation,
            weight_initializer: Some(weight_initializer),
            bias_initializer: Some(bias_initializer),
        };
        layer.seed();
        layer
    }

    /// Builds a layer around fixed parameters. `bias` must be `1 × weight.cols`.
    pub fn from_parts(
        weight: Matrix,
        bias: Matrix,
        activation: Box<dyn Activation>,
    ) -> Result<Layer, MathError> {
        if bias.rows != 1 || bias.cols != weight.cols {
            return Err(MathError::ShapeMismatch {
                op: "layer_bias",
                lhs: weight.shape(),
                rhs: bias.shape(),
            });
        }
        Ok(Layer {
            weight,
            bias,
            activation,
            weight_initializer: None,
            bias_initializer: None,
        })
    }

    /// Fills weight and bias from their initializers. Layers built with
    /// `from_parts` have none and are left untouched.
    pub fn seed(&mut self) {
        if let Some(init) = self.weight_initializer.as_deref_mut() {
            seed(&mut self.weight, init);
        }
        if let Some(init) = self.bias_initializer.as_deref_mut() {
            seed(&mut self.bias, init);
        }
    }

    /// `x · weight + bias`, before the activation.
    pub fn pre_activation(&self, x: &Matrix) -> Result<Matrix, MathError> {
        x.multiply(&self.weight)?.add_row_broadcast(&self.bias)
    }

    pub fn weight(&self) -> &Matrix {
        &self.weight
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn activation(&self) -> &dyn Activation {
        self.activation.as_ref()
    }

    pub fn input_size(&self) -> usize {
        self.weight.rows
    }

    pub fn size(&self) -> usize {
        self.weight.cols
    }

    /// Swaps in updated parameters of the same shape.
    pub(crate) fn replace_parameters(&mut self, weight: Matrix, bias: Matrix) -> Result<(), MathError> {
        if weight.shape() != self.weight.shape() {
            return Err(MathError::ShapeMismatch {
                op: "replace_weight",
                lhs: self.weight.shape(),
                rhs: weight.shape(),
            });
        }
        if bias.shape() != self.bias.shape() {
            return Err(MathError::ShapeMismatch {
                op: "replace_bias",
                lhs: self.bias.shape(),
                rhs: bias.shape(),
            });
        }
        self.weight = weight;
        self.bias = bias;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::init::{Constant, Ones, Zeros};

    #[test]
    fn new_layer_is_seeded_with_declared_shape() {
        let layer = Layer::new(
            4,
            3,
            Box::new(ActivationFunction::ReLU),
            Box::new(Ones),
            Box::new(Constant(0.25)),
        );
        assert_eq!(layer.weight().shape(), (4, 3));
        assert_eq!(layer.bias().shape(), (1, 3));
        assert!(layer.weight().data.iter().flatten().all(|&w| w == 1.0));
        assert!(layer.bias().data.iter().flatten().all(|&b| b == 0.25));
    }

    #[test]
    fn from_parts_rejects_bias_of_wrong_width() {
        let res = Layer::from_parts(
            Matrix::zeros(2, 3),
            Matrix::zeros(1, 2),
            Box::new(ActivationFunction::Identity),
        );
        assert!(matches!(res, Err(MathError::ShapeMismatch { op: "layer_bias", .. })));
    }

    #[test]
    fn replace_parameters_refuses_to_resize() {
        let mut layer = Layer::new(
            2,
            2,
            Box::new(ActivationFunction::Sigmoid),
            Box::new(Zeros),
            Box::new(Zeros),
        );
        let err = layer.replace_parameters(Matrix::zeros(3, 2), Matrix::zeros(1, 2));
        assert!(err.is_err());
        assert_eq!(layer.weight().shape(), (2, 2));
    }
}
