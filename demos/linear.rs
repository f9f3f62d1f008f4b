use ferrite_dense::{
    ActivationFunction, Dataset, GlorotNormal, L2Loss, Matrix, Network, Zeros,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // y = 3a - 2b + 1, sampled on a small grid.
    let mut input = Vec::new();
    let mut output = Vec::new();
    for a in 0..6 {
        for b in 0..6 {
            let (a, b) = (a as f64, b as f64);
            input.push(vec![a, b]);
            output.push(vec![3.0 * a - 2.0 * b + 1.0]);
        }
    }

    let mut network = Network::new(1, 4, Box::new(L2Loss), 0.01);
    let normalization = network.load_data(Dataset::new(input, output), 4)?;

    let last = network.expected_layer_count() - 1;
    for slot in 0..=last {
        let (fan_in, fan_out) = network.next_layer_shape()?;
        let activation = if slot == last {
            ActivationFunction::Identity
        } else {
            ActivationFunction::Tanh
        };
        network.add_dense_layer(
            Box::new(activation),
            Box::new(GlorotNormal::with_seed(fan_in, fan_out, 42 + slot as u64)),
            Box::new(Zeros),
        )?;
    }

    let history = network.train_epochs(200)?;
    for stats in history.iter().step_by(20) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.mean_loss);
    }

    let probe = Matrix::from_rows(vec![vec![2.0, 1.0], vec![5.0, 0.0]])?;
    let prediction = network.predict(&normalization.normalize_input(&probe)?)?;
    let prediction = normalization.denormalize_output(&prediction)?;
    for (x, y) in probe.data.iter().zip(&prediction.data) {
        println!("Input: {:?} -> Output: {:.4}", x, y[0]);
    }

    Ok(())
}
