use thiserror::Error;

/// Failures raised by the shape-checked matrix primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// Operand dimensions are incompatible for `op`. Shapes are `(rows, cols)`.
    #[error("shape mismatch in {op}: lhs is {}x{}, rhs is {}x{}", lhs.0, lhs.1, rhs.0, rhs.1)]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot build a matrix from empty data")]
    Empty,

    /// Sample statistics need at least `required` rows.
    #[error("{op} needs at least {required} rows, got {rows}")]
    InsufficientRows {
        op: &'static str,
        required: usize,
        rows: usize,
    },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("data mismatch: {input} input rows but {output} output rows")]
    LengthMismatch { input: usize, output: usize },

    #[error("dataset has no examples")]
    Empty,

    #[error("{table} row {row} has {found} values, expected {expected}")]
    RaggedRow {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("normalization needs at least 2 examples, got {0}")]
    TooFewExamples(usize),

    #[error("dataset has not been set up")]
    NotReady,

    #[error("all {0} batches have been consumed; call reset() first")]
    Exhausted(usize),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network already holds all {expected} layers")]
    TopologyFull { expected: usize },

    #[error("network has {found} of {expected} layers; finish the topology before training")]
    IncompleteTopology { expected: usize, found: usize },

    #[error("no dataset attached; call load_data() first")]
    MissingDataset,

    #[error("forward pass recorded {found} {record}, expected {expected}")]
    StepCount { record: &'static str, expected: usize, found: usize },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
