//! Error types for every fallible operation in the crate.
//!
//! Each component reports through its own enum; [`Error`] gathers them for
//! the register and circuit facades, where a single call may fail for
//! several unrelated reasons.

use thiserror::Error;

/// Structural problems with a [`Gate`][crate::gate::Gate] found while
/// extracting its matrix for a circuit of a given size.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GateError {
    /// The gate lists the same qubit more than once.
    #[error("gate inputs are not unique")]
    InputsNotUnique,

    /// A matrix gate's row count is not 2<sup>*k*</sup>.
    #[error("gate matrix row count {0} is not a power of two")]
    MatrixRowCountNotPowerOfTwo(usize),

    /// A matrix gate is not unitary within the configured tolerance.
    #[error("gate matrix is not unitary")]
    MatrixNotUnitary,

    /// An oracle or controlled gate was given no controls.
    #[error("gate controls can not be an empty list")]
    EmptyControls,

    /// The number of inputs differs from the number of qubits the matrix acts
    /// on.
    #[error("gate has {inputs} inputs but its matrix acts on {matrix_qubits} qubits")]
    InputCountMismatch { inputs: usize, matrix_qubits: usize },

    /// Gates can only be applied to circuits of at least one qubit.
    #[error("circuit qubit count has to be bigger than zero")]
    ZeroQubitCount,

    /// The gate's matrix is wider than the circuit.
    #[error("gate matrix acts on {matrix_qubits} qubits but the circuit only has {qubit_count}")]
    MatrixTooWide { matrix_qubits: usize, qubit_count: usize },

    /// An input names a qubit outside the circuit.
    #[error("gate input {input} is out of bounds for {qubit_count} qubits")]
    InputOutOfBounds { input: usize, qubit_count: usize },
}

/// Problems building a [`Matrix`][crate::matrix::Matrix].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No rows, or rows with no columns.
    #[error("matrix can not be empty")]
    Empty,

    /// Rows of differing lengths.
    #[error("matrix row {row} has {len} columns, expected {expected}")]
    RaggedRows { row: usize, len: usize, expected: usize },

    /// Empty permutation.
    #[error("permutation can not be empty")]
    EmptyPermutation,

    /// A permutation names some column more than once.
    #[error("permutation repeats index {0}")]
    RepeatedPermutationIndex(usize),

    /// A permutation names a column past its own length.
    #[error("permutation index {index} is out of range for length {len}")]
    PermutationIndexOutOfRange { index: usize, len: usize },
}

/// Problems building or summarizing a [`Vector`][crate::vector::Vector].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VectorError {
    /// No amplitudes.
    #[error("vector can not be empty")]
    Empty,

    /// Basis states need at least one qubit.
    #[error("qubit count has to be bigger than zero")]
    ZeroQubitCount,

    /// A basis-state value that doesn't fit in the requested number of qubits.
    #[error("value {value} can not be represented with {qubit_count} qubits")]
    ValueOutOfRange { value: usize, qubit_count: usize },

    /// The vector's length is not 2<sup>*n*</sup>, so it has no qubits to
    /// summarize over.
    #[error("vector length {0} is not a power of two")]
    LengthNotPowerOfTwo(usize),

    /// A qubit selected for summarizing that the vector doesn't have.
    #[error("qubit {qubit} is out of bounds for {qubit_count} qubits")]
    QubitOutOfBounds { qubit: usize, qubit_count: usize },

    /// A qubit selected more than once for summarizing.
    #[error("qubit {0} is selected more than once")]
    RepeatedQubit(usize),
}

/// Problems constructing a register or reading back its state.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RegisterError {
    /// Statevector length is not 2<sup>*n*</sup>.
    #[error("vector length {0} has to be a power of two")]
    VectorLengthNotPowerOfTwo(usize),

    /// Unitary registers hold square matrices only.
    #[error("matrix is {rows}×{cols}, expected a square matrix")]
    MatrixNotSquare { rows: usize, cols: usize },

    /// Unitary matrix size is not 2<sup>*n*</sup>.
    #[error("matrix row count {0} has to be a power of two")]
    MatrixRowCountNotPowerOfTwo(usize),

    /// The sum of squared amplitude moduli drifted away from one.
    #[error("statevector addition of square modulus is {norm_sqr}, expected 1")]
    StatevectorNotNormalized { norm_sqr: f64 },

    /// The accumulated circuit matrix is no longer unitary.
    #[error("circuit matrix is not unitary")]
    MatrixNotUnitary,

    /// Initial state doesn't fit the circuit it's fed to.
    #[error("initial state acts on {found} qubits, circuit has {expected}")]
    QubitCountMismatch { expected: usize, found: usize },

    /// 2<sup>*n*</sup> doesn't fit in a `usize`.
    #[error("{0} qubits are too many to simulate")]
    TooManyQubits(usize),
}

/// Invalid [`SimConfig`][crate::config::SimConfig] settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// At least one worker is required.
    #[error("max concurrency has to be bigger than zero")]
    MaxConcurrencyNotPositive,

    /// Tolerances must be positive, finite numbers.
    #[error("{name} has to be a positive, finite number, got {value}")]
    ToleranceNotPositive { name: &'static str, value: f64 },

    /// The worker pool couldn't be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Any error raised by the register and circuit facades.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
