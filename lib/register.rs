//! Simulation state holders.
//!
//! Registers are immutable: [`StatevectorRegister::applying`] and
//! [`UnitaryRegister::applying`] return a new register and leave `self`
//! untouched, so every intermediate state can be kept around and inspected.

use std::sync::Arc;
use tracing::{ debug, warn };
use crate::{
    bits,
    config::{ SimConfig, StatevectorTransformationKind },
    error::{ GateError, RegisterError, Result },
    extract::extract,
    factory::CircuitMatrixFactory,
    gate::Gate,
    matrix::Matrix,
    transform::{
        CircuitMatrixTransformation,
        DirectTransformation,
        StatevectorTransformation,
    },
    vector::Vector,
    workers::Workers,
};

/// Statevector of an *N*-qubit register.
#[derive(Clone, Debug)]
pub struct StatevectorRegister {
    vector: Vector,
    qubit_count: usize,
    transformation: Arc<dyn StatevectorTransformation>,
    unitary_tolerance: f64,
    normalization_tolerance: f64,
}

impl StatevectorRegister {
    /// Create a new register holding `vector`, starting a worker pool and
    /// transformation as described by `config`.
    ///
    /// Fails if `config` is invalid or the length of `vector` is not a power
    /// of two.
    pub fn new(vector: Vector, config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let workers = Workers::new(config.max_concurrency)?;
        let transformation: Arc<dyn StatevectorTransformation>
            = match config.statevector_transformation {
                StatevectorTransformationKind::Direct
                    => Arc::new(DirectTransformation::new(workers)),
                StatevectorTransformationKind::CircuitMatrix
                    => Arc::new(CircuitMatrixTransformation::new(workers)),
            };
        Ok(Self::with_transformation(vector, transformation, config)?)
    }

    /// Create a new register holding `vector` that applies gates with
    /// `transformation`.
    ///
    /// Only the tolerances of `config` are used.
    pub fn with_transformation(
        vector: Vector,
        transformation: Arc<dyn StatevectorTransformation>,
        config: &SimConfig,
    ) -> std::result::Result<Self, RegisterError>
    {
        let len = vector.len();
        if !len.is_power_of_two() {
            return Err(RegisterError::VectorLengthNotPowerOfTwo(len));
        }
        Ok(Self {
            vector,
            qubit_count: bits::qubits_for(len),
            transformation,
            unitary_tolerance: config.unitary_tolerance,
            normalization_tolerance: config.normalization_tolerance,
        })
    }

    /// Return the number of qubits.
    pub fn qubit_count(&self) -> usize { self.qubit_count }

    /// Return the statevector, if it is still normalized.
    pub fn statevector(&self) -> std::result::Result<&Vector, RegisterError> {
        let norm_sqr = self.vector.norm_sqr();
        if (norm_sqr - 1.0).abs() > self.normalization_tolerance {
            warn!(norm_sqr, "statevector is not normalized");
            return Err(RegisterError::StatevectorNotNormalized { norm_sqr });
        }
        Ok(&self.vector)
    }

    /// Like [`statevector`][Self::statevector], but consuming `self`.
    pub fn into_statevector(self) -> std::result::Result<Vector, RegisterError> {
        self.statevector()?;
        Ok(self.vector)
    }

    /// Return a new register holding the state after `gate`.
    pub fn applying(&self, gate: &Gate) -> std::result::Result<Self, GateError> {
        let components
            = extract(gate, self.qubit_count, self.unitary_tolerance)?;
        debug!(
            %gate,
            shape = components.shape(),
            inputs = ?components.inputs,
            qubit_count = self.qubit_count,
            "applying gate to statevector"
        );
        let vector = self.transformation.apply(&components, &self.vector);
        Ok(Self {
            vector,
            qubit_count: self.qubit_count,
            transformation: Arc::clone(&self.transformation),
            unitary_tolerance: self.unitary_tolerance,
            normalization_tolerance: self.normalization_tolerance,
        })
    }
}

/// Accumulated unitary of an *N*-qubit circuit.
#[derive(Clone, Debug)]
pub struct UnitaryRegister {
    matrix: Matrix,
    qubit_count: usize,
    factory: CircuitMatrixFactory,
    workers: Workers,
    unitary_tolerance: f64,
}

impl UnitaryRegister {
    /// Create a new register holding `matrix`.
    ///
    /// Fails if `config` is invalid or `matrix` isn't square with a
    /// power-of-two size.
    pub fn new(matrix: Matrix, config: &SimConfig) -> Result<Self> {
        config.validate()?;
        if !matrix.is_square() {
            return Err(RegisterError::MatrixNotSquare {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            }.into());
        }
        let rows = matrix.nrows();
        if !rows.is_power_of_two() {
            return Err(RegisterError::MatrixRowCountNotPowerOfTwo(rows).into());
        }
        let workers = Workers::new(config.max_concurrency)?;
        Ok(Self {
            matrix,
            qubit_count: bits::qubits_for(rows),
            factory: CircuitMatrixFactory::new(workers.clone()),
            workers,
            unitary_tolerance: config.unitary_tolerance,
        })
    }

    /// Create a new register holding the identity on `qubit_count` qubits.
    pub fn identity(qubit_count: usize, config: &SimConfig) -> Result<Self> {
        let dim
            = u32::try_from(qubit_count).ok()
            .and_then(|n| 1_usize.checked_shl(n))
            .ok_or(RegisterError::TooManyQubits(qubit_count))?;
        Self::new(Matrix::identity(dim), config)
    }

    /// Return the number of qubits.
    pub fn qubit_count(&self) -> usize { self.qubit_count }

    /// Return the accumulated matrix, if it is still unitary.
    pub fn unitary(&self) -> std::result::Result<&Matrix, RegisterError> {
        if !self.matrix.is_unitary(self.unitary_tolerance) {
            warn!(qubit_count = self.qubit_count, "circuit matrix is not unitary");
            return Err(RegisterError::MatrixNotUnitary);
        }
        Ok(&self.matrix)
    }

    /// Like [`unitary`][Self::unitary], but consuming `self`.
    pub fn into_unitary(self) -> std::result::Result<Matrix, RegisterError> {
        self.unitary()?;
        Ok(self.matrix)
    }

    /// Return a new register whose matrix is `gate`'s circuit matrix times the
    /// current one.
    pub fn applying(&self, gate: &Gate) -> std::result::Result<Self, GateError> {
        let components
            = extract(gate, self.qubit_count, self.unitary_tolerance)?;
        debug!(
            %gate,
            shape = components.shape(),
            inputs = ?components.inputs,
            qubit_count = self.qubit_count,
            "applying gate to unitary"
        );
        let circuit
            = self.factory.expand(
                self.qubit_count,
                &components.matrix.expanded(),
                &components.inputs,
            );
        let matrix = product(&self.workers, &circuit, &self.matrix);
        Ok(Self {
            matrix,
            qubit_count: self.qubit_count,
            factory: self.factory.clone(),
            workers: self.workers.clone(),
            unitary_tolerance: self.unitary_tolerance,
        })
    }
}

/// `lhs × rhs` for square matrices of equal size, split across `workers`.
fn product(workers: &Workers, lhs: &Matrix, rhs: &Matrix) -> Matrix {
    let n = lhs.nrows();
    // rows of `lhs` as columns, so each entry is a dot of two contiguous columns
    let lhs_t = lhs.as_dmatrix().transpose();
    let rhs = rhs.as_dmatrix();
    let data = workers.collect(n * n, |k| {
        let (r, c) = (k % n, k / n);
        lhs_t.column(r).dot(&rhs.column(c))
    });
    Matrix::from_column_major(n, data)
}
