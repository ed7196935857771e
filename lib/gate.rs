//! Quantum gates acting on fixed qubits of a register.
//!
//! A [`Gate`] is plain value data: it names an operation and the qubits it
//! touches, and says nothing about how it will be simulated. Oracles and
//! controlled gates wrap arbitrary inner gates, so the type is recursive.
//! Turning a gate into a matrix (and validating it along the way) is the job
//! of [`extract`][crate::extract].

use std::fmt;
use itertools::Itertools;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use crate::matrix::Matrix;

/// [[0, 1], [1, 0]]
pub(crate) static NOT: Lazy<Matrix> = Lazy::new(|| {
    let z0 = C64::from(0.0);
    let z1 = C64::from(1.0);
    Matrix::from_fn(2, 2, |r, c| if r == c { z0 } else { z1 })
});

/// (1/√2) [[1, 1], [1, -1]]
pub(crate) static HADAMARD: Lazy<Matrix> = Lazy::new(|| {
    use std::f64::consts::FRAC_1_SQRT_2;
    Matrix::from_fn(2, 2, |r, c| {
        if r == 1 && c == 1 {
            C64::from(-FRAC_1_SQRT_2)
        } else {
            C64::from(FRAC_1_SQRT_2)
        }
    })
});

/// [[1, 0], [0, e<sup>*i*θ</sup>]]
pub(crate) fn phase_shift(radians: f64) -> Matrix {
    Matrix::from_fn(2, 2, |r, c| {
        match (r, c) {
            (0, 0) => C64::from(1.0),
            (1, 1) => C64::cis(radians),
            _ => C64::from(0.0),
        }
    })
}

/// Rotation axis on the Bloch sphere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Return the matrix for a rotation by `radians` about `self`.
    pub(crate) fn rotation(self, radians: f64) -> Matrix {
        let half = radians / 2.0;
        let (sin, cos) = half.sin_cos();
        let entries: [[C64; 2]; 2] = match self {
            Self::X => [
                [C64::from(cos),       C64::new(0.0, -sin)],
                [C64::new(0.0, -sin),  C64::from(cos)     ],
            ],
            Self::Y => [
                [C64::from(cos), C64::from(-sin)],
                [C64::from(sin), C64::from(cos) ],
            ],
            Self::Z => [
                [C64::cis(-half), C64::from(0.0)],
                [C64::from(0.0),  C64::cis(half)],
            ],
        };
        Matrix::from_fn(2, 2, |r, c| entries[r][c])
    }
}

/// Description of a single gate for a register of qubits.
#[derive(Clone, Debug, PartialEq)]
pub enum Gate {
    /// π rotation about X.
    Not(usize),
    /// Hadamard.
    Hadamard(usize),
    /// Relative phase of e<sup>*i*θ</sup> on ∣1⟩.
    PhaseShift {
        radians: f64,
        target: usize,
    },
    /// Rotation about an axis of the Bloch sphere.
    Rotation {
        axis: Axis,
        radians: f64,
        target: usize,
    },
    /// Arbitrary *k*-qubit unitary.
    ///
    /// `matrix` is expected to be 2<sup>*k*</sup> × 2<sup>*k*</sup> and unitary.
    /// The first input is the most significant qubit of the matrix's basis.
    Matrix {
        matrix: Matrix,
        inputs: Vec<usize>,
    },
    /// `gate`, applied only when the bits of `controls` (first control as
    /// the most significant bit) spell one of the patterns in `truth_table`.
    Oracle {
        truth_table: Vec<String>,
        controls: Vec<usize>,
        gate: Box<Gate>,
    },
    /// `gate`, applied only when every control is ∣1⟩.
    Controlled {
        gate: Box<Gate>,
        controls: Vec<usize>,
    },
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not(k) => write!(f, "X({})", k),
            Self::Hadamard(k) => write!(f, "H({})", k),
            Self::PhaseShift { radians, target }
                => write!(f, "P[{}]({})", radians, target),
            Self::Rotation { axis, radians, target }
                => write!(f, "R{:?}[{}]({})", axis, radians, target),
            Self::Matrix { matrix, inputs }
                => write!(
                    f, "U{}x{}({})",
                    matrix.nrows(), matrix.ncols(), inputs.iter().join(", "),
                ),
            Self::Oracle { truth_table, controls, gate }
                => write!(
                    f, "O{{{}}}({}; {})",
                    truth_table.iter().join(", "), controls.iter().join(", "), gate,
                ),
            Self::Controlled { gate, controls }
                => write!(f, "C({}; {})", controls.iter().join(", "), gate),
        }
    }
}

impl Gate {
    /// Make a generic matrix gate.
    pub fn matrix(matrix: Matrix, inputs: Vec<usize>) -> Self {
        Self::Matrix { matrix, inputs }
    }

    /// Make an oracle around `gate`.
    pub fn oracle<S>(truth_table: &[S], controls: Vec<usize>, gate: Gate)
        -> Self
    where S: AsRef<str>
    {
        let truth_table
            = truth_table.iter().map(|s| s.as_ref().to_string()).collect();
        Self::Oracle { truth_table, controls, gate: Box::new(gate) }
    }

    /// Make a controlled version of `gate`.
    pub fn controlled(gate: Gate, controls: Vec<usize>) -> Self {
        Self::Controlled { gate: Box::new(gate), controls }
    }

    /// Make a CNOT acting on `target` with a single `control`.
    pub fn controlled_not(target: usize, control: usize) -> Self {
        Self::controlled(Self::Not(target), vec![control])
    }

    /// Return all qubits the gate touches, in declaration order: for oracles
    /// and controlled gates the controls come first, followed by the inner
    /// gate's own qubits.
    pub fn inputs(&self) -> Vec<usize> {
        match self {
            Self::Not(k)
            | Self::Hadamard(k)
            | Self::PhaseShift { target: k, .. }
            | Self::Rotation { target: k, .. }
            => vec![*k],
            Self::Matrix { inputs, .. } => inputs.clone(),
            Self::Oracle { controls, gate, .. }
            | Self::Controlled { gate, controls }
            => controls.iter().copied().chain(gate.inputs()).collect(),
        }
    }
}
