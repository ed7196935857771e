//! Gate matrix extraction.
//!
//! [`extract`] turns a [`Gate`] into the smallest operator that describes it,
//! together with the ordered list of qubits that operator acts on, checking
//! the gate against the circuit it will be applied to. Chains of controlled
//! single-qubit gates are kept in a compact form
//! ([`SimulatorGateMatrix::FullyControlledSingleQubit`]) so that a gate with
//! many controls never has to be expanded into an exponentially large block
//! matrix.

use itertools::Itertools;
use crate::{
    bits,
    error::GateError,
    gate::{ self, Gate },
    matrix::{ self, Matrix },
};

/// Extracted operator of a gate.
#[derive(Clone, Debug, PartialEq)]
pub enum SimulatorGateMatrix {
    /// A 2 × 2 operator.
    SingleQubit(Matrix),
    /// A 2 × 2 operator applied only when all `control_count` controls are
    /// set. Inputs are the controls followed by the target.
    FullyControlledSingleQubit {
        matrix: Matrix,
        control_count: usize,
    },
    /// Any other 2<sup>*k*</sup> × 2<sup>*k*</sup> operator.
    OtherMultiQubit(Matrix),
}

impl SimulatorGateMatrix {
    /// Return the number of qubits the operator acts on.
    pub fn qubit_count(&self) -> usize {
        match self {
            Self::SingleQubit(_) => 1,
            Self::FullyControlledSingleQubit { control_count, .. }
                => control_count + 1,
            Self::OtherMultiQubit(matrix) => bits::qubits_for(matrix.nrows()),
        }
    }

    /// Return the operator as an explicit matrix.
    ///
    /// For `FullyControlledSingleQubit`, this builds the full
    /// 2<sup>*c* + 1</sup> × 2<sup>*c* + 1</sup> controlled matrix.
    pub fn expanded(&self) -> Matrix {
        match self {
            Self::SingleQubit(matrix) | Self::OtherMultiQubit(matrix)
                => matrix.clone(),
            Self::FullyControlledSingleQubit { matrix, control_count }
                => Matrix::controlled(matrix, *control_count),
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            Self::SingleQubit(_) => "single-qubit",
            Self::FullyControlledSingleQubit { .. } => "controlled single-qubit",
            Self::OtherMultiQubit(_) => "multi-qubit",
        }
    }
}

/// An extracted operator and the qubits it acts on, most significant first.
#[derive(Clone, Debug, PartialEq)]
pub struct Components {
    pub matrix: SimulatorGateMatrix,
    pub inputs: Vec<usize>,
}

impl Components {
    /// Short description of the operator's shape, for logging.
    pub fn shape(&self) -> &'static str { self.matrix.shape() }
}

/// Extract the operator of `gate` for a circuit of `qubit_count` qubits.
///
/// Checks run in a fixed order and the first failure is returned:
/// 1. inputs are unique;
/// 1. the operator resolves (matrix gates are power-of-two sized and unitary
///    within `unitary_tolerance`, conditional gates have controls);
/// 1. the number of inputs matches the operator's size;
/// 1. `qubit_count` is nonzero;
/// 1. the operator is no wider than the circuit;
/// 1. every input is a qubit of the circuit.
///
/// Oracles and controlled gates are checked against the width of the circuit
/// as soon as their own width is known, so no block matrix wider than the
/// circuit is ever built; such gates fail with
/// [`GateError::MatrixTooWide`] during the second step.
pub fn extract(gate: &Gate, qubit_count: usize, unitary_tolerance: f64)
    -> Result<Components, GateError>
{
    let inputs = gate.inputs();
    if !inputs.iter().all_unique() {
        return Err(GateError::InputsNotUnique);
    }

    let matrix = resolve(gate, qubit_count, unitary_tolerance)?;
    let matrix_qubits = matrix.qubit_count();

    if inputs.len() != matrix_qubits {
        return Err(GateError::InputCountMismatch {
            inputs: inputs.len(),
            matrix_qubits,
        });
    }
    if qubit_count == 0 {
        return Err(GateError::ZeroQubitCount);
    }
    if matrix_qubits > qubit_count {
        return Err(GateError::MatrixTooWide { matrix_qubits, qubit_count });
    }
    if let Some(&input) = inputs.iter().find(|&&k| k >= qubit_count) {
        return Err(GateError::InputOutOfBounds { input, qubit_count });
    }

    Ok(Components { matrix, inputs })
}

fn resolve(gate: &Gate, qubit_count: usize, unitary_tolerance: f64)
    -> Result<SimulatorGateMatrix, GateError>
{
    match gate {
        Gate::Not(_) => Ok(SimulatorGateMatrix::SingleQubit(gate::NOT.clone())),
        Gate::Hadamard(_)
            => Ok(SimulatorGateMatrix::SingleQubit(gate::HADAMARD.clone())),
        Gate::PhaseShift { radians, .. }
            => Ok(SimulatorGateMatrix::SingleQubit(gate::phase_shift(*radians))),
        Gate::Rotation { axis, radians, .. }
            => Ok(SimulatorGateMatrix::SingleQubit(axis.rotation(*radians))),
        Gate::Matrix { matrix, .. } => {
            let rows = matrix.nrows();
            if !rows.is_power_of_two() {
                return Err(GateError::MatrixRowCountNotPowerOfTwo(rows));
            }
            // unitarity is checked on the small matrix, before any expansion
            if !matrix.is_unitary(unitary_tolerance) {
                return Err(GateError::MatrixNotUnitary);
            }
            if rows == 2 {
                Ok(SimulatorGateMatrix::SingleQubit(matrix.clone()))
            } else {
                Ok(SimulatorGateMatrix::OtherMultiQubit(matrix.clone()))
            }
        },
        Gate::Controlled { gate, controls } => {
            if controls.is_empty() { return Err(GateError::EmptyControls); }
            let inner = resolve(gate, qubit_count, unitary_tolerance)?;
            check_width(controls.len(), &inner, qubit_count)?;
            Ok(control(inner, controls.len()))
        },
        Gate::Oracle { truth_table, controls, gate } => {
            if controls.is_empty() { return Err(GateError::EmptyControls); }
            let inner = resolve(gate, qubit_count, unitary_tolerance)?;
            let control_count = controls.len();
            check_width(control_count, &inner, qubit_count)?;
            let all_ones
                = pattern_count(control_count)
                .map(|n| n - 1)
                .ok_or(GateError::MatrixTooWide {
                    matrix_qubits: control_count + inner.qubit_count(),
                    qubit_count,
                })?;
            let mut active = matrix::truth_table_values(truth_table);
            active.sort_unstable();
            active.dedup();
            if active == [all_ones] {
                Ok(control(inner, control_count))
            } else {
                let oracle
                    = Matrix::oracle(truth_table, control_count, &inner.expanded());
                Ok(SimulatorGateMatrix::OtherMultiQubit(oracle))
            }
        },
    }
}

/// 2<sup>`control_count`</sup>, if it fits in a `usize`.
fn pattern_count(control_count: usize) -> Option<usize> {
    u32::try_from(control_count).ok()
        .and_then(|n| 1_usize.checked_shl(n))
}

fn check_width(
    control_count: usize,
    inner: &SimulatorGateMatrix,
    qubit_count: usize,
) -> Result<(), GateError>
{
    let matrix_qubits = control_count + inner.qubit_count();
    // a zero-qubit circuit is reported later, unless the gate is too wide to
    // describe at all
    let too_wide
        = if qubit_count == 0 {
            pattern_count(matrix_qubits).is_none()
        } else {
            matrix_qubits > qubit_count
        };
    if too_wide {
        Err(GateError::MatrixTooWide { matrix_qubits, qubit_count })
    } else {
        Ok(())
    }
}

fn control(inner: SimulatorGateMatrix, control_count: usize)
    -> SimulatorGateMatrix
{
    match inner {
        SimulatorGateMatrix::SingleQubit(matrix)
            => SimulatorGateMatrix::FullyControlledSingleQubit {
                matrix,
                control_count,
            },
        SimulatorGateMatrix::FullyControlledSingleQubit {
            matrix,
            control_count: inner_count,
        } => SimulatorGateMatrix::FullyControlledSingleQubit {
            matrix,
            control_count: inner_count + control_count,
        },
        SimulatorGateMatrix::OtherMultiQubit(matrix)
            => SimulatorGateMatrix::OtherMultiQubit(
                Matrix::controlled(&matrix, control_count)
            ),
    }
}
