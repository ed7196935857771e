//! Driver for running a fixed sequence of gates through a register.

use rustc_hash::FxHashMap;
use tracing::debug;
use crate::{
    bits,
    config::SimConfig,
    error::{ RegisterError, Result },
    gate::Gate,
    matrix::Matrix,
    register::{ StatevectorRegister, UnitaryRegister },
    vector::Vector,
};

/// An ordered list of gates acting on a fixed number of qubits.
///
/// Gates are applied in list order, so the last gate in the list acts last
/// (i.e. is the leftmost factor of the circuit's unitary).
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    qubit_count: usize,
    gates: Vec<Gate>,
    config: SimConfig,
}

impl Circuit {
    /// Create a new circuit with the default [`SimConfig`].
    pub fn new(qubit_count: usize, gates: Vec<Gate>) -> Self {
        Self::with_config(qubit_count, gates, SimConfig::default())
    }

    /// Create a new circuit with the given configuration.
    pub fn with_config(qubit_count: usize, gates: Vec<Gate>, config: SimConfig)
        -> Self
    {
        Self { qubit_count, gates, config }
    }

    /// Return the number of qubits.
    pub fn qubit_count(&self) -> usize { self.qubit_count }

    /// Return the gates in application order.
    pub fn gates(&self) -> &[Gate] { &self.gates }

    /// Return the configuration used for simulation.
    pub fn config(&self) -> &SimConfig { &self.config }

    /// Append a gate to the end of the circuit.
    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// Run the circuit on ∣0...0⟩ and return the final statevector.
    pub fn statevector(&self) -> Result<Vector> {
        self.statevector_from(Vector::basis_state(0, self.qubit_count)?)
    }

    /// Run the circuit on `initial` and return the final statevector.
    ///
    /// Stops at the first gate that fails to apply.
    pub fn statevector_from(&self, initial: Vector) -> Result<Vector> {
        let len = initial.len();
        if !len.is_power_of_two() {
            return Err(RegisterError::VectorLengthNotPowerOfTwo(len).into());
        }
        let found = bits::qubits_for(len);
        if found != self.qubit_count {
            return Err(RegisterError::QubitCountMismatch {
                expected: self.qubit_count,
                found,
            }.into());
        }
        debug!(
            qubit_count = self.qubit_count,
            gates = self.gates.len(),
            "running statevector simulation"
        );
        let register
            = self.gates.iter()
            .try_fold(
                StatevectorRegister::new(initial, &self.config)?,
                |reg, gate| reg.applying(gate),
            )?;
        Ok(register.into_statevector()?)
    }

    /// Return the unitary implemented by the circuit.
    pub fn unitary(&self) -> Result<Matrix> {
        debug!(
            qubit_count = self.qubit_count,
            gates = self.gates.len(),
            "accumulating circuit unitary"
        );
        let register
            = self.gates.iter()
            .try_fold(
                UnitaryRegister::identity(self.qubit_count, &self.config)?,
                |reg, gate| reg.applying(gate),
            )?;
        Ok(register.into_unitary()?)
    }

    /// Return the measurement probabilities of every basis state after running
    /// the circuit on ∣0...0⟩.
    pub fn probabilities(&self) -> Result<Vec<f64>> {
        Ok(self.statevector()?.probabilities())
    }

    /// Like [`probabilities`][Self::probabilities], but marginalized onto
    /// `qubits`; see [`Vector::summarized_probabilities`].
    pub fn summarized_probabilities(&self, qubits: &[usize])
        -> Result<FxHashMap<String, f64>>
    {
        Ok(self.statevector()?.summarized_probabilities(qubits)?)
    }
}
