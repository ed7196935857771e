//! Application of an extracted gate to a statevector.
//!
//! [`DirectTransformation`] is the main path: it never builds a matrix larger
//! than the gate itself and instead works out, for each amplitude, which other
//! amplitudes it mixes with from the bits of its index. For a *k*-qubit gate on
//! *N* qubits this costs *O*(2<sup>*N*</sup> 2<sup>*k*</sup>) rather than the
//! *O*(4<sup>*N*</sup>) of a full matrix-vector product.
//! [`CircuitMatrixTransformation`] does the latter and serves as a reference.

use std::fmt;
use num_complex::Complex64 as C64;
use crate::{
    bits,
    extract::{ Components, SimulatorGateMatrix },
    factory::CircuitMatrixFactory,
    matrix::Matrix,
    vector::Vector,
    workers::Workers,
};

/// A way of applying a gate to a statevector.
///
/// Implementations produce a new vector of the same length and must not
/// depend on how many workers they use.
pub trait StatevectorTransformation: fmt::Debug + Send + Sync {
    /// Apply `components` to `vector`.
    ///
    /// `components` must come from [`extract`][crate::extract::extract] for a
    /// circuit of log<sub>2</sub>(`vector.len()`) qubits.
    fn apply(&self, components: &Components, vector: &Vector) -> Vector;
}

/// Bit-mask based transformation.
#[derive(Clone, Debug)]
pub struct DirectTransformation {
    workers: Workers,
}

impl DirectTransformation {
    pub fn new(workers: Workers) -> Self { Self { workers } }

    fn apply_single(
        &self,
        matrix: &Matrix,
        vector: &Vector,
        target: usize,
        filter: Option<usize>,
    ) -> Vector
    {
        let mask: usize = 1 << target;
        let v = vector.as_slice();
        let (m00, m01) = (matrix[(0, 0)], matrix[(0, 1)]);
        let (m10, m11) = (matrix[(1, 0)], matrix[(1, 1)]);
        let data = self.workers.collect(v.len(), |k| {
            match filter {
                Some(f) if k & f != f => v[k],
                _ if k & mask == 0 => m00 * v[k] + m01 * v[k | mask],
                _ => m10 * v[k & !mask] + m11 * v[k],
            }
        });
        Vector::from_vec_unchecked(data)
    }

    fn apply_multi(&self, matrix: &Matrix, vector: &Vector, inputs: &[usize])
        -> Vector
    {
        let v = vector.as_slice();
        let selected = bits::mask(inputs);
        // global offset of each local column index
        let scattered: Vec<usize>
            = (0..1_usize << inputs.len())
            .map(|local| bits::scatter(local, inputs))
            .collect();
        let data = self.workers.collect(v.len(), |k| {
            let row = bits::gather(k, inputs);
            let base = k & !selected;
            scattered.iter().enumerate()
                .fold(C64::from(0.0), |acc, (col, offs)| {
                    acc + matrix[(row, col)] * v[base | offs]
                })
        });
        Vector::from_vec_unchecked(data)
    }
}

impl StatevectorTransformation for DirectTransformation {
    fn apply(&self, components: &Components, vector: &Vector) -> Vector {
        let inputs = &components.inputs;
        match &components.matrix {
            SimulatorGateMatrix::SingleQubit(matrix)
                => self.apply_single(matrix, vector, inputs[0], None),
            SimulatorGateMatrix::FullyControlledSingleQubit { matrix, .. } => {
                let Some((target, controls)) = inputs.split_last()
                    else { unreachable!("controlled gate without inputs") };
                let filter = bits::mask(controls);
                self.apply_single(matrix, vector, *target, Some(filter))
            },
            SimulatorGateMatrix::OtherMultiQubit(matrix)
                => self.apply_multi(matrix, vector, inputs),
        }
    }
}

/// Transformation through the full circuit matrix of each gate.
#[derive(Clone, Debug)]
pub struct CircuitMatrixTransformation {
    factory: CircuitMatrixFactory,
    workers: Workers,
}

impl CircuitMatrixTransformation {
    pub fn new(workers: Workers) -> Self {
        Self { factory: CircuitMatrixFactory::new(workers.clone()), workers }
    }
}

impl StatevectorTransformation for CircuitMatrixTransformation {
    fn apply(&self, components: &Components, vector: &Vector) -> Vector {
        let qubit_count = bits::qubits_for(vector.len());
        let circuit
            = self.factory.expand(
                qubit_count, &components.matrix.expanded(), &components.inputs);
        let v = vector.as_slice();
        let data = self.workers.collect(v.len(), |r| {
            v.iter().enumerate()
                .fold(C64::from(0.0), |acc, (c, a)| acc + circuit[(r, c)] * a)
        });
        Vector::from_vec_unchecked(data)
    }
}
