//! Expansion of a gate operator to the full matrix of an *N*-qubit circuit.
//!
//! Entry (*r*, *c*) of the expanded matrix is found by splitting both indices
//! into the bits belonging to the gate's inputs (the "base" part, packed in
//! the operator's own ordering) and the remaining bits. The gate acts as the
//! identity on the remaining qubits, so the entry is the operator's
//! (base *r*, base *c*) entry when the remaining parts agree, and zero
//! otherwise.
//!
//! This costs *O*(4<sup>*N*</sup>) and is meant for unitary accumulation,
//! where the full matrix is needed anyway.

use num_complex::Complex64 as C64;
use crate::{ bits, matrix::Matrix, workers::Workers };

/// Builds full circuit matrices using a pool of workers.
#[derive(Clone, Debug)]
pub struct CircuitMatrixFactory {
    workers: Workers,
}

impl CircuitMatrixFactory {
    pub fn new(workers: Workers) -> Self { Self { workers } }

    /// Expand `base`, acting on `inputs` (most significant first), to a
    /// 2<sup>`qubit_count`</sup> × 2<sup>`qubit_count`</sup> matrix.
    ///
    /// `inputs` are expected to be unique, in bounds, and as many as `base`
    /// has qubits; [`extract`][crate::extract::extract] guarantees this.
    pub fn expand(&self, qubit_count: usize, base: &Matrix, inputs: &[usize])
        -> Matrix
    {
        let count: usize = 1 << qubit_count;
        let remaining: Vec<usize>
            = (0..qubit_count).rev()
            .filter(|q| !inputs.contains(q))
            .collect();
        let derived: Vec<(usize, usize)>
            = (0..count)
            .map(|k| (bits::gather(k, inputs), bits::gather(k, &remaining)))
            .collect();
        let data = self.workers.collect(count * count, |k| {
            // column-major: k = c * count + r
            let (base_r, rem_r) = derived[k % count];
            let (base_c, rem_c) = derived[k / count];
            if rem_r == rem_c { base[(base_r, base_c)] } else { C64::from(0.0) }
        });
        Matrix::from_column_major(count, data)
    }
}
