//! Dense complex vectors and the statevector helpers built on them.

use std::{ fmt, ops::{ Index, Mul } };
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rustc_hash::FxHashMap;
use crate::{
    bits,
    error::VectorError,
    matrix::Matrix,
};

/// A sequence of complex amplitudes.
///
/// Only vectors of length 2<sup>*N*</sup> whose squared moduli sum to one are
/// valid *N*-qubit states; registers check this before handing a vector back.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector(na::DVector<C64>);

impl From<na::DVector<C64>> for Vector {
    fn from(data: na::DVector<C64>) -> Self { Self(data) }
}

impl From<Vector> for na::DVector<C64> {
    fn from(vector: Vector) -> Self { vector.0 }
}

impl Index<usize> for Vector {
    type Output = C64;

    fn index(&self, k: usize) -> &Self::Output { &self.0[k] }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        Vector(self.as_dmatrix() * &rhs.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl Vector {
    /// Wrap a list of amplitudes.
    ///
    /// Fails if `amplitudes` is empty.
    pub fn new(amplitudes: Vec<C64>) -> Result<Self, VectorError> {
        if amplitudes.is_empty() { return Err(VectorError::Empty); }
        Ok(Self(na::DVector::from_vec(amplitudes)))
    }

    pub(crate) fn from_vec_unchecked(amplitudes: Vec<C64>) -> Self {
        Self(na::DVector::from_vec(amplitudes))
    }

    /// Create the computational basis state ∣`value`⟩ of `qubit_count` qubits.
    pub fn basis_state(value: usize, qubit_count: usize)
        -> Result<Self, VectorError>
    {
        if qubit_count == 0 { return Err(VectorError::ZeroQubitCount); }
        let len = u32::try_from(qubit_count).ok()
            .and_then(|n| 1_usize.checked_shl(n))
            .filter(|len| value < *len)
            .ok_or(VectorError::ValueOutOfRange { value, qubit_count })?;
        let mut data: na::DVector<C64> = na::DVector::zeros(len);
        data[value] = C64::from(1.0);
        Ok(Self(data))
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_slice(&self) -> &[C64] { self.0.as_slice() }

    pub fn iter(&self) -> impl Iterator<Item = &C64> + '_ { self.0.iter() }

    /// Return Σ|a<sub>*i*</sub>|².
    pub fn norm_sqr(&self) -> f64 { self.0.iter().map(|a| a.norm_sqr()).sum() }

    /// Return `true` if the squared moduli sum to one within `tol`.
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.norm_sqr() - 1.0).abs() <= tol
    }

    /// Return `true` if `self` and `other` have the same length and every pair
    /// of amplitudes differs by at most `tol` in modulus.
    pub fn is_approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.len() == other.len()
            && self.0.iter().zip(other.0.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Return the probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.0.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Return the total probability of each outcome of the given `qubits`,
    /// keyed by bit string with the first listed qubit as the leftmost
    /// character.
    ///
    /// Outcomes with zero probability are left out.
    pub fn summarized_probabilities(&self, qubits: &[usize])
        -> Result<FxHashMap<String, f64>, VectorError>
    {
        let len = self.len();
        if !len.is_power_of_two() {
            return Err(VectorError::LengthNotPowerOfTwo(len));
        }
        let qubit_count = bits::qubits_for(len);
        if let Some(&qubit) = qubits.iter().find(|&&q| q >= qubit_count) {
            return Err(VectorError::QubitOutOfBounds { qubit, qubit_count });
        }
        if let Some(&qubit) = qubits.iter().duplicates().next() {
            return Err(VectorError::RepeatedQubit(qubit));
        }
        let mut summary: FxHashMap<String, f64> = FxHashMap::default();
        for (index, amp) in self.0.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob == 0.0 { continue; }
            let key: String
                = qubits.iter()
                .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
                .collect();
            *summary.entry(key).or_insert(0.0) += prob;
        }
        Ok(summary)
    }
}

/// Return the probability of each basis state of `vector`.
pub fn probabilities(vector: &Vector) -> Vec<f64> { vector.probabilities() }
