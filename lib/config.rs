//! Simulation settings shared by registers and circuits.

use std::num::NonZeroUsize;
use crate::error::ConfigError;

/// Default tolerance for unitarity checks, both on user-supplied gate
/// matrices and on accumulated circuit matrices.
pub const UNITARY_TOLERANCE: f64 = 1e-3;

/// Default tolerance on |Σ|a<sub>*i*</sub>|² − 1| for a valid statevector.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-10;

/// Strategy used by statevector registers to apply a gate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatevectorTransformationKind {
    /// Bit-mask indexing directly on the amplitude vector; never builds a
    /// 2<sup>*N*</sup> × 2<sup>*N*</sup> matrix.
    #[default]
    Direct,
    /// Expand the gate to a full circuit matrix and multiply.
    ///
    /// *O*(4<sup>*N*</sup>) per gate; kept as a reference path.
    CircuitMatrix,
}

/// Settings for a simulation.
///
/// Tolerances are policy choices rather than derived values, so they are
/// exposed here instead of being fixed in the kernels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of worker threads used to compute a single gate application.
    pub max_concurrency: usize,
    /// Absolute tolerance for unitarity checks.
    pub unitary_tolerance: f64,
    /// Absolute tolerance for statevector normalization checks.
    pub normalization_tolerance: f64,
    /// How statevector registers apply gates.
    pub statevector_transformation: StatevectorTransformationKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        let max_concurrency
            = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            max_concurrency,
            unitary_tolerance: UNITARY_TOLERANCE,
            normalization_tolerance: NORMALIZATION_TOLERANCE,
            statevector_transformation: StatevectorTransformationKind::Direct,
        }
    }
}

impl SimConfig {
    /// Set the number of worker threads.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Set the unitarity tolerance.
    pub fn with_unitary_tolerance(mut self, tol: f64) -> Self {
        self.unitary_tolerance = tol;
        self
    }

    /// Set the normalization tolerance.
    pub fn with_normalization_tolerance(mut self, tol: f64) -> Self {
        self.normalization_tolerance = tol;
        self
    }

    /// Set the statevector transformation strategy.
    pub fn with_statevector_transformation(
        mut self,
        kind: StatevectorTransformationKind,
    ) -> Self
    {
        self.statevector_transformation = kind;
        self
    }

    /// Check that all settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::MaxConcurrencyNotPositive);
        }
        check_tolerance("unitary tolerance", self.unitary_tolerance)?;
        check_tolerance("normalization tolerance", self.normalization_tolerance)?;
        Ok(())
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ToleranceNotPositive { name, value })
    }
}
