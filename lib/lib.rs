//! Exact, dense simulation of quantum circuits.
//!
//! A circuit is an ordered list of [`Gate`]s acting on *N* qubits. Running it
//! produces either the final 2<sup>*N*</sup>-entry statevector or the full
//! 2<sup>*N*</sup> × 2<sup>*N*</sup> unitary the circuit implements.
//!
//! Qubit *q* corresponds to bit *q* of a basis-state index, so qubit 0 is the
//! least significant. Within a gate's own operator the first input is the most
//! significant bit, so for controlled gates the controls sit in the high bits.
//!
//! Gate applications are split across a fixed pool of worker threads (see
//! [`SimConfig::max_concurrency`]); results don't depend on the pool size.

pub mod bits;
pub mod circuit;
pub mod config;
pub mod error;
pub mod extract;
pub mod factory;
pub mod gate;
pub mod matrix;
pub mod register;
pub mod transform;
pub mod vector;
pub mod workers;

pub use num_complex::Complex64 as C64;
pub use circuit::Circuit;
pub use config::{ SimConfig, StatevectorTransformationKind };
pub use error::{ Error, Result };
pub use gate::{ Axis, Gate };
pub use matrix::Matrix;
pub use register::{ StatevectorRegister, UnitaryRegister };
pub use vector::Vector;
