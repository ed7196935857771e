use std::f64::consts::FRAC_1_SQRT_2;
use rand::{ rngs::StdRng, Rng, SeedableRng };
use qsim::{
    error::{ Error, GateError, RegisterError },
    vector,
    C64,
    Circuit,
    Gate,
    Matrix,
    SimConfig,
    StatevectorRegister,
    UnitaryRegister,
    Vector,
};

fn config() -> SimConfig { SimConfig::default().with_max_concurrency(4) }

fn random_state(qubit_count: usize, rng: &mut StdRng) -> Vector {
    let amps: Vec<C64>
        = (0..1_usize << qubit_count)
        .map(|_| C64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5))
        .collect();
    let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    Vector::new(amps.into_iter().map(|a| a / norm).collect()).unwrap()
}

fn register(vector: Vector) -> StatevectorRegister {
    StatevectorRegister::new(vector, &config()).unwrap()
}

#[test]
fn hadamard_on_zero() {
    let reg = register(Vector::basis_state(0, 1).unwrap());
    let psi = reg.applying(&Gate::Hadamard(0)).unwrap();
    let expected
        = Vector::new(vec![C64::from(FRAC_1_SQRT_2), C64::from(FRAC_1_SQRT_2)])
        .unwrap();
    assert!(psi.statevector().unwrap().is_approx_eq(&expected, 1e-15));
    let probs = vector::probabilities(psi.statevector().unwrap());
    assert_eq!(probs.len(), 2);
    assert!((probs[0] - 0.5).abs() < 1e-15);
    assert!((probs[1] - 0.5).abs() < 1e-15);
}

#[test]
fn not_on_zero() {
    let reg = register(Vector::basis_state(0, 1).unwrap());
    let psi = reg.applying(&Gate::Not(0)).unwrap();
    let expected = Vector::new(vec![C64::from(0.0), C64::from(1.0)]).unwrap();
    assert_eq!(psi.statevector().unwrap(), &expected);
}

#[test]
fn bell_pair() {
    let psi
        = Circuit::with_config(
            2,
            vec![Gate::Hadamard(0), Gate::controlled_not(1, 0)],
            config(),
        )
        .statevector()
        .unwrap();
    let h = C64::from(FRAC_1_SQRT_2);
    let zero = C64::from(0.0);
    assert!(psi.is_approx_eq(&Vector::new(vec![h, zero, zero, h]).unwrap(), 1e-12));
}

#[test]
fn controlled_on_unset_control_is_identity() {
    // the controlled gate targets the qubit in superposition while its control
    // is still ∣0⟩, so no entanglement is produced
    let psi
        = Circuit::with_config(
            2,
            vec![Gate::Hadamard(0), Gate::controlled(Gate::Not(0), vec![1])],
            config(),
        )
        .statevector()
        .unwrap();
    let h = C64::from(FRAC_1_SQRT_2);
    let zero = C64::from(0.0);
    assert!(psi.is_approx_eq(&Vector::new(vec![h, h, zero, zero]).unwrap(), 1e-12));
}

#[test]
fn oracle_pattern_reads_first_control_as_high_bit() {
    // "01" means q2 = 0 and q1 = 1
    let gate = Gate::oracle(&["01"], vec![2, 1], Gate::Not(0));
    let cases = [
        (0b010, 0b011),
        (0b011, 0b010),
        (0b100, 0b100),
        (0b110, 0b110),
        (0b000, 0b000),
    ];
    for (input, output) in cases {
        let reg = register(Vector::basis_state(input, 3).unwrap());
        assert_eq!(
            reg.applying(&gate).unwrap().statevector().unwrap(),
            &Vector::basis_state(output, 3).unwrap(),
            "{:03b}", input,
        );
    }
}

#[test]
fn oracle_flips_target_only_on_match() {
    let gate = Gate::oracle(&["1"], vec![1], Gate::Not(0));
    // ∣q1 q0⟩ = ∣10⟩ → ∣11⟩
    let reg = register(Vector::basis_state(0b10, 2).unwrap());
    assert_eq!(
        reg.applying(&gate).unwrap().statevector().unwrap(),
        &Vector::basis_state(0b11, 2).unwrap(),
    );
    let reg = register(Vector::basis_state(0b00, 2).unwrap());
    assert_eq!(
        reg.applying(&gate).unwrap().statevector().unwrap(),
        &Vector::basis_state(0b00, 2).unwrap(),
    );
}

#[test]
fn structural_errors() {
    let reg = register(Vector::basis_state(0, 2).unwrap());
    let not = Matrix::permutation(&[1, 0]).unwrap();
    assert_eq!(
        reg.applying(&Gate::matrix(Matrix::identity(3), vec![0])).unwrap_err(),
        GateError::MatrixRowCountNotPowerOfTwo(3),
    );
    assert_eq!(
        reg.applying(&Gate::matrix(Matrix::identity(4), vec![0, 0])).unwrap_err(),
        GateError::InputsNotUnique,
    );
    assert_eq!(
        reg.applying(&Gate::matrix(not, vec![0, 1])).unwrap_err(),
        GateError::InputCountMismatch { inputs: 2, matrix_qubits: 1 },
    );
    assert_eq!(
        reg.applying(&Gate::controlled(Gate::Not(0), vec![])).unwrap_err(),
        GateError::EmptyControls,
    );
    assert_eq!(
        reg.applying(&Gate::matrix(Matrix::identity(8), vec![0, 1, 2])).unwrap_err(),
        GateError::MatrixTooWide { matrix_qubits: 3, qubit_count: 2 },
    );
    let skewed = Matrix::from_fn(2, 2, |r, c| C64::from((r + c) as f64));
    assert_eq!(
        reg.applying(&Gate::matrix(skewed, vec![0])).unwrap_err(),
        GateError::MatrixNotUnitary,
    );
}

#[test]
fn unnormalized_initial_state_is_reported() {
    let amps = vec![C64::from(1.0), C64::from(1.0), C64::from(0.0), C64::from(0.0)];
    let circuit = Circuit::with_config(2, vec![Gate::Hadamard(1)], config());
    assert!(matches!(
        circuit.statevector_from(Vector::new(amps).unwrap()),
        Err(Error::Register(RegisterError::StatevectorNotNormalized { .. }))
    ));
}

#[test]
fn random_states_stay_normalized() {
    let mut rng = StdRng::seed_from_u64(10546);
    let gates = [
        Gate::Hadamard(3),
        Gate::controlled(Gate::Hadamard(0), vec![3, 1]),
        Gate::oracle(&["011", "110"], vec![0, 1, 2], Gate::PhaseShift { radians: 2.0, target: 4 }),
        Gate::controlled_not(2, 4),
    ];
    for _ in 0..10 {
        let mut reg = register(random_state(5, &mut rng));
        for gate in gates.iter() {
            reg = reg.applying(gate).unwrap();
            assert!(reg.statevector().unwrap().is_normalized(1e-12));
        }
    }
}

#[test]
fn unitary_of_cnot_ladder() {
    let reg = UnitaryRegister::identity(3, &config()).unwrap();
    let reg = [Gate::controlled_not(1, 0), Gate::controlled_not(2, 1)]
        .iter()
        .try_fold(reg, |reg, gate| reg.applying(gate))
        .unwrap();
    let u = reg.unitary().unwrap();
    // ∣q2 q1 q0⟩: q1 ^= q0, then q2 ^= q1
    for k in 0..8_usize {
        let q0 = k & 1;
        let q1 = ((k >> 1) & 1) ^ q0;
        let q2 = ((k >> 2) & 1) ^ q1;
        let image = q0 | (q1 << 1) | (q2 << 2);
        assert_eq!(u[(image, k)], C64::from(1.0));
    }
}
