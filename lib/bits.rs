//! Bit-level helpers for moving between global basis-state indices and the
//! local indices of a gate's operator.
//!
//! Qubit `q` of a register is bit `q` of a basis-state index. A gate acting on
//! inputs `[i_0, ..., i_{k-1}]` sees its own *k*-bit local index, with `i_0`
//! as the most significant local bit.

/// Return a mask with the bits at each of `positions` set.
pub fn mask(positions: &[usize]) -> usize {
    positions.iter().fold(0_usize, |acc, p| acc | (1_usize << p))
}

/// Collect the bits of `value` at `positions` into a packed integer, with the
/// first position as the most significant bit.
pub fn gather(value: usize, positions: &[usize]) -> usize {
    positions.iter()
        .fold(0_usize, |acc, p| (acc << 1) | ((value >> p) & 1))
}

/// Inverse of [`gather`]: spread the low `positions.len()` bits of `local`
/// back out to `positions`.
pub fn scatter(local: usize, positions: &[usize]) -> usize {
    let k = positions.len();
    positions.iter().enumerate()
        .filter(|(j, _)| (local >> (k - 1 - j)) & 1 == 1)
        .fold(0_usize, |acc, (_, p)| acc | (1_usize << p))
}

/// Number of qubits spanned by a power-of-two dimension.
pub fn qubits_for(dim: usize) -> usize { dim.trailing_zeros() as usize }

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mask_sets_bits() {
        assert_eq!(mask(&[]), 0);
        assert_eq!(mask(&[0, 2]), 0b101);
        assert_eq!(mask(&[3, 1]), 0b1010);
    }

    #[test]
    fn gather_orders_msb_first() {
        // bits of 0b1100: q3 = 1, q2 = 1, q1 = 0, q0 = 0
        assert_eq!(gather(0b1100, &[3, 0]), 0b10);
        assert_eq!(gather(0b1100, &[0, 3]), 0b01);
        assert_eq!(gather(0b1100, &[2, 3, 1]), 0b110);
        assert_eq!(gather(0b1111, &[]), 0);
    }

    #[test]
    fn scatter_inverts_gather() {
        let positions = [4, 1, 2];
        for value in 0..32_usize {
            let selected = value & mask(&positions);
            assert_eq!(scatter(gather(value, &positions), &positions), selected);
        }
        assert_eq!(scatter(0b10, &[3, 0]), 0b1000);
    }

    #[test]
    fn qubits_for_powers() {
        assert_eq!(qubits_for(1), 0);
        assert_eq!(qubits_for(2), 1);
        assert_eq!(qubits_for(16), 4);
    }
}
