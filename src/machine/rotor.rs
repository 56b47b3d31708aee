// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rotor state: a catalog rotor plus its current offset and ring setting.

use crate::alphabet::{Letter, ALPHABET_SIZE};
use crate::catalog::RotorSpec;

const N: u8 = ALPHABET_SIZE as u8;

/// One rotor mounted in a machine.
///
/// `offset` is the letter showing in the window (0 = A) and changes as the
/// rotor steps. `ring` rotates the wiring relative to the alphabet ring and
/// therefore the notch; it is fixed for a run.
#[derive(Debug, Clone)]
pub struct RotorState {
    spec: &'static RotorSpec,
    offset: u8,
    ring: u8,
}

impl RotorState {
    pub fn new(spec: &'static RotorSpec, ring: u8, offset: u8) -> Self {
        debug_assert!(ring < N && offset < N);
        Self { spec, offset, ring }
    }

    pub fn spec(&self) -> &'static RotorSpec {
        self.spec
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn ring(&self) -> u8 {
        self.ring
    }

    pub fn window(&self) -> Letter {
        Letter::new(self.offset)
    }

    /// Notches are cut in the alphabet ring, so they follow the window letter
    /// and are unaffected by the ring setting.
    pub fn at_notch(&self) -> bool {
        self.spec.is_notch(self.offset)
    }

    pub fn step(&mut self) {
        self.offset = (self.offset + 1) % N;
    }

    fn shift(&self) -> u8 {
        (self.offset + N - self.ring) % N
    }

    /// Map a contact entering from the entry side.
    pub fn forward(&self, contact: u8) -> u8 {
        let shift = self.shift();
        let out = self.spec.forward((contact + shift) % N);
        (out + N - shift) % N
    }

    /// Map a contact returning from the reflector side.
    pub fn backward(&self, contact: u8) -> u8 {
        let shift = self.shift();
        let out = self.spec.backward((contact + shift) % N);
        (out + N - shift) % N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RotorId;

    #[test]
    fn test_forward_at_rest() {
        let rotor = RotorState::new(RotorId::I.spec(), 0, 0);
        assert_eq!(rotor.forward(0), 4); // A -> E
        assert_eq!(rotor.backward(4), 0);
    }

    #[test]
    fn test_offset_shifts_wiring() {
        // Rotor I at B: A enters contact B, wired to K, exits as J.
        let rotor = RotorState::new(RotorId::I.spec(), 0, 1);
        assert_eq!(rotor.forward(0), 9);
    }

    #[test]
    fn test_ring_cancels_offset() {
        let plain = RotorState::new(RotorId::III.spec(), 0, 0);
        let turned = RotorState::new(RotorId::III.spec(), 5, 5);
        for c in 0..N {
            assert_eq!(plain.forward(c), turned.forward(c));
        }
    }

    #[test]
    fn test_backward_inverts_forward() {
        for ring in [0, 7, 25] {
            for offset in [0, 13, 24] {
                let rotor = RotorState::new(RotorId::V.spec(), ring, offset);
                for c in 0..N {
                    assert_eq!(rotor.backward(rotor.forward(c)), c);
                }
            }
        }
    }

    #[test]
    fn test_step_wraps() {
        let mut rotor = RotorState::new(RotorId::II.spec(), 0, 25);
        rotor.step();
        assert_eq!(rotor.window(), Letter::new(0));
    }

    #[test]
    fn test_notch_ignores_ring() {
        let rotor = RotorState::new(RotorId::I.spec(), 10, 16);
        assert!(rotor.at_notch());
    }
}
