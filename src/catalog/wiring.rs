// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Published wiring tables (contact A..Z maps to the listed letter).

pub(super) const ROTOR_I: &[u8; 26] = b"EKMFLGDQVZNTOWYHXUSPAIBRCJ";
pub(super) const ROTOR_II: &[u8; 26] = b"AJDKSIRUXBLHWTMCQGZNPYFVOE";
pub(super) const ROTOR_III: &[u8; 26] = b"BDFHJLCPRTXVZNYEIWGAKMUSQO";
pub(super) const ROTOR_IV: &[u8; 26] = b"ESOVPZJAYQUIRHXLNFTGKDCMWB";
pub(super) const ROTOR_V: &[u8; 26] = b"VZBRGITYUPSDNHLXAWMJQOFECK";
pub(super) const ROTOR_VI: &[u8; 26] = b"JPGVOUMFYQBENHZRDKASXLICTW";
pub(super) const ROTOR_VII: &[u8; 26] = b"NZJHGRCXMYSWBOUFAIVLPEKQDT";
pub(super) const ROTOR_VIII: &[u8; 26] = b"FKQHTLXOCBJSPDZRAMEWNIUYGV";
pub(super) const ROTOR_BETA: &[u8; 26] = b"LEYJVCNIXWPBQMDRTAKZGFUHOS";
pub(super) const ROTOR_GAMMA: &[u8; 26] = b"FSOKANUERHMBTIYCWLQPZXVGJD";

pub(super) const REFLECTOR_A: &[u8; 26] = b"EJMZALYXVBWFCRQUONTSPIKHGD";
pub(super) const REFLECTOR_B: &[u8; 26] = b"YRUHQSLDPXNGOKMIEBFZCWVJAT";
pub(super) const REFLECTOR_C: &[u8; 26] = b"FVPJIAOYEDRZXWGCTKUQSBNMHL";
pub(super) const REFLECTOR_B_THIN: &[u8; 26] = b"ENKQAUYWJICOPBLMDXZVFTHRGS";
pub(super) const REFLECTOR_C_THIN: &[u8; 26] = b"RDOBJNTKVEHMLFCWZAXGYIPSUQ";
