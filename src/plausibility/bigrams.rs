// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Letter-pair counts, row = first letter, column = second letter.
//!
//! Counted over a sample of ordinary prose and signal traffic, twice: once
//! with the words run together and once with `X` between words, the way
//! operators marked word breaks. Umlauts are folded (`AE`, `OE`, `UE`) and
//! `SZ`/`SS` stand for sharp s.

use crate::alphabet::ALPHABET_SIZE;

#[rustfmt::skip]
pub(super) const GERMAN_BIGRAMS: [[u16; ALPHABET_SIZE]; ALPHABET_SIZE] = [
    [0, 22, 42, 14, 40, 12, 30, 12, 2, 0, 2, 28, 27, 80, 0, 2, 0, 48, 28, 22, 40, 0, 0, 1, 0, 0], // A
    [13, 0, 0, 0, 99, 0, 0, 0, 12, 0, 1, 6, 0, 0, 8, 0, 0, 14, 6, 6, 8, 0, 2, 5, 0, 0], // B
    [0, 0, 0, 0, 0, 0, 0, 198, 0, 0, 10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // C
    [33, 1, 0, 10, 172, 0, 1, 0, 88, 0, 1, 13, 1, 4, 12, 0, 0, 13, 12, 8, 16, 1, 4, 48, 0, 2], // D
    [10, 30, 32, 34, 16, 18, 34, 60, 152, 0, 11, 62, 31, 318, 2, 3, 0, 289, 104, 43, 21, 5, 13, 124, 0, 8], // E
    [8, 1, 0, 5, 46, 18, 0, 0, 4, 0, 5, 8, 1, 0, 11, 1, 0, 14, 0, 14, 18, 0, 0, 12, 0, 0], // F
    [12, 1, 0, 6, 118, 2, 0, 2, 14, 0, 2, 0, 2, 5, 0, 0, 0, 12, 6, 8, 9, 0, 0, 30, 0, 1], // G
    [45, 1, 0, 8, 54, 3, 1, 4, 12, 0, 0, 24, 5, 15, 12, 0, 0, 28, 16, 52, 12, 1, 7, 34, 0, 0], // H
    [0, 15, 50, 3, 138, 12, 18, 4, 0, 0, 2, 12, 24, 126, 6, 1, 0, 12, 43, 70, 1, 3, 0, 6, 0, 0], // I
    [4, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0], // J
    [15, 0, 0, 0, 20, 2, 2, 0, 6, 0, 0, 8, 2, 2, 18, 0, 0, 4, 5, 6, 16, 0, 0, 4, 0, 0], // K
    [33, 5, 0, 18, 60, 1, 4, 2, 28, 0, 0, 24, 0, 3, 10, 0, 0, 2, 6, 16, 16, 0, 0, 12, 0, 2], // L
    [24, 7, 0, 2, 34, 1, 2, 4, 24, 1, 1, 1, 14, 3, 12, 7, 1, 3, 6, 0, 12, 1, 1, 38, 0, 1], // M
    [51, 8, 0, 156, 78, 10, 63, 6, 27, 2, 20, 6, 14, 31, 20, 0, 0, 3, 21, 40, 22, 8, 15, 187, 0, 14], // N
    [0, 4, 12, 7, 26, 16, 4, 0, 0, 0, 0, 10, 10, 32, 6, 2, 0, 44, 18, 10, 0, 0, 0, 1, 0, 0], // O
    [8, 0, 0, 0, 10, 6, 0, 0, 5, 0, 0, 0, 0, 0, 4, 10, 0, 8, 2, 2, 0, 0, 0, 1, 0, 0], // P
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0], // Q
    [42, 26, 8, 40, 85, 10, 17, 6, 37, 1, 21, 11, 10, 28, 11, 0, 0, 6, 31, 35, 32, 2, 5, 86, 0, 8], // R
    [6, 4, 52, 9, 72, 0, 3, 4, 37, 0, 0, 0, 2, 3, 20, 18, 0, 1, 41, 125, 13, 1, 2, 44, 0, 5], // S
    [52, 5, 0, 13, 149, 6, 7, 2, 19, 3, 3, 7, 4, 1, 11, 0, 0, 26, 22, 27, 15, 6, 7, 106, 0, 29], // T
    [2, 6, 12, 0, 74, 22, 12, 10, 0, 0, 0, 4, 21, 122, 0, 8, 0, 17, 24, 11, 0, 1, 1, 11, 0, 0], // U
    [2, 0, 0, 0, 18, 0, 0, 0, 16, 0, 0, 0, 0, 0, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // V
    [32, 0, 0, 0, 44, 0, 0, 0, 18, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0], // W
    [56, 44, 0, 112, 43, 27, 32, 20, 39, 7, 31, 18, 32, 31, 11, 4, 1, 14, 71, 13, 53, 23, 41, 0, 0, 28], // X
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // Y
    [4, 0, 0, 1, 16, 0, 0, 0, 6, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 12, 48, 0, 6, 1, 0, 0], // Z
];

#[rustfmt::skip]
pub(super) const ENGLISH_BIGRAMS: [[u16; ALPHABET_SIZE]; ALPHABET_SIZE] = [
    [0, 9, 12, 28, 0, 7, 9, 0, 27, 0, 7, 34, 8, 96, 0, 3, 0, 50, 60, 53, 6, 11, 4, 20, 24, 0], // A
    [6, 0, 0, 1, 38, 0, 0, 0, 4, 0, 0, 6, 2, 0, 16, 0, 0, 10, 0, 0, 10, 0, 0, 1, 8, 0], // B
    [19, 0, 0, 0, 22, 0, 0, 30, 12, 0, 4, 6, 0, 0, 26, 0, 0, 4, 0, 4, 2, 0, 0, 1, 0, 0], // C
    [29, 6, 2, 2, 32, 8, 5, 1, 13, 0, 0, 2, 0, 6, 17, 0, 1, 11, 11, 25, 2, 0, 7, 94, 8, 0], // D
    [61, 10, 30, 55, 25, 10, 7, 13, 13, 0, 5, 30, 13, 51, 12, 19, 1, 110, 76, 60, 3, 20, 18, 187, 11, 0], // E
    [9, 1, 0, 0, 6, 0, 0, 0, 4, 0, 0, 2, 1, 0, 22, 0, 0, 12, 0, 14, 6, 0, 0, 13, 0, 0], // F
    [5, 1, 1, 2, 20, 2, 0, 24, 7, 0, 0, 1, 1, 0, 10, 1, 0, 6, 2, 3, 0, 0, 3, 25, 0, 0], // G
    [47, 0, 0, 2, 254, 0, 0, 1, 37, 0, 0, 0, 3, 0, 27, 0, 0, 6, 3, 19, 2, 1, 2, 12, 0, 0], // H
    [4, 2, 14, 22, 18, 2, 16, 0, 0, 0, 4, 28, 20, 110, 6, 2, 0, 12, 44, 56, 0, 6, 0, 0, 0, 2], // I
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // J
    [4, 0, 0, 0, 16, 0, 0, 0, 13, 0, 0, 0, 0, 9, 0, 0, 0, 0, 2, 3, 0, 0, 1, 10, 0, 0], // K
    [21, 7, 1, 29, 39, 0, 0, 0, 20, 0, 2, 42, 3, 1, 22, 1, 0, 0, 4, 5, 2, 0, 3, 22, 18, 0], // L
    [17, 6, 0, 0, 50, 0, 0, 1, 1, 0, 0, 0, 6, 2, 18, 1, 0, 0, 1, 3, 8, 0, 1, 9, 4, 0], // M
    [12, 0, 12, 90, 29, 2, 55, 1, 17, 0, 2, 6, 3, 4, 46, 1, 0, 4, 19, 43, 3, 2, 4, 61, 6, 0], // N
    [8, 8, 6, 14, 2, 26, 2, 3, 1, 0, 10, 10, 28, 72, 26, 10, 0, 81, 12, 30, 51, 8, 42, 31, 3, 0], // O
    [7, 0, 0, 0, 10, 0, 0, 0, 5, 0, 0, 16, 0, 0, 17, 2, 0, 6, 2, 4, 2, 0, 0, 3, 0, 0], // P
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0], // Q
    [25, 2, 5, 13, 80, 1, 3, 2, 34, 0, 14, 10, 6, 14, 45, 1, 0, 7, 22, 38, 0, 4, 0, 44, 8, 0], // R
    [26, 1, 10, 2, 40, 2, 2, 25, 23, 0, 2, 8, 2, 4, 20, 10, 3, 1, 17, 81, 14, 0, 10, 85, 4, 0], // S
    [39, 5, 3, 3, 40, 2, 0, 262, 46, 0, 1, 5, 4, 1, 77, 1, 0, 20, 18, 29, 6, 1, 13, 92, 2, 0], // T
    [6, 2, 3, 0, 4, 0, 8, 1, 6, 0, 0, 12, 8, 16, 0, 4, 0, 14, 20, 26, 0, 0, 0, 2, 0, 0], // U
    [2, 0, 0, 0, 46, 0, 0, 0, 10, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // V
    [34, 0, 0, 0, 32, 1, 0, 20, 20, 0, 0, 4, 0, 12, 21, 0, 0, 3, 5, 2, 0, 0, 1, 11, 0, 0], // W
    [81, 38, 29, 19, 24, 27, 7, 32, 46, 0, 7, 20, 18, 22, 42, 17, 3, 20, 59, 164, 7, 6, 58, 0, 11, 0], // X
    [6, 4, 2, 0, 11, 0, 0, 0, 9, 0, 0, 0, 2, 2, 12, 1, 0, 1, 15, 6, 0, 1, 1, 34, 1, 0], // Y
    [0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // Z
];
