//! Threefish round constants (Skein 1.3).

/// Key schedule parity constant.
pub(crate) const C240: u64 = 0x1BD1_1BDA_A9FC_1A22;

/// Per-variant round parameters.
pub(crate) struct Schedule {
    pub(crate) rounds: usize,
    /// Eight rows of `words / 2` rotation amounts, flattened.
    pub(crate) rotations: &'static [u32],
    pub(crate) permutation: &'static [usize],
}

impl Schedule {
    /// Rotation amounts for round `d`.
    #[inline]
    pub(crate) fn rotation_row(&self, d: usize, pairs: usize) -> &'static [u32] {
        let start = (d % 8) * pairs;
        &self.rotations[start..start + pairs]
    }
}

#[rustfmt::skip]
const R256: [u32; 16] = [
    14, 16,
    52, 57,
    23, 40,
     5, 37,
    25, 33,
    46, 12,
    58, 22,
    32, 32,
];

#[rustfmt::skip]
const R512: [u32; 32] = [
    46, 36, 19, 37,
    33, 27, 14, 42,
    17, 49, 36, 39,
    44,  9, 54, 56,
    39, 30, 34, 24,
    13, 50, 10, 17,
    25, 29, 39, 43,
     8, 35, 56, 22,
];

#[rustfmt::skip]
const R1024: [u32; 64] = [
    24, 13,  8, 47,  8, 17, 22, 37,
    38, 19, 10, 55, 49, 18, 23, 52,
    33,  4, 51, 13, 34, 41, 59, 17,
     5, 20, 48, 41, 47, 28, 16, 25,
    41,  9, 37, 31, 12, 47, 44, 30,
    16, 34, 56, 51,  4, 53, 42, 41,
    31, 44, 47, 46, 19, 42, 44, 25,
     9, 48, 35, 52, 23, 31, 37, 20,
];

const P256: [usize; 4] = [0, 3, 2, 1];
const P512: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];
const P1024: [usize; 16] = [0, 9, 2, 13, 6, 11, 4, 15, 10, 7, 12, 3, 14, 5, 8, 1];

pub(crate) static SCHEDULE_256: Schedule = Schedule {
    rounds: 72,
    rotations: &R256,
    permutation: &P256,
};

pub(crate) static SCHEDULE_512: Schedule = Schedule {
    rounds: 72,
    rotations: &R512,
    permutation: &P512,
};

pub(crate) static SCHEDULE_1024: Schedule = Schedule {
    rounds: 80,
    rotations: &R1024,
    permutation: &P1024,
};
