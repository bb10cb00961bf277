use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::error::{QRError, QRResult};
use super::version_db::{
    ALIGNMENT_PATTERN_POSITIONS, DATA_BIT_CAPACITY, ECC_PER_BLOCK, FORMAT_INFOS, NUM_BLOCKS,
    VERSION_INFOS,
};

// Error correction level
//------------------------------------------------------------------------------

/// Error correction strength. Ascending correction, descending data capacity.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Data bit capacities of versions 1 through 40 at this level, in ascending order.
    pub fn capacities(self) -> &'static [usize; 40] {
        &DATA_BIT_CAPACITY[self as usize]
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    /// Version for a zero-based index into the per-version tables.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < 40, "Version index out of range: {index}");
        Self(index + 1)
    }

    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }

    pub fn next(self) -> Option<Self> {
        if self < Self::MAX {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        ecl.capacities()[self.index()]
    }

    pub fn data_capacity(self, ecl: ECLevel) -> usize {
        self.data_bit_capacity(ecl) >> 3
    }

    /// Width in bits of the byte-count field that follows the mode indicator.
    pub fn char_cnt_bits(self) -> usize {
        if self.0 < 10 {
            8
        } else {
            16
        }
    }

    pub fn num_blocks(self, ecl: ECLevel) -> usize {
        NUM_BLOCKS[ecl as usize][self.index()]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[ecl as usize][self.index()]
    }

    pub fn total_codewords(self, ecl: ECLevel) -> usize {
        self.data_capacity(ecl) + self.num_blocks(ecl) * self.ecc_per_block(ecl)
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// 18-bit version information code. Only versions 7 and above carry one.
    pub fn info(self) -> Option<u32> {
        match self.0 {
            7..=40 => Some(VERSION_INFOS[self.0 - 7]),
            _ => None,
        }
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 15-bit format information code for a level and mask index.
pub(crate) fn format_info(ecl: ECLevel, mask: u8) -> u32 {
    FORMAT_INFOS[ecl as usize][mask as usize]
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }

    /// Color of a module whose stored value is its lightness.
    pub fn from_light(light: bool) -> Self {
        if light {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
