use std::fmt::Display;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// Append-only bit buffer with a fixed bit capacity. Bits fill each byte from the MSB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    bit_len: usize,
    bit_capacity: usize,
}

impl BitStream {
    pub fn new(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), bit_len: 0, bit_capacity }
    }

    pub fn len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    pub fn capacity(&self) -> usize {
        self.bit_capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn bits(&self) -> Bits<'_> {
        Bits { data: &self.data, cursor: 0, len: self.bit_len }
    }
}

// Writing
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the lowest `size` bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        assert!(
            size >= T::zero().count_zeros() as usize || bits >> size == T::zero(),
            "Value {bits} doesn't fit in {size} bits"
        );
        assert!(
            self.bit_len + size <= self.bit_capacity,
            "Pushing {size} bits overflows capacity {} at length {}",
            self.bit_capacity,
            self.bit_len
        );

        (0..size).rev().for_each(|i| self.push((bits >> i) & T::one() == T::one()));
    }

    pub fn push(&mut self, bit: bool) {
        assert!(self.bit_len < self.bit_capacity, "Bit stream is full at {}", self.bit_capacity);

        let (byte, offset) = (self.bit_len >> 3, self.bit_len & 7);
        if offset == 0 {
            self.data.push(0);
        }
        self.data[byte] |= (bit as u8) << (7 - offset);
        self.bit_len += 1;
    }
}


// Bit iterator
//------------------------------------------------------------------------------

/// Bits of a byte sequence, most significant bit of each byte first.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    data: &'a [u8],
    cursor: usize,
    len: usize,
}

impl<'a> Bits<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0, len: data.len() << 3 }
    }
}

impl Iterator for Bits<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len - self.cursor;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for Bits<'_> {}


// Helpers
//------------------------------------------------------------------------------

/// Unpacks a byte into its bits, most significant first.
pub fn byte_to_bits(byte: u8) -> [bool; 8] {
    std::array::from_fn(|i| (byte >> (7 - i)) & 1 == 1)
}

/// Index of the first entry in an ascending slice that is not less than `target`.
pub fn lower_bound<T: Ord>(sorted: &[T], target: &T) -> Option<usize> {
    let idx = sorted.partition_point(|x| x < target);
    (idx < sorted.len()).then_some(idx)
}

/// Every `(row, col)` pair with `row` drawn from `rows` and `col` from `cols`, row-major.
pub fn coordinate_pairs<'a, T: Copy>(
    rows: &'a [T],
    cols: &'a [T],
) -> impl Iterator<Item = (T, T)> + 'a {
    rows.iter().flat_map(move |&r| cols.iter().map(move |&c| (r, c)))
}
