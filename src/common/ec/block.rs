use std::ops::Deref;

use crate::common::metadata::{ECLevel, Version};

// Block divider
//------------------------------------------------------------------------------

/// Splits the padded data codewords into the blocks mandated by version and level.
/// The trailing `len % blocks` blocks are one codeword longer than the rest.
pub fn blockify(data: &[u8], version: Version, ecl: ECLevel) -> Vec<&[u8]> {
    let block_count = version.num_blocks(ecl);
    let block_size = data.len() / block_count;
    let rem = data.len() % block_count;

    assert_eq!(
        data.len(),
        version.data_capacity(ecl),
        "Data len doesn't match version {version} {ecl:?} capacity"
    );

    let short_len = block_size * (block_count - rem);
    let mut data_blocks = Vec::with_capacity(block_count);
    if block_size > 0 {
        data_blocks.extend(data[..short_len].chunks(block_size));
    }
    data_blocks.extend(data[short_len..].chunks(block_size + 1));
    data_blocks
}

// Interleaver
//------------------------------------------------------------------------------

/// Reads blocks column by column, skipping blocks that are shorter than the column index.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Inverse of [`interleave`] given the length of every block.
pub fn deinterleave<T: Copy>(data: &[T], block_lens: &[usize]) -> Vec<Vec<T>> {
    let total_size = block_lens.iter().sum::<usize>();
    assert_eq!(data.len(), total_size, "Interleaved length doesn't match block sizes");

    let max_block_size = block_lens.iter().copied().max().unwrap_or(0);
    let mut res = block_lens.iter().map(|&l| Vec::with_capacity(l)).collect::<Vec<_>>();
    let mut src = data.iter();
    for i in 0..max_block_size {
        for (b, &l) in res.iter_mut().zip(block_lens) {
            if i < l {
                b.extend(src.next());
            }
        }
    }
    res
}
