mod block;
mod galois;

pub use block::*;
pub(crate) use galois::*;

use super::metadata::{ECLevel, Version};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Computes the correction block for every data block, in block order.
pub fn ecc<B: AsRef<[u8]>>(data_blocks: &[B], version: Version, ecl: ECLevel) -> Vec<Vec<u8>> {
    let ecc_count = version.ecc_per_block(ecl);
    data_blocks.iter().map(|b| ecc_per_block(b.as_ref(), ecc_count)).collect()
}

// Remainder of block * x^ecc_count divided by the generator polynomial. Each nonzero
// leading coefficient is cancelled by adding the generator scaled to it, in log form.
pub(crate) fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let gen_poly = GENERATOR_POLYNOMIALS[ecc_count];
    assert_eq!(gen_poly.len(), ecc_count, "No generator polynomial for {ecc_count} codewords");

    let mut rem = block.iter().copied().chain(std::iter::repeat(0).take(ecc_count)).collect::<Vec<_>>();
    for lead in 0..block.len() {
        let coeff = rem[lead];
        if coeff == 0 {
            continue;
        }

        let scale = log(coeff);
        let tail = &mut rem[lead + 1..lead + 1 + ecc_count];
        tail.iter_mut().zip(gen_poly).for_each(|(r, &g)| *r ^= exp(g as usize + scale));
    }

    rem.split_off(block.len())
}
