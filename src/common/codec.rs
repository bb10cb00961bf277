use super::bit_utils::{lower_bound, BitStream};
use super::error::{CapacityError, QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Byte mode indicator
pub(crate) const MODE_BYTE: u8 = 0b0100;
pub(crate) const MODE_BITS: usize = 4;

pub(crate) const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Capacity planner
//------------------------------------------------------------------------------

/// Smallest version whose data capacity at `ecl` holds a `len` byte payload.
pub fn find_version(len: usize, ecl: ECLevel) -> QRResult<Version> {
    let bits = MODE_BITS + (len << 3);
    let idx = lower_bound(ecl.capacities(), &bits).ok_or(CapacityError::NoCapacity { ecl, bits })?;

    // The count field widens at version 10, so the estimate may spill into the next version
    let mut ver = Version::from_index(idx);
    while bits + ver.char_cnt_bits() > ver.data_bit_capacity(ecl) {
        let bits = bits + ver.char_cnt_bits();
        ver = ver.next().ok_or(CapacityError::TooLargeSize { ecl, bits })?;
    }
    Ok(ver)
}

/// Header plus payload bits for a `len` byte payload at `ver`.
pub fn encoded_bit_len(len: usize, ver: Version) -> usize {
    MODE_BITS + ver.char_cnt_bits() + (len << 3)
}

#[cfg(test)]
mod planner_tests {
    use test_case::test_case;

    use super::{encoded_bit_len, find_version};
    use crate::common::error::{CapacityError, QRError};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_hi_fits_version_1() {
        let ver = find_version(3, ECLevel::L).unwrap();
        assert_eq!(*ver, 1);
        assert_eq!(encoded_bit_len(3, ver), 36);
    }

    #[test_case(0, ECLevel::L, 1)]
    #[test_case(17, ECLevel::L, 1)]
    #[test_case(18, ECLevel::L, 2)]
    #[test_case(14, ECLevel::M, 1)]
    #[test_case(15, ECLevel::M, 2)]
    #[test_case(7, ECLevel::H, 1)]
    #[test_case(8, ECLevel::H, 2)]
    #[test_case(230, ECLevel::L, 9)]
    #[test_case(231, ECLevel::L, 10)]
    #[test_case(2953, ECLevel::L, 40)]
    #[test_case(1273, ECLevel::H, 40)]
    fn test_find_version(len: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(find_version(len, ecl), Ok(Version::new(exp).unwrap()));
    }

    #[test_case(2954, ECLevel::L, 23652)]
    #[test_case(2955, ECLevel::L, 23660)]
    #[test_case(1274, ECLevel::H, 10212)]
    fn test_too_large_size(len: usize, ecl: ECLevel, bits: usize) {
        let err = find_version(len, ecl).unwrap_err();
        assert_eq!(err, QRError::VersionNotFound(CapacityError::TooLargeSize { ecl, bits }));
    }

    #[test_case(2956, ECLevel::L)]
    #[test_case(5000, ECLevel::Q)]
    fn test_no_capacity(len: usize, ecl: ECLevel) {
        let bits = 4 + len * 8;
        let err = find_version(len, ecl).unwrap_err();
        assert_eq!(err, QRError::VersionNotFound(CapacityError::NoCapacity { ecl, bits }));
    }

    #[test]
    fn test_version_is_minimal() {
        for ecl in ECLevel::ALL {
            for len in 0..=3000 {
                let Ok(ver) = find_version(len, ecl) else {
                    assert!(encoded_bit_len(len, Version::MAX) > Version::MAX.data_bit_capacity(ecl));
                    continue;
                };
                assert!(encoded_bit_len(len, ver) <= ver.data_bit_capacity(ecl));
                for v in 1..*ver {
                    let smaller = Version::new(v).unwrap();
                    assert!(encoded_bit_len(len, smaller) > smaller.data_bit_capacity(ecl));
                }
            }
        }
    }
}

// Bit stream encoder
//------------------------------------------------------------------------------

/// Picks the smallest version for `data` and encodes it into a padded bit stream.
pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
    let ver = find_version(data.len(), ecl)?;
    let bs = encode_with_version(data, ver, ecl)?;
    Ok((bs, ver))
}

/// Encodes `data` into a bit stream filling exactly the data capacity of `ver` at `ecl`.
///
/// The stream starts with the byte mode indicator, followed by the byte count and the
/// payload. Count and payload are written low nibble first: 8 bit counts as
/// `lo, hi`, 16 bit counts as `lo, mid byte, hi`, and every payload byte as `lo, hi`.
/// A zero nibble realigns the stream to a byte boundary before padding.
pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let capacity = ver.data_bit_capacity(ecl);
    let bits = encoded_bit_len(data.len(), ver);
    if bits > capacity {
        return Err(QRError::DataTooLong { version: ver, bits, capacity });
    }

    let mut bs = BitStream::new(capacity);
    push_header(data.len(), ver, &mut bs);
    push_payload(data, &mut bs);
    pad_remaining_capacity(&mut bs);

    assert_eq!(bs.len(), capacity, "Encoded stream doesn't fill version {ver} {ecl:?}");
    Ok(bs)
}

fn push_header(len: usize, ver: Version, bs: &mut BitStream) {
    bs.push_bits(MODE_BYTE, MODE_BITS);
    bs.push_bits(len & 0xF, 4);
    match ver.char_cnt_bits() {
        8 => bs.push_bits((len >> 4) & 0xF, 4),
        _ => {
            bs.push_bits((len >> 4) & 0xFF, 8);
            bs.push_bits((len >> 12) & 0xF, 4);
        }
    }
}

fn push_payload(data: &[u8], bs: &mut BitStream) {
    for &b in data {
        bs.push_bits(b & 0xF, 4);
        bs.push_bits(b >> 4, 4);
    }
    bs.push_bits(0u8, 4);
}

fn pad_remaining_capacity(bs: &mut BitStream) {
    debug_assert!(bs.len() & 7 == 0, "Stream must be byte aligned before padding");

    let remaining = (bs.capacity() - bs.len()) >> 3;
    PADDING_CODEWORDS.iter().cycle().take(remaining).for_each(|&pc| bs.push_bits(pc, 8));
}

#[cfg(test)]
mod encoder_tests {
    use test_case::test_case;

    use super::{encode, encode_with_version};
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_encode_hi() {
        let (bs, ver) = encode(b"HI!", ECLevel::L).unwrap();
        assert_eq!(*ver, 1);
        assert_eq!(bs.len(), 152);
        assert_eq!(bs.data().len(), 152 / 8);
        assert_eq!(
            bs.data(),
            b"\x43\x08\x49\x41\x20\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11"
        );
    }

    #[test]
    fn test_encode_empty() {
        let (bs, ver) = encode(b"", ECLevel::H).unwrap();
        assert_eq!(*ver, 1);
        assert_eq!(&bs.data()[..3], b"\x40\x00\xec");
        assert_eq!(bs.len(), 72);
    }

    #[test]
    fn test_encode_wide_count() {
        let data = vec![0x5A; 300];
        let (bs, ver) = encode(&data, ECLevel::L).unwrap();
        assert_eq!(*ver, 11);
        // Mode + count lo, count mid byte, count hi + 0xA, 0x5 + 0xA, ...
        assert_eq!(&bs.data()[..4], b"\x4c\x12\x0a\x5a");
        // Last payload hi nibble and the alignment nibble, then padding
        assert_eq!(&bs.data()[302..305], b"\x50\xec\x11");
    }

    #[test]
    fn test_encode_with_version_overflow() {
        let ver = Version::new(1).unwrap();
        let err = encode_with_version(&[0; 18], ver, ECLevel::L).unwrap_err();
        assert_eq!(err, QRError::DataTooLong { version: ver, bits: 156, capacity: 152 });
        assert!(encode_with_version(&[0; 17], ver, ECLevel::L).is_ok());
    }

    #[test_case(ECLevel::L)]
    #[test_case(ECLevel::M)]
    #[test_case(ECLevel::Q)]
    #[test_case(ECLevel::H)]
    fn test_encoded_len_matches_capacity(ecl: ECLevel) {
        for len in [0, 1, 9, 100, 229, 230, 231, 1000] {
            let data = vec![0xA5; len];
            if let Ok((bs, ver)) = encode(&data, ecl) {
                assert_eq!(bs.len(), ver.data_bit_capacity(ecl), "Len {len}");
                assert_eq!(bs.data().len(), ver.data_capacity(ecl), "Len {len}");
            }
        }
    }
}
