#[cfg(test)]
mod common {
    use qrcraft::{Color, ECLevel, EncRegionIter, Module, QR};

    pub const FORMAT_MAIN: [(i16, i16); 15] = [
        (8, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        (8, 4),
        (8, 5),
        (8, 7),
        (8, 8),
        (7, 8),
        (5, 8),
        (4, 8),
        (3, 8),
        (2, 8),
        (1, 8),
        (0, 8),
    ];

    pub const FORMAT_SIDE: [(i16, i16); 15] = [
        (-1, 8),
        (-2, 8),
        (-3, 8),
        (-4, 8),
        (-5, 8),
        (-6, 8),
        (-7, 8),
        (8, -8),
        (8, -7),
        (8, -6),
        (8, -5),
        (8, -4),
        (8, -3),
        (8, -2),
        (8, -1),
    ];

    pub fn read_format(qr: &QR, coords: &[(i16, i16)]) -> u32 {
        coords.iter().fold(0, |acc, &(r, c)| (acc << 1) | qr.is_dark(r, c) as u32)
    }

    pub fn ecl_bits(ecl: ECLevel) -> u32 {
        match ecl {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    // Unmasks the data modules and packs them back into bytes in placement order
    pub fn read_codewords(qr: &QR) -> Vec<u8> {
        let mask_fn = qr.mask().expect("Symbol is masked").mask_function();
        let mut bytes = Vec::new();
        let mut cur = 0u8;
        let mut n = 0;
        for (r, c) in EncRegionIter::new(qr.version()) {
            let Module::Data(clr) = qr.get(r, c) else {
                continue;
            };
            let dark = (clr == Color::Dark) ^ mask_fn(r, c);
            cur = (cur << 1) | dark as u8;
            n += 1;
            if n == 8 {
                bytes.push(cur);
                cur = 0;
                n = 0;
            }
        }
        bytes
    }
}

#[cfg(test)]
mod qr_proptests {
    use proptest::prelude::*;

    use super::common::*;
    use qrcraft::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(max_sz: usize) -> impl Strategy<Value = (ECLevel, Vec<u8>)> {
        (ec_level_strategy(), prop::collection::vec(any::<u8>(), 0..=max_sz))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn proptest_codewords_round_trip(params in qr_strategy(400)) {
            let (ecl, data) = params;

            let builder = QRBuilder::new(&data).ec_level(ecl).clone();
            let (codewords, version) = builder.codewords().unwrap();
            let qr = builder.build().unwrap();

            prop_assert_eq!(qr.version(), version);
            let read = read_codewords(&qr);
            prop_assert_eq!(&read[..codewords.len()], &codewords[..]);
            prop_assert!(read[codewords.len()..].iter().all(|&b| b == 0));
        }

        #[test]
        fn proptest_symbol_structure(params in qr_strategy(400)) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            let w = qr.width() as i16;

            prop_assert!(qr.modules().iter().all(|&m| m != Module::Empty));
            prop_assert!(qr.is_dark(-8, 8));

            let main = read_format(&qr, &FORMAT_MAIN);
            let side = read_format(&qr, &FORMAT_SIDE);
            prop_assert_eq!(main, side);
            let format = (main ^ 0x5412) >> 10;
            prop_assert_eq!(format >> 3, ecl_bits(ecl));
            prop_assert_eq!(Some(format & 0b111), qr.mask().map(|m| *m as u32));

            for i in 8..w - 8 {
                prop_assert_eq!(qr.is_dark(6, i), i % 2 == 0);
                prop_assert_eq!(qr.is_dark(i, 6), i % 2 == 0);
            }
        }

        #[test]
        fn proptest_encoded_len_is_capacity(params in qr_strategy(2953)) {
            let (ecl, data) = params;

            match encode(&data, ecl) {
                Ok((bits, version)) => {
                    prop_assert_eq!(bits.len(), version.data_bit_capacity(ecl));
                    prop_assert!(encoded_bit_len(data.len(), version) <= bits.len());
                }
                Err(QRError::VersionNotFound(_)) => {
                    prop_assert!(encoded_bit_len(data.len(), Version::MAX) > Version::MAX.data_bit_capacity(ecl));
                }
                Err(e) => prop_assert!(false, "Unexpected error {e}"),
            }
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use super::common::*;
    use qrcraft::{CapacityError, ECLevel, MaskPattern, Module, QRBuilder, QRError, Version};

    #[test]
    fn test_hi_symbol() {
        let qr = QRBuilder::new(b"HI!").ec_level(ECLevel::L).build().unwrap();

        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.width(), 21);
        let read = read_codewords(&qr);
        assert_eq!(read.len(), 26);
        assert_eq!(&read[..5], b"\x43\x08\x49\x41\x20");
        assert_eq!(&read[19..], b"\x50\xfc\xc6\x99\x42\x2b\x04");
    }

    #[test]
    fn test_too_large() {
        let data = vec![b'A'; 2955];
        let res = QRBuilder::new(&data).ec_level(ECLevel::L).build();
        assert_eq!(
            res,
            Err(QRError::VersionNotFound(CapacityError::TooLargeSize {
                ecl: ECLevel::L,
                bits: 23660
            }))
        );
        let err = res.unwrap_err();
        assert_eq!(err.to_string(), "version not found");
        assert_eq!(
            std::error::Error::source(&err).map(|e| e.to_string()),
            Some("too large size: 23660 bits exceed the largest version at level L".to_string())
        );
    }

    #[test]
    fn test_deterministic() {
        let data = "Determinism".repeat(20);
        let a = QRBuilder::new(data.as_bytes()).build().unwrap();
        let b = QRBuilder::new(data.as_bytes()).build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_str(4), b.to_str(4));
    }

    #[test_case(b"Hello, world!".to_vec(), 1, ECLevel::L; "test_qr_1")]
    #[test_case(b"TEST".to_vec(), 1, ECLevel::M; "test_qr_2")]
    #[test_case(b"12345".to_vec(), 1, ECLevel::Q; "test_qr_3")]
    #[test_case(b"OK".to_vec(), 1, ECLevel::H; "test_qr_4")]
    #[test_case(b"A11111111111111".repeat(7), 7, ECLevel::M; "test_qr_5")]
    #[test_case(b"1234567890".repeat(6), 7, ECLevel::H; "test_qr_6")]
    #[test_case(b"aAAAAAAAAA1111111111111111AAAAAAAAAAa".repeat(4), 10, ECLevel::Q; "test_qr_7")]
    #[test_case(b"A111111111111111".repeat(70), 27, ECLevel::M; "test_qr_8")]
    #[test_case(b"1234567890".repeat(127), 40, ECLevel::H; "test_qr_9")]
    fn test_qr(data: Vec<u8>, version: usize, ecl: ECLevel) {
        let version = Version::new(version).unwrap();
        let qr = QRBuilder::new(&data).version(version).ec_level(ecl).build().unwrap();

        assert_eq!(qr.version(), version);
        assert_eq!(qr.width(), version.width());
        assert!(qr.modules().iter().all(|&m| m != Module::Empty));
        let read = read_codewords(&qr);
        assert_eq!(read.len(), version.total_codewords(ecl));

        let img = qr.render(2);
        assert_eq!(img.width(), (version.width() as u32 + 8) * 2);
    }

    #[test]
    fn test_pinned_mask_is_drawn() {
        for m in MaskPattern::ALL {
            let qr = QRBuilder::new(b"mask").ec_level(ECLevel::Q).mask(m).build().unwrap();
            let format = (read_format(&qr, &FORMAT_MAIN) ^ 0x5412) >> 10;
            assert_eq!(format, ecl_bits(ECLevel::Q) << 3 | *m as u32);
        }
    }
}
