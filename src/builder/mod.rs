mod qr;

pub use qr::{Module, QR, QUIET_ZONE};

use tracing::{debug, info};

use crate::common::{
    codec::{encode, encode_with_version},
    ec::{blockify, ecc, interleave},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures and builds a byte mode QR symbol.
///
/// Version and mask are chosen automatically unless pinned. Error correction defaults to
/// [`ECLevel::M`].
#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| v.to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {version}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    /// Final codeword sequence for the symbol: interleaved data codewords followed by
    /// interleaved error correction codewords.
    pub fn codewords(&self) -> QRResult<(Vec<u8>, Version)> {
        let (encoded, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => {
                debug!("Finding smallest version");
                encode(self.data, self.ec_level)?
            }
        };
        debug!(version = *version, bits = encoded.len(), "Encoded data");

        let data_blocks = blockify(encoded.data(), version, self.ec_level);
        let ecc_blocks = ecc(&data_blocks, version, self.ec_level);
        debug!(
            blocks = data_blocks.len(),
            ecc_per_block = version.ecc_per_block(self.ec_level),
            "Computed error correction"
        );

        let mut codewords = interleave(&data_blocks);
        codewords.extend(interleave(&ecc_blocks));
        debug_assert_eq!(codewords.len(), version.total_codewords(self.ec_level));

        Ok((codewords, version))
    }

    pub fn build(&self) -> QRResult<QR> {
        info!(metadata = %self.metadata(), len = self.data.len(), "Generating QR");

        let (codewords, version) = self.codewords()?;

        let mut qr = QR::new(version, self.ec_level);

        debug!("Drawing function patterns");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region");
        qr.draw_encoding_region(&codewords);

        let mask = match self.mask {
            Some(m) => {
                debug!(mask = *m, "Applying mask");
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding and applying best mask");
                apply_best_mask(&mut qr)
            }
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        info!(
            version = *version,
            mask = *mask,
            data_capacity = version.data_capacity(self.ec_level),
            dark_modules,
            balance = dark_modules * 100 / total_modules,
            "QR generated"
        );

        Ok(qr)
    }
}
