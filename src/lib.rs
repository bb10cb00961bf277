//! # qrcraft
//!
//! A Rust library for encoding byte payloads into QR Code symbols with Reed-Solomon error
//! correction, block interleaving and penalty-based mask selection.
//!
//! ## Features
//!
//! - **Version Planning**: Picks the smallest of the 40 versions that fits the payload
//! - **Reed-Solomon Error Correction**: Built-in error correction with configurable levels (L, M, Q, H)
//! - **Mask Selection**: Scores all eight mask patterns and applies the one with the lowest penalty
//! - **Rendering**: Grayscale images with a quiet zone, or plain text for terminals
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrcraft::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! let img = qr.render(4); // 4 pixels per module
//! assert_eq!(img.width(), (21 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)     // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)          // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)    // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! println!("{}", qr.to_str(2));
//! # Ok(())
//! # }
//! ```
//!
//! ### Pipeline Stages
//!
//! Each stage of the encoder is exposed on its own:
//!
//! ```rust
//! use qrcraft::{blockify, ecc, encode, interleave, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (bits, version) = encode(b"HI!", ECLevel::L)?;
//! let blocks = blockify(bits.data(), version, ECLevel::L);
//! let ecc_blocks = ecc(&blocks, version, ECLevel::L);
//!
//! let mut codewords = interleave(&blocks);
//! codewords.extend(interleave(&ecc_blocks));
//! assert_eq!(codewords.len(), version.total_codewords(ECLevel::L));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Payload Layout
//!
//! Data is always written in byte mode. The character count and every payload byte are
//! stored low nibble first, so symbols produced here carry the standard structure and
//! error correction but a payload layout of their own.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR, QUIET_ZONE};
pub use common::bit_utils::{byte_to_bits, coordinate_pairs, lower_bound, BitStream, Bits};
pub use common::codec::{encode, encode_with_version, encoded_bit_len, find_version};
pub use common::ec::{blockify, deinterleave, ecc, interleave};
pub use common::error::{CapacityError, QRError, QRResult};
pub use common::iter::EncRegionIter;
pub use common::mask::{apply_best_mask, compute_total_penalty, MaskPattern};
pub use common::metadata::{Color, ECLevel, Version};
pub(crate) use common::*;
