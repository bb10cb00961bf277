use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern(0),
        MaskPattern(1),
        MaskPattern(2),
        MaskPattern(3),
        MaskPattern(4),
        MaskPattern(5),
        MaskPattern(6),
        MaskPattern(7),
    ];

    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern(pattern)),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over `(row, col)` telling which data modules the pattern inverts.
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Applies the mask with the lowest penalty to `qr`. Ties go to the lowest index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for m in MaskPattern::ALL {
        let mut candidate = qr.clone();
        candidate.apply_mask(m);
        let pen = compute_total_penalty(&candidate);
        trace!(mask = *m, penalty = pen, "scored mask candidate");
        if pen < best.1 {
            best = (m, pen);
        }
    }
    qr.apply_mask(best.0);
    best.0
}

/// Sum of the four penalty rules, the finder-like rule counted along rows and columns.
pub fn compute_total_penalty(qr: &QR) -> u32 {
    [
        compute_adjacent_penalty(qr),
        compute_block_penalty(qr),
        compute_finder_pattern_penalty(qr, true),
        compute_finder_pattern_penalty(qr, false),
        compute_balance_penalty(qr),
    ]
    .iter()
    .sum()
}

// Runs of 5 same colored modules cost 3, each extra module in the run costs 1
pub(crate) fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let run_penalty = |get: &dyn Fn(i16) -> Color| -> u32 {
        let mut pen = 0;
        let mut last = get(0);
        let mut run = 0;
        for i in 0..w {
            let clr = get(i);
            if clr == last {
                run += 1;
            } else {
                last = clr;
                run = 1;
            }
            match run {
                5 => pen += 3,
                6.. => pen += 1,
                _ => (),
            }
        }
        pen
    };

    let mut pen = 0;
    for i in 0..w {
        pen += run_penalty(&|c: i16| *qr.get(i, c));
        pen += run_penalty(&|r: i16| *qr.get(r, i));
    }
    pen
}

// Every 2x2 square of one color costs 3, overlapping squares included
pub(crate) fn compute_block_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let uniform = |r: i16, c: i16| {
        let clr = *qr.get(r, c);
        [(r + 1, c), (r, c + 1), (r + 1, c + 1)].iter().all(|&(y, x)| *qr.get(y, x) == clr)
    };
    let squares = (0..w - 1).flat_map(|r| (0..w - 1).map(move |c| (r, c)));
    squares.filter(|&(r, c)| uniform(r, c)).count() as u32 * 3
}

// 1:1:3:1:1 dark-light ratio with 4 light modules on either side. Modules outside the
// symbol count as light.
pub(crate) fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    for i in 0..w {
        let get = |j: i16| {
            if !(0..w).contains(&j) {
                Color::Light
            } else if is_hor {
                *qr.get(i, j)
            } else {
                *qr.get(j, i)
            }
        };
        for j in 0..w - 6 {
            if (j..j + 7).map(get).ne(PATTERN.iter().copied()) {
                continue;
            }
            if (j - 4..j).all(|k| get(k) == Color::Light) {
                pen += 40;
            }
            if (j + 7..j + 11).all(|k| get(k) == Color::Light) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every 5% the dark ratio strays from 50%
pub(crate) fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules() as i64;
    let w = qr.width() as i64;
    let total = w * w;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    (k.max(0) * 10) as u32
}
