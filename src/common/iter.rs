use crate::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Visits every module in data placement order: two-column strips from the right edge,
/// alternating upward and downward, right column before left within each row. The strip
/// that would straddle the vertical timing column shifts one column left.
#[derive(Debug, Clone)]
pub struct EncRegionIter {
    r: i16,
    // Right column of the current strip
    c: i16,
    // Left column is pending for the current row
    left: bool,
    upward: bool,
    w: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub fn new(ver: Version) -> Self {
        let w = ver.width() as i16;
        Self { r: w - 1, c: w - 1, left: false, upward: true, w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.c == VERT_TIMING_COL {
            self.c -= 1;
        }
        if self.c < 1 {
            return None;
        }

        if !self.left {
            self.left = true;
            return Some((self.r, self.c));
        }

        let res = (self.r, self.c - 1);
        self.left = false;

        let at_edge = if self.upward { self.r == 0 } else { self.r == self.w - 1 };
        if at_edge {
            self.c -= 2;
            self.upward = !self.upward;
        } else if self.upward {
            self.r -= 1;
        } else {
            self.r += 1;
        }

        Some(res)
    }
}
