use std::ops::Deref;

use image::{GrayImage, Luma};

use crate::bit_utils::{coordinate_pairs, Bits};
use crate::iter::EncRegionIter;
use crate::metadata::*;
use crate::MaskPattern;

/// One cell of the symbol. Anything but `Empty` is reserved and keeps its color through
/// later placement steps; only `Data` modules are touched by masking.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Module {
    pub fn is_reserved(self) -> bool {
        self != Module::Empty
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(clr) | Module::Version(clr) | Module::Format(clr) | Module::Data(clr) => clr,
        }
    }
}

/// Square module matrix of a symbol, `width * width` modules stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    modules: Vec<Module>,
    width: usize,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

// Matrix
//------------------------------------------------------------------------------

impl QR {
    pub fn new(version: Version, ec_level: ECLevel) -> Self {
        let width = version.width();
        Self { modules: vec![Module::Empty; width * width], width, version, ec_level, mask: None }
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {}, Ec level: {:?}, Mask: {mask} }}", self.version, self.ec_level)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|m| ***m == Color::Dark).count()
    }

    pub fn is_dark(&self, r: i16, c: i16) -> bool {
        *self.get(r, c) == Color::Dark
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::from("\n");
        for row in self.modules.chunks(self.width) {
            res.extend(row.iter().map(|m| match m {
                Module::Empty => '.',
                Module::Func(clr) => clr.select('F', 'f'),
                Module::Version(clr) => clr.select('V', 'v'),
                Module::Format(clr) => clr.select('M', 'm'),
                Module::Data(clr) => clr.select('D', 'd'),
            }));
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn index(&self, r: i16, c: i16) -> usize {
        let w = self.width as i16;
        let wrap = |x: i16| {
            assert!((-w..w).contains(&x), "Coordinate {x} out of bounds for width {w}");
            if x < 0 {
                x + w
            } else {
                x
            }
        };
        wrap(r) as usize * self.width + wrap(c) as usize
    }

    /// Module at `(r, c)`. Negative coordinates count back from the far edge.
    pub fn get(&self, r: i16, c: i16) -> Module {
        self.modules[self.index(r, c)]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        let idx = self.index(r, c);
        self.modules[idx] = module;
    }

    // Writes only into an empty module
    fn reserve(&mut self, r: i16, c: i16, module: Module) {
        let idx = self.index(r, c);
        if self.modules[idx] == Module::Empty {
            self.modules[idx] = module;
        }
    }

    // True when the h x w area at (r, c) lies inside the matrix and holds no reserved module
    fn is_free(&self, r: i16, c: i16, h: i16, w: i16) -> bool {
        let size = self.width as i16;
        if r < 0 || c < 0 || r + h > size || c + w > size {
            return false;
        }
        (r..r + h).all(|i| (c..c + w).all(|j| !self.get(i, j).is_reserved()))
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        for (r, c) in [(3, 3), (3, -4), (-4, 3)] {
            self.draw_finder_pattern_at(r, c);
        }
    }

    // Concentric squares around (r, c); ring 4 is the separator, clipped by the matrix edge
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.width as i16;
        let (r, c) = (if r < 0 { r + w } else { r }, if c < 0 { c + w } else { c });
        for i in r - 4..=r + 4 {
            for j in c - 4..=c + 4 {
                if !(0..w).contains(&i) || !(0..w).contains(&j) {
                    continue;
                }
                let ring = (i - r).abs().max((j - c).abs());
                let clr = if ring == 2 || ring == 4 { Color::Light } else { Color::Dark };
                self.reserve(i, j, Module::Func(clr));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let centers = self.version.alignment_pattern();
        for (r, c) in coordinate_pairs(centers, centers) {
            // Centers overlapping the finder patterns are dropped
            if self.is_free(r - 2, c - 2, 5, 5) {
                self.draw_alignment_pattern_at(r, c);
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in r - 2..=r + 2 {
            for j in c - 2..=c + 2 {
                let ring = (i - r).abs().max((j - c).abs());
                let clr = if ring == 1 { Color::Light } else { Color::Dark };
                self.reserve(i, j, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    // Row 6 and column 6 between the finders, dark on even indices. Reserved modules are
    // skipped without breaking the alternation.
    fn draw_timing_pattern(&mut self) {
        let last = self.width as i16 - 9;
        for i in 8..=last {
            let clr = if i % 2 == 0 { Color::Dark } else { Color::Light };
            self.reserve(6, i, Module::Func(clr));
            self.reserve(i, 6, Module::Func(clr));
        }
    }
}


// Version & format info
//------------------------------------------------------------------------------

impl QR {
    // Bit i lands at (w - 11 + i % 3, i / 3) in the bottom left block and at the
    // transposed position in the top right block
    fn draw_version_info(&mut self) {
        let Some(info) = self.version.info() else {
            return;
        };
        let w = self.width as i16;
        for (i, bit) in (0..VERSION_INFO_BIT_LEN as i16).map(|i| (i, (info >> i) & 1 == 1)) {
            let module = Module::Version(Color::from_light(!bit));
            let (a, b) = (w - 11 + i % 3, i / 3);
            self.reserve(a, b, module);
            self.reserve(b, a, module);
        }
    }

    // Marks both format copies and the dark module before data placement
    fn reserve_format_area(&mut self) {
        self.draw_format_info(u32::MAX >> (32 - FORMAT_INFO_BIT_LEN));
    }

    // Both copies are written most significant bit first. Format modules may be rewritten,
    // anything else in the way is a layout bug.
    fn draw_format_info(&mut self, info: u32) {
        for coords in [&FORMAT_INFO_COORDS_MAIN, &FORMAT_INFO_COORDS_SIDE] {
            for (k, &(r, c)) in coords.iter().enumerate() {
                let m = self.get(r, c);
                assert!(
                    matches!(m, Module::Empty | Module::Format(_)),
                    "Format info would overwrite {m:?} at ({r}, {c})"
                );
                let bit = (info >> (FORMAT_INFO_BIT_LEN - 1 - k)) & 1 == 1;
                self.set(r, c, Module::Format(Color::from_light(!bit)));
            }
        }
        self.set(-8, 8, Module::Format(Color::Dark));
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    /// Places finders, alignments, timing lines and version info in that order, then
    /// reserves the format area. Each step leaves earlier modules untouched.
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
        self.draw_version_info();
        self.reserve_format_area();
    }
}


// Data placement & masking
//------------------------------------------------------------------------------

impl QR {
    /// Writes `codewords` MSB first into the free modules in zigzag order. A module stores
    /// `light = !bit`, and modules left after the stream ends are light.
    pub fn draw_encoding_region(&mut self, codewords: &[u8]) {
        let mut bits = Bits::new(codewords);
        for (r, c) in EncRegionIter::new(self.version) {
            if self.get(r, c).is_reserved() {
                continue;
            }
            let bit = bits.next().unwrap_or(false);
            self.set(r, c, Module::Data(Color::from_light(!bit)));
        }

        assert_eq!(
            bits.len(),
            0,
            "Codeword stream of {} bytes overflows the encoding region of version {}",
            codewords.len(),
            self.version
        );
        assert!(
            self.modules.iter().all(|m| m.is_reserved()),
            "Empty module left after drawing version {}",
            self.version
        );
    }

    /// Inverts data modules selected by `pattern` and writes the matching format info.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_function();
        let w = self.width;
        for (idx, m) in self.modules.iter_mut().enumerate() {
            if let Module::Data(clr) = m {
                if mask_fn((idx / w) as i16, (idx % w) as i16) {
                    *clr = !*clr;
                }
            }
        }
        self.mask = Some(pattern);
        self.draw_format_info(format_info(self.ec_level, *pattern));
    }
}


// Render
//------------------------------------------------------------------------------

/// Light modules drawn around the symbol by [`QR::render`].
pub const QUIET_ZONE: u32 = 4;

impl QR {
    pub fn render(&self, module_sz: u32) -> GrayImage {
        self.render_with_quiet_zone(module_sz, QUIET_ZONE)
    }

    /// Draws dark modules black on white, `module_sz` pixels per module, surrounded by
    /// `quiet_zone` light modules.
    pub fn render_with_quiet_zone(&self, module_sz: u32, quiet_zone: u32) -> GrayImage {
        self.render_with_colors(module_sz, quiet_zone, Luma([255]), Luma([0]))
    }

    /// Like [`QR::render_with_quiet_zone`] with custom shades. The quiet zone takes `light`.
    pub fn render_with_colors(
        &self,
        module_sz: u32,
        quiet_zone: u32,
        light: Luma<u8>,
        dark: Luma<u8>,
    ) -> GrayImage {
        let w = self.width as u32;
        let side = (w + 2 * quiet_zone) * module_sz;
        GrayImage::from_fn(side, side, |x, y| {
            let (c, r) = (x / module_sz, y / module_sz);
            let inside = (quiet_zone..quiet_zone + w).contains(&r)
                && (quiet_zone..quiet_zone + w).contains(&c);
            if !inside {
                return light;
            }
            self.get((r - quiet_zone) as i16, (c - quiet_zone) as i16).select(light, dark)
        })
    }

    /// Text rendering with two characters per module so modules come out roughly square.
    pub fn to_str(&self, quiet_zone: usize) -> String {
        let w = self.width;
        let side = w + 2 * quiet_zone;
        let mut canvas = String::with_capacity(side * (side * 2 + 1));
        for r in 0..side {
            for c in 0..side {
                let clr = match (r.checked_sub(quiet_zone), c.checked_sub(quiet_zone)) {
                    (Some(r), Some(c)) if r < w && c < w => *self.get(r as i16, c as i16),
                    _ => Color::Light,
                };
                canvas.push_str(clr.select("  ", "██"));
            }
            canvas.push('\n');
        }
        canvas
    }
}


// Global constants
//------------------------------------------------------------------------------

pub(crate) const FORMAT_INFO_BIT_LEN: usize = 15;

pub(crate) const VERSION_INFO_BIT_LEN: usize = 18;

// Next to the top left finder, most significant bit first
static FORMAT_INFO_COORDS_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
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

// Split between the bottom left and top right finders
static FORMAT_INFO_COORDS_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
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
