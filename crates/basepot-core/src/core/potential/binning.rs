use std::fmt;

pub const DEFAULT_BIN_WIDTH: f64 = 1.0;
pub const DEFAULT_BIN_COUNT: usize = 20;

/// Index of a distance bin within a [`BinScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistanceBin(pub usize);

impl DistanceBin {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Equal-width partition of `[0, width * count)` into `count` half-open bins.
///
/// A distance exactly at the upper edge of the range is assigned to the last
/// bin, so every distance in `[0, width * count]` has exactly one bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinScheme {
    width: f64,
    count: usize,
}

impl Default for BinScheme {
    fn default() -> Self {
        Self {
            width: DEFAULT_BIN_WIDTH,
            count: DEFAULT_BIN_COUNT,
        }
    }
}

impl BinScheme {
    /// Returns `None` unless `width` is finite and positive and `count` is non-zero.
    pub fn new(width: f64, count: usize) -> Option<Self> {
        (width.is_finite() && width > 0.0 && count > 0).then_some(Self { width, count })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Upper edge of the binned range.
    pub fn max_distance(&self) -> f64 {
        self.width * self.count as f64
    }

    pub fn bins(&self) -> impl Iterator<Item = DistanceBin> + use<> {
        (0..self.count).map(DistanceBin)
    }

    pub fn bin_for(&self, distance: f64) -> Option<DistanceBin> {
        if !distance.is_finite() || distance < 0.0 || distance > self.max_distance() {
            return None;
        }
        let index = ((distance / self.width).floor() as usize).min(self.count - 1);
        Some(DistanceBin(index))
    }

    pub fn bounds(&self, bin: DistanceBin) -> (f64, f64) {
        let lower = bin.0 as f64 * self.width;
        (lower, lower + self.width)
    }

    pub fn label(&self, bin: DistanceBin) -> BinLabel {
        let (lower, upper) = self.bounds(bin);
        BinLabel { lower, upper }
    }

    /// Resolves a label such as `"3-4"` back to its bin.
    pub fn parse_label(&self, label: &str) -> Option<DistanceBin> {
        let label = label.trim();
        self.bins().find(|&bin| self.label(bin).to_string() == label)
    }
}

/// Display form of a bin, `"{lower}-{upper}"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinLabel {
    lower: f64,
    upper: f64,
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}
