use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Tick values produced by [`LinearScale::ticks`].
pub type TickValues = SmallVec<[f64; 12]>;

/// Upper bound on the tick count requested from [`LinearScale::ticks`].
pub const MAX_TICK_COUNT: usize = 100;

/// Continuous mapping from a numeric domain onto a pixel range.
///
/// Values outside the domain extrapolate linearly. A degenerate domain
/// (`start == end`) maps every value to the range start, which is what an
/// empty or all-zero dataset produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }

        let normalized = (pixel - self.range_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Returns roughly `count` evenly spaced "nice" values inside the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten. `count` is clamped to
    /// [`MAX_TICK_COUNT`].
    #[must_use]
    pub fn ticks(self, count: usize) -> TickValues {
        let mut out = TickValues::new();
        if count == 0 {
            return out;
        }
        let count = count.min(MAX_TICK_COUNT);

        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        if lo == hi {
            out.push(lo);
            return out;
        }

        let step = (hi - lo) / count as f64;
        let power = step.log10().floor() as i32;
        let error = step / 10f64.powi(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        // Negative powers divide by the inverse increment so that values such
        // as 0.3 come out exact instead of 0.30000000000000004.
        if power < 0 {
            let inverse = 10f64.powi(-power) / factor;
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            for k in first..=last {
                out.push(k as f64 / inverse);
            }
        } else {
            let increment = factor * 10f64.powi(power);
            let first = (lo / increment).ceil() as i64;
            let last = (hi / increment).floor() as i64;
            for k in first..=last {
                out.push(k as f64 * increment);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrdinalScaleParts {
    domain: Vec<Option<String>>,
    range: Vec<f64>,
}

/// Positional lookup from category labels to pixel offsets.
///
/// The first occurrence of a duplicated label wins. `None` is a valid label
/// and stands for a record without a dimension value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrdinalScaleParts", into = "OrdinalScaleParts")]
pub struct OrdinalScale {
    domain: Vec<Option<String>>,
    range: Vec<f64>,
    index: IndexMap<Option<String>, usize>,
}

impl OrdinalScale {
    pub fn new(domain: Vec<Option<String>>, range: Vec<f64>) -> ChartResult<Self> {
        if domain.len() != range.len() {
            return Err(ChartError::InvalidData(format!(
                "ordinal domain has {} labels but range has {} positions",
                domain.len(),
                range.len()
            )));
        }
        if range.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "ordinal range must be finite".to_owned(),
            ));
        }

        let mut index = IndexMap::with_capacity(domain.len());
        for (position, label) in domain.iter().enumerate() {
            index.entry(label.clone()).or_insert(position);
        }

        Ok(Self {
            domain,
            range,
            index,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[Option<String>] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> &[f64] {
        &self.range
    }

    pub fn map(&self, label: Option<&str>) -> ChartResult<f64> {
        let key = label.map(str::to_owned);
        self.index
            .get(&key)
            .and_then(|&position| self.range.get(position).copied())
            .ok_or_else(|| ChartError::UnknownCategory(label.unwrap_or("null").to_owned()))
    }
}

impl TryFrom<OrdinalScaleParts> for OrdinalScale {
    type Error = ChartError;

    fn try_from(parts: OrdinalScaleParts) -> Result<Self, Self::Error> {
        Self::new(parts.domain, parts.range)
    }
}

impl From<OrdinalScale> for OrdinalScaleParts {
    fn from(scale: OrdinalScale) -> Self {
        Self {
            domain: scale.domain,
            range: scale.range,
        }
    }
}

/// Either of the two scale flavours an axis can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scale {
    Linear(LinearScale),
    Ordinal(OrdinalScale),
}

impl Scale {
    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(scale) => Some(*scale),
            Self::Ordinal(_) => None,
        }
    }

    #[must_use]
    pub fn as_ordinal(&self) -> Option<&OrdinalScale> {
        match self {
            Self::Linear(_) => None,
            Self::Ordinal(scale) => Some(scale),
        }
    }

    pub fn map_value(&self, value: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(scale) => Ok(scale.map(value)),
            Self::Ordinal(_) => Err(ChartError::InvalidData(
                "ordinal scale cannot map a numeric value".to_owned(),
            )),
        }
    }

    pub fn map_label(&self, label: Option<&str>) -> ChartResult<f64> {
        match self {
            Self::Ordinal(scale) => scale.map(label),
            Self::Linear(_) => Err(ChartError::InvalidData(
                "linear scale cannot map a category label".to_owned(),
            )),
        }
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Formats an axis tick with an SI prefix (`1500` -> `1.5k`, `0.02` -> `20m`).
#[must_use]
pub fn format_si_tick(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_owned();
    }

    let mut exponent = (value.abs().log10() / 3.0).floor().clamp(-8.0, 8.0) as i32;
    let mut scaled = value / 1000f64.powi(exponent);
    // 999.9999 rounds to 1000 at three decimals; move it to the next prefix.
    if (scaled.abs() * 1000.0).round() >= 1_000_000.0 && exponent < 8 {
        exponent += 1;
        scaled = value / 1000f64.powi(exponent);
    }
    let prefix = SI_PREFIXES[(exponent + 8) as usize];

    let mut digits = format!("{scaled:.3}");
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
    format!("{digits}{prefix}")
}
