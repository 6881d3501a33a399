use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use smallvec::SmallVec;

use super::svg::{AttrMap, AttrValue};

/// Duration of the update transition applied to surviving shapes.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(250);

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("valid number pattern")
});

/// Linear interpolation of geometry attributes between two snapshots.
///
/// Progress is driven externally through [`Transition::advance`]; nothing here
/// reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    from: AttrMap,
    to: AttrMap,
    elapsed: Duration,
    duration: Duration,
}

impl Transition {
    #[must_use]
    pub fn new(from: AttrMap, to: AttrMap, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    #[must_use]
    pub fn target(&self) -> &AttrMap {
        &self.to
    }

    /// Moves the clock forward and returns the attribute values to display.
    pub fn advance(&mut self, elapsed: Duration) -> AttrMap {
        self.elapsed = self.elapsed.saturating_add(elapsed).min(self.duration);
        self.values_at(self.progress())
    }

    #[must_use]
    pub fn values_at(&self, t: f64) -> AttrMap {
        self.to
            .iter()
            .map(|(name, target)| {
                let value = interpolate(self.from.get(name), target, t);
                (name.clone(), value)
            })
            .collect()
    }
}

/// Interpolates one attribute. Numbers blend linearly; text blends the
/// numbers embedded in it when both strings share the same non-numeric
/// skeleton, otherwise it snaps to the target.
#[must_use]
pub fn interpolate(from: Option<&AttrValue>, to: &AttrValue, t: f64) -> AttrValue {
    if t >= 1.0 {
        return to.clone();
    }
    match (from, to) {
        (Some(AttrValue::Number(a)), AttrValue::Number(b)) => AttrValue::Number(a + (b - a) * t),
        (Some(AttrValue::Text(a)), AttrValue::Text(b)) => {
            interpolate_text(a, b, t).map_or_else(|| to.clone(), AttrValue::Text)
        }
        _ => to.clone(),
    }
}

struct TextSkeleton<'a> {
    literals: SmallVec<[&'a str; 16]>,
    numbers: SmallVec<[f64; 16]>,
}

fn split_numbers(text: &str) -> Option<TextSkeleton<'_>> {
    let mut literals = SmallVec::new();
    let mut numbers = SmallVec::new();
    let mut cursor = 0;
    for found in NUMBER_PATTERN.find_iter(text) {
        literals.push(&text[cursor..found.start()]);
        numbers.push(found.as_str().parse::<f64>().ok()?);
        cursor = found.end();
    }
    literals.push(&text[cursor..]);
    Some(TextSkeleton { literals, numbers })
}

fn interpolate_text(from: &str, to: &str, t: f64) -> Option<String> {
    let from = split_numbers(from)?;
    let to = split_numbers(to)?;
    if from.literals != to.literals || from.numbers.len() != to.numbers.len() {
        return None;
    }

    let mut out = String::with_capacity(from.literals.iter().map(|part| part.len()).sum());
    for (index, literal) in to.literals.iter().enumerate() {
        out.push_str(literal);
        if let (Some(a), Some(b)) = (from.numbers.get(index), to.numbers.get(index)) {
            out.push_str(&(a + (b - a) * t).to_string());
        }
    }
    Some(out)
}
