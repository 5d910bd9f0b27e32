//! Roll acceptance window for angled walks

/// Inclusive roll range (radians) an angled walk must stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceWindow {
    pub low: f64,
    pub high: f64,
}

impl AcceptanceWindow {
    /// Create a window, `None` if `low > high` or a bound is not finite
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low.is_finite() && high.is_finite() && low <= high {
            Some(Self { low, high })
        } else {
            None
        }
    }

    /// Check a roll angle against the window (bounds included, NaN rejected)
    pub fn contains(&self, roll: f64) -> bool {
        roll >= self.low && roll <= self.high
    }
}

impl Default for AcceptanceWindow {
    fn default() -> Self {
        Self {
            low: 0.4,
            high: 0.95,
        }
    }
}
