//! Step pacing: [`TickInterval`] and [`Ticker`].
//!
//! A search is advanced one step per tick. The interval is user-supplied
//! (typically typed into a text field), so parsing is lenient: anything
//! that is not a finite number falls back to the default, and values below
//! the minimum are clamped up.

use std::fmt;
use std::time::{Duration, Instant};

/// Delay between two search steps, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickInterval(u64);

impl TickInterval {
    /// Interval used when none or an invalid one is configured.
    pub const DEFAULT: Self = Self(100);
    /// Smallest accepted interval.
    pub const MIN: Self = Self(1);

    /// Build an interval from milliseconds, clamping to [`MIN`](Self::MIN).
    pub const fn from_millis(ms: u64) -> Self {
        if ms < Self::MIN.0 { Self::MIN } else { Self(ms) }
    }

    /// Build an interval from a possibly fractional or negative number of
    /// milliseconds. Fractions are truncated after clamping; non-finite
    /// values yield [`DEFAULT`](Self::DEFAULT).
    pub fn from_f64(ms: f64) -> Self {
        if !ms.is_finite() {
            return Self::DEFAULT;
        }
        if ms < Self::MIN.0 as f64 {
            return Self::MIN;
        }
        Self(ms as u64)
    }

    /// Parse user input. Never fails.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(ms) => Self::from_f64(ms),
            Err(_) => Self::DEFAULT,
        }
    }

    /// Milliseconds.
    #[inline]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// As a [`Duration`].
    #[inline]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// A longer interval (slower animation), roughly 25% up.
    pub fn slower(self) -> Self {
        Self::from_millis(self.0.saturating_add((self.0 / 4).max(1)))
    }

    /// A shorter interval (faster animation), roughly 20% down, never below
    /// the minimum.
    pub fn faster(self) -> Self {
        Self::from_millis(self.0.saturating_sub((self.0 / 5).max(1)))
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TickInterval {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(ms) => Self::from_f64(ms),
            Raw::Text(s) => Self::parse(&s),
            Raw::Other(_) => Self::DEFAULT,
        })
    }
}

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// Decides when the next step is due.
///
/// The first call to [`due`](Self::due) fires immediately; afterwards it
/// fires at most once per interval. Missed ticks are not replayed.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: TickInterval,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a ticker that fires on its first poll.
    pub fn new(interval: TickInterval) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// The configured interval.
    #[inline]
    pub fn interval(&self) -> TickInterval {
        self.interval
    }

    /// Change the interval. Takes effect from the next fired tick.
    pub fn set_interval(&mut self, interval: TickInterval) {
        self.interval = interval;
    }

    /// Returns `true` if a tick is due at `now`, and schedules the next one.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(t) if now < t => false,
            _ => {
                self.next_due = Some(now + self.interval.duration());
                true
            }
        }
    }

    /// Time left until the next tick, or zero if one is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(t) => t.saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Forget the schedule so the next poll fires immediately.
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_numbers() {
        assert_eq!(TickInterval::parse("250").millis(), 250);
        assert_eq!(TickInterval::parse(" 42.9 ").millis(), 42);
        assert_eq!(TickInterval::parse("1").millis(), 1);
    }

    #[test]
    fn parse_clamps_to_minimum() {
        assert_eq!(TickInterval::parse("0"), TickInterval::MIN);
        assert_eq!(TickInterval::parse("-30"), TickInterval::MIN);
        assert_eq!(TickInterval::parse("0.5"), TickInterval::MIN);
    }

    #[test]
    fn parse_invalid_falls_back_to_default() {
        assert_eq!(TickInterval::parse(""), TickInterval::DEFAULT);
        assert_eq!(TickInterval::parse("fast"), TickInterval::DEFAULT);
        assert_eq!(TickInterval::parse("NaN"), TickInterval::DEFAULT);
        assert_eq!(TickInterval::parse("inf"), TickInterval::DEFAULT);
        assert_eq!(TickInterval::default().millis(), 100);
    }

    #[test]
    fn faster_and_slower_stay_in_bounds() {
        let mut t = TickInterval::from_millis(3);
        for _ in 0..10 {
            t = t.faster();
        }
        assert_eq!(t, TickInterval::MIN);
        assert!(TickInterval::DEFAULT.slower() > TickInterval::DEFAULT);
        assert!(TickInterval::MIN.slower() > TickInterval::MIN);
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut t = Ticker::new(TickInterval::from_millis(10));
        assert!(t.due(start));
        assert!(!t.due(start));
        assert!(!t.due(start + Duration::from_millis(9)));
        assert_eq!(t.remaining(start + Duration::from_millis(4)), Duration::from_millis(6));
        assert!(t.due(start + Duration::from_millis(10)));
        assert!(!t.due(start + Duration::from_millis(15)));
    }

    #[test]
    fn ticker_reset_fires_immediately() {
        let start = Instant::now();
        let mut t = Ticker::new(TickInterval::DEFAULT);
        assert!(t.due(start));
        t.reset();
        assert_eq!(t.remaining(start), Duration::ZERO);
        assert!(t.due(start));
    }
}
