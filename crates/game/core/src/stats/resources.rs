//! Resource pools (HP, MP).
//!
//! Maximums are fixed at setup. Current values are clamped into
//! `[0, maximum]` at every mutation site, so no sequence of operations can
//! leave a pool out of range.

/// Resource pool selector used in events and costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Magic points (mana).
    Mp,
}

/// Clamped resource meter tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: f32,
    maximum: f32,
}

impl ResourceMeter {
    /// Creates a meter. Negative maximums are treated as zero and `current`
    /// is clamped into range.
    pub fn new(current: f32, maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: current.clamp(0.0, maximum),
            maximum,
        }
    }

    /// A meter filled to `maximum`.
    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    /// A meter filled to `percent` of `maximum`.
    pub fn at_percent(maximum: f32, percent: f32) -> Self {
        Self::new(maximum * (percent / 100.0), maximum)
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// `percent` of the maximum, used for percentage-based costs.
    pub fn percent_of_max(&self, percent: f32) -> f32 {
        self.maximum * (percent / 100.0)
    }

    /// Adds up to `amount` and returns what was actually added.
    pub fn fill(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount` and returns what was actually removed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }

    /// Removes exactly `amount`, or nothing if the pool holds less.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.maximum);
        true
    }

    /// Overwrites the current value, clamped into range.
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_drain_clamp() {
        let mut meter = ResourceMeter::new(90.0, 100.0);
        assert_eq!(meter.fill(25.0), 10.0);
        assert!(meter.is_full());
        assert_eq!(meter.drain(250.0), 100.0);
        assert!(meter.is_empty());
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut meter = ResourceMeter::full(10.0);
        assert!(!meter.try_spend(11.0));
        assert_eq!(meter.current(), 10.0);
        assert!(meter.try_spend(4.0));
        assert_eq!(meter.current(), 6.0);
    }

    #[test]
    fn starting_percent() {
        let meter = ResourceMeter::at_percent(30.0, 50.0);
        assert_eq!(meter.current(), 15.0);
        assert_eq!(ResourceMeter::at_percent(30.0, 0.0).current(), 0.0);
    }
}
