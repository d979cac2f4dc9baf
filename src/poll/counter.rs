// ABOUTME: Consecutive clean-cycle counter guarding against the deployment startup race.
// ABOUTME: Counts up on clean cycles, resets on anything else, saturates at the threshold.

/// Tracks how many clean cycles have been seen in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityCounter {
    count: u32,
    threshold: u32,
}

impl StabilityCounter {
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Record one cycle and return the new count.
    pub fn record(&mut self, clean: bool) -> u32 {
        self.count = if clean {
            (self.count + 1).min(self.threshold)
        } else {
            0
        };
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_stable(&self) -> bool {
        self.count >= self.threshold
    }
}
