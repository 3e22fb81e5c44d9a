/// Gates events so that at least `period_ms` passes between them.
///
/// Timestamps come from a free-running millisecond counter. Elapsed time
/// is computed with wrapping subtraction, so the counter may roll over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last_ms: Option<u32>,
}

impl Interval {
    /// Returns an interval that is elapsed until it is first restarted.
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    /// Records `now_ms` as the time of the latest event.
    pub fn restart(&mut self, now_ms: u32) {
        self.last_ms = Some(now_ms);
    }

    /// Returns `true` if at least one period has passed since the last
    /// [`restart`](Interval::restart), or if it was never restarted.
    pub fn is_elapsed(&self, now_ms: u32) -> bool {
        match self.last_ms {
            Some(last_ms) => now_ms.wrapping_sub(last_ms) >= self.period_ms,
            None => true,
        }
    }
}
