/// A fixed-capacity batch of raw samples, overwritten in place each cycle.
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    samples: [u16; N],
    index: usize,
}

impl<const N: usize> SampleWindow<N> {
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            index: 0,
        }
    }

    /// Stores `sample` at the write index and advances it.
    ///
    /// Returns `true` once the window holds `N` samples. Pushing into a
    /// full window is ignored until [`reset`](SampleWindow::reset).
    pub fn push(&mut self, sample: u16) -> bool {
        if let Some(slot) = self.samples.get_mut(self.index) {
            *slot = sample;
            self.index += 1;
        }

        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.index == N
    }

    /// Current write index, ie. the number of samples taken this cycle.
    pub fn len(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Rewinds the write index. Old samples stay until overwritten.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Integer mean of the window, `floor(sum / N)`.
    ///
    /// Returns `None` until the window is full.
    pub fn mean(&self) -> Option<u16> {
        if !self.is_full() {
            return None;
        }

        Some(mean(&self.samples))
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer mean of `samples`, `floor(sum / len)`.
pub fn mean(samples: &[u16]) -> u16 {
    debug_assert!(!samples.is_empty(), "Cannot average an empty window");

    let sum: u32 = samples.iter().map(|&sample| u32::from(sample)).sum();
    (sum / samples.len() as u32) as u16
}
