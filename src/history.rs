use heapless::HistoryBuffer;

/// The averaged values shown by the scrolling graph, oldest first.
///
/// The history is always full: it starts out holding `N` zeros and every
/// [`push`](GraphHistory::push) evicts exactly the oldest entry.
///
/// # Examples
///
/// ```
/// use hall_sampler::GraphHistory;
///
/// let mut history = GraphHistory::<3>::new();
/// history.push(7);
/// history.push(9);
///
/// assert!(history.iter().eq([0, 7, 9]));
/// ```
#[derive(Clone)]
pub struct GraphHistory<const N: usize> {
    values: HistoryBuffer<u16, N>,
}

impl<const N: usize> GraphHistory<N> {
    pub fn new() -> Self {
        Self {
            values: HistoryBuffer::new_with(0),
        }
    }

    /// Appends `value`, evicting the oldest entry.
    pub fn push(&mut self, value: u16) {
        self.values.write(value);
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.oldest_ordered().copied()
    }

    /// The most recently pushed value.
    pub fn latest(&self) -> u16 {
        self.values.recent().copied().unwrap_or_default()
    }

    /// Smallest and largest value in the history.
    pub fn extent(&self) -> (u16, u16) {
        self.iter()
            .fold((u16::MAX, u16::MIN), |(lo, hi), value| {
                (lo.min(value), hi.max(value))
            })
    }

    /// Copies the history into an array, oldest first.
    pub fn to_array(&self) -> [u16; N] {
        let mut values = [0; N];
        for (slot, value) in values.iter_mut().zip(self.iter()) {
            *slot = value;
        }
        values
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> Default for GraphHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for GraphHistory<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for GraphHistory<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[?]}", &self.to_array()[..])
    }
}
