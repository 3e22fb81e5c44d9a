use crate::{
    config::BatchConfig, interval::Interval, render::GraphRenderer, window::SampleWindow,
    GraphHistory, BATCH_LEN, HISTORY_LEN,
};
use embedded_hal::adc::{Channel, OneShot};

/// Phase of a [`BatchSampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Take one sample
    SensorRead,
    /// Hold off until the read interval has passed
    Wait,
    /// Average the batch and publish it
    Average,
}

/// Input to [`State::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A sample was stored
    Sampled { window_full: bool },
    /// The read interval has passed since the last sample
    IntervalElapsed,
    /// The read interval has not passed yet
    IntervalPending,
    /// The batch was averaged
    Averaged,
}

impl State {
    /// Returns the state following `self` once `event` has happened.
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (SensorRead, Sampled { window_full: true }) => Average,
            (SensorRead, Sampled { window_full: false }) => Wait,
            (Wait, IntervalElapsed) => SensorRead,
            (Average, Averaged) => SensorRead,
            (state, _) => state,
        }
    }
}

/// What a single [`BatchSampler::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Stored `value` at position `index` of the batch
    Sampled { index: usize, value: u16 },
    /// Nothing to do until the read interval passes
    Waiting,
    /// Finished a batch. `redrawn` is `true` if the graph was updated.
    Averaged { value: u16, redrawn: bool },
}

type Error<Adc, ADC, Pin> = nb::Error<<Adc as OneShot<ADC, u16, Pin>>::Error>;

/// Averages batches of `N` samples taken at a fixed interval and feeds a
/// scrolling graph of the last `H` averages.
///
/// The sampler never blocks: call [`poll`](BatchSampler::poll) from the
/// main loop with the current time and it advances by at most one state.
///
/// # Examples
///
/// ```
/// use hall_sampler::{BatchConfig, BatchSampler, GraphHistory, GraphRenderer, Step};
/// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
///
/// struct Screen;
///
/// impl GraphRenderer<10> for Screen {
///     fn render_graph(&mut self, current: u16, history: &GraphHistory<10>) {
///         // draw `current` and `history` ...
///     }
/// }
///
/// # let expectations: Vec<Transaction<u16>> =
/// #     (0..10).map(|_| Transaction::read(0, 1200)).collect();
/// # let mut adc = Mock::new(&expectations);
/// # let pin = MockChan0 {};
/// let mut sampler: BatchSampler<_> = BatchSampler::new(pin, BatchConfig::default());
/// let mut screen = Screen;
///
/// let mut now = 0;
/// let value = loop {
///     if let Step::Averaged { value, .. } = sampler.poll(now, &mut adc, &mut screen).unwrap() {
///         break value;
///     }
///     now += 10;
/// };
///
/// assert_eq!(value, 1200);
/// ```
#[derive(Debug)]
pub struct BatchSampler<Pin, const N: usize = BATCH_LEN, const H: usize = HISTORY_LEN> {
    pin: Pin,
    state: State,
    window: SampleWindow<N>,
    interval: Interval,
    history: GraphHistory<H>,
    previous: Option<u16>,
    full_scale: u16,
}

impl<Pin, const N: usize, const H: usize> BatchSampler<Pin, N, H> {
    /// Returns a sampler in [`State::SensorRead`] with a zero-filled history.
    pub fn new<ADC>(pin: Pin, config: BatchConfig) -> Self
    where
        Pin: Channel<ADC>,
    {
        debug_assert!(N > 0, "A batch must hold at least one sample");

        Self {
            pin,
            state: State::SensorRead,
            window: SampleWindow::new(),
            interval: Interval::new(config.read_interval_ms),
            history: GraphHistory::new(),
            previous: None,
            full_scale: config.adc.full_scale(),
        }
    }

    /// Destroys the sampler and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// The state the next [`poll`](BatchSampler::poll) will act on.
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of samples taken in the current batch.
    pub fn samples_taken(&self) -> usize {
        self.window.len()
    }

    /// The averages shown on the graph, oldest first.
    pub fn history(&self) -> &GraphHistory<H> {
        &self.history
    }

    /// The last averaged value handed to the renderer.
    pub fn previous(&self) -> Option<u16> {
        self.previous
    }

    /// Advances the state machine by one step.
    ///
    /// `now_ms` is the current reading of a monotonic millisecond clock.
    /// Raw samples above the ADC's full scale are clamped to it. If the ADC
    /// returns `WouldBlock` the sampler stays in [`State::SensorRead`] and
    /// retries on the next poll.
    pub fn poll<Adc, ADC, R>(
        &mut self,
        now_ms: u32,
        adc: &mut Adc,
        renderer: &mut R,
    ) -> Result<Step, Error<Adc, ADC, Pin>>
    where
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, u16, Pin>,
        R: GraphRenderer<H>,
    {
        let (event, step) = match self.state {
            State::SensorRead => {
                let value = adc.read(&mut self.pin)?.min(self.full_scale);
                let index = self.window.len();
                let window_full = self.window.push(value);
                self.interval.restart(now_ms);

                #[cfg(feature = "defmt")]
                defmt::trace!("sample {=usize}: {=u16}", index, value);

                (Event::Sampled { window_full }, Step::Sampled { index, value })
            }
            State::Wait => {
                let event = if self.interval.is_elapsed(now_ms) {
                    Event::IntervalElapsed
                } else {
                    Event::IntervalPending
                };

                (event, Step::Waiting)
            }
            State::Average => {
                let value = self.window.mean().unwrap_or_default();
                let redrawn = self.publish(value, renderer);
                self.window.reset();

                (Event::Averaged, Step::Averaged { value, redrawn })
            }
        };

        self.state = self.state.transition(event);
        Ok(step)
    }

    fn publish<R>(&mut self, value: u16, renderer: &mut R) -> bool
    where
        R: GraphRenderer<H>,
    {
        if self.previous == Some(value) {
            #[cfg(feature = "defmt")]
            defmt::trace!("average {=u16} unchanged", value);

            return false;
        }

        self.history.push(value);
        renderer.render_graph(value, &self.history);
        self.previous = Some(value);

        #[cfg(feature = "defmt")]
        defmt::debug!("average {=u16}, history {}", value, self.history);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SlowAdc;
    use embedded_hal_mock::{
        adc::{Mock, MockChan0, Transaction},
        common::Generic,
        MockError,
    };
    use std::io::ErrorKind;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u16, [u16; HISTORY_LEN])>,
    }

    impl GraphRenderer<HISTORY_LEN> for Recorder {
        fn render_graph(&mut self, current: u16, history: &GraphHistory<HISTORY_LEN>) {
            self.calls.push((current, history.to_array()));
        }
    }

    fn sampler() -> BatchSampler<MockChan0> {
        BatchSampler::new(MockChan0 {}, BatchConfig::default())
    }

    fn adc(values: &[u16]) -> Generic<Transaction<u16>> {
        let expectations: Vec<_> = values
            .iter()
            .map(|&value| Transaction::read(0, value))
            .collect();
        Mock::new(&expectations)
    }

    /// Polls every 25 ms until a batch is averaged.
    fn run_batch(
        sampler: &mut BatchSampler<MockChan0>,
        adc: &mut Generic<Transaction<u16>>,
        recorder: &mut Recorder,
        now: &mut u32,
    ) -> (u16, bool) {
        loop {
            let step = sampler.poll(*now, adc, recorder).unwrap();
            *now += 25;

            if let Step::Averaged { value, redrawn } = step {
                return (value, redrawn);
            }
        }
    }

    #[test]
    fn transitions() {
        use Event::*;
        use State::*;

        assert_eq!(SensorRead.transition(Sampled { window_full: false }), Wait);
        assert_eq!(SensorRead.transition(Sampled { window_full: true }), Average);
        assert_eq!(Wait.transition(IntervalPending), Wait);
        assert_eq!(Wait.transition(IntervalElapsed), SensorRead);
        assert_eq!(Average.transition(Averaged), SensorRead);
    }

    #[test]
    fn ignores_unrelated_events() {
        use Event::*;
        use State::*;

        assert_eq!(Wait.transition(Averaged), Wait);
        assert_eq!(Average.transition(IntervalElapsed), Average);
        assert_eq!(SensorRead.transition(IntervalPending), SensorRead);
    }

    #[test]
    fn starts_reading() {
        let sampler = sampler();

        assert_eq!(sampler.state(), State::SensorRead);
        assert_eq!(sampler.samples_taken(), 0);
        assert_eq!(sampler.previous(), None);
        assert_eq!(sampler.history().to_array(), [0; HISTORY_LEN]);
    }

    #[test]
    fn waits_between_samples() {
        let mut sampler = sampler();
        let mut adc = adc(&[10, 20]);
        let mut recorder = Recorder::default();

        assert_eq!(
            sampler.poll(100, &mut adc, &mut recorder),
            Ok(Step::Sampled { index: 0, value: 10 })
        );
        assert_eq!(sampler.state(), State::Wait);

        assert_eq!(sampler.poll(120, &mut adc, &mut recorder), Ok(Step::Waiting));
        assert_eq!(sampler.poll(149, &mut adc, &mut recorder), Ok(Step::Waiting));
        assert_eq!(sampler.state(), State::Wait);

        assert_eq!(sampler.poll(150, &mut adc, &mut recorder), Ok(Step::Waiting));
        assert_eq!(sampler.state(), State::SensorRead);

        assert_eq!(
            sampler.poll(150, &mut adc, &mut recorder),
            Ok(Step::Sampled { index: 1, value: 20 })
        );
        adc.done();
    }

    #[test]
    fn averages_after_full_batch() {
        let mut sampler = sampler();
        let mut adc = adc(&[100; BATCH_LEN]);
        let mut recorder = Recorder::default();
        let mut now = 0;

        for read in 1..=BATCH_LEN {
            sampler.poll(now, &mut adc, &mut recorder).unwrap();
            assert_eq!(sampler.samples_taken(), read);

            if read < BATCH_LEN {
                assert_eq!(sampler.state(), State::Wait);
                now += 50;
                sampler.poll(now, &mut adc, &mut recorder).unwrap();
                assert_eq!(sampler.state(), State::SensorRead);
            }
        }
        assert_eq!(sampler.state(), State::Average);

        assert_eq!(
            sampler.poll(now, &mut adc, &mut recorder),
            Ok(Step::Averaged {
                value: 100,
                redrawn: true
            })
        );
        assert_eq!(sampler.state(), State::SensorRead);
        assert_eq!(sampler.samples_taken(), 0);
        assert_eq!(sampler.previous(), Some(100));
        adc.done();
    }

    #[test]
    fn average_floors() {
        let mut sampler = sampler();
        let mut adc = adc(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 19]);
        let mut recorder = Recorder::default();
        let mut now = 0;

        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (1, true)
        );
    }

    #[test]
    fn renders_changes_only() {
        let mut sampler = sampler();
        let mut values = vec![200; BATCH_LEN * 2];
        values.extend([300; BATCH_LEN]);
        let mut adc = adc(&values);
        let mut recorder = Recorder::default();
        let mut now = 0;

        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (200, true)
        );
        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (200, false)
        );
        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (300, true)
        );

        assert_eq!(
            recorder.calls,
            vec![
                (200, [0, 0, 0, 0, 0, 0, 0, 0, 0, 200]),
                (300, [0, 0, 0, 0, 0, 0, 0, 0, 200, 300]),
            ]
        );
        adc.done();
    }

    #[test]
    fn first_zero_average_is_rendered() {
        let mut sampler = sampler();
        let mut adc = adc(&[0; BATCH_LEN]);
        let mut recorder = Recorder::default();
        let mut now = 0;

        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (0, true)
        );
        assert_eq!(recorder.calls, vec![(0, [0; HISTORY_LEN])]);
    }

    #[test]
    fn clamps_out_of_range_samples() {
        let mut sampler = sampler();
        let mut adc = adc(&[u16::MAX; BATCH_LEN]);
        let mut recorder = Recorder::default();
        let mut now = 0;

        assert_eq!(
            run_batch(&mut sampler, &mut adc, &mut recorder, &mut now),
            (4095, true)
        );
    }

    #[test]
    fn waits_across_clock_rollover() {
        let mut sampler = sampler();
        let mut adc = adc(&[1, 2]);
        let mut recorder = Recorder::default();

        sampler.poll(u32::MAX - 9, &mut adc, &mut recorder).unwrap();
        sampler.poll(30, &mut adc, &mut recorder).unwrap();
        assert_eq!(sampler.state(), State::Wait);

        sampler.poll(40, &mut adc, &mut recorder).unwrap();
        assert_eq!(sampler.state(), State::SensorRead);
    }

    #[test]
    fn error() {
        let mut sampler = sampler();
        let expectations: [Transaction<u16>; 1] =
            [Transaction::read(0, 0).with_error(MockError::Io(ErrorKind::InvalidData))];
        let mut adc = Mock::new(&expectations);
        let mut recorder = Recorder::default();

        assert!(sampler.poll(0, &mut adc, &mut recorder).is_err());
        assert_eq!(sampler.state(), State::SensorRead);
        assert_eq!(sampler.samples_taken(), 0);
    }

    #[test]
    fn busy_adc_keeps_slot() {
        let mut sampler = sampler();
        let mut adc = SlowAdc::new(&[500]);
        let mut recorder = Recorder::default();

        assert_eq!(
            sampler.poll(0, &mut adc, &mut recorder),
            Err(nb::Error::WouldBlock)
        );
        assert_eq!(sampler.state(), State::SensorRead);
        assert_eq!(sampler.samples_taken(), 0);

        assert_eq!(
            sampler.poll(5, &mut adc, &mut recorder),
            Ok(Step::Sampled { index: 0, value: 500 })
        );
        assert_eq!(sampler.state(), State::Wait);
        assert_eq!(sampler.samples_taken(), 1);
    }

    #[test]
    fn free_returns_pin() {
        let pin: MockChan0 = sampler().free();
        let _ = pin;
    }
}
