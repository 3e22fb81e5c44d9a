use crate::{
    config::{AdcConfig, AveragerConfig},
    interval::Interval,
    render::MeterRenderer,
    window::mean,
    MeterZones, ROLLING_LEN,
};
use embedded_hal::{
    adc::{Channel, OneShot},
    blocking::delay::DelayMs,
};

/// Result of one [`RollingAverager`] reading.
///
/// `raw` is the noise-clamped mean in ADC units and `volts` is the same
/// value mapped onto the ADC's voltage range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub raw: u16,
    pub volts: f32,
}

type Error<Adc, ADC, Pin> = nb::Error<<Adc as OneShot<ADC, u16, Pin>>::Error>;

/// Forces means at or below `noise_floor` to zero.
pub fn clamp_noise(mean: u16, noise_floor: u16) -> u16 {
    if mean <= noise_floor {
        0
    } else {
        mean
    }
}

/// Takes `N` samples back to back and reports their noise-clamped mean
/// for an analog meter.
///
/// # Examples
///
/// ```
/// use hall_sampler::{AveragerConfig, RollingAverager};
/// # use embedded_hal_mock::{
/// #     adc::{Mock, MockChan0, Transaction},
/// #     delay::MockNoop,
/// # };
/// #
/// # let expectations: Vec<Transaction<u16>> =
/// #     (0..50).map(|_| Transaction::read(0, 4095)).collect();
/// # let mut adc = Mock::new(&expectations);
/// # let mut delay = MockNoop::new();
/// # let pin = MockChan0 {};
///
/// let mut averager: RollingAverager<_> = RollingAverager::new(pin, AveragerConfig::default());
/// let reading = averager.sample(&mut adc, &mut delay).unwrap();
///
/// assert_eq!(reading.raw, 4095);
/// assert!((reading.volts - 3.3).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct RollingAverager<Pin, const N: usize = ROLLING_LEN> {
    pin: Pin,
    samples: [u16; N],
    cadence: Interval,
    adc: AdcConfig,
    noise_floor: u16,
    sample_delay_ms: u8,
}

impl<Pin, const N: usize> RollingAverager<Pin, N> {
    /// Returns an averager whose first [`poll`](RollingAverager::poll) is due
    /// immediately.
    pub fn new<ADC>(pin: Pin, config: AveragerConfig) -> Self
    where
        Pin: Channel<ADC>,
    {
        debug_assert!(N > 0, "A reading must average at least one sample");

        Self {
            pin,
            samples: [0; N],
            cadence: Interval::new(config.loop_period_ms),
            adc: config.adc,
            noise_floor: config.noise_floor,
            sample_delay_ms: config.sample_delay_ms,
        }
    }

    /// Destroys the averager and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Takes `N` samples, each followed by the configured delay, and
    /// returns their clamped mean.
    ///
    /// Blocks for the whole batch, including ADC conversions that return
    /// `WouldBlock`.
    pub fn sample<Adc, ADC, D>(
        &mut self,
        adc: &mut Adc,
        delay: &mut D,
    ) -> Result<Reading, Error<Adc, ADC, Pin>>
    where
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, u16, Pin>,
        D: DelayMs<u8>,
    {
        let full_scale = self.adc.full_scale();

        for slot in self.samples.iter_mut() {
            *slot = nb::block!(adc.read(&mut self.pin))?.min(full_scale);
            delay.delay_ms(self.sample_delay_ms);
        }

        let raw = clamp_noise(mean(&self.samples), self.noise_floor);
        let reading = Reading {
            raw,
            volts: self.adc.to_volts(raw),
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("reading {}", reading);

        Ok(reading)
    }

    /// Takes a reading if the loop period has passed since the previous
    /// one, otherwise returns `WouldBlock`. The first poll is always due.
    ///
    /// A reading that fails leaves the cadence untouched, so the next poll
    /// retries immediately.
    pub fn poll<Adc, ADC, D>(
        &mut self,
        now_ms: u32,
        adc: &mut Adc,
        delay: &mut D,
    ) -> Result<Reading, Error<Adc, ADC, Pin>>
    where
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, u16, Pin>,
        D: DelayMs<u8>,
    {
        if !self.cadence.is_elapsed(now_ms) {
            return Err(nb::Error::WouldBlock);
        }

        let reading = self.sample(adc, delay)?;
        self.cadence.restart(now_ms);
        Ok(reading)
    }

    /// Polls for a reading and, when one is taken, moves the meter needle
    /// to its voltage.
    pub fn update<Adc, ADC, D, R>(
        &mut self,
        now_ms: u32,
        adc: &mut Adc,
        delay: &mut D,
        renderer: &mut R,
        zones: &MeterZones,
    ) -> Result<Reading, Error<Adc, ADC, Pin>>
    where
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, u16, Pin>,
        D: DelayMs<u8>,
        R: MeterRenderer,
    {
        let reading = self.poll(now_ms, adc, delay)?;
        renderer.render_meter(reading.volts, zones);
        Ok(reading)
    }
}
