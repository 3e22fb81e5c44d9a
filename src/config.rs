use crate::interpolate::map_f32;

/// Number of samples averaged by a [`BatchSampler`](crate::BatchSampler) per cycle.
pub const BATCH_LEN: usize = 10;

/// Number of averaged values kept for the scrolling graph.
pub const HISTORY_LEN: usize = 10;

/// Number of samples averaged by a [`RollingAverager`](crate::RollingAverager) per reading.
pub const ROLLING_LEN: usize = 50;

/// Configuration of the ADC feeding the sensor.
///
/// - `max_voltage`: The voltage corresponding to the largest value possible for the ADC (mV)
/// - `precision`: The precision of the ADC in bits (eg. for 12-bit precision, use `12`)
///
/// # Examples
///
/// ```
/// use hall_sampler::AdcConfig;
///
/// let adc = AdcConfig {
///     max_voltage: 3300, // 3.3 V
///     precision: 12,     // 12 bits of precision
/// };
///
/// assert_eq!(adc.full_scale(), 4095);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    pub max_voltage: u32,
    pub precision: u32,
}

impl AdcConfig {
    /// Largest raw value the ADC can report.
    pub fn full_scale(&self) -> u16 {
        debug_assert!(
            (1..=16).contains(&self.precision),
            "The ADC precision must be between 1 and 16 bits"
        );

        ((1u32 << self.precision) - 1) as u16
    }

    /// Reference voltage in volts.
    pub fn reference_volts(&self) -> f32 {
        self.max_voltage as f32 / 1000.0
    }

    /// Converts a raw ADC value to volts, mapping `[0, full_scale]` onto
    /// `[0.0, reference_volts]`.
    pub fn to_volts(&self, raw: u16) -> f32 {
        map_f32(
            raw as f32,
            0.0,
            self.full_scale() as f32,
            0.0,
            self.reference_volts(),
        )
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            max_voltage: 3300,
            precision: 12,
        }
    }
}

/// Configuration for a [`BatchSampler`](crate::BatchSampler).
///
/// - `adc`: The ADC the sensor is wired to
/// - `read_interval_ms`: Minimum time between two samples of the same batch (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatchConfig {
    pub adc: AdcConfig,
    pub read_interval_ms: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            adc: AdcConfig::default(),
            read_interval_ms: 50,
        }
    }
}

/// Configuration for a [`RollingAverager`](crate::RollingAverager).
///
/// - `adc`: The ADC the sensor is wired to
/// - `noise_floor`: Means at or below this raw value are reported as `0`
/// - `sample_delay_ms`: Blocking delay after each sample (ms)
/// - `loop_period_ms`: Minimum time between two readings when polled (ms)
///
/// # Examples
///
/// ```
/// use hall_sampler::{AdcConfig, AveragerConfig};
///
/// let config = AveragerConfig {
///     noise_floor: 45,
///     ..AveragerConfig::default()
/// };
///
/// assert_eq!(config.adc, AdcConfig::default());
/// assert_eq!(config.loop_period_ms, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragerConfig {
    pub adc: AdcConfig,
    pub noise_floor: u16,
    pub sample_delay_ms: u8,
    pub loop_period_ms: u32,
}

impl Default for AveragerConfig {
    fn default() -> Self {
        Self {
            adc: AdcConfig::default(),
            noise_floor: 30,
            sample_delay_ms: 1,
            loop_period_ms: 50,
        }
    }
}
