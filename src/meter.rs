use heapless::Vec;

/// Maximum number of zones on a meter face.
pub const MAX_ZONES: usize = 4;

/// Band of the meter face a needle can rest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneKind {
    Low,
    Normal,
    High,
    Danger,
}

/// A zone covering voltages up to and including `upper_volts`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Zone {
    pub upper_volts: f32,
    pub kind: ZoneKind,
}

/// Scale of an analog meter: its full-scale voltage and the contiguous
/// zones painted on its face, in ascending order.
///
/// # Examples
///
/// ```
/// use hall_sampler::{MeterZones, Zone, ZoneKind};
///
/// let zones = MeterZones::new(
///     3.3,
///     &[
///         Zone { upper_volts: 1.0, kind: ZoneKind::Low },
///         Zone { upper_volts: 2.5, kind: ZoneKind::Normal },
///         Zone { upper_volts: 3.3, kind: ZoneKind::High },
///     ],
/// );
///
/// assert_eq!(zones.zone_at(1.7), Some(ZoneKind::Normal));
/// assert_eq!(zones.needle_fraction(1.65), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterZones {
    full_scale_volts: f32,
    zones: Vec<Zone, MAX_ZONES>,
}

impl MeterZones {
    /// Returns a scale reading up to `full_scale_volts`.
    ///
    /// Zones must be in ascending order by `upper_volts` or this function
    /// will panic when running in debug mode. Zones past [`MAX_ZONES`] are
    /// dropped.
    pub fn new(full_scale_volts: f32, zones: &[Zone]) -> Self {
        debug_assert!(full_scale_volts > 0.0, "The full scale must be positive");
        debug_assert!(
            zones.windows(2).all(|w| w[0].upper_volts <= w[1].upper_volts),
            "The zones must be in ascending order by voltage"
        );

        Self {
            full_scale_volts,
            zones: zones.iter().copied().take(MAX_ZONES).collect(),
        }
    }

    /// A plain scale without zones.
    pub fn plain(full_scale_volts: f32) -> Self {
        Self::new(full_scale_volts, &[])
    }

    /// Voltage at which the needle reaches the end of the scale.
    pub fn full_scale_volts(&self) -> f32 {
        self.full_scale_volts
    }

    /// The zones painted on the face, lowest first.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Needle position for `voltage` as a fraction of full scale, clamped
    /// to `[0.0, 1.0]`.
    ///
    /// A `NaN` voltage, or a zero voltage on a zero full scale, rests the
    /// needle at `0.0`.
    pub fn needle_fraction(&self, voltage: f32) -> f32 {
        let fraction = voltage / self.full_scale_volts;

        if fraction.is_nan() {
            return 0.0;
        }

        fraction.clamp(0.0, 1.0)
    }

    /// The zone the needle rests in at `voltage`.
    ///
    /// Voltages below zero fall in the first zone, voltages above the last
    /// zone's upper bound are in no zone.
    pub fn zone_at(&self, voltage: f32) -> Option<ZoneKind> {
        self.zones
            .iter()
            .find(|zone| voltage <= zone.upper_volts)
            .map(|zone| zone.kind)
    }
}

impl Default for MeterZones {
    fn default() -> Self {
        Self::new(
            3.3,
            &[
                Zone {
                    upper_volts: 1.1,
                    kind: ZoneKind::Low,
                },
                Zone {
                    upper_volts: 2.2,
                    kind: ZoneKind::Normal,
                },
                Zone {
                    upper_volts: 2.9,
                    kind: ZoneKind::High,
                },
                Zone {
                    upper_volts: 3.3,
                    kind: ZoneKind::Danger,
                },
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones_invalid() -> [Zone; 2] {
        [
            Zone {
                upper_volts: 2.0,
                kind: ZoneKind::High,
            },
            Zone {
                upper_volts: 1.0,
                kind: ZoneKind::Low,
            },
        ]
    }

    #[test]
    #[should_panic]
    fn panics_if_unsorted_zones() {
        MeterZones::new(3.3, &zones_invalid());
    }

    #[test]
    fn needle_fraction() {
        let zones = MeterZones::plain(3.3);

        assert_eq!(zones.needle_fraction(0.0), 0.0);
        assert_eq!(zones.needle_fraction(3.3), 1.0);
        assert!((zones.needle_fraction(1.1) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn needle_fraction_clamps() {
        let zones = MeterZones::plain(3.3);

        assert_eq!(zones.needle_fraction(-0.5), 0.0);
        assert_eq!(zones.needle_fraction(5.0), 1.0);
    }

    #[test]
    fn needle_rests_on_nan() {
        let zones = MeterZones::plain(3.3);

        assert_eq!(zones.needle_fraction(f32::NAN), 0.0);
        assert_eq!(zones.zone_at(f32::NAN), None);
    }

    #[test]
    fn default_face() {
        let zones = MeterZones::default();

        assert_eq!(zones.full_scale_volts(), 3.3);
        assert_eq!(zones.zones().len(), MAX_ZONES);
        assert_eq!(zones.zones()[3].kind, ZoneKind::Danger);
    }

    #[test]
    fn zone_at() {
        let zones = MeterZones::default();

        assert_eq!(zones.zone_at(0.0), Some(ZoneKind::Low));
        assert_eq!(zones.zone_at(1.1), Some(ZoneKind::Low));
        assert_eq!(zones.zone_at(1.5), Some(ZoneKind::Normal));
        assert_eq!(zones.zone_at(2.5), Some(ZoneKind::High));
        assert_eq!(zones.zone_at(3.3), Some(ZoneKind::Danger));
        assert_eq!(zones.zone_at(3.4), None);
    }

    #[test]
    fn plain_scale_has_no_zones() {
        assert_eq!(MeterZones::plain(5.0).zone_at(1.0), None);
    }

    #[test]
    fn extra_zones_are_dropped() {
        let zone = Zone {
            upper_volts: 1.0,
            kind: ZoneKind::Normal,
        };
        let zones = MeterZones::new(3.3, &[zone; MAX_ZONES + 2]);

        assert_eq!(zones.zones().len(), MAX_ZONES);
    }
}
