//! Conversion between raw codes, g and m/s².
//!
//! Every conversion takes a `scale` in milli-g per LSB, normally obtained from
//! [`Range::scale_factor`](crate::params::Range::scale_factor).

/// Standard gravity used for g ↔ m/s² conversion.
pub const GRAVITY: f32 = 9.81;

/// Unit a scalar acceleration value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    /// Raw device code (LSB).
    Raw,
    /// Multiples of standard gravity.
    G,
    /// Metres per second squared.
    MetersPerSecondSquared,
}

type Conversion = fn(f32, f32) -> f32;

const CONVERSIONS: [(Unit, Unit, Conversion); 6] = [
    (Unit::G, Unit::MetersPerSecondSquared, g_to_mps2),
    (Unit::G, Unit::Raw, g_to_raw),
    (Unit::MetersPerSecondSquared, Unit::G, mps2_to_g),
    (Unit::MetersPerSecondSquared, Unit::Raw, mps2_to_raw),
    (Unit::Raw, Unit::G, raw_to_g),
    (Unit::Raw, Unit::MetersPerSecondSquared, raw_to_mps2),
];

fn g_to_mps2(value: f32, _scale: f32) -> f32 {
    value * GRAVITY
}

fn g_to_raw(value: f32, scale: f32) -> f32 {
    value / scale * 1000.0
}

fn mps2_to_g(value: f32, _scale: f32) -> f32 {
    value / GRAVITY
}

fn mps2_to_raw(value: f32, scale: f32) -> f32 {
    value / scale * 1000.0 / GRAVITY
}

fn raw_to_g(value: f32, scale: f32) -> f32 {
    value * (scale / 1000.0)
}

fn raw_to_mps2(value: f32, scale: f32) -> f32 {
    value * (scale / 1000.0) * GRAVITY
}

/// Converts `value` from one unit to another.
///
/// Pairs without an entry in the conversion table, including `from == to`,
/// return `value` unchanged.
pub fn convert(value: f32, from: Unit, to: Unit, scale: f32) -> f32 {
    CONVERSIONS
        .iter()
        .find(|(src, dst, _)| *src == from && *dst == to)
        .map_or(value, |(_, _, conversion)| conversion(value, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Range;

    const UNITS: [Unit; 3] = [Unit::Raw, Unit::G, Unit::MetersPerSecondSquared];
    const RANGES: [Range; 4] = [Range::G2, Range::G4, Range::G8, Range::G16];

    fn assert_close(actual: f32, expected: f32) {
        let magnitude = if expected < 0.0 { -expected } else { expected };
        let tolerance = 1e-4 * magnitude.max(1.0);
        let diff = actual - expected;
        assert!(
            diff <= tolerance && diff >= -tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn same_unit_is_identity() {
        for unit in UNITS {
            for range in RANGES {
                assert_eq!(convert(123.456, unit, unit, range.scale_factor()), 123.456);
            }
        }
    }

    #[test]
    fn raw_to_g_round_trips_for_every_range() {
        for range in RANGES {
            let scale = range.scale_factor();
            for raw in [0.0, 1.0, 100.0, 511.0, 1023.0] {
                let g = convert(raw, Unit::Raw, Unit::G, scale);
                assert_close(convert(g, Unit::G, Unit::Raw, scale), raw);
            }
        }
    }

    #[test]
    fn metric_round_trips_through_raw() {
        let scale = Range::G8.scale_factor();
        let raw = convert(9.81, Unit::MetersPerSecondSquared, Unit::Raw, scale);
        assert_close(raw, 1000.0 / 15.6);
        assert_close(convert(raw, Unit::Raw, Unit::MetersPerSecondSquared, scale), 9.81);
    }

    #[test]
    fn four_g_range_converts_hundred_lsb() {
        let scale = Range::G4.scale_factor();
        assert_close(convert(100.0, Unit::Raw, Unit::G, scale), 0.78);
        assert_close(
            convert(100.0, Unit::Raw, Unit::MetersPerSecondSquared, scale),
            0.78 * 9.81,
        );
    }

    #[test]
    fn gravity_conversions_ignore_scale() {
        assert_close(convert(2.0, Unit::G, Unit::MetersPerSecondSquared, 0.0), 19.62);
        assert_close(convert(19.62, Unit::MetersPerSecondSquared, Unit::G, 0.0), 2.0);
    }
}
