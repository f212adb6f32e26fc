//! Declared-voltage parsing and comparison.
//!
//! Catalog voltages are free-form vendor strings. This module parses the two
//! shapes that actually occur in catalogs, a single value like `"5V"` and a
//! range like `"2.0V - 3.6V"`; callers fall back to exact string comparison
//! for anything else.

/// Relative tolerance applied when comparing declared voltages. A 3.3V rail
/// feeding a "3.0V" pin is fine; 5V into 3.3V is not.
pub(crate) const VOLTAGE_TOLERANCE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VoltageRange {
    pub min: f64,
    pub max: f64,
}

impl VoltageRange {
    /// The single value of a degenerate range, if this is one.
    pub fn fixed(&self) -> Option<f64> {
        (self.min == self.max).then_some(self.min)
    }

    fn widened(&self, tolerance: f64) -> VoltageRange {
        VoltageRange {
            min: self.min * (1.0 - tolerance),
            max: self.max * (1.0 + tolerance),
        }
    }

    fn intersects(&self, other: &VoltageRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Parse a declared voltage. Returns `None` for anything unreadable rather
/// than guessing.
pub(crate) fn parse_voltage(raw: &str) -> Option<VoltageRange> {
    let trimmed = raw.trim();
    if let Some(v) = parse_scalar(trimmed) {
        return Some(VoltageRange { min: v, max: v });
    }
    let (lo, hi) = trimmed.split_once('-')?;
    let lo = parse_scalar(lo)?;
    let hi = parse_scalar(hi)?;
    (lo <= hi).then_some(VoltageRange { min: lo, max: hi })
}

fn parse_scalar(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix(['V', 'v']).unwrap_or(s).trim();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a supplied voltage satisfies a required one. The tolerance is
/// applied on the requirement side, so a supply anywhere inside the widened
/// required range passes.
pub(crate) fn supply_satisfies(supplied: &VoltageRange, required: &VoltageRange) -> bool {
    supplied.intersects(&required.widened(VOLTAGE_TOLERANCE))
}

/// Whether two fixed rails can share a power domain.
pub(crate) fn rails_compatible(a: f64, b: f64) -> bool {
    (a - b).abs() <= VOLTAGE_TOLERANCE * a.max(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(v: f64) -> VoltageRange {
        VoltageRange { min: v, max: v }
    }

    #[test]
    fn parses_single_values() {
        assert_eq!(parse_voltage("5V"), Some(fixed(5.0)));
        assert_eq!(parse_voltage("3.3v"), Some(fixed(3.3)));
        assert_eq!(parse_voltage("  3.3 V "), Some(fixed(3.3)));
        assert_eq!(parse_voltage("12"), Some(fixed(12.0)));
        assert_eq!(parse_voltage("-5V"), Some(fixed(-5.0)));
    }

    #[test]
    fn parses_ranges() {
        assert_eq!(
            parse_voltage("2.0V - 3.6V"),
            Some(VoltageRange { min: 2.0, max: 3.6 })
        );
        assert_eq!(
            parse_voltage("1.8-3.3V"),
            Some(VoltageRange { min: 1.8, max: 3.3 })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_voltage(""), None);
        assert_eq!(parse_voltage("AC 220V"), None);
        assert_eq!(parse_voltage("high"), None);
        // Inverted ranges are vendor typos, not ranges.
        assert_eq!(parse_voltage("3.6V - 2.0V"), None);
    }

    #[test]
    fn supply_within_tolerance_passes() {
        assert!(supply_satisfies(&fixed(3.3), &fixed(3.3)));
        assert!(supply_satisfies(&fixed(3.3), &fixed(3.0)));
        assert!(supply_satisfies(&fixed(3.0), &fixed(3.3)));
        assert!(!supply_satisfies(&fixed(5.0), &fixed(3.3)));
    }

    #[test]
    fn supply_against_range_uses_intersection() {
        let mcu = VoltageRange { min: 2.0, max: 3.6 };
        assert!(supply_satisfies(&fixed(3.3), &mcu));
        assert!(supply_satisfies(&fixed(2.0), &mcu));
        assert!(!supply_satisfies(&fixed(5.0), &mcu));
    }

    #[test]
    fn rail_compatibility_is_symmetric() {
        assert!(rails_compatible(3.3, 3.3));
        assert!(rails_compatible(5.0, 4.8));
        assert!(rails_compatible(4.8, 5.0));
        assert!(!rails_compatible(5.0, 3.3));
        assert!(!rails_compatible(3.3, 5.0));
    }
}
