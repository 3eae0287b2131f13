//! NTC 100K thermistor (beta 4066) with a 4.7k pull-up
//!
//! The common RepRap table, rescaled from 10-bit to full-scale 16-bit
//! readings. Raw values ascend while temperatures descend, so a colder
//! hotend reads higher.

use hotend_core::thermal::ThermalTable;

/// `(raw, celsius)` pairs
pub const THERMISTOR_100K_ENTRIES: &[(u16, i16)] = &[
    (64, 841),
    (3456, 255),
    (6848, 209),
    (10240, 184),
    (13632, 166),
    (17024, 153),
    (20416, 142),
    (23808, 132),
    (27200, 124),
    (30592, 116),
    (33984, 108),
    (37376, 101),
    (40768, 93),
    (44160, 86),
    (47552, 78),
    (50944, 70),
    (54336, 61),
    (57728, 50),
    (61120, 34),
    (64512, 3),
];

/// Translator for [`THERMISTOR_100K_ENTRIES`]
pub static THERMISTOR_100K: ThermalTable = ThermalTable::new(THERMISTOR_100K_ENTRIES);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_is_monotonic() {
        for pair in THERMISTOR_100K_ENTRIES.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }

    #[test]
    fn test_typical_targets() {
        assert_eq!(THERMISTOR_100K.raw_from_celsius(200), 6848);
        assert_eq!(THERMISTOR_100K.raw_from_celsius(0), 64512);
        assert_eq!(THERMISTOR_100K.celsius_from_raw(0), 841);
        assert_eq!(THERMISTOR_100K.celsius_from_raw(u16::MAX), 3);
        assert_eq!(THERMISTOR_100K.celsius_from_raw(30_000), 124);
    }

    #[test]
    fn test_every_entry_round_trips() {
        for &(raw, celsius) in THERMISTOR_100K_ENTRIES {
            assert_eq!(THERMISTOR_100K.celsius_from_raw(raw), celsius);
            assert_eq!(THERMISTOR_100K.raw_from_celsius(celsius), raw);
        }
    }

    proptest! {
        #[test]
        fn prop_raw_round_trip_within_one_step(raw in any::<u16>()) {
            let back = THERMISTOR_100K.raw_from_celsius(THERMISTOR_100K.celsius_from_raw(raw));
            let distance = if back > raw { back - raw } else { raw - back };
            prop_assert!(distance <= THERMISTOR_100K.max_step());
        }

        #[test]
        fn prop_target_lands_on_nearest_hotter_entry(celsius in 3i16..=841) {
            let back = THERMISTOR_100K.celsius_from_raw(THERMISTOR_100K.raw_from_celsius(celsius));
            prop_assert!(back >= celsius);
            // no table temperature lies between the target and the reported step
            prop_assert!(THERMISTOR_100K_ENTRIES
                .iter()
                .all(|&(_, t)| t < celsius || t >= back));
        }

        #[test]
        fn prop_hotter_reads_lower(a in any::<u16>(), b in any::<u16>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(THERMISTOR_100K.celsius_from_raw(lo) >= THERMISTOR_100K.celsius_from_raw(hi));
        }
    }
}
