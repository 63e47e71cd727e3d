use crate::error::{AppError, Result};

/// A named time unit and its magnitude in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnit {
    pub label: &'static str,
    pub millis: f64,
}

impl TimeUnit {
    pub const fn new(label: &'static str, millis: f64) -> Self {
        Self { label, millis }
    }
}

/// Ordered list of time units, strictly descending in magnitude.
///
/// Validated once at construction; formatting never fails.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: Vec<TimeUnit>,
}

impl UnitTable {
    pub fn new(units: Vec<TimeUnit>) -> Result<Self> {
        if units.is_empty() {
            return Err(AppError::Config("unit table must not be empty".to_string()));
        }

        for unit in &units {
            if !unit.millis.is_finite() || unit.millis <= 0.0 {
                return Err(AppError::Config(format!(
                    "unit '{}' must have a positive finite magnitude, got {} ms",
                    unit.label, unit.millis
                )));
            }
        }

        for pair in units.windows(2) {
            if pair[1].millis >= pair[0].millis {
                return Err(AppError::Config(format!(
                    "unit table must be strictly descending: '{}' ({} ms) does not exceed '{}' ({} ms)",
                    pair[0].label, pair[0].millis, pair[1].label, pair[1].millis
                )));
            }
        }

        Ok(Self { units })
    }

    /// The short-English humanizer table: y, mo, w, d, h, m, s, ms.
    pub fn short_english() -> Self {
        Self {
            units: vec![
                TimeUnit::new("y", 31_557_600_000.0),
                TimeUnit::new("mo", 2_629_800_000.0),
                TimeUnit::new("w", 604_800_000.0),
                TimeUnit::new("d", 86_400_000.0),
                TimeUnit::new("h", 3_600_000.0),
                TimeUnit::new("m", 60_000.0),
                TimeUnit::new("s", 1_000.0),
                TimeUnit::new("ms", 1.0),
            ],
        }
    }

    pub fn units(&self) -> &[TimeUnit] {
        &self.units
    }

    fn smallest(&self) -> &TimeUnit {
        &self.units[self.units.len() - 1]
    }
}

/// Display options for [`format_duration`]. Constructed through [`FormatOptions::new`]
/// so `largest_units >= 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    largest_units: usize,
    max_decimal_points: usize,
    spacer: String,
}

impl FormatOptions {
    pub fn new(
        largest_units: usize,
        max_decimal_points: usize,
        spacer: impl Into<String>,
    ) -> Result<Self> {
        if largest_units == 0 {
            return Err(AppError::Config(
                "largest-units must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            largest_units,
            max_decimal_points,
            spacer: spacer.into(),
        })
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            largest_units: 2,
            max_decimal_points: 2,
            spacer: String::new(),
        }
    }
}

/// Renders a duration in milliseconds as a compact multi-unit string.
///
/// Walks the table largest to smallest, emitting at most
/// `options.largest_units` non-zero groups. Only the table's final unit may
/// carry a fractional count; leftover below any other final group is dropped.
/// Zero and non-finite inputs render as `0` plus the smallest unit label. Negative
/// durations render the absolute value with a leading `-`.
pub fn format_duration(duration_ms: f64, table: &UnitTable, options: &FormatOptions) -> String {
    if duration_ms == 0.0 || !duration_ms.is_finite() {
        return format!("0{}{}", options.spacer, table.smallest().label);
    }

    let sign = if duration_ms < 0.0 { "-" } else { "" };
    let mut remaining = duration_ms.abs();
    let units = table.units();

    let mut groups: Vec<String> = Vec::new();
    for (idx, unit) in units.iter().enumerate() {
        if groups.len() == options.largest_units {
            break;
        }

        if idx == units.len() - 1 {
            // Final table entry: leftover becomes a fractional count.
            let count = remaining / unit.millis;
            if count > 0.0 || groups.is_empty() {
                groups.push(format!(
                    "{}{}{}",
                    truncate(count, options.max_decimal_points),
                    options.spacer,
                    unit.label
                ));
            }
            break;
        }

        let count = (remaining / unit.millis).floor();
        if count > 0.0 {
            groups.push(format!("{}{}{}", count, options.spacer, unit.label));
            remaining -= count * unit.millis;
        }
    }

    format!("{}{}", sign, groups.join(&options.spacer))
}

// Truncates toward zero, never rounds; f64 display drops trailing zeros.
fn truncate(count: f64, max_decimal_points: usize) -> f64 {
    let factor = 10f64.powi(max_decimal_points as i32);
    (count * factor).floor() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(largest_units: usize, max_decimal_points: usize, spacer: &str) -> FormatOptions {
        FormatOptions::new(largest_units, max_decimal_points, spacer)
            .expect("valid format options")
    }

    #[test]
    fn zero_duration_uses_smallest_unit() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(0.0, &table, &opts(2, 2, "")), "0ms");
    }

    #[test]
    fn zero_duration_respects_spacer() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(0.0, &table, &opts(2, 2, " ")), "0 ms");
    }

    #[test]
    fn ninety_seconds_is_one_minute_thirty() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(90_000.0, &table, &opts(2, 2, "")), "1m30s");
    }

    #[test]
    fn ninety_minutes_is_one_hour_thirty() {
        let table = UnitTable::short_english();
        assert_eq!(
            format_duration(5_400_000.0, &table, &opts(2, 2, "")),
            "1h30m"
        );
    }

    #[test]
    fn largest_units_cap_drops_remainder_without_decimals() {
        let table = UnitTable::short_english();
        // 1h 30m 5s: the cap stops at minutes, so the 5s is dropped silently.
        assert_eq!(
            format_duration(5_405_000.0, &table, &opts(2, 2, "")),
            "1h30m"
        );
    }

    #[test]
    fn sub_second_durations_keep_millisecond_precision() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(500.0, &table, &opts(2, 2, "")), "500ms");
    }

    #[test]
    fn fractional_count_on_final_unit_truncates() {
        let table = UnitTable::short_english();
        assert_eq!(
            format_duration(8_123.456, &table, &opts(2, 2, "")),
            "8s123.45ms"
        );
    }

    #[test]
    fn fractional_count_strips_trailing_zeros() {
        let table = UnitTable::new(vec![
            TimeUnit::new("m", 60_000.0),
            TimeUnit::new("s", 1_000.0),
        ])
        .expect("valid table");
        assert_eq!(format_duration(500.0, &table, &opts(2, 3, "")), "0.5s");
    }

    #[test]
    fn sub_smallest_unit_truncates_to_zero_count() {
        let table = UnitTable::new(vec![
            TimeUnit::new("m", 60_000.0),
            TimeUnit::new("s", 1_000.0),
        ])
        .expect("valid table");
        assert_eq!(format_duration(500.0, &table, &opts(2, 0, "")), "0s");
    }

    #[test]
    fn exact_unit_boundary_emits_single_group() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(3_600_000.0, &table, &opts(2, 2, "")), "1h");
    }

    #[test]
    fn zero_count_units_are_skipped_not_padded() {
        let table = UnitTable::short_english();
        // 1m plus 500ms: seconds count is zero and is skipped entirely.
        assert_eq!(
            format_duration(60_500.0, &table, &opts(2, 2, "")),
            "1m500ms"
        );
    }

    #[test]
    fn spacer_separates_magnitudes_labels_and_groups() {
        let table = UnitTable::short_english();
        assert_eq!(
            format_duration(90_000.0, &table, &opts(2, 2, " ")),
            "1 m 30 s"
        );
    }

    #[test]
    fn negative_duration_renders_leading_sign() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(-90_000.0, &table, &opts(2, 2, "")), "-1m30s");
    }

    #[test]
    fn non_finite_inputs_render_as_zero() {
        let table = UnitTable::short_english();
        assert_eq!(format_duration(f64::NAN, &table, &opts(2, 2, "")), "0ms");
        assert_eq!(
            format_duration(f64::INFINITY, &table, &opts(2, 2, "")),
            "0ms"
        );
        assert_eq!(
            format_duration(f64::NEG_INFINITY, &table, &opts(2, 2, "")),
            "0ms"
        );
    }

    #[test]
    fn raising_largest_units_only_appends_smaller_groups() {
        let table = UnitTable::short_english();
        let duration = 3_661_000.0; // 1h 1m 1s
        assert_eq!(format_duration(duration, &table, &opts(1, 2, "")), "1h");
        assert_eq!(format_duration(duration, &table, &opts(2, 2, "")), "1h1m");
        assert_eq!(format_duration(duration, &table, &opts(3, 2, "")), "1h1m1s");
        // No further non-zero units exist, so a larger cap changes nothing.
        assert_eq!(format_duration(duration, &table, &opts(4, 2, "")), "1h1m1s");
    }

    #[test]
    fn formatting_is_deterministic() {
        let table = UnitTable::short_english();
        let options = opts(2, 2, "");
        assert_eq!(
            format_duration(90_000.0, &table, &options),
            format_duration(90_000.0, &table, &options)
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            UnitTable::new(vec![]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn non_descending_table_is_rejected() {
        let result = UnitTable::new(vec![
            TimeUnit::new("s", 1_000.0),
            TimeUnit::new("m", 60_000.0),
        ]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn equal_magnitudes_are_rejected() {
        let result = UnitTable::new(vec![
            TimeUnit::new("s", 1_000.0),
            TimeUnit::new("sec", 1_000.0),
        ]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn non_positive_magnitude_is_rejected() {
        let result = UnitTable::new(vec![TimeUnit::new("z", 0.0)]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn zero_largest_units_is_rejected() {
        assert!(matches!(
            FormatOptions::new(0, 2, ""),
            Err(AppError::Config(_))
        ));
    }
}
