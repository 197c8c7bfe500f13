use chrono::{DateTime, Local, TimeDelta};

/// Permissive numeric coercion for a duration field. Anything that does not
/// parse as a finite number reads as zero; negatives and fractions pass
/// through untouched.
pub fn coerce_field(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Whether the days field participates in a slot's offset. The single view
/// always includes days; for slots it is a configuration choice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DayPolicy {
    IncludeDays,
    HoursAndBelow,
}

/// One duration entry, kept as raw editable text per component so that
/// in-progress input never corrupts the numeric model.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationFields {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for DurationFields {
    fn default() -> Self {
        Self {
            days: "0".to_string(),
            hours: "0".to_string(),
            minutes: "0".to_string(),
            seconds: "0".to_string(),
        }
    }
}

impl DurationFields {
    /// Interprets the fields as a span in milliseconds under the given policy.
    pub fn duration_ms(&self, policy: DayPolicy) -> f64 {
        let days = match policy {
            DayPolicy::IncludeDays => coerce_field(&self.days),
            DayPolicy::HoursAndBelow => 0.0,
        };
        let hours = coerce_field(&self.hours);
        let minutes = coerce_field(&self.minutes);
        let seconds = coerce_field(&self.seconds);
        (((days * 24.0 + hours) * 60.0 + minutes) * 60.0 + seconds) * 1000.0
    }
}

/// One independent slot in the multi view.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub fields: DurationFields,
    pub multiplier: u32,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            fields: DurationFields::default(),
            multiplier: 1,
        }
    }
}

impl Slot {
    pub fn slot_ms(&self, policy: DayPolicy) -> f64 {
        self.fields.duration_ms(policy) * f64::from(self.multiplier)
    }

    /// Label text under each slot result, e.g. "Added: 10800s (x3)".
    pub fn added_seconds_label(&self, policy: DayPolicy) -> String {
        format!(
            "Added: {:.0}s (x{})",
            self.slot_ms(policy) / 1000.0,
            self.multiplier
        )
    }
}

/// Shifts `now` by `ms` milliseconds. Pure: the same inputs always map to the
/// same millisecond epoch. Out-of-range spans saturate at the chrono limits
/// instead of panicking; a nonsensical displayed time is accepted behavior.
pub fn apply_offset(now: DateTime<Local>, ms: f64) -> DateTime<Local> {
    let micros = (ms * 1000.0) as i64;
    let delta = TimeDelta::microseconds(micros);
    if delta >= TimeDelta::zero() {
        now.checked_add_signed(delta)
            .unwrap_or(DateTime::<chrono::Utc>::MAX_UTC.with_timezone(&Local))
    } else {
        now.checked_add_signed(delta)
            .unwrap_or(DateTime::<chrono::Utc>::MIN_UTC.with_timezone(&Local))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fields(days: &str, hours: &str, minutes: &str, seconds: &str) -> DurationFields {
        DurationFields {
            days: days.to_string(),
            hours: hours.to_string(),
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
        }
    }

    #[test]
    fn coercion_maps_garbage_to_zero() {
        assert_eq!(coerce_field(""), 0.0);
        assert_eq!(coerce_field("   "), 0.0);
        assert_eq!(coerce_field("abc"), 0.0);
        assert_eq!(coerce_field("1.2.3"), 0.0);
        assert_eq!(coerce_field("NaN"), 0.0);
        assert_eq!(coerce_field("inf"), 0.0);
    }

    #[test]
    fn coercion_keeps_numbers_including_negative_and_fractional() {
        assert_eq!(coerce_field("42"), 42.0);
        assert_eq!(coerce_field(" 7 "), 7.0);
        assert_eq!(coerce_field("-3"), -3.0);
        assert_eq!(coerce_field("1.5"), 1.5);
    }

    #[test]
    fn zero_duration_is_identity() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let zero = DurationFields::default();
        assert_eq!(
            apply_offset(now, zero.duration_ms(DayPolicy::IncludeDays)),
            now
        );
    }

    #[test]
    fn single_view_formula_counts_every_component() {
        let d = fields("1", "2", "3", "4");
        let expected = (((1.0 * 24.0 + 2.0) * 60.0 + 3.0) * 60.0 + 4.0) * 1000.0;
        assert_eq!(d.duration_ms(DayPolicy::IncludeDays), expected);
    }

    #[test]
    fn hours_and_below_policy_ignores_days() {
        let d = fields("365", "1", "0", "0");
        assert_eq!(d.duration_ms(DayPolicy::HoursAndBelow), 3_600_000.0);
    }

    #[test]
    fn offset_is_strictly_increasing_per_component() {
        let base = fields("1", "1", "1", "1");
        let base_ms = base.duration_ms(DayPolicy::IncludeDays);
        for bumped in [
            fields("2", "1", "1", "1"),
            fields("1", "2", "1", "1"),
            fields("1", "1", "2", "1"),
            fields("1", "1", "1", "2"),
        ] {
            assert!(bumped.duration_ms(DayPolicy::IncludeDays) > base_ms);
        }
    }

    #[test]
    fn offset_is_strictly_increasing_in_multiplier() {
        let mut prev = f64::MIN;
        for multiplier in 1..=5 {
            let slot = Slot {
                fields: fields("0", "0", "1", "0"),
                multiplier,
            };
            let ms = slot.slot_ms(DayPolicy::HoursAndBelow);
            assert!(ms > prev);
            prev = ms;
        }
    }

    #[test]
    fn minute_past_month_end_rolls_the_date() {
        let now = Local.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
        let d = fields("0", "0", "1", "0");
        let result = apply_offset(now, d.duration_ms(DayPolicy::IncludeDays));
        assert_eq!(crate::format::format_time(&result), "00:00:00");
        assert_eq!(crate::format::format_date(&result), "2024 - 02 - 01");
    }

    #[test]
    fn tripled_hour_reads_ten_thousand_eight_hundred_seconds() {
        let slot = Slot {
            fields: fields("0", "1", "0", "0"),
            multiplier: 3,
        };
        assert_eq!(slot.slot_ms(DayPolicy::HoursAndBelow), 10_800_000.0);
        assert_eq!(
            slot.added_seconds_label(DayPolicy::HoursAndBelow),
            "Added: 10800s (x3)"
        );
    }

    #[test]
    fn fractional_seconds_propagate_into_milliseconds() {
        let d = fields("0", "0", "0", "1.5");
        assert_eq!(d.duration_ms(DayPolicy::IncludeDays), 1_500.0);
    }

    #[test]
    fn absurd_magnitudes_saturate_instead_of_panicking() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let _ = apply_offset(now, 1e300);
        let _ = apply_offset(now, -1e300);
    }

    #[test]
    fn editing_one_slot_leaves_the_others_alone() {
        let mut slots = vec![Slot::default(); 5];
        let untouched = slots[0].clone();
        slots[2] = Slot {
            fields: fields("0", "4", "0", "0"),
            multiplier: 5,
        };
        assert_eq!(slots[0], untouched);
        assert_eq!(slots[4], untouched);
        assert_eq!(slots[2].multiplier, 5);
    }
}
