use std::time::Duration;

use anyhow::{Result, bail};

use crate::clock::WallClock;
use crate::format::{format_date, format_time};
use crate::offset::{DayPolicy, DurationFields, apply_offset};
use crate::settings::Settings;

/// Headless clock probe: samples the host clock, checks it advances, and
/// prints a known offset so the arithmetic path is exercised end to end.
pub fn run_diagnostics(clock: &dyn WallClock, settings: &Settings) -> Result<()> {
    println!("OffsetClock diagnostics");
    println!("Tick interval (ms): {}", settings.tick_interval_ms);
    println!("Slot count: {}", settings.slot_count);
    println!("Multiplier cap: x{}", settings.multiplier_cap);
    println!(
        "Slot day policy: {}",
        if settings.include_days_in_slots {
            "days included"
        } else {
            "hours and below"
        }
    );

    let first = clock.now();
    std::thread::sleep(Duration::from_millis(25));
    let second = clock.now();
    if second < first {
        bail!("host clock moved backwards between samples");
    }

    println!("Sampled local time: {}", format_time(&second));
    println!("Sampled local date: {}", format_date(&second));

    let probe = DurationFields {
        days: "0".to_string(),
        hours: "1".to_string(),
        minutes: "1".to_string(),
        seconds: "1".to_string(),
    };
    let shifted = apply_offset(second, probe.duration_ms(DayPolicy::IncludeDays));
    println!("Probe offset (+1h 1m 1s): {}", format_time(&shifted));
    Ok(())
}
