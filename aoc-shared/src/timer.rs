//! Timing helpers

use std::time::{Duration, Instant};

/// Run `task` and return its output together with how long it took.
pub fn time_task<T>(task: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let output = task();
    (output, start.elapsed())
}

/// Human-readable duration.
///
/// Below one minute the duration is shown in a single unit: `µs`, `ms` or
/// `s` (the latter two with two decimals). From one minute upwards it is
/// split into whole hours, minutes and seconds followed by the sub-second
/// remainder in the largest fitting unit, e.g. `1h2m3s40ms`. Minutes are
/// always shown once there are hours; zero seconds are left out, so one hour
/// reads `1h0m` and one minute `1m`.
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(60) {
        let micros = duration.as_micros();
        return if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        };
    }

    let total_secs = duration.as_secs();
    let (hours, minutes, seconds) = (total_secs / 3600, total_secs / 60 % 60, total_secs % 60);
    let sub_second = duration - Duration::from_secs(total_secs);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }

    if sub_second >= Duration::from_millis(1) {
        out.push_str(&format!("{}ms", sub_second.as_millis()));
    } else if sub_second >= Duration::from_micros(1) {
        out.push_str(&format!("{}µs", sub_second.as_micros()));
    } else if !sub_second.is_zero() {
        out.push_str(&format!("{}ns", sub_second.as_nanos()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_durations() {
        assert_eq!(format_duration(Duration::ZERO), "0µs");
        assert_eq!(format_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(2_346)), "2.35s");
    }

    #[test]
    fn test_long_durations() {
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h0m");
        assert_eq!(format_duration(Duration::from_secs(3_605)), "1h0m5s");
        assert_eq!(
            format_duration(Duration::from_secs(3_723) + Duration::from_millis(40)),
            "1h2m3s40ms"
        );
        assert_eq!(
            format_duration(Duration::from_secs(61) + Duration::from_micros(7)),
            "1m1s7µs"
        );
        assert_eq!(
            format_duration(Duration::from_secs(61) + Duration::from_nanos(5)),
            "1m1s5ns"
        );
    }

    #[test]
    fn test_zero_seconds_are_omitted_before_sub_second() {
        assert_eq!(
            format_duration(Duration::from_secs(60) + Duration::from_millis(5)),
            "1m5ms"
        );
        assert_eq!(
            format_duration(Duration::from_secs(7_200) + Duration::from_micros(3)),
            "2h0m3µs"
        );
    }

    #[test]
    fn test_time_task_returns_output() {
        let (value, elapsed) = time_task(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(60));
    }
}
