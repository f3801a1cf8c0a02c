/// Real-time seconds per game tick.
pub const SECONDS_PER_TICK: f64 = 0.6;

/// Converts a tick count (fractional for averages) into a MM:SS.ss display
/// string, e.g. 139.0 ticks -> "01:23.40".
pub fn ticks_to_time_display(ticks: f64) -> String {
    let total_seconds = ticks * SECONDS_PER_TICK;
    format!("{:02}:{:05.2}", (total_seconds / 60.0) as u32, total_seconds % 60.0)
}
