const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Renders a span of seconds as `Nd Nh Nm Ns`, dropping leading zero units.
pub fn format_duration(secs: u64) -> String {
    let units = [
        (secs / DAY, 'd'),
        (secs % DAY / HOUR, 'h'),
        (secs % HOUR / MINUTE, 'm'),
        (secs % MINUTE, 's'),
    ];
    let parts: Vec<String> = units
        .iter()
        .skip_while(|(value, unit)| *value == 0 && *unit != 's')
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    parts.join(" ")
}
