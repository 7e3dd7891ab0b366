//! Duration formatting for log fields.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render `secs` as its two most significant units, e.g. `3d 0h` or `2m 5s`.
pub fn format_duration(secs: u64) -> String {
    let Some(lead) = UNITS.iter().position(|(size, _)| secs >= *size) else {
        return "0s".to_string();
    };
    let (major, major_unit) = UNITS[lead];
    match UNITS.get(lead + 1) {
        Some(&(minor, minor_unit)) => format!(
            "{}{major_unit} {}{minor_unit}",
            secs / major,
            (secs % major) / minor
        ),
        None => format!("{secs}{major_unit}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7_260), "2h 1m");
        assert_eq!(format_duration(3 * 24 * 3600), "3d 0h");
    }
}
