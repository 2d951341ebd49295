/// "MM:SS", or "HH:MM:SS" once an hour has passed.
pub fn clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

/// Whole minutes as "Xh Ym", or "Ym" under an hour.
pub fn minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).floor() as u64;
    let (hours, mins) = (total / 60, total % 60);
    if hours > 0 { format!("{hours}h {mins}m") } else { format!("{mins}m") }
}

pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn percent(value: f64) -> String {
    if value.fract() == 0.0 { format!("{value:.0}%") } else { format!("{value:.1}%") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_switches_to_hours() {
        assert_eq!(clock(0), "00:00");
        assert_eq!(clock(900), "15:00");
        assert_eq!(clock(59), "00:59");
        assert_eq!(clock(3599), "59:59");
        assert_eq!(clock(3600), "01:00:00");
        assert_eq!(clock(3 * 3600 + 61), "03:01:01");
    }

    #[test]
    fn player_minutes() {
        assert_eq!(minutes(0.5), "0m");
        assert_eq!(minutes(59.99), "59m");
        assert_eq!(minutes(61.0), "1h 1m");
        assert_eq!(minutes(150.0), "2h 30m");
    }

    #[test]
    fn money_and_percent() {
        assert_eq!(money(100.0), "100.00");
        assert_eq!(money(-12.5), "-12.50");
        assert_eq!(percent(50.0), "50%");
        assert_eq!(percent(12.5), "12.5%");
    }
}
