use chrono::{DateTime, TimeZone};

/// Day-period buckets for the greeting header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// Bucket an hour of day (0-23): 5-11 morning, 12-16 afternoon,
    /// 17-20 evening, everything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Afternoon,
            17..=20 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DayPart::Morning => "☀️",
            DayPart::Afternoon => "🌤️",
            DayPart::Evening => "🌅",
            DayPart::Night => "🌙",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            DayPart::Morning => "Good morning, Mama",
            DayPart::Afternoon => "Good afternoon, Mama",
            DayPart::Evening => "Good evening, Mama",
            DayPart::Night => "Good night, Mama",
        }
    }
}

/// Format the header clock line, e.g. "7:42 PM • Thursday, Aug 6".
pub fn clock_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} • {}", now.format("%-I:%M %p"), now.format("%A, %b %-d"))
}

/// Format an ounce amount without a trailing ".0" (4.0 -> "4", 3.5 -> "3.5").
pub fn format_oz(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_day_part_buckets() {
        assert_eq!(DayPart::from_hour(5), DayPart::Morning);
        assert_eq!(DayPart::from_hour(11), DayPart::Morning);
        assert_eq!(DayPart::from_hour(12), DayPart::Afternoon);
        assert_eq!(DayPart::from_hour(16), DayPart::Afternoon);
        assert_eq!(DayPart::from_hour(17), DayPart::Evening);
        assert_eq!(DayPart::from_hour(20), DayPart::Evening);
        assert_eq!(DayPart::from_hour(21), DayPart::Night);
        assert_eq!(DayPart::from_hour(0), DayPart::Night);
        assert_eq!(DayPart::from_hour(4), DayPart::Night);
    }

    #[test]
    fn test_clock_line() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 19, 42, 0).unwrap();
        assert_eq!(clock_line(&now), "7:42 PM • Thursday, Aug 6");
    }

    #[test]
    fn test_clock_line_single_digit_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 9, 9, 5, 0).unwrap();
        assert_eq!(clock_line(&now), "9:05 AM • Sunday, Aug 9");
    }

    #[test]
    fn test_format_oz() {
        assert_eq!(format_oz(4.0), "4");
        assert_eq!(format_oz(3.5), "3.5");
        assert_eq!(format_oz(0.5), "0.5");
        assert_eq!(format_oz(20.0), "20");
    }
}
