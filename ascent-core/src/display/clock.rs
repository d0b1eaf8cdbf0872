//! Local time and the time/date label text

use core::fmt::Write;

use heapless::String;

use crate::config::DateFormat;

/// Text of the time label ("HH:MM")
pub type TimeText = String<8>;

/// Text of the date label ("Wed May 30")
pub type DateText = String<12>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Day from a 0-based index starting at Sunday
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Weekday::Sunday),
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            _ => None,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Broken-down local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub weekday: Weekday,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl LocalTime {
    pub fn month_abbreviation(&self) -> &'static str {
        MONTHS
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("???")
    }
}

/// Format the time label, 24 h ("14:05") or zero-padded 12 h ("02:05")
pub fn format_time(time: &LocalTime, use_24h: bool) -> TimeText {
    let hour = if use_24h {
        time.hour
    } else {
        match time.hour % 12 {
            0 => 12,
            h => h,
        }
    };

    let mut text = TimeText::new();
    // Two two-digit fields always fit
    let _ = write!(text, "{:02}:{:02}", hour % 100, time.minute % 100);
    text
}

/// Format the date label as "Wed May 30" or "Wed 30 May"
pub fn format_date(time: &LocalTime, format: DateFormat) -> DateText {
    let weekday = time.weekday.abbreviation();
    let month = time.month_abbreviation();
    let day = time.day % 100;

    let mut text = DateText::new();
    // Longest output is ten bytes
    let _ = match format {
        DateFormat::American => write!(text, "{} {} {:02}", weekday, month, day),
        DateFormat::International => write!(text, "{} {:02} {}", weekday, day, month),
    };
    text
}
