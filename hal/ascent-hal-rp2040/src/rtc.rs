//! RTC wall clock
//!
//! The RP2040 RTC loses its time on reset; until it is set, reads return
//! `None` and the face leaves its time and date labels alone.

use ascent_core::display::clock::{LocalTime, Weekday};
use ascent_core::traits::WallClock;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc, RtcError};
use embassy_rp::Peri;

pub struct RtcClock<'d> {
    rtc: Rtc<'d, RTC>,
}

impl<'d> RtcClock<'d> {
    pub fn new(rtc: Peri<'d, RTC>) -> Self {
        Self { rtc: Rtc::new(rtc) }
    }

    pub fn is_running(&self) -> bool {
        self.rtc.is_running()
    }

    /// Set the clock, starting it if needed
    pub fn set(&mut self, time: &LocalTime) -> Result<(), RtcError> {
        self.rtc.set_datetime(to_datetime(time))
    }
}

impl<'d> WallClock for RtcClock<'d> {
    fn now(&mut self) -> Option<LocalTime> {
        self.rtc.now().ok().map(|dt| to_local_time(&dt))
    }
}

pub fn to_local_time(dt: &DateTime) -> LocalTime {
    LocalTime {
        year: dt.year,
        month: dt.month,
        day: dt.day,
        weekday: weekday(dt.day_of_week),
        hour: dt.hour,
        minute: dt.minute,
        second: dt.second,
    }
}

pub fn to_datetime(time: &LocalTime) -> DateTime {
    DateTime {
        year: time.year,
        month: time.month,
        day: time.day,
        day_of_week: day_of_week(time.weekday),
        hour: time.hour,
        minute: time.minute,
        second: time.second,
    }
}

fn weekday(day: DayOfWeek) -> Weekday {
    match day {
        DayOfWeek::Sunday => Weekday::Sunday,
        DayOfWeek::Monday => Weekday::Monday,
        DayOfWeek::Tuesday => Weekday::Tuesday,
        DayOfWeek::Wednesday => Weekday::Wednesday,
        DayOfWeek::Thursday => Weekday::Thursday,
        DayOfWeek::Friday => Weekday::Friday,
        DayOfWeek::Saturday => Weekday::Saturday,
    }
}

fn day_of_week(day: Weekday) -> DayOfWeek {
    match day {
        Weekday::Sunday => DayOfWeek::Sunday,
        Weekday::Monday => DayOfWeek::Monday,
        Weekday::Tuesday => DayOfWeek::Tuesday,
        Weekday::Wednesday => DayOfWeek::Wednesday,
        Weekday::Thursday => DayOfWeek::Thursday,
        Weekday::Friday => DayOfWeek::Friday,
        Weekday::Saturday => DayOfWeek::Saturday,
    }
}
