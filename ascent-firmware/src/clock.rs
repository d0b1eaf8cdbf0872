//! Shared wall clock
//!
//! The RTC is read by the tick task and by the controller, so it lives in a
//! blocking mutex and each read is a short critical section.

use core::cell::RefCell;

use ascent_core::display::clock::{LocalTime, Weekday};
use ascent_core::traits::WallClock;
use ascent_hal_rp2040::rtc::RtcClock;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

static RTC: Mutex<CriticalSectionRawMutex, RefCell<Option<RtcClock<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Time the RTC starts from after a cold boot
pub const FALLBACK_TIME: LocalTime = LocalTime {
    year: 2024,
    month: 1,
    day: 1,
    weekday: Weekday::Monday,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Hand the RTC over to the shared clock
pub fn install(clock: RtcClock<'static>) {
    RTC.lock(|rtc| *rtc.borrow_mut() = Some(clock));
}

/// Handle to the shared RTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedClock;

impl WallClock for SharedClock {
    fn now(&mut self) -> Option<LocalTime> {
        RTC.lock(|rtc| rtc.borrow_mut().as_mut().and_then(|clock| clock.now()))
    }
}
