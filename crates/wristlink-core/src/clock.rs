//! Wall-clock text for the watch face.
//!
//! The hosting environment delivers a minute tick with the current wall
//! time; this module formats it into the time and date buffers. There is no
//! RTC in this core.

use core::fmt::Write;

use heapless::String;

use crate::state::{DATE_TEXT_CAPACITY, TIME_TEXT_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn abbrev(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn abbrev(self) -> &'static str {
        match self {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }
}

/// A wall-clock instant as delivered by the minute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub weekday: Weekday,
    pub month: Month,
    pub day: u8,
}

/// `"HH:MM"` in 24-hour style, `"H:MM"` with the leading zero stripped in
/// 12-hour style.
pub fn format_time(time: &WallTime, use_24h: bool, out: &mut String<TIME_TEXT_CAPACITY>) {
    out.clear();
    if use_24h {
        let _ = write!(out, "{:02}:{:02}", time.hour, time.minute);
    } else {
        let hour12 = match time.hour % 12 {
            0 => 12,
            h => h,
        };
        let _ = write!(out, "{}:{:02}", hour12, time.minute);
    }
}

/// `"Ddd, Mmm D"`, e.g. `"Sun, Aug 24"`.
pub fn format_date(time: &WallTime, out: &mut String<DATE_TEXT_CAPACITY>) {
    out.clear();
    let _ = write!(
        out,
        "{}, {} {}",
        time.weekday.abbrev(),
        time.month.abbrev(),
        time.day
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hour: u8, minute: u8) -> WallTime {
        WallTime {
            hour,
            minute,
            weekday: Weekday::Sunday,
            month: Month::August,
            day: 24,
        }
    }

    #[test]
    fn twenty_four_hour_style_keeps_the_leading_zero() {
        let mut out = String::new();
        format_time(&sample(9, 5), true, &mut out);
        assert_eq!(out.as_str(), "09:05");
    }

    #[test]
    fn twelve_hour_style_strips_the_leading_zero() {
        let mut out = String::new();
        format_time(&sample(9, 5), false, &mut out);
        assert_eq!(out.as_str(), "9:05");
    }

    #[test]
    fn midnight_and_noon_render_as_twelve() {
        let mut out = String::new();
        format_time(&sample(0, 30), false, &mut out);
        assert_eq!(out.as_str(), "12:30");
        format_time(&sample(12, 0), false, &mut out);
        assert_eq!(out.as_str(), "12:00");
    }

    #[test]
    fn afternoon_wraps_in_twelve_hour_style() {
        let mut out = String::new();
        format_time(&sample(17, 45), false, &mut out);
        assert_eq!(out.as_str(), "5:45");
        format_time(&sample(17, 45), true, &mut out);
        assert_eq!(out.as_str(), "17:45");
    }

    #[test]
    fn date_renders_abbreviated() {
        let mut out = String::new();
        format_date(&sample(12, 0), &mut out);
        assert_eq!(out.as_str(), "Sun, Aug 24");
    }
}
