//! Client-side display state.
//!
//! All text lives in fixed-capacity buffers; oversized host strings are
//! silently truncated at a character boundary, never overflowed. Decoded
//! values are copied in here before the inbound buffer is released.

use heapless::String;

use crate::display::Panel;

pub const CONDITION_CAPACITY: usize = 64;
pub const TEMPERATURE_CAPACITY: usize = 8;
pub const TEXT_CAPACITY: usize = 64;
pub const BATTERY_TEXT_CAPACITY: usize = 8;
pub const TIME_TEXT_CAPACITY: usize = 8;
pub const DATE_TEXT_CAPACITY: usize = 16;

/// Which of the two mutually exclusive weather texts is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherDetail {
    Temperature,
    Condition,
}

/// View-visibility flags and carousel position. Single instance, mutated
/// only from the one execution context that owns the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub active_panel: Panel,
    pub weather_detail: WeatherDetail,
    pub connected: bool,
    pub battery_percent: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        // Condition text shows the updating placeholder until the first
        // temperature update arrives.
        Self {
            active_panel: Panel::Calendar,
            weather_detail: WeatherDetail::Condition,
            connected: true,
            battery_percent: 100,
        }
    }
}

/// Owned text buffers backing every display slot.
#[derive(Debug, Default)]
pub struct DisplayBuffers {
    pub condition: String<CONDITION_CAPACITY>,
    pub temperature: String<TEMPERATURE_CAPACITY>,
    pub calendar_date: String<TEXT_CAPACITY>,
    pub calendar_title: String<TEXT_CAPACITY>,
    pub music_artist: String<TEXT_CAPACITY>,
    pub music_title: String<TEXT_CAPACITY>,
    pub battery: String<BATTERY_TEXT_CAPACITY>,
    pub time: String<TIME_TEXT_CAPACITY>,
    pub date: String<DATE_TEXT_CAPACITY>,
}

/// Replaces `dst` with as much of `src` as fits, truncating at a character
/// boundary.
pub fn set_truncated<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    for ch in src.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_text_truncates_silently() {
        let mut buf: String<8> = String::new();
        set_truncated(&mut buf, "this is far too long");
        assert_eq!(buf.as_str(), "this is ");
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        let mut buf: String<5> = String::new();
        set_truncated(&mut buf, "20°C");
        // '°' is two bytes; "20°" fills four of five, 'C' fits exactly.
        assert_eq!(buf.as_str(), "20°C");

        let mut tight: String<4> = String::new();
        set_truncated(&mut tight, "2°°");
        assert_eq!(tight.as_str(), "2°");
    }

    #[test]
    fn replacing_clears_previous_content() {
        let mut buf: String<16> = String::new();
        set_truncated(&mut buf, "Cloudy");
        set_truncated(&mut buf, "Fog");
        assert_eq!(buf.as_str(), "Fog");
    }
}
