//! The fixed key sets of the companion protocol.
//!
//! Wire ids must match the host side exactly. The three refresh-request
//! command keys deliberately share ids with the corresponding inbound
//! refresh-interval keys: the host replies to a request on the same key it
//! uses to push the next interval.

/// Raw wire ids, shared by both directions.
pub mod wire {
    pub const SEQUENCE_NUMBER: u32 = 0;
    pub const SCREEN_ENTER: u32 = 1;
    pub const SCREEN_EXIT: u32 = 2;
    pub const WEATHER_CONDITION: u32 = 3;
    pub const WEATHER_TEMPERATURE: u32 = 4;
    pub const WEATHER_ICON: u32 = 5;
    pub const BATTERY_PERCENT: u32 = 6;
    pub const CALENDAR_DATE: u32 = 7;
    pub const CALENDAR_TITLE: u32 = 8;
    pub const MUSIC_ARTIST: u32 = 9;
    pub const MUSIC_TITLE: u32 = 10;
    pub const WEATHER_REFRESH: u32 = 11;
    pub const CALENDAR_REFRESH: u32 = 12;
    pub const MUSIC_REFRESH: u32 = 13;
}

/// Outbound commands the client can send to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKey {
    ScreenEnter,
    ScreenExit,
    RequestWeatherUpdate,
    RequestCalendarUpdate,
    RequestSongUpdate,
    /// Asks the host to resynchronize its sequence tracking. Encoded as a
    /// bare sequence tuple carrying the sentinel, with no command entry.
    ResetSequence,
}

impl CommandKey {
    pub fn wire_key(self) -> u32 {
        match self {
            CommandKey::ScreenEnter => wire::SCREEN_ENTER,
            CommandKey::ScreenExit => wire::SCREEN_EXIT,
            CommandKey::RequestWeatherUpdate => wire::WEATHER_REFRESH,
            CommandKey::RequestCalendarUpdate => wire::CALENDAR_REFRESH,
            CommandKey::RequestSongUpdate => wire::MUSIC_REFRESH,
            CommandKey::ResetSequence => wire::SEQUENCE_NUMBER,
        }
    }
}

/// Inbound update keys the client recognizes. Unknown keys are skipped for
/// forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKey {
    WeatherConditionText,
    WeatherTemperatureText,
    WeatherIconIndex,
    BatteryPercent,
    CalendarDateText,
    CalendarTitleText,
    MusicArtistText,
    MusicTitleText,
    WeatherRefreshInterval,
    CalendarRefreshInterval,
    MusicRefreshInterval,
}

impl UpdateKey {
    pub fn from_wire(key: u32) -> Option<Self> {
        match key {
            wire::WEATHER_CONDITION => Some(UpdateKey::WeatherConditionText),
            wire::WEATHER_TEMPERATURE => Some(UpdateKey::WeatherTemperatureText),
            wire::WEATHER_ICON => Some(UpdateKey::WeatherIconIndex),
            wire::BATTERY_PERCENT => Some(UpdateKey::BatteryPercent),
            wire::CALENDAR_DATE => Some(UpdateKey::CalendarDateText),
            wire::CALENDAR_TITLE => Some(UpdateKey::CalendarTitleText),
            wire::MUSIC_ARTIST => Some(UpdateKey::MusicArtistText),
            wire::MUSIC_TITLE => Some(UpdateKey::MusicTitleText),
            wire::WEATHER_REFRESH => Some(UpdateKey::WeatherRefreshInterval),
            wire::CALENDAR_REFRESH => Some(UpdateKey::CalendarRefreshInterval),
            wire::MUSIC_REFRESH => Some(UpdateKey::MusicRefreshInterval),
            _ => None,
        }
    }

    pub fn wire_key(self) -> u32 {
        match self {
            UpdateKey::WeatherConditionText => wire::WEATHER_CONDITION,
            UpdateKey::WeatherTemperatureText => wire::WEATHER_TEMPERATURE,
            UpdateKey::WeatherIconIndex => wire::WEATHER_ICON,
            UpdateKey::BatteryPercent => wire::BATTERY_PERCENT,
            UpdateKey::CalendarDateText => wire::CALENDAR_DATE,
            UpdateKey::CalendarTitleText => wire::CALENDAR_TITLE,
            UpdateKey::MusicArtistText => wire::MUSIC_ARTIST,
            UpdateKey::MusicTitleText => wire::MUSIC_TITLE,
            UpdateKey::WeatherRefreshInterval => wire::WEATHER_REFRESH,
            UpdateKey::CalendarRefreshInterval => wire::CALENDAR_REFRESH,
            UpdateKey::MusicRefreshInterval => wire::MUSIC_REFRESH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keys_round_trip_through_wire_ids() {
        let keys = [
            UpdateKey::WeatherConditionText,
            UpdateKey::WeatherTemperatureText,
            UpdateKey::WeatherIconIndex,
            UpdateKey::BatteryPercent,
            UpdateKey::CalendarDateText,
            UpdateKey::CalendarTitleText,
            UpdateKey::MusicArtistText,
            UpdateKey::MusicTitleText,
            UpdateKey::WeatherRefreshInterval,
            UpdateKey::CalendarRefreshInterval,
            UpdateKey::MusicRefreshInterval,
        ];
        for key in keys {
            assert_eq!(UpdateKey::from_wire(key.wire_key()), Some(key));
        }
    }

    #[test]
    fn refresh_requests_share_ids_with_interval_updates() {
        assert_eq!(
            CommandKey::RequestWeatherUpdate.wire_key(),
            UpdateKey::WeatherRefreshInterval.wire_key()
        );
        assert_eq!(
            CommandKey::RequestCalendarUpdate.wire_key(),
            UpdateKey::CalendarRefreshInterval.wire_key()
        );
        assert_eq!(
            CommandKey::RequestSongUpdate.wire_key(),
            UpdateKey::MusicRefreshInterval.wire_key()
        );
    }
}
