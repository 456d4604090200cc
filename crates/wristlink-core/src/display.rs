//! Display surface collaborator.
//!
//! Rendering lives outside this crate; the core only tells the surface what
//! to show. Firmware backs these calls with its layer/bitmap substrate, the
//! simulator with a console renderer, tests with a recording mock.

use crate::state::WeatherDetail;

/// Number of entries in the weather icon table.
pub const WEATHER_ICON_COUNT: usize = 9;

/// Weather iconography, indexed by the host's icon-index updates. The last
/// entry is the local disconnected indicator and is never sent by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Rain,
    Cloud,
    PartlyCloudy,
    Fog,
    Wind,
    Snow,
    Thunder,
    Disconnected,
}

impl WeatherIcon {
    pub const TABLE: [WeatherIcon; WEATHER_ICON_COUNT] = [
        WeatherIcon::Sun,
        WeatherIcon::Rain,
        WeatherIcon::Cloud,
        WeatherIcon::PartlyCloudy,
        WeatherIcon::Fog,
        WeatherIcon::Wind,
        WeatherIcon::Snow,
        WeatherIcon::Thunder,
        WeatherIcon::Disconnected,
    ];

    /// Range-checked table lookup. Out-of-range indices are a malformed-input
    /// condition handled by the caller.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::TABLE.get(index).copied()
    }
}

/// Text regions the core writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    WeatherCondition,
    WeatherTemperature,
    BatteryPercent,
    CalendarDate,
    CalendarTitle,
    MusicArtist,
    MusicTitle,
    Time,
    Date,
}

/// Regions whose visibility the core toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    WeatherConditionText,
    WeatherTemperatureText,
}

/// The two carousel panels, in paging order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Calendar,
    Music,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Calendar => Panel::Music,
            Panel::Music => Panel::Calendar,
        }
    }
}

/// Opaque rendering substrate driven by the UI state controller.
pub trait DisplaySurface {
    fn set_text(&mut self, slot: TextSlot, text: &str);
    fn set_hidden(&mut self, region: Region, hidden: bool);
    fn select_weather_icon(&mut self, icon: WeatherIcon);
    /// Marks the battery gauge region for redraw.
    fn mark_battery_dirty(&mut self);
    /// Slides `outgoing` out one edge while `incoming` slides in the
    /// opposite edge. Pure animation; no state beyond the two panels.
    fn slide_panels(&mut self, outgoing: Panel, incoming: Panel);
}

/// Applies the weather detail visibility invariant: exactly one of the
/// temperature and condition views is visible.
pub fn show_weather_detail<D: DisplaySurface>(display: &mut D, detail: WeatherDetail) {
    let show_temperature = detail == WeatherDetail::Temperature;
    display.set_hidden(Region::WeatherTemperatureText, !show_temperature);
    display.set_hidden(Region::WeatherConditionText, show_temperature);
}
