//! Inbound update dispatch.
//!
//! Applies a decoded host message to client state, one independent effect
//! per recognized key. A message may carry any subset of the update keys;
//! empty, partial, and maximal messages take the same path. Malformed
//! individual values are skipped (clamped or truncated where a safe default
//! exists) without disturbing the rest of the message.

use core::fmt::Write;

use embassy_time::Duration;
use log::{debug, warn};

use crate::display::{DisplaySurface, TextSlot, WeatherIcon, show_weather_detail};
use crate::protocol::{Message, UpdateKey, Value};
use crate::state::{DisplayBuffers, ViewState, WeatherDetail, set_truncated};
use crate::timers::{TimerScheduler, TimerService, TimerSlot, Topic};

/// Applies every recognized key in `msg`. Unknown keys are ignored for
/// forward compatibility.
pub fn dispatch<D, T>(
    msg: &Message<'_>,
    view: &mut ViewState,
    buffers: &mut DisplayBuffers,
    scheduler: &mut TimerScheduler<T::Handle>,
    timers: &mut T,
    display: &mut D,
) where
    D: DisplaySurface,
    T: TimerService,
{
    for entry in msg.entries() {
        let Some(key) = UpdateKey::from_wire(entry.key) else {
            debug!("ignoring unknown inbound key {}", entry.key);
            continue;
        };
        apply(key, &entry.value, view, buffers, scheduler, timers, display);
    }
}

fn apply<D, T>(
    key: UpdateKey,
    value: &Value<'_>,
    view: &mut ViewState,
    buffers: &mut DisplayBuffers,
    scheduler: &mut TimerScheduler<T::Handle>,
    timers: &mut T,
    display: &mut D,
) where
    D: DisplaySurface,
    T: TimerService,
{
    match key {
        UpdateKey::WeatherConditionText => {
            // Visibility is gated by temperature arrival, not by this key.
            let Some(text) = value.text() else {
                return skip(key);
            };
            set_truncated(&mut buffers.condition, text);
            display.set_text(TextSlot::WeatherCondition, &buffers.condition);
        }
        UpdateKey::WeatherTemperatureText => {
            let Some(text) = value.text() else {
                return skip(key);
            };
            set_truncated(&mut buffers.temperature, text);
            display.set_text(TextSlot::WeatherTemperature, &buffers.temperature);
            view.weather_detail = WeatherDetail::Temperature;
            show_weather_detail(display, view.weather_detail);
        }
        UpdateKey::WeatherIconIndex => {
            let Some(index) = value.as_u8() else {
                return skip(key);
            };
            match WeatherIcon::from_index(index as usize) {
                Some(icon) => display.select_weather_icon(icon),
                // Out of range: the displayed icon stays as it is.
                None => warn!("weather icon index {index} out of range"),
            }
        }
        UpdateKey::BatteryPercent => {
            let Some(percent) = value.as_u8() else {
                return skip(key);
            };
            let percent = percent.min(100);
            view.battery_percent = percent;
            buffers.battery.clear();
            let _ = write!(buffers.battery, "{percent}%");
            display.set_text(TextSlot::BatteryPercent, &buffers.battery);
            display.mark_battery_dirty();
        }
        UpdateKey::CalendarDateText => {
            copy_text(key, value, &mut buffers.calendar_date, TextSlot::CalendarDate, display)
        }
        UpdateKey::CalendarTitleText => copy_text(
            key,
            value,
            &mut buffers.calendar_title,
            TextSlot::CalendarTitle,
            display,
        ),
        UpdateKey::MusicArtistText => {
            copy_text(key, value, &mut buffers.music_artist, TextSlot::MusicArtist, display)
        }
        UpdateKey::MusicTitleText => {
            copy_text(key, value, &mut buffers.music_title, TextSlot::MusicTitle, display)
        }
        UpdateKey::WeatherRefreshInterval => {
            rearm_topic(key, value, Topic::Weather, scheduler, timers)
        }
        UpdateKey::CalendarRefreshInterval => {
            rearm_topic(key, value, Topic::Calendar, scheduler, timers)
        }
        UpdateKey::MusicRefreshInterval => rearm_topic(key, value, Topic::Music, scheduler, timers),
    }
}

fn copy_text<D: DisplaySurface, const N: usize>(
    key: UpdateKey,
    value: &Value<'_>,
    buffer: &mut heapless::String<N>,
    slot: TextSlot,
    display: &mut D,
) {
    let Some(text) = value.text() else {
        return skip(key);
    };
    set_truncated(buffer, text);
    display.set_text(slot, buffer);
}

fn rearm_topic<T: TimerService>(
    key: UpdateKey,
    value: &Value<'_>,
    topic: Topic,
    scheduler: &mut TimerScheduler<T::Handle>,
    timers: &mut T,
) {
    let Some(secs) = value.as_i32() else {
        return skip(key);
    };
    if secs <= 0 {
        warn!("non-positive refresh interval {secs} for {topic:?}, slot untouched");
        return;
    }
    scheduler.rearm(
        timers,
        TimerSlot::Refresh(topic),
        Duration::from_secs(secs as u64),
    );
}

fn skip(key: UpdateKey) {
    warn!("skipping malformed value for {key:?}");
}
