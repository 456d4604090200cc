//! Desktop simulator for the wristlink companion-sync client.
//!
//! Runs [`CompanionApp`] against a scripted host on a virtual clock: the
//! session appears, the host pushes a status snapshot and refresh cadences,
//! the timers fire and request updates, the link drops and recovers, and the
//! user pokes the buttons along the way. Every display mutation is logged,
//! and the watch face is printed whenever it changes.
//!
//! Run with `RUST_LOG=debug` to also see dropped commands and timer noise.

use std::collections::VecDeque;
use std::fmt::Write as _;

use embassy_time::Duration;
use log::info;

use wristlink_core::app::CompanionApp;
use wristlink_core::channel::{ChannelError, MessageChannel};
use wristlink_core::clock::{Month, WallTime, Weekday};
use wristlink_core::config::AppConfig;
use wristlink_core::display::{DisplaySurface, Panel, Region, TextSlot, WeatherIcon};
use wristlink_core::haptics::Haptics;
use wristlink_core::protocol::keys::wire;
use wristlink_core::protocol::{Message, MessageWriter};
use wristlink_core::timers::{TimerService, TimerSlot};

/// Total scripted session length.
const SESSION_SECS: u64 = 480;

/// Refresh cadences the scripted host hands out, per topic.
const WEATHER_INTERVAL_SECS: i32 = 120;
const CALENDAR_INTERVAL_SECS: i32 = 90;
const MUSIC_INTERVAL_SECS: i32 = 60;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Loopback transport: committed frames land in an outbox the main loop
/// drains into the scripted host.
struct LoopbackChannel {
    outbox: VecDeque<Vec<u8>>,
}

impl LoopbackChannel {
    fn new() -> Self {
        Self {
            outbox: VecDeque::new(),
        }
    }

    fn drain_outbound(&mut self) -> Vec<Vec<u8>> {
        self.outbox.drain(..).collect()
    }
}

impl MessageChannel for LoopbackChannel {
    fn begin(&mut self) -> Result<MessageWriter, ChannelError> {
        Ok(MessageWriter::new())
    }

    fn commit(&mut self, msg: MessageWriter) -> Result<(), ChannelError> {
        self.outbox.push_back(msg.as_bytes().to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// Single-shot timers keyed to the virtual clock.
struct VirtualTimers {
    now_ms: u64,
    next_id: u64,
    armed: Vec<(u64, TimerSlot, u64)>,
}

impl VirtualTimers {
    fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            armed: Vec::new(),
        }
    }

    /// Advances the clock and returns the slots whose deadlines passed, in
    /// deadline order.
    fn advance_to(&mut self, now_ms: u64) -> Vec<TimerSlot> {
        self.now_ms = now_ms;
        let mut due: Vec<(u64, TimerSlot)> = self
            .armed
            .iter()
            .filter(|&&(_, _, deadline)| deadline <= now_ms)
            .map(|&(_, slot, deadline)| (deadline, slot))
            .collect();
        self.armed.retain(|&(_, _, deadline)| deadline > now_ms);
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, slot)| slot).collect()
    }
}

impl TimerService for VirtualTimers {
    type Handle = u64;

    fn schedule(&mut self, slot: TimerSlot, after: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.armed.push((id, slot, self.now_ms + after.as_millis()));
        id
    }

    fn cancel(&mut self, handle: u64) {
        self.armed.retain(|&(id, _, _)| id != handle);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Console watch face: remembers the last value per region and reprints the
/// whole face when anything changes.
struct ConsoleFace {
    texts: [String; 9],
    condition_hidden: bool,
    temperature_hidden: bool,
    icon: WeatherIcon,
    panel: Panel,
    dirty: bool,
}

fn slot_index(slot: TextSlot) -> usize {
    match slot {
        TextSlot::Time => 0,
        TextSlot::Date => 1,
        TextSlot::WeatherCondition => 2,
        TextSlot::WeatherTemperature => 3,
        TextSlot::BatteryPercent => 4,
        TextSlot::CalendarDate => 5,
        TextSlot::CalendarTitle => 6,
        TextSlot::MusicArtist => 7,
        TextSlot::MusicTitle => 8,
    }
}

impl ConsoleFace {
    fn new() -> Self {
        Self {
            texts: Default::default(),
            condition_hidden: false,
            temperature_hidden: true,
            icon: WeatherIcon::Sun,
            panel: Panel::Calendar,
            dirty: false,
        }
    }

    fn text(&self, slot: TextSlot) -> &str {
        &self.texts[slot_index(slot)]
    }

    fn render_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let weather = if self.temperature_hidden {
            self.text(TextSlot::WeatherCondition)
        } else {
            self.text(TextSlot::WeatherTemperature)
        };
        let mut panel_line = String::new();
        match self.panel {
            Panel::Calendar => {
                let _ = write!(
                    panel_line,
                    "{} | {}",
                    self.text(TextSlot::CalendarDate),
                    self.text(TextSlot::CalendarTitle)
                );
            }
            Panel::Music => {
                let _ = write!(
                    panel_line,
                    "{} - {}",
                    self.text(TextSlot::MusicArtist),
                    self.text(TextSlot::MusicTitle)
                );
            }
        }

        info!("+----------------------------+");
        info!(
            "| {:>8}  {:<6} [{:?}]",
            self.text(TextSlot::Time),
            self.text(TextSlot::BatteryPercent),
            self.icon
        );
        info!("| {:<26}", self.text(TextSlot::Date));
        info!("| {:<26}", weather);
        info!("| {:<26}", panel_line);
        info!("+----------------------------+");
    }
}

impl DisplaySurface for ConsoleFace {
    fn set_text(&mut self, slot: TextSlot, text: &str) {
        let cell = &mut self.texts[slot_index(slot)];
        if cell != text {
            cell.clear();
            cell.push_str(text);
            self.dirty = true;
        }
    }

    fn set_hidden(&mut self, region: Region, hidden: bool) {
        let cell = match region {
            Region::WeatherConditionText => &mut self.condition_hidden,
            Region::WeatherTemperatureText => &mut self.temperature_hidden,
        };
        if *cell != hidden {
            *cell = hidden;
            self.dirty = true;
        }
    }

    fn select_weather_icon(&mut self, icon: WeatherIcon) {
        if self.icon != icon {
            self.icon = icon;
            self.dirty = true;
        }
    }

    fn mark_battery_dirty(&mut self) {
        self.dirty = true;
    }

    fn slide_panels(&mut self, outgoing: Panel, incoming: Panel) {
        info!("sliding {outgoing:?} out, {incoming:?} in");
        self.panel = incoming;
        self.dirty = true;
    }
}

/// Haptic output is just a log line on the desktop.
struct LogHaptics;

impl Haptics for LogHaptics {
    fn pulse(&mut self) {
        info!("bzzt");
    }
}

// ---------------------------------------------------------------------------
// Scripted host
// ---------------------------------------------------------------------------

/// Stands in for the phone-side agent: answers screen-enter with a full
/// status snapshot and each refresh request with fresh topic data plus the
/// next cadence.
struct ScriptedHost {
    weather_rev: u32,
    track_rev: u32,
}

impl ScriptedHost {
    fn new() -> Self {
        Self {
            weather_rev: 0,
            track_rev: 0,
        }
    }

    /// Replies to one outbound frame with zero or more inbound frames.
    fn respond(&mut self, frame: &[u8]) -> Vec<Vec<u8>> {
        let Ok(msg) = Message::decode(frame) else {
            return Vec::new();
        };

        let seq = msg
            .find(wire::SEQUENCE_NUMBER)
            .and_then(|v| v.as_i32())
            .unwrap_or(-1);
        let Some(command) = msg.entries().iter().find(|e| e.key != wire::SEQUENCE_NUMBER)
        else {
            info!("host: sequence reset acknowledged");
            return Vec::new();
        };

        info!("host: received command key {} (seq {seq})", command.key);
        match command.key {
            wire::SCREEN_ENTER => vec![self.snapshot()],
            wire::WEATHER_REFRESH => vec![self.weather()],
            wire::CALENDAR_REFRESH => vec![self.calendar()],
            wire::MUSIC_REFRESH => vec![self.music()],
            _ => Vec::new(),
        }
    }

    fn snapshot(&mut self) -> Vec<u8> {
        let mut msg = MessageWriter::new();
        self.write_weather(&mut msg);
        self.write_calendar(&mut msg);
        self.write_music(&mut msg);
        msg.as_bytes().to_vec()
    }

    fn weather(&mut self) -> Vec<u8> {
        let mut msg = MessageWriter::new();
        self.write_weather(&mut msg);
        msg.as_bytes().to_vec()
    }

    fn calendar(&mut self) -> Vec<u8> {
        let mut msg = MessageWriter::new();
        self.write_calendar(&mut msg);
        msg.as_bytes().to_vec()
    }

    fn music(&mut self) -> Vec<u8> {
        let mut msg = MessageWriter::new();
        self.write_music(&mut msg);
        msg.as_bytes().to_vec()
    }

    fn write_weather(&mut self, msg: &mut MessageWriter) {
        const CONDITIONS: [(&str, &str, u8); 3] = [
            ("Partly Cloudy", "72°", 3),
            ("Light Rain", "68°", 1),
            ("Clear", "75°", 0),
        ];
        let (condition, temperature, icon) = CONDITIONS[self.weather_rev as usize % 3];
        self.weather_rev += 1;

        let _ = msg.write_str(wire::WEATHER_CONDITION, condition);
        let _ = msg.write_str(wire::WEATHER_TEMPERATURE, temperature);
        let _ = msg.write_uint8(wire::WEATHER_ICON, icon);
        let _ = msg.write_int32(wire::WEATHER_REFRESH, WEATHER_INTERVAL_SECS);
    }

    fn write_calendar(&mut self, msg: &mut MessageWriter) {
        let _ = msg.write_str(wire::CALENDAR_DATE, "Today 15:00");
        let _ = msg.write_str(wire::CALENDAR_TITLE, "Design review");
        let _ = msg.write_int32(wire::CALENDAR_REFRESH, CALENDAR_INTERVAL_SECS);
    }

    fn write_music(&mut self, msg: &mut MessageWriter) {
        const TRACKS: [(&str, &str); 2] = [
            ("Daft Punk", "Harder Better Faster"),
            ("Boards of Canada", "Roygbiv"),
        ];
        let (artist, title) = TRACKS[self.track_rev as usize % 2];
        self.track_rev += 1;

        let _ = msg.write_str(wire::MUSIC_ARTIST, artist);
        let _ = msg.write_str(wire::MUSIC_TITLE, title);
        let _ = msg.write_int32(wire::MUSIC_REFRESH, MUSIC_INTERVAL_SECS);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Session clock starting at Sun Aug 24, 09:58.
fn wall_time_at(elapsed_secs: u64) -> WallTime {
    let total_minutes = 9 * 60 + 58 + elapsed_secs / 60;
    WallTime {
        hour: ((total_minutes / 60) % 24) as u8,
        minute: (total_minutes % 60) as u8,
        weekday: Weekday::Sunday,
        month: Month::August,
        day: 24,
    }
}

fn main() {
    env_logger::init();
    info!("starting wristlink simulator ({SESSION_SECS}s scripted session)");

    let mut host = ScriptedHost::new();
    let mut app = CompanionApp::new(
        AppConfig::default(),
        LoopbackChannel::new(),
        ConsoleFace::new(),
        VirtualTimers::new(),
        LogHaptics,
    );

    app.on_minute_tick(wall_time_at(0));
    app.on_battery(82);
    app.on_appear();

    for t in 1..=SESSION_SECS {
        // Scripted user and platform events.
        match t {
            15 => {
                info!("user: select held (peek at condition)");
                app.on_select_pressed();
            }
            18 => {
                info!("user: select released");
                app.on_select_released();
            }
            30 | 45 => {
                info!("user: down (next panel)");
                app.on_down_pressed();
            }
            150 => {
                info!("user: up (manual refresh)");
                app.on_up_pressed();
            }
            200 => {
                info!("platform: link lost");
                app.on_connectivity(false);
            }
            230 => {
                info!("platform: link restored");
                app.on_connectivity(true);
            }
            300 => {
                info!("platform: battery drain");
                app.on_battery(79);
            }
            _ => {}
        }

        if t % 60 == 0 {
            app.on_minute_tick(wall_time_at(t));
        }

        for slot in app.timers_mut().advance_to(t * 1000) {
            app.on_timer_fired(slot);
        }

        // Ferry outbound commands to the host and deliver its replies.
        let outbound = app.channel_mut().drain_outbound();
        for frame in outbound {
            for reply in host.respond(&frame) {
                if let Err(e) = app.handle_message(&reply) {
                    log::error!("host reply rejected: {e}");
                }
            }
        }

        app.display_mut().render_if_dirty();
    }

    app.on_disappear();
    info!("session over");
}
