//! Recording mock collaborators shared by the unit tests.

use embassy_time::Duration;
use heapless::{String, Vec};

use crate::channel::{ChannelError, MessageChannel};
use crate::display::{DisplaySurface, Panel, Region, TextSlot, WeatherIcon};
use crate::haptics::Haptics;
use crate::protocol::MessageWriter;
use crate::protocol::codec::OUTBOUND_CAPACITY;
use crate::timers::{TimerService, TimerSlot};

/// Transport mock: captures committed frames, optionally refuses
/// transactions.
pub(crate) struct MockChannel {
    pub sent: Vec<Vec<u8, OUTBOUND_CAPACITY>, 16>,
    pub busy: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            busy: false,
        }
    }
}

impl MessageChannel for MockChannel {
    fn begin(&mut self) -> Result<MessageWriter, ChannelError> {
        if self.busy {
            Err(ChannelError::Busy)
        } else {
            Ok(MessageWriter::new())
        }
    }

    fn commit(&mut self, msg: MessageWriter) -> Result<(), ChannelError> {
        let frame = Vec::from_slice(msg.as_bytes()).map_err(|_| ChannelError::Rejected)?;
        self.sent.push(frame).map_err(|_| ChannelError::Rejected)
    }
}

/// Timer mock: hands out numbered handles and records schedule/cancel calls.
pub(crate) struct MockTimerService {
    next_id: u32,
    pub scheduled: Vec<(u32, TimerSlot, Duration), 32>,
    pub cancelled: Vec<u32, 32>,
}

impl MockTimerService {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            scheduled: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    /// Handles scheduled and not yet cancelled.
    pub fn live_count(&self) -> usize {
        self.scheduled
            .iter()
            .filter(|(id, _, _)| !self.cancelled.contains(id))
            .count()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled.len()
    }

    pub fn last_scheduled(&self) -> Option<(TimerSlot, Duration)> {
        self.scheduled.last().map(|&(_, slot, after)| (slot, after))
    }
}

impl TimerService for MockTimerService {
    type Handle = u32;

    fn schedule(&mut self, slot: TimerSlot, after: Duration) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let _ = self.scheduled.push((id, slot, after));
        id
    }

    fn cancel(&mut self, handle: u32) {
        let _ = self.cancelled.push(handle);
    }
}

/// Display mock: keeps the last text per slot plus visibility and icon
/// state, so tests can assert on what the user would see.
pub(crate) struct MockDisplay {
    pub condition: String<64>,
    pub temperature: String<64>,
    pub battery: String<64>,
    pub calendar_date: String<64>,
    pub calendar_title: String<64>,
    pub music_artist: String<64>,
    pub music_title: String<64>,
    pub time: String<64>,
    pub date: String<64>,
    pub condition_hidden: bool,
    pub temperature_hidden: bool,
    pub visibility_changes: u32,
    pub icon: Option<WeatherIcon>,
    pub battery_dirty_marks: u32,
    pub slides: Vec<(Panel, Panel), 8>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            condition: String::new(),
            temperature: String::new(),
            battery: String::new(),
            calendar_date: String::new(),
            calendar_title: String::new(),
            music_artist: String::new(),
            music_title: String::new(),
            time: String::new(),
            date: String::new(),
            condition_hidden: false,
            temperature_hidden: true,
            visibility_changes: 0,
            icon: None,
            battery_dirty_marks: 0,
            slides: Vec::new(),
        }
    }

    fn slot_buffer(&mut self, slot: TextSlot) -> &mut String<64> {
        match slot {
            TextSlot::WeatherCondition => &mut self.condition,
            TextSlot::WeatherTemperature => &mut self.temperature,
            TextSlot::BatteryPercent => &mut self.battery,
            TextSlot::CalendarDate => &mut self.calendar_date,
            TextSlot::CalendarTitle => &mut self.calendar_title,
            TextSlot::MusicArtist => &mut self.music_artist,
            TextSlot::MusicTitle => &mut self.music_title,
            TextSlot::Time => &mut self.time,
            TextSlot::Date => &mut self.date,
        }
    }
}

impl DisplaySurface for MockDisplay {
    fn set_text(&mut self, slot: TextSlot, text: &str) {
        let buffer = self.slot_buffer(slot);
        buffer.clear();
        let _ = buffer.push_str(text);
    }

    fn set_hidden(&mut self, region: Region, hidden: bool) {
        match region {
            Region::WeatherConditionText => self.condition_hidden = hidden,
            Region::WeatherTemperatureText => self.temperature_hidden = hidden,
        }
        self.visibility_changes += 1;
    }

    fn select_weather_icon(&mut self, icon: WeatherIcon) {
        self.icon = Some(icon);
    }

    fn mark_battery_dirty(&mut self) {
        self.battery_dirty_marks += 1;
    }

    fn slide_panels(&mut self, outgoing: Panel, incoming: Panel) {
        let _ = self.slides.push((outgoing, incoming));
    }
}

/// Haptic mock: counts pulses.
pub(crate) struct MockHaptics {
    pub pulses: u32,
}

impl MockHaptics {
    pub fn new() -> Self {
        Self { pulses: 0 }
    }
}

impl Haptics for MockHaptics {
    fn pulse(&mut self) {
        self.pulses += 1;
    }
}
