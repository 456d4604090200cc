//! Per-topic refresh scheduling.
//!
//! Each topic owns at most one live single-shot timer handle. Rearming a slot
//! always cancels the previous handle first, so two timers for the same topic
//! can never coexist and double-fire. A fired slot stays idle until the host
//! supplies a new interval (normally in its reply to the refresh request the
//! firing triggered).

use embassy_time::Duration;

use crate::protocol::CommandKey;

/// The three independently scheduled update domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Weather,
    Calendar,
    Music,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Weather, Topic::Calendar, Topic::Music];

    /// The refresh request this topic's timer sends when it fires.
    pub fn refresh_command(self) -> CommandKey {
        match self {
            Topic::Weather => CommandKey::RequestWeatherUpdate,
            Topic::Calendar => CommandKey::RequestCalendarUpdate,
            Topic::Music => CommandKey::RequestSongUpdate,
        }
    }
}

/// Single-shot timer slots the scheduler manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    /// Host-cadenced refresh for one topic.
    Refresh(Topic),
    /// Post-reconnect settle delay before requesting a full refresh.
    ReconnectSettle,
}

/// Single-shot timer source provided by the hosting environment. Firings
/// come back through the event loop as
/// [`CompanionApp::on_timer_fired`](crate::app::CompanionApp::on_timer_fired).
pub trait TimerService {
    type Handle;

    fn schedule(&mut self, slot: TimerSlot, after: Duration) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Owned-optional handle arena, one slot per timer.
#[derive(Debug)]
pub struct TimerScheduler<H> {
    weather: Option<H>,
    calendar: Option<H>,
    music: Option<H>,
    settle: Option<H>,
}

impl<H> TimerScheduler<H> {
    pub fn new() -> Self {
        Self {
            weather: None,
            calendar: None,
            music: None,
            settle: None,
        }
    }

    fn cell(&mut self, slot: TimerSlot) -> &mut Option<H> {
        match slot {
            TimerSlot::Refresh(Topic::Weather) => &mut self.weather,
            TimerSlot::Refresh(Topic::Calendar) => &mut self.calendar,
            TimerSlot::Refresh(Topic::Music) => &mut self.music,
            TimerSlot::ReconnectSettle => &mut self.settle,
        }
    }

    /// Cancel-then-schedule. Leaves exactly one live handle in the slot.
    pub fn rearm<T>(&mut self, timers: &mut T, slot: TimerSlot, after: Duration)
    where
        T: TimerService<Handle = H>,
    {
        if let Some(old) = self.cell(slot).take() {
            timers.cancel(old);
        }
        let handle = timers.schedule(slot, after);
        *self.cell(slot) = Some(handle);
    }

    /// Consumes the slot's handle on firing. Returns `false` for a spurious
    /// firing of a slot that was not armed (e.g. cancelled in the meantime).
    pub fn acknowledge_fired(&mut self, slot: TimerSlot) -> bool {
        self.cell(slot).take().is_some()
    }

    /// Cancels the three topic refresh slots.
    pub fn cancel_topics<T>(&mut self, timers: &mut T)
    where
        T: TimerService<Handle = H>,
    {
        for topic in Topic::ALL {
            if let Some(handle) = self.cell(TimerSlot::Refresh(topic)).take() {
                timers.cancel(handle);
            }
        }
    }

    /// Cancels every armed slot, settle delay included.
    pub fn cancel_all<T>(&mut self, timers: &mut T)
    where
        T: TimerService<Handle = H>,
    {
        self.cancel_topics(timers);
        if let Some(handle) = self.settle.take() {
            timers.cancel(handle);
        }
    }

    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        match slot {
            TimerSlot::Refresh(Topic::Weather) => self.weather.is_some(),
            TimerSlot::Refresh(Topic::Calendar) => self.calendar.is_some(),
            TimerSlot::Refresh(Topic::Music) => self.music.is_some(),
            TimerSlot::ReconnectSettle => self.settle.is_some(),
        }
    }
}

impl<H> Default for TimerScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}
