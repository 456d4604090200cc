//! The companion application: one container owning all client state and the
//! collaborator handles, with one entry point per event source.
//!
//! Every entry point is a plain `&mut self` method; the hosting event loop
//! serializes them, so no two operations ever interleave and no locking is
//! needed. Each method leaves the view-visibility invariants intact before
//! returning.

use embassy_time::Duration;
use log::{debug, info, warn};

use crate::channel::MessageChannel;
use crate::clock::{WallTime, format_date, format_time};
use crate::config::AppConfig;
use crate::display::{DisplaySurface, TextSlot, WeatherIcon, show_weather_detail};
use crate::haptics::Haptics;
use crate::inbound;
use crate::outbound::CommandSender;
use crate::protocol::{CommandKey, DecodeError, Message};
use crate::state::{DisplayBuffers, ViewState, WeatherDetail, set_truncated};
use crate::timers::{TimerScheduler, TimerService, TimerSlot};

/// Companion-synchronization client for one paired host.
pub struct CompanionApp<'a, C, D, T, H>
where
    C: MessageChannel,
    D: DisplaySurface,
    T: TimerService,
    H: Haptics,
{
    config: AppConfig<'a>,
    channel: C,
    display: D,
    timers: T,
    haptics: H,
    sender: CommandSender,
    scheduler: TimerScheduler<T::Handle>,
    view: ViewState,
    buffers: DisplayBuffers,
}

impl<'a, C, D, T, H> CompanionApp<'a, C, D, T, H>
where
    C: MessageChannel,
    D: DisplaySurface,
    T: TimerService,
    H: Haptics,
{
    pub fn new(config: AppConfig<'a>, channel: C, display: D, timers: T, haptics: H) -> Self {
        let mut app = Self {
            config,
            channel,
            display,
            timers,
            haptics,
            sender: CommandSender::new(),
            scheduler: TimerScheduler::new(),
            view: ViewState::default(),
            buffers: DisplayBuffers::default(),
        };
        app.sync_initial_display();
        app
    }

    /// Screen became visible: request a full refresh from the host.
    pub fn on_appear(&mut self) {
        info!("screen appeared, requesting refresh");
        self.sender.send(
            &mut self.channel,
            CommandKey::ScreenEnter,
            Some(self.config.screen_app_id),
        );
    }

    /// Screen became hidden: tell the host and stand the timers down. The
    /// host rearms them in its reply after the next screen-enter.
    pub fn on_disappear(&mut self) {
        info!("screen hidden, cancelling refresh timers");
        self.sender.send(
            &mut self.channel,
            CommandKey::ScreenExit,
            Some(self.config.screen_app_id),
        );
        self.scheduler.cancel_all(&mut self.timers);
    }

    /// One inbound container from the channel. Structural damage fails the
    /// whole decode; everything recognized inside a valid container is
    /// applied independently.
    pub fn handle_message(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let msg = Message::decode(bytes).inspect_err(|e| warn!("dropping inbound message: {e}"))?;
        inbound::dispatch(
            &msg,
            &mut self.view,
            &mut self.buffers,
            &mut self.scheduler,
            &mut self.timers,
            &mut self.display,
        );
        Ok(())
    }

    /// A single-shot timer fired. Topic firings trigger exactly one refresh
    /// request; the slot stays idle until the host supplies a new interval.
    pub fn on_timer_fired(&mut self, slot: TimerSlot) {
        if !self.scheduler.acknowledge_fired(slot) {
            debug!("spurious firing for {slot:?}");
            return;
        }
        match slot {
            TimerSlot::Refresh(topic) => {
                self.sender
                    .send(&mut self.channel, topic.refresh_command(), None);
            }
            TimerSlot::ReconnectSettle => {
                info!("reconnect settled, requesting full refresh");
                self.reset_weather_view();
                self.sender.send(
                    &mut self.channel,
                    CommandKey::ScreenEnter,
                    Some(self.config.screen_app_id),
                );
            }
        }
    }

    /// Hold-to-peek: while the select control is held, condition text
    /// replaces the temperature.
    pub fn on_select_pressed(&mut self) {
        self.view.weather_detail = WeatherDetail::Condition;
        show_weather_detail(&mut self.display, self.view.weather_detail);
    }

    /// Select released: revert to showing the temperature.
    pub fn on_select_released(&mut self) {
        self.view.weather_detail = WeatherDetail::Temperature;
        show_weather_detail(&mut self.display, self.view.weather_detail);
    }

    /// Up button: manual full refresh.
    pub fn on_up_pressed(&mut self) {
        self.reset_weather_view();
        self.sender.send(
            &mut self.channel,
            CommandKey::ScreenEnter,
            Some(self.config.screen_app_id),
        );
    }

    /// Down button: page the carousel to the next panel.
    pub fn on_down_pressed(&mut self) {
        let outgoing = self.view.active_panel;
        let incoming = outgoing.next();
        self.display.slide_panels(outgoing, incoming);
        self.view.active_panel = incoming;
    }

    /// Connectivity transition from the host link. Repeated callbacks with
    /// no state change are ignored so the disconnect alert fires once.
    pub fn on_connectivity(&mut self, connected: bool) {
        if connected == self.view.connected {
            return;
        }
        self.view.connected = connected;

        if connected {
            info!(
                "link restored, settling for {}s",
                self.config.reconnect_settle_secs
            );
            self.scheduler.rearm(
                &mut self.timers,
                TimerSlot::ReconnectSettle,
                Duration::from_secs(self.config.reconnect_settle_secs),
            );
        } else {
            warn!("link lost");
            self.display.select_weather_icon(WeatherIcon::Disconnected);
            self.haptics.pulse();
            self.scheduler.cancel_all(&mut self.timers);
        }
    }

    /// Watch battery snapshot from the platform.
    pub fn on_battery(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.view.battery_percent = percent;
        self.buffers.battery.clear();
        let _ = core::fmt::Write::write_fmt(&mut self.buffers.battery, format_args!("{percent}%"));
        self.display
            .set_text(TextSlot::BatteryPercent, &self.buffers.battery);
        self.display.mark_battery_dirty();
    }

    /// Minute tick: refresh the clock face.
    pub fn on_minute_tick(&mut self, now: WallTime) {
        format_time(&now, self.config.use_24h_clock, &mut self.buffers.time);
        format_date(&now, &mut self.buffers.date);
        self.display.set_text(TextSlot::Time, &self.buffers.time);
        self.display.set_text(TextSlot::Date, &self.buffers.date);
    }

    /// Recovery primitive for host-detected sequence desynchronization.
    /// Never invoked autonomously by this client.
    pub fn request_sequence_reset(&mut self) {
        self.sender.send_sequence_reset(&mut self.channel);
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn buffers(&self) -> &DisplayBuffers {
        &self.buffers
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Transport access for the hosting event loop.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Timer source access for the hosting event loop.
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Shows the updating placeholder in the condition slot until fresh
    /// weather arrives.
    fn reset_weather_view(&mut self) {
        self.view.weather_detail = WeatherDetail::Condition;
        show_weather_detail(&mut self.display, self.view.weather_detail);
        set_truncated(&mut self.buffers.condition, self.config.updating_placeholder);
        self.display
            .set_text(TextSlot::WeatherCondition, &self.buffers.condition);
    }

    fn sync_initial_display(&mut self) {
        self.display.select_weather_icon(WeatherIcon::Sun);
        self.display.set_text(TextSlot::WeatherTemperature, "-°");
        self.display.set_text(TextSlot::BatteryPercent, "-");
        self.reset_weather_view();
    }
}
