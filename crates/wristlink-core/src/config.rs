//! Tunable application constants.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct AppConfig<'a> {
    /// Placeholder shown in the condition slot while waiting for host data.
    pub updating_placeholder: &'a str,
    /// Delay between a reconnect event and the full-refresh request, so the
    /// transport can settle first.
    pub reconnect_settle_secs: u64,
    /// Screen identifier sent with screen-enter/screen-exit commands.
    pub screen_app_id: i8,
    /// 24-hour clock face when true, 12-hour with stripped leading zero
    /// otherwise.
    pub use_24h_clock: bool,
}

impl Default for AppConfig<'static> {
    fn default() -> Self {
        Self {
            updating_placeholder: "Updating...",
            reconnect_settle_secs: 5,
            screen_app_id: 1,
            use_24h_clock: true,
        }
    }
}
