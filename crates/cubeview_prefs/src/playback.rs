use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Preferences for solution playback and scrambling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlaybackPreferences {
    /// Delay between moves during autoplay, per unit of the speed divider,
    /// in milliseconds.
    pub move_delay_per_divider_ms: u64,
    /// Delay between a move request and the start of its animation, in
    /// milliseconds.
    pub turn_lead_in_ms: u64,
    /// Number of moves in a random scramble.
    pub scramble_length: usize,
    /// Whether floating copies of the back faces are shown.
    pub show_back_sides: bool,
}
impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            move_delay_per_divider_ms: 20,
            turn_lead_in_ms: 0,
            scramble_length: 20,
            show_back_sides: false,
        }
    }
}
impl PlaybackPreferences {
    /// Returns the delay between moves during autoplay for a speed divider.
    pub fn move_delay(&self, divider: u32) -> Duration {
        Duration::from_millis(self.move_delay_per_divider_ms) * divider
    }
    /// Returns the delay between a move request and the start of its
    /// animation.
    pub fn turn_lead_in(&self) -> Duration {
        Duration::from_millis(self.turn_lead_in_ms)
    }
}
