use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

/// Valid values of the speed slider.
pub const SPEED_RANGE: RangeInclusive<u32> = 1..=99;

/// Preferences for turn animations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Speed slider value in [`SPEED_RANGE`]. Higher is faster.
    pub speed: u32,
    /// Nominal duration of one animation frame, in milliseconds.
    pub frame_duration_ms: u64,
    /// Easing applied to the presentation of a turn.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            speed: 50,
            frame_duration_ms: 16,
            twist_interpolation: InterpolateFn::Lerp,
        }
    }
}
impl AnimationPreferences {
    /// Returns the speed divider, which is inversely related to the speed
    /// slider. Both the number of animation steps per turn and the delay
    /// between moves scale with it.
    pub fn divider(&self) -> u32 {
        100 - self.speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
    }
    /// Returns the number of animation frames in one turn.
    pub fn steps_per_turn(&self) -> u32 {
        (self.divider() / 2).max(1)
    }
    /// Returns the nominal duration of one animation frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_duration_ms.max(1))
    }
    /// Returns the nominal duration of one turn.
    pub fn turn_duration(&self) -> Duration {
        self.frame_duration() * self.steps_per_turn()
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f64::consts::PI;

    use serde::{Deserialize, Serialize};
    use strum::{Display, EnumString, VariantArray};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0, with `0.0` mapped to `0.0` and `1.0` mapped to `1.0`.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Display,
        EnumString,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    #[allow(missing_docs)]
    pub enum InterpolateFn {
        #[default]
        Lerp,
        Cosine,
        Cubic,
        Circular,
        Overshoot,
        CriticallyDamped,
    }

    impl InterpolateFn {
        /// Returns the interpolation value for `t` in the range [0, 1].
        pub fn interpolate(self, t: f64) -> f64 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::Circular => {
                    if t < 0.5 {
                        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) * 0.5
                    } else {
                        (1.0 + (1.0 - (-2.0 * t + 2.0).powi(2)).sqrt()) * 0.5
                    }
                }

                Self::Overshoot => {
                    // https://easings.net/#easeOutBack
                    let c1 = 1.70158;
                    let c3 = c1 + 1.0;
                    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
                }

                // never quite reaches 1 on its own
                Self::CriticallyDamped if t >= 1.0 => 1.0,
                Self::CriticallyDamped => (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0,
            }
        }
    }
}
