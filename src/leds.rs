use embedded_hal::pwm::SetDutyCycle;

use crate::config::{CENTER, DEADZONE, PWM_MAX};
use crate::error::Error;
use crate::mapper::map_range;

/// PWM levels for the two LED channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intensities {
    pub blue: u16,
    pub red: u16,
}

impl Intensities {
    pub const OFF: Self = Self { blue: 0, red: 0 };

    /// Vertical axis drives blue, horizontal drives red.
    pub fn from_axes(horizontal: u16, vertical: u16, enabled: bool) -> Self {
        if !enabled {
            return Self::OFF;
        }

        Self {
            blue: axis_intensity(vertical),
            red: axis_intensity(horizontal),
        }
    }
}

/// Brightness for one axis: zero inside the dead zone, rising linearly to
/// full scale at either end of travel.
pub fn axis_intensity(sample: u16) -> u16 {
    let sample = i32::from(sample);
    let center = i32::from(CENTER);
    let deadzone = i32::from(DEADZONE);
    let full = i32::from(PWM_MAX);

    let level = if sample < center - deadzone {
        map_range(sample, 0, center - deadzone, full, 0)
    } else if sample > center + deadzone {
        map_range(sample, center + deadzone, full, 0, full)
    } else {
        0
    };

    // Readings above ADC_MAX would extrapolate past full scale.
    level.clamp(0, full) as u16
}

/// The two PWM channels behind the LEDs.
pub struct Leds<B, R> {
    blue: B,
    red: R,
}

impl<B, R> Leds<B, R>
where
    B: SetDutyCycle,
    R: SetDutyCycle,
    Error: From<B::Error> + From<R::Error>,
{
    pub fn new(blue: B, red: R) -> Self {
        Self { blue, red }
    }

    pub fn apply(&mut self, levels: Intensities) -> Result<(), Error> {
        self.blue.set_duty_cycle(levels.blue)?;
        self.red.set_duty_cycle(levels.red)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_deadzone_are_dark() {
        assert_eq!(axis_intensity(CENTER), 0);
        for sample in CENTER - DEADZONE..=CENTER + DEADZONE {
            assert_eq!(axis_intensity(sample), 0, "sample {sample}");
        }
    }

    #[test]
    fn full_deflection_is_full_scale() {
        assert_eq!(axis_intensity(0), PWM_MAX);
        assert_eq!(axis_intensity(4095), PWM_MAX);
    }

    #[test]
    fn just_outside_deadzone_is_dim() {
        assert_eq!(axis_intensity(CENTER - DEADZONE - 1), 3);
        assert_eq!(axis_intensity(CENTER + DEADZONE + 1), 2);
    }

    #[test]
    fn intensity_grows_with_deflection() {
        assert!(axis_intensity(500) > axis_intensity(1000));
        assert!(axis_intensity(3500) > axis_intensity(3000));
        assert_eq!(axis_intensity(924), 2048);
    }

    #[test]
    fn disabled_forces_off() {
        for (h, v) in [(0, 0), (4095, 4095), (0, 4095), (2048, 2048)] {
            assert_eq!(Intensities::from_axes(h, v, false), Intensities::OFF);
        }
    }

    #[test]
    fn axes_feed_their_own_channel() {
        assert_eq!(
            Intensities::from_axes(2048, 0, true),
            Intensities { blue: 4095, red: 0 }
        );
        assert_eq!(
            Intensities::from_axes(4095, 2048, true),
            Intensities { blue: 0, red: 4095 }
        );
    }
}
