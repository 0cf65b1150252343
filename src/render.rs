use core::convert::Infallible;

use embedded_graphics::prelude::Point;
use embedded_hal::pwm::SetDutyCycle;
use rtt_target::debug_rprintln;

use crate::cursor;
use crate::display::Framebuffer;
use crate::error::Error;
use crate::leds::{Intensities, Leds};
use crate::scene;
use crate::toggle::{ToggleSnapshot, ToggleState};

/// Joystick axis. Vertical is wired to logical ADC channel 0, horizontal to
/// channel 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Single-shot ADC behind the joystick.
pub trait AnalogAxes {
    /// Converts `axis` and returns the 12-bit result.
    fn read(&mut self, axis: Axis) -> u16;
}

/// Everything computed in one pass of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub horizontal: u16,
    pub vertical: u16,
    pub intensities: Intensities,
    pub cursor: Point,
}

pub struct RenderLoop<'a, A, D, B, R> {
    axes: A,
    display: D,
    leds: Leds<B, R>,
    toggles: &'a ToggleState,
    last_seen: Option<ToggleSnapshot>,
}

impl<'a, A, D, B, R> RenderLoop<'a, A, D, B, R>
where
    A: AnalogAxes,
    D: Framebuffer,
    B: SetDutyCycle,
    R: SetDutyCycle,
    Error: From<D::Error> + From<D::PresentError> + From<B::Error> + From<R::Error>,
{
    pub fn new(axes: A, display: D, leds: Leds<B, R>, toggles: &'a ToggleState) -> Self {
        Self {
            axes,
            display,
            leds,
            toggles,
            last_seen: None,
        }
    }

    /// One iteration. Flags are read where they are used, so a button press
    /// landing mid-pass may affect only part of it.
    pub fn step(&mut self) -> Result<Frame, Error> {
        let horizontal = self.axes.read(Axis::Horizontal);
        let vertical = self.axes.read(Axis::Vertical);

        self.log_toggle_changes();

        let intensities = Intensities::from_axes(horizontal, vertical, self.toggles.leds_enabled());
        let cursor = cursor::position(horizontal, vertical);

        scene::draw(&mut self.display, self.toggles.border_style(), cursor)?;
        self.display.present()?;

        self.leds.apply(intensities)?;

        Ok(Frame {
            horizontal,
            vertical,
            intensities,
            cursor,
        })
    }

    pub fn run(&mut self) -> Result<Infallible, Error> {
        debug_rprintln!("render loop started");
        loop {
            self.step()?;
        }
    }

    fn log_toggle_changes(&mut self) {
        let current = self.toggles.snapshot();
        if self.last_seen != Some(current) {
            debug_rprintln!(
                "border {:?}, leds {}",
                current.border,
                if current.leds_enabled { "on" } else { "off" }
            );
            self.last_seen = Some(current);
        }
    }
}
