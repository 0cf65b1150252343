use embedded_hal::digital::StatefulOutputPin;
use fugit::TimerInstantU32;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use rtt_target::debug_rprintln;

use crate::config::{ACTION_BUTTON_LINE, AXIS_BUTTON_LINE, DEBOUNCE_WINDOW};

/// Microseconds since boot. Wraps after ~71 minutes.
pub type Instant = TimerInstantU32<1_000_000>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Joystick push button.
    AxisButton,
    ActionButton,
}

/// Button bits of an EXTI pending register.
pub const BUTTON_LINES: u32 = (1 << AXIS_BUTTON_LINE) | (1 << ACTION_BUTTON_LINE);

impl TriggerSource {
    const fn line(self) -> u32 {
        match self {
            Self::AxisButton => AXIS_BUTTON_LINE,
            Self::ActionButton => ACTION_BUTTON_LINE,
        }
    }

    /// Sources with their line set in `pending`, in line order.
    pub fn pending(pending: u32) -> impl Iterator<Item = Self> {
        [Self::AxisButton, Self::ActionButton]
            .into_iter()
            .filter(move |source| pending & (1 << source.line()) != 0)
    }
}

/// Falling edge on one of the buttons, as seen by the interrupt handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub source: TriggerSource,
    pub at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dotted,
}

/// Copy of the flags taken by the loop at the start of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleSnapshot {
    pub border: BorderStyle,
    pub leds_enabled: bool,
}

/// Flags written from the EXTI handler and read by the render loop.
///
/// Every field is an independent word-sized atomic, so no lock is needed. The
/// loop may see a flip in the middle of an iteration and picks it up fully on
/// the next one.
#[derive(Debug)]
pub struct ToggleState {
    last_event_us: AtomicU32,
    border_dotted: AtomicBool,
    leds_enabled: AtomicBool,
}

impl ToggleState {
    pub const fn new() -> Self {
        Self {
            last_event_us: AtomicU32::new(0),
            border_dotted: AtomicBool::new(false),
            leds_enabled: AtomicBool::new(true),
        }
    }

    pub fn border_style(&self) -> BorderStyle {
        if self.border_dotted.load(Ordering::Relaxed) {
            BorderStyle::Dotted
        } else {
            BorderStyle::Solid
        }
    }

    pub fn leds_enabled(&self) -> bool {
        self.leds_enabled.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            border: self.border_style(),
            leds_enabled: self.leds_enabled(),
        }
    }

    /// Time of the last accepted event.
    #[cfg(test)]
    pub fn last_event(&self) -> Instant {
        Instant::from_ticks(self.last_event_us.load(Ordering::Relaxed))
    }

    /// Applies the debounce rule to `event` and flips the matching flag.
    ///
    /// Both sources share one timestamp: a press on one button suppresses a
    /// press on the other within the window. Returns whether the event was
    /// accepted.
    pub fn accept(&self, event: TriggerEvent) -> bool {
        if !self.debounce(event) {
            return false;
        }

        self.flip(event.source);
        true
    }

    /// Records `event` as the last accepted one unless it falls inside the
    /// window.
    fn debounce(&self, event: TriggerEvent) -> bool {
        let now = event.at.ticks();
        let elapsed = now.wrapping_sub(self.last_event_us.load(Ordering::Relaxed));
        if elapsed <= DEBOUNCE_WINDOW.ticks() {
            debug_rprintln!("{:?} bounced after {} us", event.source, elapsed);
            return false;
        }

        self.last_event_us.store(now, Ordering::Relaxed);
        debug_rprintln!("{:?} accepted at {} us", event.source, now);
        true
    }

    fn flip(&self, source: TriggerSource) {
        match source {
            TriggerSource::AxisButton => self.border_dotted.fetch_not(Ordering::Relaxed),
            TriggerSource::ActionButton => self.leds_enabled.fetch_not(Ordering::Relaxed),
        };
    }
}

impl Default for ToggleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side half: debounces events and drives the status LED.
pub struct ToggleController<'a, P> {
    state: &'a ToggleState,
    status_led: P,
}

impl<'a, P> ToggleController<'a, P>
where
    P: StatefulOutputPin,
{
    pub fn new(state: &'a ToggleState, status_led: P) -> Self {
        Self { state, status_led }
    }

    /// Handles one button edge. Never blocks; the only I/O is the status LED.
    ///
    /// The status LED mirrors the border flag, so it is written first. If the
    /// write fails the press is consumed and neither of them changes.
    pub fn on_trigger(&mut self, event: TriggerEvent) -> Result<bool, P::Error> {
        if !self.state.debounce(event) {
            return Ok(false);
        }

        if event.source == TriggerSource::AxisButton {
            self.status_led.toggle()?;
        }

        self.state.flip(event.source);
        Ok(true)
    }

    #[cfg(test)]
    pub fn status_led(&mut self) -> &mut P {
        &mut self.status_led
    }
}
