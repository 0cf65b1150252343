use core::cell::RefCell;

use critical_section::Mutex;
use joystick_display::toggle::Instant;
use stm32g0_hal::pac::TIM2;
use stm32g0_hal::timer::Counter;

/// Free-running 1 MHz counter. TIM2 is 32 bits wide, so it wraps together
/// with `Instant`.
static MICROS: Mutex<RefCell<Option<Counter<TIM2>>>> = Mutex::new(RefCell::new(None));

pub fn init(counter: Counter<TIM2>) {
    load_prescaler();
    counter.start();
    critical_section::with(|cs| *MICROS.borrow_ref_mut(cs) = Some(counter));
}

/// Microseconds since `init`. Reads 0 before the counter is installed.
pub fn now() -> Instant {
    let ticks = critical_section::with(|cs| {
        MICROS
            .borrow_ref(cs)
            .as_ref()
            .map_or(0, |counter| counter.counter())
    });

    Instant::from_ticks(ticks)
}

// PSC is buffered until the next update event. Without one the counter runs at
// SYSCLK until its first overflow.
#[allow(unsafe_code)]
fn load_prescaler() {
    let timer = unsafe { &*TIM2::ptr() };
    timer.egr().write(|w| w.ug().update());
    while timer.sr().read().uif().bit_is_clear() {}
    timer.sr().modify(|_, w| w.uif().clear_bit());
}
