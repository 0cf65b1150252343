#![no_std]
#![no_main]
#![deny(unsafe_code)]

mod board;
mod system_time;

use core::panic::PanicInfo;

use cortex_m_rt::entry;
use joystick_display::display;
use joystick_display::leds::Leds;
use joystick_display::render::RenderLoop;
use joystick_display::toggle::ToggleState;
use joystick_display::Error;
use rtt_target::debug_rprintln;
#[cfg(debug_assertions)]
use rtt_target::rtt_init_print;

static TOGGLES: ToggleState = ToggleState::new();

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    debug_rprintln!("{}", info);

    cortex_m::asm::bkpt();
    cortex_m::asm::udf();
}

#[entry]
fn main() -> ! {
    move || -> Result<(), Error> {
        #[cfg(debug_assertions)]
        rtt_init_print!(rtt_target::ChannelMode::NoBlockSkip, 4096);

        debug_rprintln!("starting");

        let board = board::Board::new(&TOGGLES)?;
        let oled = display::init(board.i2c)?;

        let pwm = board.leds.pwm;
        let leds = Leds::new(pwm.bind_pin(board.leds.blue), pwm.bind_pin(board.leds.red));

        let mut render = RenderLoop::new(board.axes, oled, leds, &TOGGLES);
        match render.run()? {}
    }()
    .expect("error in main");

    unreachable!();
}
