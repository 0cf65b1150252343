use fugit::MicrosDurationU32;

/// Full scale of a 12-bit ADC reading.
pub const ADC_MAX: u16 = 4095;
/// Joystick rest position.
pub const CENTER: u16 = 2048;
/// Half-width of the band around `CENTER` that leaves the LEDs dark.
pub const DEADZONE: u16 = 200;

/// PWM auto-reload value: 12-bit resolution, duty 0..=PWM_MAX.
pub const PWM_MAX: u16 = 4095;

/// HSI16, undivided.
pub const SYSCLK_HZ: u32 = 16_000_000;
/// Timer prescaler bringing SYSCLK down to the 1 MHz timestamp clock.
pub const MICROS_PRESCALER: u16 = (SYSCLK_HZ / 1_000_000 - 1) as u16;

/// EXTI lines follow the button pin numbers.
pub const AXIS_BUTTON_LINE: u32 = 14;
pub const ACTION_BUTTON_LINE: u32 = 15;

/// Events closer than this to the last accepted one are treated as contact bounce.
pub const DEBOUNCE_WINDOW: MicrosDurationU32 = MicrosDurationU32::micros(250);

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
/// 7-bit I2C address of the SSD1306.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;
/// I2C TIMINGR for 400 kHz fast mode with a 16 MHz I2CCLK, per the RM0444
/// timing table.
pub const DISPLAY_I2C_TIMING: u32 = i2c_timing(1, 3, 2, 3, 9);

/// Side of the square cursor glyph.
pub const CURSOR_SIZE: u32 = 8;
/// Horizontal cursor range, left to right.
pub const CURSOR_X_RANGE: (i32, i32) = (0, 119);
/// Vertical cursor range. Reversed so pushing the stick up moves the cursor up.
pub const CURSOR_Y_RANGE: (i32, i32) = (55, 0);
/// `(from, to)` substitutions keeping the cursor off the display edge.
pub const CURSOR_X_CLAMP: [(i32, i32); 2] = [(118, 116), (0, 4)];
pub const CURSOR_Y_CLAMP: [(i32, i32); 2] = [(55, 52), (1, 4)];

/// Distance between dots of the dotted border.
pub const BORDER_DOT_PITCH: usize = 4;

/// Packs I2C TIMINGR fields in register order.
pub const fn i2c_timing(presc: u8, scldel: u8, sdadel: u8, sclh: u8, scll: u8) -> u32 {
    (presc as u32 & 0xF) << 28
        | (scldel as u32 & 0xF) << 20
        | (sdadel as u32 & 0xF) << 16
        | (sclh as u32) << 8
        | scll as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_clock_is_one_megahertz() {
        assert_eq!(MICROS_PRESCALER, 15);
        assert_eq!(SYSCLK_HZ / (u32::from(MICROS_PRESCALER) + 1), 1_000_000);
    }

    #[test]
    fn display_bus_uses_fast_mode_timing() {
        assert_eq!(DISPLAY_I2C_TIMING, 0x1032_0309);

        // SCL low and high phases, in I2CCLK cycles.
        let presc = (DISPLAY_I2C_TIMING >> 28) + 1;
        let low = ((DISPLAY_I2C_TIMING & 0xFF) + 1) * presc;
        let high = (((DISPLAY_I2C_TIMING >> 8) & 0xFF) + 1) * presc;
        // Nominal period before SCL synchronization stretches it to 400 kHz.
        assert_eq!(low + high, 28);
        assert!(SYSCLK_HZ / (low + high) > 400_000);
    }
}
