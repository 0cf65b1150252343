use display_interface::{DisplayError, WriteOnlyDataCommand};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use embedded_hal::i2c::I2c;
use rtt_target::debug_rprintln;
use ssd1306::mode::{BufferedGraphicsMode, DisplayConfig};
use ssd1306::prelude::{DisplayRotation, I2CInterface};
use ssd1306::size::{DisplaySize, DisplaySize128x64};
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::config::DISPLAY_I2C_ADDRESS;
use crate::error::Error;

/// Monochrome frame that is drawn in RAM and pushed to the panel in one go.
pub trait Framebuffer: DrawTarget<Color = BinaryColor> {
    type PresentError;

    /// Sends the whole buffer to the panel.
    fn present(&mut self) -> Result<(), Self::PresentError>;
}

impl<DI, SIZE> Framebuffer for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    type PresentError = DisplayError;

    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush()
    }
}

pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Brings up the SSD1306 and leaves a blank frame on it.
pub fn init<I2C>(i2c: I2C) -> Result<Oled<I2C>, Error>
where
    I2C: I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    display.init()?;
    display.clear_buffer();
    display.flush()?;

    debug_rprintln!("display ready at {:#04x}", DISPLAY_I2C_ADDRESS);
    Ok(display)
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_graphics::prelude::*;
    use embedded_hal::i2c::{ErrorType, Operation};

    use super::*;

    #[derive(Default)]
    struct Bus {
        addresses: Vec<u8>,
        bytes_written: usize,
    }

    impl ErrorType for Bus {
        type Error = Infallible;
    }

    impl I2c for Bus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            self.addresses.push(address);
            for operation in operations {
                if let Operation::Write(buffer) = operation {
                    self.bytes_written += buffer.len();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn init_talks_to_configured_address() {
        let display = init(Bus::default()).unwrap();
        let bus = display.release().release();

        assert!(!bus.addresses.is_empty());
        assert!(bus.addresses.iter().all(|a| *a == DISPLAY_I2C_ADDRESS));
        assert!(bus.bytes_written > 0);
    }

    #[test]
    fn present_pushes_drawn_frame() {
        let mut display = init(Bus::default()).unwrap();
        Pixel(Point::new(3, 3), BinaryColor::On)
            .draw(&mut display)
            .unwrap();
        display.present().unwrap();
    }
}
