#![allow(unsafe_code)]

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use joystick_display::config::{DISPLAY_I2C_TIMING, MICROS_PRESCALER, PWM_MAX};
use joystick_display::render::{AnalogAxes, Axis};
use joystick_display::toggle::{
    ToggleController, ToggleState, TriggerEvent, TriggerSource, BUTTON_LINES,
};
use joystick_display::Error;
use rtt_target::debug_rprintln;
use stm32g0_hal::adc::{Adc, AdcExt};
use stm32g0_hal::exti::{Event, ExtiExt};
use stm32g0_hal::gpio::gpiob::{PB0, PB1, PB14, PB15, PB6, PB7, PB9};
use stm32g0_hal::gpio::{Alternate, Analog, GpioExt, Input, Output, PullUp, PushPull, SignalEdge};
use stm32g0_hal::i2c::{self, I2c, I2cExt};
use stm32g0_hal::pac::{interrupt, Interrupt};
use stm32g0_hal::pac::{CorePeripherals, Peripherals};
use stm32g0_hal::pac::{EXTI, I2C3, NVIC, TIM4};
use stm32g0_hal::rcc::config::{Config, Prescaler};
use stm32g0_hal::rcc::RccExt;
use stm32g0_hal::timer::{Pwm, TimerExt};

use crate::system_time;

pub type BoardI2c = I2c<I2C3>;
pub type StatusPin = PB9<Output<PushPull>>;

#[allow(unused)]
pub struct Buttons {
    pub axis: PB14<Input<PullUp>>,
    pub action: PB15<Input<PullUp>>,
}

pub struct Axes {
    adc: Adc,
    vertical: PB0<Analog>,
    horizontal: PB1<Analog>,
}

impl AnalogAxes for Axes {
    fn read(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::Vertical => self.adc.read(&mut self.vertical),
            Axis::Horizontal => self.adc.read(&mut self.horizontal),
        }
    }
}

pub struct LedPwm {
    pub pwm: Pwm<TIM4>,
    pub blue: PB6<Alternate<9>>,
    pub red: PB7<Alternate<9>>,
}

/// Status LED that remembers its level so it can be toggled from the EXTI handler.
pub struct StatusLed {
    pin: StatusPin,
    high: bool,
}

impl ErrorType for StatusLed {
    type Error = <StatusPin as ErrorType>::Error;
}

impl OutputPin for StatusLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()?;
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()?;
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for StatusLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

static BUTTONS: Mutex<RefCell<Option<ToggleController<'static, StatusLed>>>> =
    Mutex::new(RefCell::new(None));

pub struct Board {
    pub i2c: BoardI2c,
    pub axes: Axes,
    pub leds: LedPwm,
    pub buttons: Buttons,
}

impl Board {
    /// Configures all peripherals and arms the button interrupts. Button edges
    /// update `toggles` from then on.
    pub fn new(toggles: &'static ToggleState) -> Result<Self, Error> {
        let _cp = CorePeripherals::take().ok_or(Error::AlreadyTaken)?;
        let dp = Peripherals::take().ok_or(Error::AlreadyTaken)?;

        let rcc = dp.RCC.constrain(Config::sysclk_hsi(Prescaler::Div1));

        let gpiob = dp.GPIOB.split(&rcc);

        let micros = dp
            .TIM2
            .constrain()
            .upcounter(MICROS_PRESCALER, u32::MAX, &rcc);
        system_time::init(micros);

        let led_pwm = dp.TIM4.constrain().pwm(0, PWM_MAX, &rcc);

        let mut adc = dp.ADC.constrain(&rcc);
        adc.calibrate();

        let mut status_pin = gpiob.pb9.into_push_pull_output();
        status_pin.set_low()?;

        let mut buttons = Buttons {
            axis: gpiob.pb14.into_pullup_input(),
            action: gpiob.pb15.into_pullup_input(),
        };

        let i2c_sda = gpiob.pb4.into_open_drain_output();
        let i2c_scl = gpiob.pb3.into_open_drain_output();
        let config = i2c::Config::from_cubemx(true, 0, DISPLAY_I2C_TIMING);
        let i2c = dp.I2C3.constrain(i2c_sda, i2c_scl, &config, &rcc);

        // Upon reset, a pull-down resistor might be present on PB15, PA8, PD0, or PD2,
        // depending on the voltage level on PB0, PA9, PC6, PA10, PD1, and PD3. In order
        // to disable this resistor, strobe the UCPDx_STROBE bit of the SYSCFG_CFGR1
        // register during start-up sequence.
        let syscfg = dp.SYSCFG;
        syscfg
            .cfgr1()
            .modify(|_, w| w.ucpd1_strobe().set_bit().ucpd2_strobe().set_bit());

        critical_section::with(|cs| {
            *BUTTONS.borrow_ref_mut(cs) = Some(ToggleController::new(
                toggles,
                StatusLed {
                    pin: status_pin,
                    high: false,
                },
            ));
        });

        let mut exti = dp.EXTI;
        buttons.axis.make_interrupt_source(&mut exti);
        buttons
            .axis
            .trigger_on_edge(SignalEdge::Falling, &mut exti);
        buttons.action.make_interrupt_source(&mut exti);
        buttons
            .action
            .trigger_on_edge(SignalEdge::Falling, &mut exti);

        exti.listen(Event::Gpio14);
        exti.listen(Event::Gpio15);

        unsafe {
            NVIC::unmask(Interrupt::EXTI4_15);
        }

        debug_rprintln!("board ready");

        Ok(Self {
            i2c,
            axes: Axes {
                adc,
                vertical: gpiob.pb0.into_analog(),
                horizontal: gpiob.pb1.into_analog(),
            },
            leds: LedPwm {
                pwm: led_pwm,
                blue: gpiob.pb6.into_alternate_function(),
                red: gpiob.pb7.into_alternate_function(),
            },
            buttons,
        })
    }
}

#[interrupt]
unsafe fn EXTI4_15() {
    let exti = &(*EXTI::ptr());
    let pending = exti.fpr1().read().bits() & BUTTON_LINES;
    let at = system_time::now();

    debug_rprintln!("EXTI interrupt {:016b}", pending);

    critical_section::with(|cs| {
        if let Some(controller) = BUTTONS.borrow_ref_mut(cs).as_mut() {
            for source in TriggerSource::pending(pending) {
                if controller.on_trigger(TriggerEvent { source, at }).is_err() {
                    debug_rprintln!("status LED write failed");
                }
            }
        }
    });

    // Clear only the lines handled above; a later edge stays pending.
    exti.fpr1().write(|w| w.bits(pending));
}
