//! Drive a 20x4 character LCD with a STM32F411RET6 in write-only 4 pin mode

//! Wiring diagram
//!
//! LCD2004 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (this driver never reads back, tie the line low)
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{pac, prelude::*};

use lcd2004_driver::{
    command::State,
    lcd::{Config, Lcd},
    sender::ParallelSender,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    // init needed digital pins

    let gpioa = dp.GPIOA.split();

    // Push-pull everywhere, the bus is write-only
    let rs_pin = gpioa.pa0.into_push_pull_output().erase();
    let en_pin = gpioa.pa2.into_push_pull_output().erase();

    let db4_pin = gpioa.pa3.into_push_pull_output().erase();
    let db5_pin = gpioa.pa4.into_push_pull_output().erase();
    let db6_pin = gpioa.pa5.into_push_pull_output().erase();
    let db7_pin = gpioa.pa6.into_push_pull_output().erase();

    // put pins together
    let mut sender = ParallelSender::new(rs_pin, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    let config = Config::default()
        .set_cursor_state(State::On)
        .set_cursor_blink(State::On);

    // init the display, this blocks for the whole power-on sequence
    rprintln!("initializing display");
    let mut lcd = Lcd::new(&mut sender, &mut delayer, config);
    rprintln!("display ready");

    // one line per DDRAM base offset, so a wrong offset table shows up
    // immediately as misplaced text
    lcd.print_at("line 0", 0, 0);
    lcd.print_at("line 1", 1, 0);
    lcd.print_at("line 2", 2, 0);
    lcd.print_at("line 3", 3, 0);

    lcd.delay_ms(2_000);

    // single character writes, with the address counter walking right
    lcd.set_cursor(0, 12);
    for byte in b"20x4" {
        lcd.put_char(*byte);
        lcd.delay_ms(250);
    }

    lcd.delay_ms(2_000);

    // overwrite in place, then park the cursor at the origin
    lcd.clear();
    lcd.print_at("Hello, World!", 1, 3);
    lcd.delay_ms(2_000);
    lcd.return_home();

    rprintln!("demo done");

    #[allow(clippy::empty_loop)]
    loop {}
}
