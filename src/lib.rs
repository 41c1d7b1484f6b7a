/*!
# LCD2004 Driver

Driver for Hitachi-HD44780-compatible character LCDs (20x4 memory layout)
wired over a 4-bit parallel interface, with the R/W line strapped to ground.

Basic Usage:

1. Configure 6 output pins (RS, EN, DB4..DB7) with your HAL, and collect them
    into a [`sender::ParallelSender`].
    Any other wiring can be supported by implementing [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`]; this runs the power-on
    initialization sequence and leaves the controller in 4-bit, display-on
    mode.
<br/>
<br/>
3. Use the methods of [`lcd::Lcd`] to position the cursor and write text.

## Timing

The controller is never read back: there is no busy-flag polling, and every
operation instead waits out a fixed settle time through the caller-supplied
[`embedded_hal::delay::DelayNs`]. The delay source must wait *at least* the
requested duration. Over-waiting is harmless; under-waiting (for example a
misconfigured clock tree) can latch a malformed command during
initialization and leave the controller unresponsive until power cycle.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;
