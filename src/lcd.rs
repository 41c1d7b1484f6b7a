//! The [`Lcd`] handle and its cursor/text operations

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, State},
    sender::SendCommand,
    state::LcdState,
};

mod init;

pub use init::Config;

/// DDRAM base address of each display line.
///
/// This is the 20-column, 4-line memory layout: lines 2 and 3 continue
/// lines 0 and 1 in controller memory. Modules with another column count
/// lay their lines out differently, do not reuse this table for them.
const LINE_BASE_ADDR: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Settle time after Clear Display, in microseconds.
/// Clearing is a slow controller-internal operation; every other command is
/// covered by the strobe margins alone.
const CLEAR_SETTLE_US: u32 = 1_000;

/// Handle of an initialized display.
///
/// Holds exclusive borrows of the sender and the delay source, so all bus
/// access is serialized through one place for the handle's lifetime. On
/// targets with interrupts, keep interrupt handlers away from the display
/// pins entirely; an interleaved write would corrupt the enable-strobe
/// timing mid-transfer.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Clear the whole display and move the cursor to the origin.
    ///
    /// Always waits out the controller-internal clear time before
    /// returning.
    pub fn clear(&mut self) {
        self.sender.send(CommandSet::ClearDisplay.into(), self.delayer);
        self.delayer.delay_us(CLEAR_SETTLE_US);
    }

    /// Return cursor and display window to the origin, leaving the display
    /// content in place
    pub fn return_home(&mut self) {
        self.sender.send(CommandSet::ReturnHome.into(), self.delayer);
    }

    /// Move the cursor to `(line, column)`.
    ///
    /// `line` must be below 4. No bounds are checked: a column past the
    /// line's memory window lands in controller-defined adjacent memory,
    /// which shows up as characters on the wrong line.
    pub fn set_cursor(&mut self, line: u8, column: u8) {
        let addr = LINE_BASE_ADDR[line as usize] + column;
        self.sender.send(CommandSet::SetDDRAM(addr).into(), self.delayer);
    }

    /// Write one byte at the cursor, then the address counter moves on by
    /// itself.
    ///
    /// The byte is forwarded verbatim; what glyph it maps to is up to the
    /// controller's character ROM.
    pub fn put_char(&mut self, ch: impl Into<u8>) {
        self.sender
            .send(CommandSet::WriteDataToRAM(ch.into()).into(), self.delayer);
    }

    /// Write every byte of `text` at the cursor, in order.
    ///
    /// Bytes are not interpreted: a `\n` is handed to the controller like
    /// any other byte, it does not move to the next line.
    pub fn print(&mut self, text: &str) {
        text.bytes().for_each(|byte| self.put_char(byte));
    }

    /// Move the cursor to `(line, column)`, then print `text`.
    ///
    /// Text running past the end of the line is not handled: it wraps into
    /// adjacent controller memory until the next [`set_cursor`](Self::set_cursor)
    pub fn print_at(&mut self, text: &str, line: u8, column: u8) {
        self.set_cursor(line, column);
        self.print(text);
    }

    /// The display on/off flag chosen at initialization
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// The cursor visibility flag chosen at initialization
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// The cursor blink flag chosen at initialization
    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }
}

#[cfg(test)]
pub(crate) mod test_double {
    //! A sender/delayer pair writing into one shared log, so tests can
    //! assert the order of commands *and* waits without sleeping.

    extern crate std;

    use std::{cell::RefCell, rc::Rc, vec::Vec};

    use embedded_hal::delay::DelayNs;

    use crate::command::{Bits, Command, RegisterSelection};
    use crate::sender::SendCommand;

    /// Everything the driver asks of the outside world, in request order
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Event {
        /// a requested wait, in microseconds
        Delay(u32),
        /// a full command byte
        Command(u8),
        /// a data byte
        Data(u8),
        /// a bare startup nibble
        Pulse(u8),
    }

    pub(crate) struct RecordingSender {
        log: Rc<RefCell<Vec<Event>>>,
    }

    impl RecordingSender {
        pub(crate) fn new(log: &Rc<RefCell<Vec<Event>>>) -> Self {
            Self {
                log: Rc::clone(log),
            }
        }
    }

    impl<Delayer: DelayNs> SendCommand<Delayer> for RecordingSender {
        fn send(&mut self, command: Command, _delayer: &mut Delayer) {
            let event = match (command.get_register_selection(), command.get_data()) {
                (RegisterSelection::Command, Bits::Bit4(bits)) => Event::Pulse(bits),
                (RegisterSelection::Command, Bits::Bit8(bits)) => Event::Command(bits),
                (RegisterSelection::Data, Bits::Bit8(bits)) => Event::Data(bits),
                (RegisterSelection::Data, Bits::Bit4(_)) => {
                    unreachable!("bare nibbles are always command strobes")
                }
            };
            self.log.borrow_mut().push(event);
        }
    }

    pub(crate) struct RecordingDelay {
        log: Rc<RefCell<Vec<Event>>>,
    }

    impl RecordingDelay {
        pub(crate) fn new(log: &Rc<RefCell<Vec<Event>>>) -> Self {
            Self {
                log: Rc::clone(log),
            }
        }
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns / 1_000));
        }

        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::Delay(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Delay(ms * 1_000));
        }
    }
}
