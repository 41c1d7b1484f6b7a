//! Built-in sender
//! If you want to drive other wiring (a shift register, an I/O expander),
//! implement the [`SendCommand`] trait for it

use embedded_hal::delay::DelayNs;

use crate::command::Command;

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to put commands on
/// the wire.
///
/// The bus is one-way: commands go out, nothing ever comes back. A sender
/// has no way to report a protocol failure, so the methods return nothing;
/// a pin that cannot be driven is a wiring or configuration bug, not a
/// runtime condition.
pub trait SendCommand<Delayer: DelayNs> {
    /// Parse a [`Command`] and drive it onto the bus, byte payloads as two
    /// nibbles, high nibble first
    fn send(&mut self, command: Command, delayer: &mut Delayer);

    /// Wait at least `delay_us`, then send the command.
    /// The initialization sequence is built from this, with the settle time
    /// of the *previous* step as the wait
    fn delay_and_send(&mut self, command: Command, delayer: &mut Delayer, delay_us: u32) {
        delayer.delay_us(delay_us);
        self.send(command, delayer);
    }
}
