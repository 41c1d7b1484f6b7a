use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Bits, Command, RegisterSelection},
    sender::SendCommand,
    utils::BitOps,
};

/// Setup and hold margin around each enable strobe, in microseconds.
/// The datasheet minimum is well under a microsecond; this margin keeps the
/// transfer valid across host clock-speed variation, at the cost of
/// throughput.
const STROBE_MARGIN_US: u32 = 200;

/// Sender for the write-only 4-pin parallel wiring.
///
/// Owns the six output pins for the lifetime of the driver: RS, EN and
/// DB4..DB7. The controller's R/W line is not driven, it must be strapped to
/// ground (write mode) on the board.
///
/// Pins must already be configured as outputs; push-pull is fine since the
/// bus is never read.
pub struct ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    rs_pin: ControlPin,
    en_pin: ControlPin,
    db_pins: [DBPin; 4],
}

impl<ControlPin, DBPin> ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
{
    /// Collect the configured pins into a sender
    pub fn new(
        rs: ControlPin,
        en: ControlPin,
        db4: DBPin,
        db5: DBPin,
        db6: DBPin,
        db7: DBPin,
    ) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
        }
    }

    /// Fan the low 4 bits of `raw_bits` out onto DB4..DB7
    fn push_bits(&mut self, raw_bits: u8) {
        self.db_pins
            .iter_mut()
            .enumerate()
            .for_each(|(index, pin)| match raw_bits.bit_is_set(index as u8) {
                true => {
                    pin.set_high().ok().unwrap();
                }
                false => {
                    pin.set_low().ok().unwrap();
                }
            });
    }

    /// One enable strobe carrying one nibble.
    ///
    /// EN rises first; RS and the data lines settle inside the strobe, and
    /// the falling EN edge latches them into the controller.
    fn strobe_nibble(
        &mut self,
        rs: RegisterSelection,
        raw_bits: u8,
        delayer: &mut impl DelayNs,
    ) {
        self.en_pin.set_high().ok().unwrap();
        delayer.delay_us(STROBE_MARGIN_US);

        match rs {
            RegisterSelection::Command => {
                self.rs_pin.set_low().ok().unwrap();
            }
            RegisterSelection::Data => {
                self.rs_pin.set_high().ok().unwrap();
            }
        }
        self.push_bits(raw_bits);

        delayer.delay_us(STROBE_MARGIN_US);
        self.en_pin.set_low().ok().unwrap();
    }
}

impl<ControlPin, DBPin, Delayer> SendCommand<Delayer> for ParallelSender<ControlPin, DBPin>
where
    ControlPin: OutputPin,
    DBPin: OutputPin,
    Delayer: DelayNs,
{
    fn send(&mut self, command: Command, delayer: &mut Delayer) {
        let rs = command.get_register_selection();

        match command.get_data() {
            Bits::Bit4(raw_bits) => {
                self.strobe_nibble(rs, raw_bits, delayer);
            }
            Bits::Bit8(raw_bits) => {
                // high nibble first, the controller mandates the order
                self.strobe_nibble(rs, raw_bits >> 4, delayer);
                self.strobe_nibble(rs, raw_bits & 0b1111, delayer);
            }
        }
    }
}
