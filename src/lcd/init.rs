use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::{Lcd, CLEAR_SETTLE_US},
    sender::SendCommand,
    state::LcdState,
};

/// Wait before any signaling, covers the controller's internal power-on
/// reset, in microseconds
const POWER_ON_WAIT_US: u32 = 45_000;
/// Wait after the first interface-reset pulse
const RESET_FIRST_WAIT_US: u32 = 4_500;
/// Wait after the second interface-reset pulse
const RESET_SECOND_WAIT_US: u32 = 150;

/// [`Config`] is the init config of an [`Lcd`]
#[derive(Default)]
pub struct Config {
    state: LcdState,
}

#[allow(missing_docs)]
impl Config {
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn set_line_mode(mut self, line: LineMode) -> Self {
        self.state.set_line_mode(line);
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create an [`Lcd`], taking the controller through its power-on
    /// initialization into 4-bit mode with the flags from `config`.
    ///
    /// Call this exactly once, right after power-on. The sequence is pure
    /// timing: nothing confirms a step landed, and a step issued too early
    /// can leave the controller latched onto a malformed command until the
    /// next power cycle.
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer, config: Config) -> Self {
        let state = config.state;

        // in the initialization process, we use raw pulses, to strictly
        // follow the datasheet flow

        // the controller may wake up in either bus width; three 0b0011
        // pulses converge it on 8-bit mode from any state
        sender.delay_and_send(CommandSet::InterfaceReset.into(), delayer, POWER_ON_WAIT_US);
        sender.delay_and_send(
            CommandSet::InterfaceReset.into(),
            delayer,
            RESET_FIRST_WAIT_US,
        );
        // the third pulse needs no extended wait, it only covers a missed
        // transient in the first two
        sender.delay_and_send(
            CommandSet::InterfaceReset.into(),
            delayer,
            RESET_SECOND_WAIT_US,
        );

        // now known to be 8-bit: one bare half command drops the bus to
        // 4-bit, from here on everything travels as nibble pairs
        sender.send(CommandSet::HalfFunctionSet.into(), delayer);
        sender.send(
            CommandSet::FunctionSet(state.get_line_mode(), state.get_font()).into(),
            delayer,
        );

        sender.send(
            CommandSet::DisplayOnOff {
                display: state.get_display_state(),
                cursor: state.get_cursor_state(),
                cursor_blink: state.get_cursor_blink(),
            }
            .into(),
            delayer,
        );

        sender.send(CommandSet::ClearDisplay.into(), delayer);
        delayer.delay_us(CLEAR_SETTLE_US);

        sender.send(
            CommandSet::EntryModeSet(state.get_direction(), state.get_shift_type()).into(),
            delayer,
        );

        Lcd {
            sender,
            delayer,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{cell::RefCell, rc::Rc, vec, vec::Vec};

    use super::super::test_double::{Event, RecordingDelay, RecordingSender};
    use super::*;

    #[test]
    fn init_follows_datasheet_order_and_timing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sender = RecordingSender::new(&log);
        let mut delayer = RecordingDelay::new(&log);

        let config = Config::default()
            .set_cursor_state(State::On)
            .set_cursor_blink(State::Off);
        let _lcd = Lcd::new(&mut sender, &mut delayer, config);

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Delay(45_000),
                Event::Pulse(0b0011),
                Event::Delay(4_500),
                Event::Pulse(0b0011),
                Event::Delay(150),
                Event::Pulse(0b0011),
                Event::Pulse(0b0010),
                Event::Command(0x28), // 4-bit bus, two lines, 5x8 font
                Event::Command(0x0E), // display on, cursor on, blink off
                Event::Command(0x01),
                Event::Delay(1_000),
                Event::Command(0x06), // increment, no display shift
            ]
        );
    }

    #[test]
    fn no_signaling_before_the_power_on_wait() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sender = RecordingSender::new(&log);
        let mut delayer = RecordingDelay::new(&log);

        let _lcd = Lcd::new(&mut sender, &mut delayer, Config::default());

        assert_eq!(log.borrow().first(), Some(&Event::Delay(45_000)));
    }

    #[test]
    fn display_control_reflects_the_caller_flags() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sender = RecordingSender::new(&log);
        let mut delayer = RecordingDelay::new(&log);

        let config = Config::default()
            .set_cursor_state(State::Off)
            .set_cursor_blink(State::On);
        let _lcd = Lcd::new(&mut sender, &mut delayer, config);

        assert!(log.borrow().contains(&Event::Command(0x0D)));
    }

    #[test]
    fn function_set_reflects_line_and_font() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sender = RecordingSender::new(&log);
        let mut delayer = RecordingDelay::new(&log);

        let config = Config::default()
            .set_line_mode(LineMode::OneLine)
            .set_font(Font::Font5x11);
        let _lcd = Lcd::new(&mut sender, &mut delayer, config);

        assert!(log.borrow().contains(&Event::Command(0x24)));
    }
}
