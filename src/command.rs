//! Controller instructions and their wire-level encoding

use crate::utils::BitOps;

/// The instructions this driver can issue, in datasheet terms
#[derive(Clone, Copy)]
pub enum CommandSet {
    /// Clear the whole display and reset the address counter.
    /// The controller needs extra settle time after this one, see
    /// [`Lcd::clear`](crate::lcd::Lcd::clear)
    ClearDisplay,
    /// Return cursor (and display window) to the origin
    ReturnHome,
    /// Address counter move direction and display shift on each data write
    EntryModeSet(MoveDirection, ShiftType),
    /// Display on/off, cursor on/off, cursor blink on/off
    DisplayOnOff {
        /// whole display on or off
        display: State,
        /// underline cursor on or off
        cursor: State,
        /// cursor blink on or off
        cursor_blink: State,
    },
    // the next two are not commands from the datasheet command table,
    // they are the bare nibbles of the 4-bit startup dance
    // we name them, to make things tidy
    /// Bare `0b0011` nibble, forces the controller out of an unknown
    /// 4-bit/8-bit state towards 8-bit mode
    InterfaceReset,
    /// Bare `0b0010` nibble, switches the now-known 8-bit mode to 4-bit
    HalfFunctionSet,
    /// Line count and font selection (bus width is fixed at 4 bits)
    FunctionSet(LineMode, Font),
    /// Move the address counter to a DDRAM address
    SetDDRAM(u8),
    /// Write one byte to RAM at the address counter
    WriteDataToRAM(u8),
}

/// Address counter move direction after each data write
#[derive(Clone, Copy, PartialEq, Default)]
pub enum MoveDirection {
    /// decrement address counter
    RightToLeft,
    /// increment address counter
    #[default]
    LeftToRight,
}

/// Whether a data write also shifts the display window
#[derive(Clone, Copy, Default)]
pub enum ShiftType {
    /// only the cursor moves
    #[default]
    CursorOnly,
    /// cursor and display window move together
    CursorAndDisplay,
}

/// A two-state controller flag
#[derive(Clone, Copy, PartialEq, Default)]
pub enum State {
    /// flag off
    Off,
    /// flag on
    #[default]
    On,
}

/// Display line mode.
/// Four-line modules are wired as two 40-character lines, so they run in
/// [`LineMode::TwoLine`] as well
#[derive(Clone, Copy, Default, PartialEq)]
pub enum LineMode {
    /// single line
    OneLine,
    /// two lines
    #[default]
    TwoLine,
}

/// Character font
#[derive(Clone, Copy, Default, PartialEq)]
pub enum Font {
    /// 5x8 dot matrix
    #[default]
    Font5x8,
    /// 5x11 dot matrix
    Font5x11,
}

/// A [`CommandSet`] instruction lowered to what the wire needs to carry:
/// a register selection and a 4- or 8-bit payload
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum RegisterSelection {
    Command,
    Data,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Bits {
    Bit4(u8),
    Bit8(u8),
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    pub(crate) fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub(crate) fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => {
                let raw_bits: u8 = 0b0000_0001;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::ReturnHome => {
                let raw_bits: u8 = 0b0000_0010;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits = 0b0000_1000;

                match display {
                    State::Off => raw_bits.clear_bit(2),
                    State::On => raw_bits.set_bit(2),
                };
                match cursor {
                    State::Off => raw_bits.clear_bit(1),
                    State::On => raw_bits.set_bit(1),
                };
                match cursor_blink {
                    State::Off => raw_bits.clear_bit(0),
                    State::On => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::InterfaceReset => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0011))
            }

            CommandSet::HalfFunctionSet => {
                Self::new(RegisterSelection::Command, Bits::Bit4(0b0010))
            }

            CommandSet::FunctionSet(line, font) => {
                // bit 4 is the bus width, it stays clear since this driver
                // only speaks 4-bit
                let mut raw_bits = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::SetDDRAM(addr) => {
                // bit 7 is forced set, so an out-of-window address wraps in
                // controller memory instead of decoding as another command
                let raw_bits = 0b1000_0000 | addr;
                Self::new(RegisterSelection::Command, Bits::Bit8(raw_bits))
            }

            CommandSet::WriteDataToRAM(data) => {
                Self::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}
