//! MM-ToF10 command definitions and the command frame encoder.

use core::fmt;

use super::frame::{
    COMMAND_HEADER, COMMAND_HEADER_OFFSET, COMMAND_ID_OFFSET, COMMAND_LENGTH,
    COMMAND_LENGTH_OFFSET, COMMAND_TAIL, COMMAND_TAIL_OFFSET, COMMAND_VALUE_OFFSET, FRAME_SIZE,
};

/// Command id byte carried at offset 1 of a command frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum CommandId {
    Mode = 0x00,
    LowSpeed = 0x10,
    HighSpeed = 0x11,
    Distance = 0x12,
    Standby = 0x80,
    LedRed = 0xC0,
    LedGreen = 0xC1,
    LedBlue = 0xC2,
}

/// Device framing mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Mode {
    Normal = 0x00,
    Sync = 0xFF,
}

/// Measurement distance range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum Distance {
    #[default]
    Short = 0x00,
    Long = 0x01,
}

/// Measurement rate. The wire value is the matching speed command id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum Rate {
    #[default]
    Low = CommandId::LowSpeed as u8,
    High = CommandId::HighSpeed as u8,
}

impl Rate {
    pub fn command_id(self) -> CommandId {
        match self {
            Rate::Low => CommandId::LowSpeed,
            Rate::High => CommandId::HighSpeed,
        }
    }
}

/// Argument of the standby command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Power {
    Active = 0x00,
    Standby = 0x01,
}

/// A command and its one-byte argument.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Select the framing mode.
    SetMode(Mode),
    /// Select the distance range.
    SetDistance(Distance),
    /// Select the rate. Sent as the rate's command id with a zero argument.
    SetRate(Rate),
    /// Enter or leave standby.
    SetPower(Power),
    LedRed(u8),
    LedGreen(u8),
    LedBlue(u8),
    /// Any id/value pair, for commands without a typed variant.
    Raw { id: u8, value: u8 },
}

impl Command {
    /// Command id byte.
    pub fn id(&self) -> u8 {
        match self {
            Command::SetMode(_) => CommandId::Mode as u8,
            Command::SetDistance(_) => CommandId::Distance as u8,
            Command::SetRate(rate) => rate.command_id() as u8,
            Command::SetPower(_) => CommandId::Standby as u8,
            Command::LedRed(_) => CommandId::LedRed as u8,
            Command::LedGreen(_) => CommandId::LedGreen as u8,
            Command::LedBlue(_) => CommandId::LedBlue as u8,
            Command::Raw { id, .. } => *id,
        }
    }

    /// Argument byte.
    pub fn value(&self) -> u8 {
        match self {
            Command::SetMode(mode) => *mode as u8,
            Command::SetDistance(distance) => *distance as u8,
            Command::SetRate(_) => 0,
            Command::SetPower(power) => *power as u8,
            Command::LedRed(v) | Command::LedGreen(v) | Command::LedBlue(v) => *v,
            Command::Raw { value, .. } => *value,
        }
    }

    /// Writes this command into `buffer` as a full frame.
    pub fn encode_into(&self, buffer: &mut [u8; FRAME_SIZE]) {
        encode(buffer, self.id(), self.value());
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd {:#04x} val {:#04x}", self.id(), self.value())
    }
}

/// Writes a command frame at the start of `buffer` and zero-fills the rest.
pub fn encode(buffer: &mut [u8; FRAME_SIZE], command: u8, value: u8) {
    buffer.fill(0);
    buffer[COMMAND_HEADER_OFFSET] = COMMAND_HEADER;
    buffer[COMMAND_ID_OFFSET] = command;
    buffer[COMMAND_LENGTH_OFFSET] = COMMAND_LENGTH;
    buffer[COMMAND_VALUE_OFFSET] = value;
    buffer[COMMAND_TAIL_OFFSET] = COMMAND_TAIL;
}
