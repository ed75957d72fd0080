// src/common/frame.rs

//! Fixed 256-byte frame layout shared by the command encoder, the validator
//! and the measurement decoder.

/// Size of every transfer in both directions.
pub const FRAME_SIZE: usize = 256;

/// Grid geometry.
pub const GRID_COLS: usize = 8;
pub const GRID_ROWS: usize = 4;
pub const PIXELS: usize = GRID_COLS * GRID_ROWS;

/// Width of one packed range value.
pub const RANGE_WIDTH: usize = 4;
/// Width of one packed intensity value.
pub const INTENSITY_WIDTH: usize = 2;
/// Width of one pixel status value.
pub const STATUS_WIDTH: usize = 1;

// === Command frame (host -> device) ===

pub const COMMAND_HEADER: u8 = 0xEB;
pub const COMMAND_TAIL: u8 = 0xED;
pub const COMMAND_LENGTH: u8 = 0x01;

pub const COMMAND_HEADER_OFFSET: usize = 0;
pub const COMMAND_ID_OFFSET: usize = 1;
pub const COMMAND_LENGTH_OFFSET: usize = 2;
pub const COMMAND_VALUE_OFFSET: usize = 3;
pub const COMMAND_TAIL_OFFSET: usize = 4;
/// Meaningful bytes at the head of a command frame; the rest is zero.
pub const COMMAND_FRAME_LEN: usize = 5;

// === Response frame (device -> host) ===

/// Differs from the command header/tail. Observed on the device, kept as is.
pub const RESPONSE_MAGIC: u8 = 0xE9;

pub const MAGIC_OFFSET: usize = 0;
pub const SEQUENCE_LEAD_OFFSET: usize = 1;
pub const SEQUENCE_TRAIL_OFFSET: usize = FRAME_SIZE - 1;

pub const RANGE_OFFSET: usize = 4;
pub const INTENSITY_OFFSET: usize = RANGE_OFFSET + RANGE_WIDTH;
pub const RANGE_GRID_OFFSET: usize = INTENSITY_OFFSET + INTENSITY_WIDTH;
pub const INTENSITY_GRID_OFFSET: usize = RANGE_GRID_OFFSET + PIXELS * RANGE_WIDTH;
pub const STATUS_GRID_OFFSET: usize = INTENSITY_GRID_OFFSET + PIXELS * INTENSITY_WIDTH;

// The status grid must end before the sequence trail.
const _: () = assert!(STATUS_GRID_OFFSET + PIXELS * STATUS_WIDTH <= SEQUENCE_TRAIL_OFFSET);

/// Raw bytes of the most recent transfer.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer([u8; FRAME_SIZE]);

impl FrameBuffer {
    pub const fn new() -> Self {
        FrameBuffer([0u8; FRAME_SIZE])
    }

    /// Wraps an existing raw frame.
    pub const fn from_bytes(bytes: [u8; FRAME_SIZE]) -> Self {
        FrameBuffer(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_SIZE] {
        &mut self.0
    }

    #[inline]
    pub fn magic(&self) -> u8 {
        self.0[MAGIC_OFFSET]
    }

    #[inline]
    pub fn sequence_lead(&self) -> u8 {
        self.0[SEQUENCE_LEAD_OFFSET]
    }

    #[inline]
    pub fn sequence_trail(&self) -> u8 {
        self.0[SEQUENCE_TRAIL_OFFSET]
    }

    /// Zero every byte.
    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// Classifies the buffer as a response frame.
    pub fn validate(&self) -> Result<(), FrameFault> {
        validate(&self.0)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    // Header and trail only.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("head", &format_args!("{:02X?}", &self.0[..COMMAND_FRAME_LEN]))
            .field("trail", &format_args!("{:#04x}", self.sequence_trail()))
            .finish()
    }
}

/// Why a response frame was rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameFault {
    /// Leading byte is not [`RESPONSE_MAGIC`]; host and device lost alignment.
    Magic { found: u8 },
    /// Lead and trail sequence bytes differ; torn or partial frame.
    Sequence { lead: u8, trail: u8 },
}

impl FrameFault {
    /// Only a magic fault needs a full resynchronization.
    pub fn needs_resync(&self) -> bool {
        matches!(self, FrameFault::Magic { .. })
    }
}

/// Checks the magic byte first, then the sequence pair.
///
/// The sequence check is intra-frame only: a repeated or stale frame with a
/// consistent lead/trail pair is accepted.
pub fn validate(frame: &[u8; FRAME_SIZE]) -> Result<(), FrameFault> {
    let magic = frame[MAGIC_OFFSET];
    if magic != RESPONSE_MAGIC {
        return Err(FrameFault::Magic { found: magic });
    }
    let lead = frame[SEQUENCE_LEAD_OFFSET];
    let trail = frame[SEQUENCE_TRAIL_OFFSET];
    if lead != trail {
        return Err(FrameFault::Sequence { lead, trail });
    }
    Ok(())
}
