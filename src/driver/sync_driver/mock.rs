// src/driver/sync_driver/mock.rs

//! Scripted bus/timer used by the driver tests.

use crate::common::{
    frame::{COMMAND_FRAME_LEN, COMMAND_HEADER, COMMAND_TAIL, FRAME_SIZE, RESPONSE_MAGIC},
    hal_traits::{Tof10Bus, Tof10Timer},
};
use core::ops::{Add, Sub};
use core::time::Duration;
use heapless::{Deque, Vec};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Bus Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockBusError;

/// What the driver did on the bus, in order. Consecutive single-byte
/// transfers collapse into one `Bytes` entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Bytes(usize),
    Command { id: u8, value: u8 },
    Read,
    DelayMs(u32),
}

pub struct MockInterface {
    pub current_time_us: u64,
    pub log: Vec<Event, 512>,
    pub bytes_transferred: usize,
    /// Responses to full-frame reads; an empty queue answers with zeros.
    pub frames: Deque<[u8; FRAME_SIZE], 16>,
    /// (byte index, value) overrides for single-byte responses; default is 0.
    pub byte_script: Vec<(usize, u8), 16>,
    pub last_command_frame: [u8; FRAME_SIZE],
    /// Number of `WouldBlock` polls before each single-byte transfer completes.
    pub pending_polls: u32,
    polls_left: u32,
    pub stall_bytes: bool,
    pub fail_bytes: bool,
    pub fail_frames: bool,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            current_time_us: 0,
            log: Vec::new(),
            bytes_transferred: 0,
            frames: Deque::new(),
            byte_script: Vec::new(),
            last_command_frame: [0; FRAME_SIZE],
            pending_polls: 0,
            polls_left: 0,
            stall_bytes: false,
            fail_bytes: false,
            fail_frames: false,
        }
    }

    pub fn stage_byte(&mut self, index: usize, value: u8) {
        self.byte_script.push((index, value)).unwrap();
    }

    pub fn stage_frame(&mut self, frame: [u8; FRAME_SIZE]) {
        self.frames.push_back(frame).unwrap();
    }

    /// Commands sent so far, in order.
    pub fn commands(&self) -> Vec<(u8, u8), 64> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Command { id, value } => Some((*id, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.log.iter().filter(|e| matches!(e, Event::Read)).count()
    }

    fn record(&mut self, event: Event) {
        if let (Event::Bytes(n), Some(Event::Bytes(last))) = (event, self.log.last_mut()) {
            *last += n;
            return;
        }
        self.log.push(event).unwrap();
    }
}

/// A valid response frame with the given sequence byte and zeroed payload.
pub fn valid_frame(sequence: u8) -> [u8; FRAME_SIZE] {
    let mut f = [0u8; FRAME_SIZE];
    f[0] = RESPONSE_MAGIC;
    f[1] = sequence;
    f[FRAME_SIZE - 1] = sequence;
    f
}

impl Tof10Timer for MockInterface {
    type Instant = MockInstant;

    fn delay_us(&mut self, us: u32) {
        self.current_time_us += u64::from(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.current_time_us += u64::from(ms) * 1000;
        self.record(Event::DelayMs(ms));
    }

    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

impl Tof10Bus for MockInterface {
    type Error = MockBusError;

    fn transfer_byte(&mut self, _byte: u8) -> nb::Result<u8, Self::Error> {
        if self.fail_bytes {
            return Err(nb::Error::Other(MockBusError));
        }
        if self.stall_bytes {
            return Err(nb::Error::WouldBlock);
        }
        if self.polls_left < self.pending_polls {
            self.polls_left += 1;
            return Err(nb::Error::WouldBlock);
        }
        self.polls_left = 0;

        let index = self.bytes_transferred;
        self.bytes_transferred += 1;
        self.record(Event::Bytes(1));
        let value = self
            .byte_script
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, v)| *v)
            .unwrap_or(0);
        Ok(value)
    }

    fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_frames {
            return Err(MockBusError);
        }
        assert_eq!(buffer.len(), FRAME_SIZE);
        if buffer[0] == COMMAND_HEADER && buffer[COMMAND_FRAME_LEN - 1] == COMMAND_TAIL {
            self.last_command_frame.copy_from_slice(buffer);
            self.record(Event::Command {
                id: buffer[1],
                value: buffer[3],
            });
            buffer.fill(0);
        } else {
            assert!(buffer.iter().all(|&b| b == 0), "reads shift out zeros");
            self.record(Event::Read);
            let response = self.frames.pop_front().unwrap_or([0u8; FRAME_SIZE]);
            buffer.copy_from_slice(&response);
        }
        Ok(())
    }
}
