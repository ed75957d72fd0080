// src/driver/sync_driver/configuration.rs

use super::SyncDriver;
use crate::common::{
    command::{Command, Distance, Mode, Power, Rate},
    config::SessionState,
    error::Tof10Error,
    hal_traits::{Tof10Bus, Tof10Timer},
};
use log::{debug, warn};

impl<IF> SyncDriver<IF>
where
    IF: Tof10Bus + Tof10Timer,
{
    /// Brings the device from power-up into normal mode with the configured
    /// distance and rate.
    pub fn init(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.sync()?;
        self.configure(self.config.distance, self.config.rate)?;
        debug!("MM-ToF10 init sequence complete.");
        Ok(())
    }

    /// Forces the device into a known framing state.
    ///
    /// Switches to sync mode, discards one full frame, then discards one
    /// length-prefixed filler run. Leaves the device in sync mode.
    pub fn sync(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.set_mode(Mode::Sync)?;
        self.skip_frame()?;
        self.skip_filler()?;
        Ok(())
    }

    /// Switches the framing mode.
    ///
    /// The device needs one frame period to notice the state change and a
    /// settle delay on either side of the mode command.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Tof10Error<IF::Error>> {
        debug!("Setting mode to {:?}", mode);
        self.session.mode = mode;
        self.skip_frame()?;
        self.settle();
        self.send(Command::SetMode(mode))?;
        self.settle();
        Ok(())
    }

    /// Enters normal mode with the given distance and rate, and remembers
    /// both for recovery.
    pub fn configure(&mut self, distance: Distance, rate: Rate) -> Result<(), Tof10Error<IF::Error>> {
        debug!("Configuring distance {:?}, rate {:?}", distance, rate);
        self.session.distance = distance;
        self.session.rate = rate;

        self.set_mode(Mode::Normal)?;

        self.send(Command::SetDistance(distance))?;
        self.settle();
        self.skip_frame()?;

        self.send(Command::SetRate(rate))?;
        self.settle();
        self.skip_frame()?;
        Ok(())
    }

    /// Full protocol recovery after a framing fault: resynchronize, then
    /// reapply the distance and rate from `session`.
    pub(super) fn recover(&mut self, session: SessionState) -> Result<(), Tof10Error<IF::Error>> {
        warn!(
            "Resynchronizing; restoring distance {:?}, rate {:?}",
            session.distance, session.rate
        );
        self.sync()?;
        self.configure(session.distance, session.rate)
    }

    /// Puts the device in standby.
    pub fn sleep(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.set_power(Power::Standby)
    }

    /// Wakes the device from standby.
    pub fn wakeup(&mut self) -> Result<(), Tof10Error<IF::Error>> {
        self.set_power(Power::Active)
    }

    fn set_power(&mut self, power: Power) -> Result<(), Tof10Error<IF::Error>> {
        self.send(Command::SetPower(power))?;
        self.settle();
        Ok(())
    }

    /// Sets the indicator LED color.
    pub fn led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), Tof10Error<IF::Error>> {
        self.send(Command::LedBlue(blue))?;
        self.send(Command::LedRed(red))?;
        self.send(Command::LedGreen(green))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{Event, MockInterface};
    use super::*;
    use crate::common::{frame::FRAME_SIZE, Config};

    fn driver(config: Config) -> SyncDriver<MockInterface> {
        SyncDriver::new(MockInterface::new(), config).unwrap()
    }

    #[test]
    fn test_set_mode_sequence() {
        let mut d = driver(Config::default());
        d.set_mode(Mode::Normal).unwrap();
        assert_eq!(
            d.interface.log.as_slice(),
            &[
                Event::Bytes(FRAME_SIZE),
                Event::DelayMs(500),
                Event::Command { id: 0x00, value: 0x00 },
                Event::DelayMs(500),
            ]
        );
        assert_eq!(d.session().mode, Mode::Normal);
    }

    #[test]
    fn test_sync_sequence() {
        let mut mock = MockInterface::new();
        // Filler length byte follows the frame flush in set_mode and the one in sync.
        mock.stage_byte(2 * FRAME_SIZE, 3);
        let mut d = SyncDriver::new(mock, Config::default()).unwrap();
        d.sync().unwrap();
        assert_eq!(
            d.interface.log.as_slice(),
            &[
                Event::Bytes(FRAME_SIZE),
                Event::DelayMs(500),
                Event::Command { id: 0x00, value: 0xFF },
                Event::DelayMs(500),
                Event::Bytes(FRAME_SIZE + 1 + 3),
            ]
        );
        assert_eq!(d.session().mode, Mode::Sync);
    }

    #[test]
    fn test_sync_is_repeatable() {
        const FILLER: usize = 7;
        // Bytes clocked by one sync: two frame flushes, the length byte and the filler.
        const PER_SYNC: usize = 2 * FRAME_SIZE + 1 + FILLER;
        let mut mock = MockInterface::new();
        mock.stage_byte(2 * FRAME_SIZE, FILLER as u8);
        mock.stage_byte(PER_SYNC + 2 * FRAME_SIZE, FILLER as u8);
        let mut d = SyncDriver::new(mock, Config::default()).unwrap();

        d.sync().unwrap();
        let first = d.interface.log.clone();
        assert_eq!(first.last(), Some(&Event::Bytes(FRAME_SIZE + 1 + FILLER)));
        d.interface.log.clear();
        d.sync().unwrap();
        assert_eq!(first, d.interface.log);
        assert_eq!(d.interface.bytes_transferred, 2 * PER_SYNC);
    }

    #[test]
    fn test_configure_sequence() {
        let mut d = driver(Config::default());
        d.configure(Distance::Long, Rate::High).unwrap();
        assert_eq!(
            d.interface.log.as_slice(),
            &[
                Event::Bytes(FRAME_SIZE),
                Event::DelayMs(500),
                Event::Command { id: 0x00, value: 0x00 },
                Event::DelayMs(500),
                Event::Command { id: 0x12, value: 0x01 },
                Event::DelayMs(500),
                Event::Bytes(FRAME_SIZE),
                Event::Command { id: 0x11, value: 0x00 },
                Event::DelayMs(500),
                Event::Bytes(FRAME_SIZE),
            ]
        );
        let session = d.session();
        assert_eq!(session.mode, Mode::Normal);
        assert_eq!(session.distance, Distance::Long);
        assert_eq!(session.rate, Rate::High);
    }

    #[test]
    fn test_init_applies_configured_session() {
        let mut d = driver(Config::new(Distance::Long, Rate::Low));
        d.init().unwrap();
        assert_eq!(
            d.interface.commands().as_slice(),
            &[(0x00, 0xFF), (0x00, 0x00), (0x12, 0x01), (0x10, 0x00)]
        );
        assert_eq!(d.session().mode, Mode::Normal);
    }

    #[test]
    fn test_recover_uses_given_session() {
        let mut d = driver(Config::default());
        let session = SessionState {
            mode: Mode::Normal,
            distance: Distance::Long,
            rate: Rate::High,
        };
        d.recover(session).unwrap();
        assert_eq!(
            d.interface.commands().as_slice(),
            &[(0x00, 0xFF), (0x00, 0x00), (0x12, 0x01), (0x11, 0x00)]
        );
        assert_eq!(d.session(), session);
    }

    #[test]
    fn test_sleep_and_wakeup() {
        let mut d = driver(Config::default());
        d.sleep().unwrap();
        d.wakeup().unwrap();
        assert_eq!(
            d.interface.log.as_slice(),
            &[
                Event::Command { id: 0x80, value: 0x01 },
                Event::DelayMs(500),
                Event::Command { id: 0x80, value: 0x00 },
                Event::DelayMs(500),
            ]
        );
    }

    #[test]
    fn test_led_order() {
        let mut d = driver(Config::default());
        d.led(1, 2, 3).unwrap();
        assert_eq!(
            d.interface.commands().as_slice(),
            &[(0xC2, 3), (0xC0, 1), (0xC1, 2)]
        );
    }

    #[test]
    fn test_shorter_settle_delay() {
        let mut d = driver(Config::default().settle_delay(core::time::Duration::from_millis(1)));
        d.sleep().unwrap();
        assert_eq!(d.interface.log.last(), Some(&Event::DelayMs(1)));
    }
}
