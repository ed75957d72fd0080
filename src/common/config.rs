// src/common/config.rs

use core::fmt::Debug;
use core::time::Duration;

use super::command::{Distance, Mode, Rate};
use super::error::Tof10Error;
use super::timing;

/// Driver configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// Distance range applied by `init` and restored after a resync.
    pub distance: Distance,
    /// Rate applied by `init` and restored after a resync.
    pub rate: Rate,
    /// Full-frame transfers allowed per acquisition.
    pub max_attempts: u32,
    /// Wall-clock budget per acquisition. `None` bounds by attempts only.
    pub acquire_timeout: Option<Duration>,
    /// Delay after mode and configuration commands.
    pub settle_delay: Duration,
    /// Time allowed for one single-byte transfer.
    pub byte_timeout: Duration,
}

impl Config {
    /// Creates a `Config` with the given session parameters and default limits.
    pub fn new(distance: Distance, rate: Rate) -> Config {
        Config {
            distance,
            rate,
            ..Config::default()
        }
    }

    pub fn distance(mut self, distance: Distance) -> Self {
        self.distance = distance;
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Overrides the settle delay. Only shorten it for simulated devices.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn byte_timeout(mut self, timeout: Duration) -> Self {
        self.byte_timeout = timeout;
        self
    }

    /// Rejects settings that would make acquisition unable to terminate or to succeed.
    pub fn validate<E: Debug>(&self) -> Result<(), Tof10Error<E>> {
        if self.max_attempts == 0 {
            return Err(Tof10Error::InvalidConfig("max_attempts must be at least 1"));
        }
        if self.byte_timeout.is_zero() {
            return Err(Tof10Error::InvalidConfig("byte_timeout must be non-zero"));
        }
        if self.acquire_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Tof10Error::InvalidConfig("acquire_timeout must be non-zero"));
        }
        Ok(())
    }
}

impl Default for Config {
    /// Short distance, low rate, 16 attempts, 10 s acquisition budget.
    fn default() -> Config {
        Config {
            distance: Distance::default(),
            rate: Rate::default(),
            max_attempts: timing::MAX_ATTEMPTS_DEFAULT,
            acquire_timeout: Some(timing::ACQUIRE_TIMEOUT_DEFAULT),
            settle_delay: timing::SETTLE_DELAY,
            byte_timeout: timing::BYTE_TIMEOUT_DEFAULT,
        }
    }
}

/// What the device was last told. Recovery restores `distance` and `rate`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SessionState {
    pub mode: Mode,
    pub distance: Distance,
    pub rate: Rate,
}

impl SessionState {
    /// The device powers up expecting sync framing.
    pub fn new(distance: Distance, rate: Rate) -> Self {
        SessionState {
            mode: Mode::Sync,
            distance,
            rate,
        }
    }
}

impl From<&Config> for SessionState {
    fn from(config: &Config) -> Self {
        SessionState::new(config.distance, config.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.distance, Distance::Short);
        assert_eq!(config.rate, Rate::Low);
        assert_eq!(config.settle_delay, Duration::from_millis(500));
        assert!(config.validate::<()>().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = Config::new(Distance::Long, Rate::Low)
            .rate(Rate::High)
            .max_attempts(3)
            .acquire_timeout(None);
        assert_eq!(config.distance, Distance::Long);
        assert_eq!(config.rate, Rate::High);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.acquire_timeout, None);
        assert!(config.validate::<()>().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        assert!(matches!(
            Config::default().max_attempts(0).validate::<()>(),
            Err(Tof10Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::default().byte_timeout(Duration::ZERO).validate::<()>(),
            Err(Tof10Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::default().acquire_timeout(Some(Duration::ZERO)).validate::<()>(),
            Err(Tof10Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_session_starts_in_sync_mode() {
        let session = SessionState::from(&Config::new(Distance::Long, Rate::High));
        assert_eq!(session.mode, Mode::Sync);
        assert_eq!(session.distance, Distance::Long);
        assert_eq!(session.rate, Rate::High);
    }
}
