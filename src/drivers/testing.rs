//! In-memory stand-ins for embedded-hal peripherals.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType as DigitalErrorType, OutputPin};
use embedded_hal::pwm::{self, ErrorType as PwmErrorType, SetDutyCycle};

#[derive(Debug)]
pub struct FakeError;

impl pwm::Error for FakeError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

#[derive(Debug, Default)]
pub struct FakePwm {
    pub max: u16,
    pub duty: u16,
    pub history: Vec<u16>,
    pub fail: bool,
}

impl FakePwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            ..Self::default()
        }
    }
}

impl PwmErrorType for FakePwm {
    type Error = FakeError;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), FakeError> {
        if self.fail {
            return Err(FakeError);
        }
        self.duty = duty;
        self.history.push(duty);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakePin {
    pub high: bool,
    pub fail: bool,
}

impl DigitalErrorType for FakePin {
    type Error = FakeError;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), FakeError> {
        if self.fail {
            return Err(FakeError);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), FakeError> {
        if self.fail {
            return Err(FakeError);
        }
        self.high = true;
        Ok(())
    }
}

/// Delay that returns immediately and counts what it was asked to wait.
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl NoDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}
