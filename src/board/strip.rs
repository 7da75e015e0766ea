//! WS2812 status strip on PWM0.
//!
//! The encoded frame is replayed once by the PWM sequencer; the line then
//! idles low, which doubles as the strip's latch gap.

use embassy_nrf::gpio::AnyPin;
use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::{
    Config, Prescaler, SequenceConfig, SequenceLoad, SequencePwm, SingleSequenceMode,
    SingleSequencer,
};
use embassy_time::{Duration, Timer};

use crate::config::LED_BRIGHTNESS;
use crate::error::Error;
use crate::led::{self, LedFrame, PWM_MAX_DUTY, PWM_WORDS, RES};

/// One PWM period is 1.25 µs; round the whole sequence up.
const FRAME_MICROS: u64 = (PWM_WORDS as u64 * 5).div_ceil(4) + 10;

pub struct LedStrip {
    pwm: SequencePwm<'static, PWM0>,
    words: [u16; PWM_WORDS],
}

impl LedStrip {
    pub fn new(pwm: PWM0, data: AnyPin) -> Result<Self, Error> {
        let mut config = Config::default();
        config.sequence_load = SequenceLoad::Common;
        config.prescaler = Prescaler::Div1;
        config.max_duty = PWM_MAX_DUTY;
        let pwm = SequencePwm::new_1ch(pwm, data, config).map_err(|_| Error::Led)?;
        Ok(Self {
            pwm,
            words: [RES; PWM_WORDS],
        })
    }

    /// Push one frame out and wait until the strip has latched it.
    pub async fn write(&mut self, frame: &LedFrame) -> Result<(), Error> {
        led::encode(frame, LED_BRIGHTNESS, &mut self.words);
        let sequencer = SingleSequencer::new(&mut self.pwm, &self.words, SequenceConfig::default());
        sequencer
            .start(SingleSequenceMode::Times(1))
            .map_err(|_| Error::Led)?;
        Timer::after(Duration::from_micros(FRAME_MICROS)).await;
        Ok(())
    }
}
