//! Sample-level tone synthesis.
//!
//! Pure DSP with no device dependency: callers pull samples one at a time and push them into
//! whatever output they own.

use std::f32::consts::TAU;

/// Free-running sine oscillator. Frequency changes keep the phase continuous so retuning mid-note
/// does not click.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    sample_rate: u32,
    freq_hz: f32,
    phase: f32,
}

impl Oscillator {
    pub fn new(sample_rate: u32, freq_hz: f32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            freq_hz: freq_hz.max(0.0),
            phase: 0.0,
        }
    }

    pub fn set_freq_hz(&mut self, freq_hz: f32) {
        self.freq_hz = freq_hz.max(0.0);
    }

    pub fn next_sample(&mut self) -> f32 {
        let out = self.phase.sin();
        self.phase = (self.phase + TAU * self.freq_hz / self.sample_rate as f32) % TAU;
        out
    }
}

/// One-pole gain smoother: each sample moves `current` a fixed fraction of the way to `target`.
///
/// With time constant `tau`, the gain covers ~63% of the distance after `tau` seconds and is
/// within 1% after ~4.6 `tau`.
#[derive(Debug, Clone, PartialEq)]
pub struct GainRamp {
    current: f32,
    target: f32,
    coeff: f32,
}

impl GainRamp {
    pub fn new(sample_rate: u32, time_constant_secs: f32) -> Self {
        let samples = sample_rate.max(1) as f32 * time_constant_secs;
        let coeff = if samples <= 0.0 {
            1.0
        } else {
            1.0 - (-1.0 / samples).exp()
        };
        Self {
            current: 0.0,
            target: 0.0,
            coeff,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target.max(0.0);
    }

    pub fn next_gain(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }
}

/// Oscillator plus gain ramp: a single monophonic voice.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneVoice {
    osc: Oscillator,
    gain: GainRamp,
}

impl ToneVoice {
    pub const DEFAULT_TIME_CONSTANT_SECS: f32 = 0.01;

    pub fn new(sample_rate: u32) -> Self {
        Self {
            osc: Oscillator::new(sample_rate, 440.0),
            gain: GainRamp::new(sample_rate, Self::DEFAULT_TIME_CONSTANT_SECS),
        }
    }

    pub fn set_freq_hz(&mut self, freq_hz: f32) {
        self.osc.set_freq_hz(freq_hz);
    }

    pub fn set_gain_target(&mut self, target: f32) {
        self.gain.set_target(target);
    }

    pub fn next_sample(&mut self) -> f32 {
        let g = self.gain.next_gain();
        let s = self.osc.next_sample();
        (s * g).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_ramp_converges_within_a_few_time_constants() {
        let sr = 48_000;
        let mut ramp = GainRamp::new(sr, 0.01);
        ramp.set_target(0.4);

        // One time constant: ~63%.
        for _ in 0..480 {
            ramp.next_gain();
        }
        assert!((ramp.current() - 0.4 * 0.632).abs() < 0.01, "{}", ramp.current());

        // Five time constants: effectively there.
        for _ in 0..(480 * 4) {
            ramp.next_gain();
        }
        assert!((ramp.current() - 0.4).abs() < 0.004);

        ramp.set_target(0.0);
        for _ in 0..(480 * 5) {
            ramp.next_gain();
        }
        assert!(ramp.current() < 0.004);
    }

    #[test]
    fn silent_voice_outputs_zero() {
        let mut voice = ToneVoice::new(48_000);
        for _ in 0..100 {
            assert_eq!(voice.next_sample(), 0.0);
        }
    }

    #[test]
    fn oscillator_completes_one_cycle_per_period() {
        // 100 Hz at 1 kHz: 10 samples per cycle, so sample 10 is back at phase ~0.
        let mut osc = Oscillator::new(1_000, 100.0);
        let first = osc.next_sample();
        for _ in 0..9 {
            osc.next_sample();
        }
        assert!((osc.next_sample() - first).abs() < 1e-3);
    }
}
