use crate::button::ButtonId;

/// Peak gain of a sounding tone before the player's volume setting is applied.
pub const TONE_PEAK_GAIN: f32 = 0.4;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    StreamUnavailable(String),

    #[error("failed to create audio sink: {0}")]
    SinkUnavailable(String),
}

/// The single oscillator + gain stage tones are played through.
///
/// Implementations start "suspended" after `open` and only produce sound once `resume` has been
/// called, the way platform audio is often held until a user gesture.
pub trait ToneOutput {
    fn open(&mut self) -> Result<(), AudioError>;
    fn resume(&mut self);
    fn set_frequency(&mut self, hz: f32);
    /// Glides the output gain toward `target` (0.0 = silent).
    fn ramp_gain(&mut self, target: f32);
}

/// Output that accepts everything and plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

impl ToneOutput for SilentOutput {
    fn open(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn resume(&mut self) {}

    fn set_frequency(&mut self, _hz: f32) {}

    fn ramp_gain(&mut self, _target: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputState {
    Closed,
    Open,
    Unavailable,
}

/// Monophonic tone player for the clue buttons.
///
/// Opens its output lazily on the first tone. If the output cannot be opened the emitter logs
/// once and stays silent for the rest of the session; game flow is unaffected.
#[derive(Debug)]
pub struct ToneEmitter<O> {
    output: O,
    state: OutputState,
    sounding: Option<ButtonId>,
    peak_gain: f32,
}

impl<O: ToneOutput> ToneEmitter<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: OutputState::Closed,
            sounding: None,
            peak_gain: TONE_PEAK_GAIN,
        }
    }

    /// Scales the peak gain by `volume` (clamped to 0..=1).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.peak_gain = TONE_PEAK_GAIN * volume.clamp(0.0, 1.0);
        self
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn sounding(&self) -> Option<ButtonId> {
        self.sounding
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding.is_some()
    }

    pub fn peak_gain(&self) -> f32 {
        self.peak_gain
    }

    /// Starts `button`'s tone.
    ///
    /// While another tone is sounding the request is ignored unless `force_restart` is set, in
    /// which case the new pitch cuts over immediately.
    pub fn start_tone(&mut self, button: ButtonId, force_restart: bool) {
        if !self.ensure_open() {
            return;
        }
        if self.sounding.is_some() && !force_restart {
            return;
        }
        self.output.resume();
        self.output.set_frequency(button.frequency_hz());
        self.output.ramp_gain(self.peak_gain);
        self.sounding = Some(button);
    }

    pub fn stop_tone(&mut self) {
        if self.sounding.take().is_some() {
            self.output.ramp_gain(0.0);
        }
    }

    fn ensure_open(&mut self) -> bool {
        match self.state {
            OutputState::Open => true,
            OutputState::Unavailable => false,
            OutputState::Closed => match self.output.open() {
                Ok(()) => {
                    log::debug!("tone output opened");
                    self.state = OutputState::Open;
                    true
                }
                Err(err) => {
                    log::warn!("audio disabled: {err}");
                    self.state = OutputState::Unavailable;
                    false
                }
            },
        }
    }
}
