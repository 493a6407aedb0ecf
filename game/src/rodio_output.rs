use std::sync::Arc;
use std::time::Duration;

use engine::audio::ToneVoice;
use parking_lot::Mutex;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::tone::{AudioError, ToneOutput};

const SAMPLE_RATE: u32 = 44_100;
// Samples rendered between reads of the shared parameters (~1.5 ms).
const PARAM_REFRESH: u32 = 64;

#[derive(Debug, Clone, Copy)]
struct VoiceParams {
    freq_hz: f32,
    gain_target: f32,
}

/// Endless mono stream of the current tone. Reads parameter changes from the game thread.
struct ToneSource {
    voice: ToneVoice,
    params: Arc<Mutex<VoiceParams>>,
    until_refresh: u32,
}

impl ToneSource {
    fn new(params: Arc<Mutex<VoiceParams>>) -> Self {
        Self {
            voice: ToneVoice::new(SAMPLE_RATE),
            params,
            until_refresh: 0,
        }
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.until_refresh == 0 {
            let p = *self.params.lock();
            self.voice.set_freq_hz(p.freq_hz);
            self.voice.set_gain_target(p.gain_target);
            self.until_refresh = PARAM_REFRESH;
        }
        self.until_refresh -= 1;
        Some(self.voice.next_sample())
    }
}

impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

struct Device {
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
}

/// Plays tones on the default output device through a single always-running voice.
pub struct RodioOutput {
    params: Arc<Mutex<VoiceParams>>,
    device: Option<Device>,
}

impl Default for RodioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioOutput {
    pub fn new() -> Self {
        Self {
            params: Arc::new(Mutex::new(VoiceParams {
                freq_hz: 440.0,
                gain_target: 0.0,
            })),
            device: None,
        }
    }
}

impl ToneOutput for RodioOutput {
    fn open(&mut self) -> Result<(), AudioError> {
        if self.device.is_some() {
            return Ok(());
        }
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::StreamUnavailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::SinkUnavailable(e.to_string()))?;
        // Held until the first tone; see `resume`.
        sink.pause();
        sink.append(ToneSource::new(Arc::clone(&self.params)));
        self.device = Some(Device {
            _stream: stream,
            _handle: handle,
            sink,
        });
        Ok(())
    }

    fn resume(&mut self) {
        if let Some(device) = &self.device {
            if device.sink.is_paused() {
                device.sink.play();
            }
        }
    }

    fn set_frequency(&mut self, hz: f32) {
        self.params.lock().freq_hz = hz;
    }

    fn ramp_gain(&mut self, target: f32) {
        self.params.lock().gain_target = target;
    }
}
