//! cpal output channel playing one loop buffer a bounded number of times.

use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, FromSample, SampleFormat, SizedSample, StreamConfig};

use super::{AudioChannel, AudioError, LoopBuffer};
use crate::params::AudioDeviceConfig;

/// Playback cursor shared between the main thread and the audio callback
#[derive(Debug)]
pub struct ChannelState {
    buffer: Option<LoopBuffer>,
    /// Fractional read position (source frames)
    position: f64,
    /// Source frames consumed per output frame
    step: f64,
    remaining_plays: u32,
    output_rate_hz: u32,
}

impl ChannelState {
    pub fn new(output_rate_hz: u32) -> Self {
        Self {
            buffer: None,
            position: 0.0,
            step: 1.0,
            remaining_plays: 0,
            output_rate_hz,
        }
    }

    /// Replace the current loop and rewind
    pub fn start(&mut self, buffer: LoopBuffer, plays: u32) {
        self.step = buffer.sample_rate_hz() as f64 / self.output_rate_hz.max(1) as f64;
        self.remaining_plays = if buffer.frames() == 0 { 0 } else { plays };
        self.position = 0.0;
        self.buffer = Some(buffer);
    }

    pub fn is_busy(&self) -> bool {
        self.remaining_plays > 0
    }

    pub fn remaining_plays(&self) -> u32 {
        self.remaining_plays
    }

    /// Next output frame (nearest source frame), `None` once all plays are done
    pub fn next_frame(&mut self) -> Option<[i16; 2]> {
        if self.remaining_plays == 0 {
            return None;
        }
        let buffer = self.buffer.as_ref()?;
        let frames = buffer.frames();

        let frame = buffer.frame(self.position as usize);
        self.position += self.step;
        if self.position >= frames as f64 {
            self.position = 0.0;
            self.remaining_plays -= 1;
        }
        Some(frame)
    }

    /// Fill an interleaved device buffer; extra device channels repeat L/R
    pub fn fill<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: SizedSample + FromSample<i16>,
    {
        for frame in data.chunks_mut(channels.max(1)) {
            match self.next_frame() {
                Some([left, right]) => {
                    for (c, sample) in frame.iter_mut().enumerate() {
                        let value = if c % 2 == 0 { left } else { right };
                        *sample = T::from_sample(value);
                    }
                }
                None => frame.fill(T::EQUILIBRIUM),
            }
        }
    }
}

/// Audio channel backed by the default cpal output device
pub struct CpalChannel {
    state: Arc<Mutex<ChannelState>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl CpalChannel {
    /// Open the default output device and start a (silent) stream
    pub fn open(wanted: &AudioDeviceConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let (config, sample_format) = choose_config(&device, wanted)?;

        log::info!(
            "Audio: {} @ {}Hz, {} ch, {:?}, buffer {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate.0,
            config.channels,
            sample_format,
            config.buffer_size
        );

        let state = Arc::new(Mutex::new(ChannelState::new(config.sample_rate.0)));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&state))?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&state))?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&state))?,
            other => return Err(AudioError::UnsupportedSampleFormat(other)),
        };

        stream.play()?;

        Ok(Self {
            state,
            _stream: stream,
        })
    }
}

impl AudioChannel for CpalChannel {
    fn is_busy(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_busy()
    }

    fn play(&mut self, buffer: LoopBuffer, plays: u32) -> Result<(), AudioError> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .start(buffer, plays);
        Ok(())
    }
}

/// Prefer the requested stereo rate and buffer size; otherwise take the
/// device default and let [`ChannelState`] resample
fn choose_config(
    device: &Device,
    wanted: &AudioDeviceConfig,
) -> Result<(StreamConfig, SampleFormat), AudioError> {
    let rate = cpal::SampleRate(wanted.sample_rate_hz);

    let preferred = device
        .supported_output_configs()?
        .filter(|range| range.channels() == wanted.channels)
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .max_by_key(|range| range.sample_format() == SampleFormat::I16);

    if let Some(range) = preferred {
        let buffer_size = match range.buffer_size() {
            cpal::SupportedBufferSize::Range { min, max }
                if (*min..=*max).contains(&wanted.buffer_frames) =>
            {
                BufferSize::Fixed(wanted.buffer_frames)
            }
            _ => BufferSize::Default,
        };
        let supported = range.with_sample_rate(rate);
        let mut config = supported.config();
        config.buffer_size = buffer_size;
        return Ok((config, supported.sample_format()));
    }

    let default = device.default_output_config()?;
    log::info!(
        "Audio: {}Hz stereo not offered, resampling to device default {}Hz",
        wanted.sample_rate_hz,
        default.sample_rate().0
    );
    Ok((default.config(), default.sample_format()))
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    state: Arc<Mutex<ChannelState>>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            // Never block the audio thread; a contended frame plays silence
            match state.try_lock() {
                Ok(mut state) => state.fill(data, channels),
                Err(_) => data.fill(T::EQUILIBRIUM),
            }
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
