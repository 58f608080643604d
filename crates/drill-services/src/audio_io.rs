//! Blocking mono playback on the default output device

use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use thiserror::Error;
use tracing::{debug, warn};

/// Slack on top of the clip length before we stop waiting for the device
const DRAIN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AudioOutputError {
    #[error("No audio output devices found")]
    NoDevices,
    #[error("Failed to get default output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("Failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("Failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("Output stream failed: {0}")]
    Stream(#[from] cpal::StreamError),
    #[error("Resampling failed: {0}")]
    Resample(String),
}

/// Default output device as seen by the host
#[derive(Debug, Clone)]
pub struct OutputDeviceInfo {
    pub name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Interleaved clip plus a read cursor, drained by the stream callback
struct Clip {
    frames: Vec<f32>,
    cursor: usize,
    finished: Option<Sender<Result<(), AudioOutputError>>>,
}

impl Clip {
    /// Copy the next slice into `out`, padding with silence. Returns true once
    /// every sample has been handed to the device.
    fn fill(&mut self, out: &mut [f32]) -> bool {
        let available = &self.frames[self.cursor.min(self.frames.len())..];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        out[n..].fill(0.0);
        self.cursor += n;
        self.cursor >= self.frames.len()
    }

    fn on_buffer(&mut self, out: &mut [f32]) {
        if self.fill(out) {
            if let Some(tx) = self.finished.take() {
                let _ = tx.try_send(Ok(()));
            }
        }
    }
}

/// Duplicate each mono sample across `channels`
fn interleave(mono: &[f32], channels: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(mono.len() * channels);
    for &sample in mono {
        out.extend(std::iter::repeat_n(sample, channels));
    }
    out
}

pub struct AudioOutputService;

impl AudioOutputService {
    /// Play mono samples and return once the device has consumed them
    pub fn play_blocking(samples: &[f32], sample_rate: u32) -> Result<(), AudioOutputError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioOutputError::NoDevices)?;
        let supported = device.default_output_config()?;
        let device_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;

        let mono = Self::resample(samples, sample_rate, device_rate)?;
        let clip_length = Duration::from_secs_f64(mono.len() as f64 / device_rate as f64);
        debug!(
            device = %device.name().unwrap_or_default(),
            device_rate,
            channels,
            ?clip_length,
            "Opening output stream"
        );

        let (tx, rx) = bounded(1);
        let error_tx = tx.clone();
        let mut clip = Clip {
            frames: interleave(&mono, channels),
            cursor: 0,
            finished: Some(tx),
        };

        let stream = device.build_output_stream(
            &supported.into(),
            move |out: &mut [f32], _: &cpal::OutputCallbackInfo| clip.on_buffer(out),
            move |err| {
                let _ = error_tx.try_send(Err(err.into()));
            },
            None,
        )?;
        stream.play()?;

        let outcome = match rx.recv_timeout(clip_length + DRAIN_GRACE) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(?clip_length, "Output device did not drain the tone in time");
                Ok(())
            }
            Err(RecvTimeoutError::Disconnected) => Ok(()),
        };
        drop(stream);
        outcome
    }

    /// Convert `samples` to `to_rate`; a no-op when the rates already agree
    fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioOutputError> {
        if from_rate == to_rate || samples.is_empty() {
            return Ok(samples.to_vec());
        }

        let ratio = to_rate as f64 / from_rate as f64;
        let mut resampler = FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Cubic, samples.len(), 1)
            .map_err(|e| AudioOutputError::Resample(e.to_string()))?;
        let mut channels = resampler
            .process(&[samples], None)
            .map_err(|e| AudioOutputError::Resample(e.to_string()))?;
        Ok(channels.pop().unwrap_or_default())
    }

    /// Name and native format of the default output device
    pub fn default_device_info() -> Result<OutputDeviceInfo, AudioOutputError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioOutputError::NoDevices)?;
        let config = device.default_output_config()?;

        Ok(OutputDeviceInfo {
            name: device.name().unwrap_or_default(),
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(frames: Vec<f32>) -> (Clip, crossbeam_channel::Receiver<Result<(), AudioOutputError>>) {
        let (tx, rx) = bounded(1);
        (Clip { frames, cursor: 0, finished: Some(tx) }, rx)
    }

    #[test]
    fn test_interleave_duplicates_channels() {
        assert_eq!(interleave(&[0.1, 0.2], 2), vec![0.1, 0.1, 0.2, 0.2]);
        assert_eq!(interleave(&[0.5], 1), vec![0.5]);
        assert!(interleave(&[], 2).is_empty());
    }

    #[test]
    fn test_clip_pads_tail_with_silence() {
        let (mut clip, rx) = clip(vec![1.0, 2.0, 3.0]);

        let mut buf = [9.0; 2];
        clip.on_buffer(&mut buf);
        assert_eq!(buf, [1.0, 2.0]);
        assert!(rx.is_empty());

        clip.on_buffer(&mut buf);
        assert_eq!(buf, [3.0, 0.0]);
        assert!(rx.try_recv().unwrap().is_ok());

        // later callbacks write silence and signal nothing further
        clip.on_buffer(&mut buf);
        assert_eq!(buf, [0.0, 0.0]);
        assert!(rx.is_empty());
    }

    #[test]
    fn test_resample_passthrough_at_same_rate() {
        let samples = vec![0.0, 0.5, -0.5, 0.25];
        let out = AudioOutputService::resample(&samples, 44_100, 44_100).unwrap();
        assert_eq!(out, samples);
        assert!(AudioOutputService::resample(&[], 44_100, 48_000).unwrap().is_empty());
    }

    #[test]
    fn test_resample_up_lengthens_clip() {
        let samples: Vec<f32> = (0..4_410).map(|i| (i as f32 * 0.05).sin() * 0.3).collect();
        let out = AudioOutputService::resample(&samples, 44_100, 48_000).unwrap();
        assert!(out.len() > samples.len());
    }
}
