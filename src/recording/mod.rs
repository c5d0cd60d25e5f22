//! Captured-audio sink.
//!
//! The voice adapter pushes PCM frames into a `WavSink` while a recording is
//! live; the pipeline flushes the sink to the session's file path when the
//! recording stops.

use anyhow::Result;
use hound::{WavSpec, WavWriter};
use std::path::Path;
use tracing::info;

/// Accumulates mono PCM samples and writes them out as a 16-bit WAV file.
#[derive(Debug, Clone)]
pub struct WavSink {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl WavSink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn push(&mut self, frame: &[i16]) {
        self.samples.extend_from_slice(frame);
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn flush(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        info!("Recording saved: {:?} ({} samples)", path, self.samples.len());
        Ok(())
    }
}
