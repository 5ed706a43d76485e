//! rodio [`Source`] over a shared decoded buffer.
//!
//! Lets every playback read the cached samples through the `Arc` instead of
//! copying them into a fresh `SamplesBuffer`.

use std::sync::Arc;
use std::time::Duration;

use rodio::Source;

use crate::decode::DecodedAudio;

pub(crate) struct SharedSamples {
    audio: Arc<DecodedAudio>,
    position: usize,
}

impl SharedSamples {
    pub(crate) const fn new(audio: Arc<DecodedAudio>) -> Self {
        Self { audio, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.audio.samples().len().saturating_sub(self.position)
    }
}

impl Iterator for SharedSamples {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.audio.samples().get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl Source for SharedSamples {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.remaining())
    }

    fn channels(&self) -> u16 {
        self.audio.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.audio.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.audio.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_audio;

    #[test]
    fn yields_every_sample_once() {
        let audio = Arc::new(decode_audio(&[0, 0, 0, 0x40, 0, 0xc0], 24_000, 1).unwrap());
        let source = SharedSamples::new(Arc::clone(&audio));

        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), 24_000);
        assert_eq!(source.current_frame_len(), Some(3));

        let samples: Vec<f32> = source.collect();
        assert_eq!(samples, [0.0, 0.5, -0.5]);
    }
}
