//! Provider payload decoding: base64 text to normalised PCM samples.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::AudioError;

/// Sample layout of raw 16-bit PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmFormat {
    /// What the speech provider returns: 24 kHz mono.
    pub const PROVIDER: Self = Self {
        sample_rate: 24_000,
        channels: 1,
    };
}

/// Immutable, fully materialised PCM audio.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl DecodedAudio {
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of sample frames (samples per channel).
    #[must_use]
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        #[allow(clippy::cast_precision_loss)]
        let frames = self.frames() as f64;
        Duration::from_secs_f64(frames / f64::from(self.sample_rate))
    }
}

/// Transport-decode a base64 payload (standard alphabet, surrounding
/// whitespace ignored).
pub fn decode(payload: &str) -> Result<Vec<u8>, AudioError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(AudioError::Decode("empty payload".to_string()));
    }
    STANDARD
        .decode(trimmed)
        .map_err(|e| AudioError::Decode(format!("invalid base64: {e}")))
}

/// Interpret `bytes` as signed 16-bit little-endian PCM.
pub fn decode_audio(
    bytes: &[u8],
    sample_rate: u32,
    channels: u16,
) -> Result<DecodedAudio, AudioError> {
    if bytes.is_empty() {
        return Err(AudioError::Decode("no audio bytes".to_string()));
    }
    if channels == 0 || sample_rate == 0 {
        return Err(AudioError::Decode(format!(
            "unsupported format: {sample_rate} Hz, {channels} channel(s)"
        )));
    }
    let frame_bytes = 2 * usize::from(channels);
    if bytes.len() % frame_bytes != 0 {
        return Err(AudioError::Decode(format!(
            "{} bytes is not a whole number of {channels}-channel 16-bit frames",
            bytes.len()
        )));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
        .collect();

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// Decode a provider payload in one step.
pub fn decode_payload(payload: &str, format: PcmFormat) -> Result<DecodedAudio, AudioError> {
    let bytes = decode(payload)?;
    decode_audio(&bytes, format.sample_rate, format.channels)
}

#[cfg(test)]
pub(crate) fn test_audio(frames: usize) -> DecodedAudio {
    DecodedAudio {
        samples: vec![0.0; frames],
        sample_rate: PcmFormat::PROVIDER.sample_rate,
        channels: PcmFormat::PROVIDER.channels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_normalised_little_endian() {
        // 0x0000, 0x7fff, 0x8000
        let bytes = [0x00, 0x00, 0xff, 0x7f, 0x00, 0x80];
        let audio = decode_audio(&bytes, 24_000, 1).unwrap();

        assert_eq!(audio.samples().len(), 3);
        assert!(audio.samples()[0].abs() < f32::EPSILON);
        assert!((audio.samples()[1] - 32767.0 / 32768.0).abs() < 1e-6);
        assert!((audio.samples()[2] + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = decode_audio(&[1, 2, 3], 24_000, 1).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }

    #[test]
    fn stereo_needs_four_byte_frames() {
        assert!(decode_audio(&[0, 0, 0, 0, 0, 0], 24_000, 2).is_err());
        let audio = decode_audio(&[0; 8], 24_000, 2).unwrap();
        assert_eq!(audio.frames(), 2);
    }

    #[test]
    fn empty_input_and_zero_format_are_rejected() {
        assert!(decode_audio(&[], 24_000, 1).is_err());
        assert!(decode_audio(&[0, 0], 0, 1).is_err());
        assert!(decode_audio(&[0, 0], 24_000, 0).is_err());
        assert!(decode("   ").is_err());
        assert!(decode("not base64!").is_err());
    }

    #[test]
    fn payload_whitespace_is_ignored() {
        // "AAAAAA==" is four zero bytes: two mono frames.
        let audio = decode_payload("  AAAAAA==\n", PcmFormat::PROVIDER).unwrap();
        assert_eq!(audio.frames(), 2);
        assert_eq!(audio.sample_rate(), 24_000);

        // "AAAA" is three bytes: misaligned.
        let err = decode_payload(" AAAA ", PcmFormat::PROVIDER).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }

    #[test]
    fn duration_follows_sample_rate() {
        let audio = decode_audio(&vec![0; 48_000], 24_000, 1).unwrap();
        assert_eq!(audio.duration(), Duration::from_secs(1));
    }
}
