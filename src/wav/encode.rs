//! RIFF wave writer: `RIFF`/`WAVE` header, 16-byte PCM `fmt `, one `data` chunk.

use super::{FormatTag, SampleDepth, WaveFormat};
use crate::error::CodecError;
use crate::record::Record;

/// Assemble a complete PCM wave file.
///
/// `width` is the channel count and `height` the frame count; bit depth is
/// picked by [`SampleDepth::for_samples`].
pub fn encode(
    samples: &[i32],
    width: u32,
    height: u32,
    sample_rate: u32,
) -> Result<Vec<u8>, CodecError> {
    let channels = u16::try_from(width)
        .ok()
        .filter(|&c| c > 0)
        .ok_or_else(|| {
            CodecError::InvalidRecord(format!("{width} channels cannot be written as wave"))
        })?;
    if sample_rate == 0 {
        return Err(CodecError::InvalidRecord("sample rate must be positive".into()));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    if samples.len() != expected {
        return Err(CodecError::InvalidRecord(format!(
            "{width} channels x {height} frames needs {expected} samples, got {}",
            samples.len()
        )));
    }

    let depth = SampleDepth::for_samples(samples);
    if usize::from(channels) * depth.bytes() > usize::from(u16::MAX) {
        return Err(CodecError::InvalidRecord(format!(
            "{channels} channels overflow the block alignment field"
        )));
    }
    let format = WaveFormat::pcm(channels, sample_rate, depth.bits());

    let data_size = u32::try_from(samples.len() * depth.bytes())
        .ok()
        .filter(|&n| n <= u32::MAX - 36)
        .ok_or_else(|| CodecError::LimitExceeded("wave data exceeds 4 GiB".into()))?;
    let riff_size = 36 + data_size;

    let mut out = Vec::with_capacity(44 + data_size as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&format.format_tag.to_u16().to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&format.byte_rate.to_le_bytes());
    out.extend_from_slice(&format.block_align.to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    match depth {
        SampleDepth::U8 => out.extend(samples.iter().map(|&v| v as u8)),
        SampleDepth::I16 => {
            for &v in samples {
                out.extend_from_slice(&(v as i16).to_le_bytes());
            }
        }
        SampleDepth::I32 => {
            for &v in samples {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
    }
    Ok(out)
}

/// Encode a record's output samples; `fallback_rate` covers image records.
pub fn encode_record(record: &Record, fallback_rate: u32) -> Result<Vec<u8>, CodecError> {
    if record.is_color() {
        return Err(CodecError::UnsupportedPixelFormat(
            "color records cannot be written as wave".into(),
        ));
    }
    encode(
        record.output_samples(),
        record.width(),
        record.height(),
        record.sample_rate().unwrap_or(fallback_rate),
    )
}

impl WaveFormat {
    /// Integer PCM format with derived byte rate and block alignment.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels.saturating_mul(bits_per_sample / 8);
        Self {
            format_tag: FormatTag::Pcm,
            channels,
            sample_rate,
            byte_rate: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample,
        }
    }
}
