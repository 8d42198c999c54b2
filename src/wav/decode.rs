//! RIFF wave decoder: container walk, `fmt ` parse, PCM sample unpacking.

use super::chunk::{ChunkId, ChunkReader};
use super::{FormatTag, WaveFormat};
use crate::error::CodecError;
use crate::limits::Limits;
use crate::record::{Advisory, Record};

/// The parts of a RIFF wave container that survive into decoding.
#[derive(Clone, Debug)]
pub struct WaveContainer<'a> {
    pub form_type: ChunkId,
    pub format: WaveFormat,
    /// Exactly the declared length of the `data` chunk.
    pub data: &'a [u8],
}

/// Walk a RIFF wave container.
///
/// With `strict_form` a form type other than `WAVE` is a format error;
/// otherwise it is logged and decoding continues.
pub fn read_container(data: &[u8], strict_form: bool) -> Result<WaveContainer<'_>, CodecError> {
    if data.len() < 12 {
        return Err(CodecError::truncated(12, data.len()));
    }
    let tag = ChunkId([data[0], data[1], data[2], data[3]]);
    let declared_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let form_type = ChunkId([data[8], data[9], data[10], data[11]]);

    if tag == ChunkId::RIFX {
        return Err(CodecError::UnsupportedPixelFormat(
            "big-endian RIFX container".into(),
        ));
    }
    if tag != ChunkId::RIFF {
        return Err(CodecError::Format(format!("expected RIFF tag, found {tag:?}")));
    }
    if form_type != ChunkId::WAVE {
        if strict_form {
            return Err(CodecError::Format(format!(
                "expected WAVE form type, found {form_type:?}"
            )));
        }
        tracing::warn!(?form_type, "RIFF form type is not WAVE; continuing");
    }
    tracing::debug!(declared_size, ?form_type, "RIFF header");

    let mut format = None;
    let mut payload = None;
    for chunk in ChunkReader::new(&data[12..]) {
        let chunk = chunk?;
        match chunk.id {
            ChunkId::FMT => {
                if format.is_some() {
                    tracing::debug!("repeated fmt chunk replaces the earlier one");
                }
                format = Some(parse_fmt(chunk.payload)?);
            }
            ChunkId::DATA => {
                if payload.is_some() {
                    tracing::debug!("repeated data chunk replaces the earlier one");
                }
                payload = Some(chunk.payload);
            }
            id if id.is_tolerated() => {
                tracing::debug!(?id, len = chunk.len(), "skipping chunk");
            }
            id => {
                tracing::debug!(?id, len = chunk.len(), "skipping unrecognized chunk");
            }
        }
    }

    match (format, payload) {
        (Some(format), Some(data)) => Ok(WaveContainer {
            form_type,
            format,
            data,
        }),
        (format, payload) => Err(CodecError::IncompleteContainer {
            fmt: format.is_some(),
            data: payload.is_some(),
        }),
    }
}

const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

fn parse_fmt(payload: &[u8]) -> Result<WaveFormat, CodecError> {
    if payload.len() < 16 {
        return Err(CodecError::Format(format!(
            "fmt chunk of {} bytes is shorter than 16",
            payload.len()
        )));
    }
    let u16_at = |i: usize| u16::from_le_bytes([payload[i], payload[i + 1]]);
    let u32_at = |i: usize| {
        u32::from_le_bytes([payload[i], payload[i + 1], payload[i + 2], payload[i + 3]])
    };

    let mut tag = u16_at(0);
    // Extensible headers carry the real tag in the first two GUID bytes.
    if tag == WAVE_FORMAT_EXTENSIBLE && payload.len() >= 26 {
        tag = u16_at(24);
    }

    Ok(WaveFormat {
        format_tag: FormatTag::from_u16(tag),
        channels: u16_at(2),
        sample_rate: u32_at(4),
        byte_rate: u32_at(8),
        block_align: u16_at(12),
        bits_per_sample: u16_at(14),
    })
}

/// Decode a RIFF wave file into an audio record.
pub fn decode(data: &[u8]) -> Result<Record, CodecError> {
    decode_with(data, None, false)
}

pub(crate) fn decode_with(
    data: &[u8],
    limits: Option<&Limits>,
    strict_form: bool,
) -> Result<Record, CodecError> {
    let container = read_container(data, strict_form)?;
    let format = container.format;

    if format.channels == 0 {
        return Err(CodecError::Format("fmt chunk declares zero channels".into()));
    }
    let bytes_per_sample = usize::from(format.bits_per_sample / 8);
    if !(1..=4).contains(&bytes_per_sample) {
        return Err(CodecError::UnsupportedPixelFormat(format!(
            "{} bits per sample",
            format.bits_per_sample
        )));
    }
    match format.format_tag {
        FormatTag::Pcm => {}
        FormatTag::IeeeFloat => {
            return Err(CodecError::UnsupportedPixelFormat(format!(
                "{}-bit IEEE float samples (no integer scale defined)",
                format.bits_per_sample
            )));
        }
        FormatTag::Other(tag) => {
            return Err(CodecError::UnsupportedPixelFormat(format!(
                "wave format tag {tag:#06x}"
            )));
        }
    }

    let channels = usize::from(format.channels);
    let frames = container.data.len() / bytes_per_sample / channels;
    let frames_u32 = u32::try_from(frames).map_err(|_| CodecError::DimensionsTooLarge {
        width: u32::from(format.channels),
        height: u32::MAX,
    })?;
    let count = match limits {
        Some(limits) => limits.check_buffer(u32::from(format.channels), frames_u32, 1)?,
        None => frames * channels,
    };

    let payload = &container.data[..count * bytes_per_sample];
    let samples: Vec<i32> = match bytes_per_sample {
        1 => payload.iter().map(|&b| i32::from(b)).collect(),
        2 => payload
            .chunks_exact(2)
            .map(|s| i32::from(i16::from_le_bytes([s[0], s[1]])))
            .collect(),
        // Sign-extend through the top byte.
        3 => payload
            .chunks_exact(3)
            .map(|s| i32::from_le_bytes([0, s[0], s[1], s[2]]) >> 8)
            .collect(),
        _ => payload
            .chunks_exact(4)
            .map(|s| i32::from_le_bytes([s[0], s[1], s[2], s[3]]))
            .collect(),
    };

    let mut record = Record::audio(
        u32::from(format.channels),
        frames_u32,
        format.sample_rate,
        samples,
    )?;
    if container.form_type != ChunkId::WAVE {
        record.push_advisory(Advisory::FormTypeMismatch {
            found: container.form_type.0,
        });
    }
    Ok(record)
}
