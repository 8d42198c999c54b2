//! Anymap encoder: P2/P3 ascii, P5/P6 8-bit binary, 16/32-bit gray words.

use super::{AnymapKind, AnymapSampleWidth};
use crate::error::CodecError;
use crate::limits::sample_count;
use crate::record::{Channels, Record};

const ASCII_COMMENT: &str = "# created by zenraster (ascii)";
const VALUES_PER_LINE: usize = 10;

/// Stateless anymap encoder, either ascii or binary at a fixed sample width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnymapEncoder {
    Ascii,
    Binary(AnymapSampleWidth),
}

impl AnymapEncoder {
    pub fn ascii() -> Self {
        Self::Ascii
    }

    pub fn binary(width: AnymapSampleWidth) -> Self {
        Self::Binary(width)
    }

    /// Encode a record's output samples (working buffer if present).
    pub fn encode_record(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        self.encode(
            record.output_samples(),
            record.width(),
            record.height(),
            record.channels(),
        )
    }

    pub fn encode(
        &self,
        samples: &[i32],
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Result<Vec<u8>, CodecError> {
        let expected = sample_count(width, height, channels.count())?;
        if samples.len() != expected {
            return Err(CodecError::InvalidRecord(format!(
                "{width}x{height}x{} needs {expected} samples, got {}",
                channels.count(),
                samples.len()
            )));
        }
        match *self {
            Self::Ascii => Ok(encode_ascii(samples, width, height, channels)),
            Self::Binary(AnymapSampleWidth::Byte) => {
                Ok(encode_binary8(samples, width, height, channels))
            }
            Self::Binary(word) => {
                if channels != Channels::Gray {
                    return Err(CodecError::UnsupportedPixelFormat(format!(
                        "{}-byte binary anymap words are gray only",
                        word.bytes()
                    )));
                }
                Ok(encode_binary_words(samples, width, height, word))
            }
        }
    }
}

/// Maxval line value: the true maximum, or 255 when that is not positive
/// (or the buffer is empty).
fn header_maxval(samples: impl Iterator<Item = i32>) -> i32 {
    match samples.max() {
        None | Some(..=0) => 255,
        Some(max) => max,
    }
}

fn encode_ascii(samples: &[i32], width: u32, height: u32, channels: Channels) -> Vec<u8> {
    let kind = AnymapKind::for_channels(channels, true);
    let maxval = header_maxval(samples.iter().copied());
    let mut out = format!(
        "{}\n{ASCII_COMMENT}\n{width} {height}\n{maxval}\n",
        kind.magic()
    );
    out.reserve(samples.len() * 4);

    // A line break follows every sample whose absolute index is a nonzero
    // multiple of ten, so the first line holds eleven values.
    for (i, v) in samples.iter().enumerate() {
        if i > 0 {
            let prev = i - 1;
            let breaks = prev > 0 && prev % VALUES_PER_LINE == 0;
            out.push(if breaks { '\n' } else { ' ' });
        }
        out.push_str(&v.to_string());
    }
    out.push('\n');
    out.into_bytes()
}

/// Binary header: CRLF after magic, comment and dimensions; the maxval line
/// ends in a single LF so the payload begins one byte after it.
fn binary_header(kind: AnymapKind, label: &str, width: u32, height: u32, maxval: i32) -> Vec<u8> {
    format!(
        "{}\r\n# created by zenraster ({label})\r\n{width} {height}\r\n{maxval}\n",
        kind.magic()
    )
    .into_bytes()
}

/// Samples are clamped to `[0, 255]` before the maxval is taken, so unlike
/// the ascii writer (which uses the unclamped buffer maximum) the header
/// never declares more than 255.
fn encode_binary8(samples: &[i32], width: u32, height: u32, channels: Channels) -> Vec<u8> {
    let kind = AnymapKind::for_channels(channels, false);
    let clamped = samples.iter().map(|&v| v.clamp(0, 255) as u8);
    let maxval = header_maxval(clamped.clone().map(i32::from));

    let mut out = binary_header(kind, "raw-8", width, height, maxval);
    out.reserve(samples.len());
    out.extend(clamped);
    out
}

fn encode_binary_words(
    samples: &[i32],
    width: u32,
    height: u32,
    word: AnymapSampleWidth,
) -> Vec<u8> {
    let kind = AnymapKind::BinaryGray;
    match word {
        AnymapSampleWidth::Word16 => {
            let clamped = samples
                .iter()
                .map(|&v| v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16);
            let maxval = header_maxval(clamped.clone().map(i32::from));
            let mut out = binary_header(kind, "raw-16", width, height, maxval);
            out.reserve(samples.len() * 2);
            for v in clamped {
                out.extend_from_slice(&v.to_ne_bytes());
            }
            out
        }
        _ => {
            let maxval = header_maxval(samples.iter().copied());
            let mut out = binary_header(kind, "raw-32", width, height, maxval);
            out.reserve(samples.len() * 4);
            for v in samples {
                out.extend_from_slice(&v.to_ne_bytes());
            }
            out
        }
    }
}
