//! RIFF wave (WAV) codec.
//!
//! Audio decodes into the same canonical shape as gray rasters: one column
//! per channel, one row per frame. The sample rate travels on the record.
//!
//! Supported sample encodings: unsigned 8-bit, signed little-endian 16, 24
//! and 32-bit PCM. IEEE float payloads are recognized and rejected.

mod chunk;
mod decode;
mod encode;

pub use chunk::{Chunk, ChunkId, ChunkReader};
pub use decode::{WaveContainer, decode, read_container};
pub use encode::{encode, encode_record};

pub(crate) use decode::decode_with;

/// The `fmt ` chunk's format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatTag {
    /// 1: integer PCM.
    Pcm,
    /// 3: IEEE-754 float.
    IeeeFloat,
    Other(u16),
}

impl FormatTag {
    pub fn from_u16(tag: u16) -> Self {
        match tag {
            1 => Self::Pcm,
            3 => Self::IeeeFloat,
            other => Self::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Self::Pcm => 1,
            Self::IeeeFloat => 3,
            Self::Other(tag) => tag,
        }
    }
}

/// Fields of a `fmt ` chunk. Byte rate and block alignment are carried but
/// not used for decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveFormat {
    pub format_tag: FormatTag,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

/// PCM sample width chosen when writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDepth {
    U8,
    I16,
    I32,
}

impl SampleDepth {
    /// Narrowest depth holding every sample: 8-bit unsigned when all fit
    /// `[0, 255]`, 16-bit signed when all fit `[-32768, 32767]`, else 32-bit.
    pub fn for_samples(samples: &[i32]) -> Self {
        let (min, max) = crate::record::min_max(samples);
        if min >= 0 && max <= 255 {
            Self::U8
        } else if min >= i32::from(i16::MIN) && max <= i32::from(i16::MAX) {
            Self::I16
        } else {
            Self::I32
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::U8 => 8,
            Self::I16 => 16,
            Self::I32 => 32,
        }
    }

    pub fn bytes(self) -> usize {
        usize::from(self.bits() / 8)
    }
}
