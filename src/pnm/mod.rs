//! Portable anymap family: P2 (ascii gray), P3 (ascii color), P5 (binary
//! gray), P6 (binary color), plus non-standard 16/32-bit binary gray words.
//!
//! Maxval is parsed but never used to rescale samples; a maxval above 255
//! is reported as an [`Advisory`](crate::Advisory).

mod decode;
mod encode;

pub use decode::AnymapDecoder;
pub use encode::AnymapEncoder;

use crate::error::CodecError;
use crate::record::{Channels, Record};

/// Which anymap sub-format a header declares.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnymapKind {
    /// P2
    AsciiGray,
    /// P3
    AsciiColor,
    /// P5
    BinaryGray,
    /// P6
    BinaryColor,
}

impl AnymapKind {
    pub fn from_magic(token: &[u8]) -> Option<Self> {
        match token {
            b"P2" => Some(Self::AsciiGray),
            b"P3" => Some(Self::AsciiColor),
            b"P5" => Some(Self::BinaryGray),
            b"P6" => Some(Self::BinaryColor),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static str {
        match self {
            Self::AsciiGray => "P2",
            Self::AsciiColor => "P3",
            Self::BinaryGray => "P5",
            Self::BinaryColor => "P6",
        }
    }

    pub fn channels(self) -> Channels {
        match self {
            Self::AsciiGray | Self::BinaryGray => Channels::Gray,
            Self::AsciiColor | Self::BinaryColor => Channels::Color,
        }
    }

    pub fn is_ascii(self) -> bool {
        matches!(self, Self::AsciiGray | Self::AsciiColor)
    }

    fn for_channels(channels: Channels, ascii: bool) -> Self {
        match (channels, ascii) {
            (Channels::Gray, true) => Self::AsciiGray,
            (Channels::Color, true) => Self::AsciiColor,
            (Channels::Gray, false) => Self::BinaryGray,
            (Channels::Color, false) => Self::BinaryColor,
        }
    }
}

/// Where a binary payload starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadBoundary {
    /// The payload is the final `W*H*C*word` bytes of the file; everything
    /// before is header. Tolerates irregular maxval lines, but trailing
    /// bytes after the payload shift it.
    #[default]
    FromEnd,
    /// The payload starts right after the maxval line's newline. Trailing
    /// bytes are ignored.
    AfterMaxval,
}

/// Bytes per binary sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnymapSampleWidth {
    /// Standard one byte per sample.
    #[default]
    Byte,
    /// Non-standard: native-endian `i16` words, gray only.
    Word16,
    /// Non-standard: native-endian `i32` words, gray only.
    Word32,
}

impl AnymapSampleWidth {
    pub fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word16 => 2,
            Self::Word32 => 4,
        }
    }
}

/// Parsed anymap header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AnymapHeader {
    pub kind: AnymapKind,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Offset just past the maxval line.
    pub header_end: usize,
}

/// Decode anymap bytes with default options (8-bit samples, payload from end).
pub fn decode(data: &[u8]) -> Result<Record, CodecError> {
    AnymapDecoder::new().decode(data, None)
}

/// Encode a record as an ascii (P2/P3) anymap.
pub fn encode_ascii(record: &Record) -> Result<Vec<u8>, CodecError> {
    AnymapEncoder::ascii().encode_record(record)
}

/// Encode a record as a binary (P5/P6) 8-bit anymap.
pub fn encode_binary(record: &Record) -> Result<Vec<u8>, CodecError> {
    AnymapEncoder::binary(AnymapSampleWidth::Byte).encode_record(record)
}
