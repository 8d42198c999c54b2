//! Bitmap / indexed decoder and the platform codec bridge.
//!
//! Platform decoders hand over a [`Raster`]: packed scan lines tagged with a
//! [`PixelFormat`](crate::PixelFormat), plus a palette for indexed formats.
//! [`decode_raster`] turns that into a canonical [`Record`].

mod bmp;
mod raster;

#[cfg(feature = "platform")]
mod platform;

pub use bmp::{is_bmp, read_bmp};
pub use raster::{Raster, decode_raster, palette_is_gray};

#[cfg(feature = "platform")]
pub use platform::{decode_platform, encode_platform};

use std::path::Path;

use crate::error::CodecError;
use crate::limits::Limits;
use crate::record::Record;

/// Decode a bitmap file's bytes: raw BMP rasters first, then the platform codec.
pub(crate) fn decode(
    data: &[u8],
    hint: Option<&Path>,
    limits: Option<&Limits>,
) -> Result<Record, CodecError> {
    if is_bmp(data) {
        if let Some(raster) = read_bmp(data)? {
            return decode_raster(&raster, limits);
        }
    }
    decode_external(data, hint, limits)
}

#[cfg(feature = "platform")]
fn decode_external(
    data: &[u8],
    hint: Option<&Path>,
    limits: Option<&Limits>,
) -> Result<Record, CodecError> {
    let raster = decode_platform(data, hint)?;
    decode_raster(&raster, limits)
}

#[cfg(not(feature = "platform"))]
fn decode_external(
    _data: &[u8],
    _hint: Option<&Path>,
    _limits: Option<&Limits>,
) -> Result<Record, CodecError> {
    Err(CodecError::NotImplemented(
        "platform bitmap decoding requires the `platform` feature",
    ))
}
