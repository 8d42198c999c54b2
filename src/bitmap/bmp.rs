//! BMP container reader producing raw, still-packed rasters.
//!
//! Only uncompressed (`BI_RGB`) files are carried as rasters; anything else
//! is left to the platform codec.

use crate::error::CodecError;
use crate::pixel::{PaletteEntry, PixelFormat};

use super::raster::Raster;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_MIN: u32 = 40;
const BI_RGB: u32 = 0;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let end = self.pos + N;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| CodecError::truncated(end, self.data.len()))?;
        self.pos = end;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    fn u16_le(&mut self) -> Result<u16, CodecError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn u32_le(&mut self) -> Result<u32, CodecError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn i32_le(&mut self) -> Result<i32, CodecError> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        let end = self.pos.checked_add(n).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(CodecError::truncated(end, self.data.len()));
        }
        self.pos = end;
        Ok(())
    }
}

/// Whether `data` starts with the BMP magic.
pub fn is_bmp(data: &[u8]) -> bool {
    data.starts_with(b"BM")
}

/// Read a BMP into a top-down [`Raster`].
///
/// Returns `Ok(None)` for compressed or bitfield-coded files, which the
/// platform codec handles instead.
pub fn read_bmp(data: &[u8]) -> Result<Option<Raster>, CodecError> {
    let mut cur = Cursor::new(data);
    if cur.take::<2>()? != *b"BM" {
        return Err(CodecError::Format("missing BM signature".into()));
    }
    let _file_size = cur.u32_le()?;
    cur.skip(4)?;
    let pixel_offset = cur.u32_le()? as usize;

    let info_size = cur.u32_le()?;
    if info_size < INFO_HEADER_MIN {
        // OS/2 core headers
        return Ok(None);
    }
    let raw_width = cur.i32_le()?;
    let raw_height = cur.i32_le()?;
    let _planes = cur.u16_le()?;
    let bpp = cur.u16_le()?;
    let compression = cur.u32_le()?;
    let _image_size = cur.u32_le()?;
    cur.skip(8)?; // resolution
    let colors_used = cur.u32_le()?;
    let _colors_important = cur.u32_le()?;

    if compression != BI_RGB {
        tracing::debug!(compression, "BMP compression not carried as raster");
        return Ok(None);
    }
    if raw_width < 0 || raw_height == i32::MIN {
        return Err(CodecError::Format(format!(
            "invalid BMP dimensions {raw_width}x{raw_height}"
        )));
    }
    let width = raw_width as u32;
    let top_down = raw_height < 0;
    let height = raw_height.unsigned_abs();

    let format = match bpp {
        1 => PixelFormat::Indexed1,
        4 => PixelFormat::Indexed4,
        8 => PixelFormat::Indexed8,
        16 => PixelFormat::Rgb555,
        24 => PixelFormat::Bgr24,
        32 => PixelFormat::Bgrx32,
        other => {
            return Err(CodecError::UnsupportedPixelFormat(format!(
                "{other} bits per pixel BMP"
            )));
        }
    };

    let mut palette = Vec::new();
    if format.is_indexed() {
        let max_entries = 1usize << bpp;
        let count = match colors_used as usize {
            0 => max_entries,
            n => n.min(max_entries),
        };
        cur.pos = FILE_HEADER_LEN + info_size as usize;
        palette.reserve(count);
        for _ in 0..count {
            let [b, g, r, _] = cur.take::<4>()?;
            palette.push(PaletteEntry::new(r, g, b));
        }
    }

    let stride = (bpp as usize)
        .checked_mul(width as usize)
        .map(|bits| bits.div_ceil(32) * 4)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let total = stride
        .checked_mul(height as usize)
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;
    let pixels = data
        .get(pixel_offset..)
        .and_then(|rest| rest.get(..total))
        .ok_or_else(|| CodecError::truncated(pixel_offset.saturating_add(total), data.len()))?;

    // Stored bottom-up unless the height is negative.
    let data = if top_down || stride == 0 {
        pixels.to_vec()
    } else {
        pixels
            .chunks_exact(stride)
            .rev()
            .flatten()
            .copied()
            .collect()
    };

    Ok(Some(Raster {
        width,
        height,
        stride,
        format,
        palette,
        data,
    }))
}
