//! Raster unpacking: truecolor and indexed scan lines into canonical samples.

use crate::error::CodecError;
use crate::limits::Limits;
use crate::pixel::{PaletteEntry, PixelFormat};
use crate::record::{Channels, Record};

/// A raster as handed over by a platform decoder.
///
/// Rows are top-down. Each row starts `stride` bytes after the previous one;
/// bytes past the packed row width are alignment padding.
#[derive(Clone, Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub format: PixelFormat,
    /// Required for indexed formats, ignored otherwise.
    pub palette: Vec<PaletteEntry>,
    pub data: Vec<u8>,
}

impl Raster {
    /// Raster with tightly packed rows (stride == packed row width).
    pub fn packed(
        width: u32,
        height: u32,
        format: PixelFormat,
        palette: Vec<PaletteEntry>,
        data: Vec<u8>,
    ) -> Self {
        let stride = format.packed_row_bytes(width as usize).unwrap_or(0);
        Self {
            width,
            height,
            stride,
            format,
            palette,
            data,
        }
    }
}

/// Whether every palette entry satisfies R = G = B.
///
/// Classification looks at the whole palette, not only at entries that
/// pixels reference.
pub fn palette_is_gray(palette: &[PaletteEntry]) -> bool {
    palette.iter().all(PaletteEntry::is_gray)
}

/// Unpack `raster` into an image record.
pub fn decode_raster(raster: &Raster, limits: Option<&Limits>) -> Result<Record, CodecError> {
    let (width, height) = (raster.width, raster.height);
    let Some(row_bytes) = raster.format.packed_row_bytes(width as usize) else {
        return Err(CodecError::UnsupportedPixelFormat(
            raster.format.name().into(),
        ));
    };

    if raster.stride < row_bytes {
        return Err(CodecError::Format(format!(
            "row stride {} is smaller than the {row_bytes}-byte packed row",
            raster.stride
        )));
    }
    if height > 0 {
        let needed = (height as usize - 1)
            .checked_mul(raster.stride)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        if raster.data.len() < needed {
            return Err(CodecError::truncated(needed, raster.data.len()));
        }
    }

    let channels = match raster.format {
        PixelFormat::Bgr24 | PixelFormat::Bgrx32 => Channels::Color,
        _ if palette_is_gray(&raster.palette) => Channels::Gray,
        _ => Channels::Color,
    };
    let samples = match limits {
        Some(limits) => limits.check_buffer(width, height, channels.count())?,
        None => crate::limits::sample_count(width, height, channels.count())?,
    };

    let mut sink = SampleSink::with_capacity(samples);
    let rows = (0..height as usize).map(|y| {
        let start = y * raster.stride;
        &raster.data[start..start + row_bytes]
    });

    match raster.format {
        PixelFormat::Bgr24 | PixelFormat::Bgrx32 => {
            let bpp = if raster.format == PixelFormat::Bgr24 { 3 } else { 4 };
            for row in rows {
                for px in row.chunks_exact(bpp) {
                    sink.push(px[2]);
                    sink.push(px[1]);
                    sink.push(px[0]);
                }
            }
        }
        PixelFormat::Indexed8 => {
            for (y, row) in rows.enumerate() {
                for (x, &index) in row.iter().enumerate() {
                    let entry = lookup(&raster.palette, index, x, y)?;
                    sink.push_entry(entry, channels);
                }
            }
        }
        PixelFormat::Indexed4 => {
            let w = width as usize;
            for (y, row) in rows.enumerate() {
                let indices = row
                    .iter()
                    .flat_map(|&byte| [byte >> 4, byte & 0x0f])
                    .take(w);
                for (x, index) in indices.enumerate() {
                    let entry = lookup(&raster.palette, index, x, y)?;
                    sink.push_entry(entry, channels);
                }
            }
        }
        _ => unreachable!("packed_row_bytes rejects undecodable formats"),
    }

    let (data, min, max) = sink.finish();
    Record::image_with_range(width, height, channels, data, min, max)
}

fn lookup(
    palette: &[PaletteEntry],
    index: u8,
    x: usize,
    y: usize,
) -> Result<PaletteEntry, CodecError> {
    palette.get(index as usize).copied().ok_or_else(|| {
        CodecError::Format(format!(
            "palette index {index} at ({x}, {y}) exceeds palette of {} entries",
            palette.len()
        ))
    })
}

/// Output buffer with running min/max.
struct SampleSink {
    data: Vec<i32>,
    min: i32,
    max: i32,
}

impl SampleSink {
    fn with_capacity(n: usize) -> Self {
        Self {
            data: Vec::with_capacity(n),
            min: i32::MAX,
            max: i32::MIN,
        }
    }

    #[inline]
    fn push(&mut self, v: u8) {
        let v = i32::from(v);
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.data.push(v);
    }

    #[inline]
    fn push_entry(&mut self, entry: PaletteEntry, channels: Channels) {
        match channels {
            // R = G = B, any component will do
            Channels::Gray => self.push(entry.r),
            Channels::Color => {
                self.push(entry.r);
                self.push(entry.g);
                self.push(entry.b);
            }
        }
    }

    fn finish(self) -> (Vec<i32>, i32, i32) {
        if self.data.is_empty() {
            (self.data, 0, 0)
        } else {
            (self.data, self.min, self.max)
        }
    }
}
