//! Bridge to the `image` crate, the platform codec for JPEG, GIF, PNG, TIFF
//! and BMP variants the raw reader does not carry.
//!
//! GIF and 4/8-bit indexed PNG go through the `gif` and `png` crates with
//! palette expansion off, so their palette reaches
//! [`decode_raster`](super::decode_raster) for gray/color classification.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::CodecError;
use crate::pixel::{PaletteEntry, PixelFormat};

use super::raster::Raster;

/// Decode `data` with the platform codec into a raster.
///
/// The format is guessed from the content, falling back to the file
/// extension of `hint` when the content is ambiguous.
pub fn decode_platform(data: &[u8], hint: Option<&Path>) -> Result<Raster, CodecError> {
    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CodecError::Format(format!("cannot probe image format: {e}")))?;
    if reader.format().is_none() {
        if let Some(format) = hint.and_then(|p| ImageFormat::from_path(p).ok()) {
            reader.set_format(format);
        }
    }
    match reader.format() {
        Some(ImageFormat::Gif) => return indexed_gif(data),
        Some(ImageFormat::Png) => {
            if let Some(raster) = indexed_png(data)? {
                return Ok(raster);
            }
        }
        _ => {}
    }
    let image = reader.decode()?;
    raster_from_image(image)
}

fn rgb_triples(palette: &[u8]) -> Vec<PaletteEntry> {
    palette
        .chunks_exact(3)
        .map(|c| PaletteEntry::new(c[0], c[1], c[2]))
        .collect()
}

/// First GIF frame placed on the logical screen, as indexed-8.
fn indexed_gif(data: &[u8]) -> Result<Raster, CodecError> {
    let gif_error = |e: gif::DecodingError| CodecError::Format(format!("GIF decode: {e}"));

    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(data)).map_err(gif_error)?;
    let width = usize::from(decoder.width());
    let height = usize::from(decoder.height());
    let bg_color = decoder.bg_color();
    let global = decoder.global_palette().map(rgb_triples);

    let frame = decoder
        .read_next_frame()
        .map_err(gif_error)?
        .ok_or_else(|| CodecError::Format("GIF has no image frame".into()))?;
    let palette = match (&frame.palette, global) {
        (Some(local), _) => rgb_triples(local),
        (None, Some(global)) => global,
        (None, None) => {
            return Err(CodecError::Format(
                "GIF has neither a local nor a global palette".into(),
            ));
        }
    };

    // Screen area outside the frame takes the background index.
    let background = bg_color
        .filter(|&i| i < palette.len())
        .and_then(|i| u8::try_from(i).ok())
        .unwrap_or(0);
    let mut indices = vec![background; width * height];
    let (left, top) = (usize::from(frame.left), usize::from(frame.top));
    let frame_width = usize::from(frame.width);
    if frame_width > 0 && left < width {
        let visible = frame_width.min(width - left);
        for (y, row) in frame.buffer.chunks_exact(frame_width).enumerate() {
            let screen_y = top + y;
            if screen_y >= height {
                break;
            }
            let start = screen_y * width + left;
            indices[start..start + visible].copy_from_slice(&row[..visible]);
        }
    }

    Ok(Raster::packed(
        width as u32,
        height as u32,
        PixelFormat::Indexed8,
        palette,
        indices,
    ))
}

/// Indexed PNG at 4 or 8 bits per pixel, rows left packed.
///
/// Returns `Ok(None)` for every other PNG, including 1- and 2-bit palettes,
/// which the `image` crate expands instead.
fn indexed_png(data: &[u8]) -> Result<Option<Raster>, CodecError> {
    let png_error = |e: png::DecodingError| CodecError::Format(format!("PNG decode: {e}"));

    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(png_error)?;
    let info = reader.info();
    if info.color_type != png::ColorType::Indexed {
        return Ok(None);
    }
    let format = match info.bit_depth {
        png::BitDepth::Eight => PixelFormat::Indexed8,
        png::BitDepth::Four => PixelFormat::Indexed4,
        _ => return Ok(None),
    };
    let palette = info.palette.as_deref().map(rgb_triples).unwrap_or_default();

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(png_error)?;
    buf.truncate(frame.buffer_size());
    Ok(Some(Raster {
        width: frame.width,
        height: frame.height,
        stride: frame.line_size,
        format,
        palette,
        data: buf,
    }))
}

/// Map a platform image onto the raster pixel formats.
pub(crate) fn raster_from_image(image: DynamicImage) -> Result<Raster, CodecError> {
    let (width, height) = (image.width(), image.height());
    let raster = match image {
        DynamicImage::ImageLuma8(gray) => {
            // Platform gray rasters surface as indexed-8 with a gray ramp.
            let ramp = (0..=255u8).map(PaletteEntry::gray).collect();
            Raster::packed(width, height, PixelFormat::Indexed8, ramp, gray.into_raw())
        }
        DynamicImage::ImageRgb8(rgb) => {
            let mut data = rgb.into_raw();
            for px in data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            Raster::packed(width, height, PixelFormat::Bgr24, Vec::new(), data)
        }
        DynamicImage::ImageRgba8(_) | DynamicImage::ImageLumaA8(_) => {
            let mut data = image.into_rgba8().into_raw();
            for px in data.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            Raster::packed(width, height, PixelFormat::Bgrx32, Vec::new(), data)
        }
        other => {
            let format = match other {
                DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => {
                    PixelFormat::Gray16
                }
                DynamicImage::ImageRgb16(_) => PixelFormat::Rgb48,
                DynamicImage::ImageRgba16(_) => PixelFormat::Rgba64,
                DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                    PixelFormat::Float
                }
                unknown => {
                    return Err(CodecError::UnsupportedPixelFormat(format!(
                        "{:?}",
                        unknown.color()
                    )));
                }
            };
            return Err(CodecError::UnsupportedPixelFormat(format.name().into()));
        }
    };
    Ok(raster)
}

/// Encode clamped 8-bit samples in the format implied by `path`'s extension.
pub fn encode_platform(
    samples: &[u8],
    width: u32,
    height: u32,
    color: bool,
    path: &Path,
) -> Result<Vec<u8>, CodecError> {
    let format = ImageFormat::from_path(path)?;
    let image = if color {
        image::RgbImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageRgb8)
    } else {
        image::GrayImage::from_raw(width, height, samples.to_vec()).map(DynamicImage::ImageLuma8)
    }
    .ok_or_else(|| {
        CodecError::InvalidRecord(format!(
            "{} samples do not fill a {width}x{height} raster",
            samples.len()
        ))
    })?;

    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format)?;
    Ok(out.into_inner())
}
