/// Pixel format tag of a platform-supplied raster.
///
/// Only `Bgr24`, `Bgrx32`, `Indexed8` and `Indexed4` are decoded; the
/// remaining variants are recognized so they can be rejected by name.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 3 bytes per pixel, stored B, G, R.
    Bgr24,
    /// 4 bytes per pixel, stored B, G, R, then padding or alpha (ignored).
    Bgrx32,
    /// One palette index per byte.
    Indexed8,
    /// Two palette indices per byte, high nibble first.
    Indexed4,
    /// Eight palette indices per byte.
    Indexed1,
    Rgb555,
    Rgb565,
    /// 16-bit grayscale.
    Gray16,
    /// 16 bits per channel RGB.
    Rgb48,
    /// 16 bits per channel RGBA.
    Rgba64,
    /// 32-bit float per channel.
    Float,
}

impl PixelFormat {
    /// Stable name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bgr24 => "truecolor-24",
            Self::Bgrx32 => "truecolor-32",
            Self::Indexed8 => "indexed-8",
            Self::Indexed4 => "indexed-4",
            Self::Indexed1 => "indexed-1",
            Self::Rgb555 => "rgb-555",
            Self::Rgb565 => "rgb-565",
            Self::Gray16 => "gray-16",
            Self::Rgb48 => "truecolor-48",
            Self::Rgba64 => "truecolor-64",
            Self::Float => "float-32",
        }
    }

    /// Bytes needed for one packed row of `width` pixels, for decodable formats.
    pub(crate) fn packed_row_bytes(self, width: usize) -> Option<usize> {
        match self {
            Self::Bgr24 => width.checked_mul(3),
            Self::Bgrx32 => width.checked_mul(4),
            Self::Indexed8 => Some(width),
            Self::Indexed4 => Some(width.div_ceil(2)),
            _ => None,
        }
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed8 | Self::Indexed4 | Self::Indexed1)
    }
}

impl core::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One palette color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PaletteEntry {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Whether R = G = B.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}
