use std::path::Path;

use crate::error::CodecError;
use crate::limits::Limits;
use crate::pnm::{AnymapDecoder, AnymapSampleWidth, PayloadBoundary};
use crate::record::{Advisory, Record};
use crate::timer::Stopwatch;

/// Decoder family chosen from a source filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// `.ppm`, `.pnm`, `.pgm`
    Anymap,
    /// `.wav`
    Wave,
    /// Anything else: raw BMP rasters or the platform codec.
    Bitmap,
}

impl SourceKind {
    /// Case-insensitive suffix dispatch.
    pub fn from_path(path: &Path) -> Self {
        let name = lowercase_name(path);
        if [".ppm", ".pnm", ".pgm"].iter().any(|s| name.ends_with(s)) {
            Self::Anymap
        } else if name.ends_with(".wav") {
            Self::Wave
        } else {
            Self::Bitmap
        }
    }
}

pub(crate) fn lowercase_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Decode configuration. Reusable across calls; holds no decode state.
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
    boundary: PayloadBoundary,
    sample_width: AnymapSampleWidth,
    strict_riff: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// How binary anymap payloads are located.
    pub fn payload_boundary(mut self, boundary: PayloadBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Binary anymap sample width (non-standard 16/32-bit gray readers).
    pub fn anymap_sample_width(mut self, width: AnymapSampleWidth) -> Self {
        self.sample_width = width;
        self
    }

    /// Reject RIFF containers whose form type is not `WAVE`.
    pub fn strict_riff(mut self, strict: bool) -> Self {
        self.strict_riff = strict;
        self
    }

    /// Read `path` and decode it with the decoder its suffix selects.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Record, CodecError> {
        self.load_path(path.as_ref())
    }

    #[tracing::instrument(skip(self))]
    fn load_path(&self, path: &Path) -> Result<Record, CodecError> {
        let watch = Stopwatch::start();
        let data = std::fs::read(path).map_err(|e| CodecError::io(path, e))?;
        watch.lap("read");

        let kind = SourceKind::from_path(path);
        let mut record = self.decode(&data, kind, Some(path))?;
        record.set_source(path);
        watch.lap("decode");

        for advisory in record.advisories() {
            log_advisory(advisory);
        }
        tracing::debug!(
            width = record.width(),
            height = record.height(),
            channels = record.channels().count(),
            min = record.min(),
            max = record.max(),
            "loaded"
        );
        Ok(record)
    }

    /// Decode in-memory bytes as `kind`.
    ///
    /// `hint` is only used by the platform codec to disambiguate formats.
    pub fn decode(
        &self,
        data: &[u8],
        kind: SourceKind,
        hint: Option<&Path>,
    ) -> Result<Record, CodecError> {
        match kind {
            SourceKind::Anymap => AnymapDecoder::new()
                .with_boundary(self.boundary)
                .with_sample_width(self.sample_width)
                .decode(data, self.limits),
            SourceKind::Wave => crate::wav::decode_with(data, self.limits, self.strict_riff),
            SourceKind::Bitmap => crate::bitmap::decode(data, hint, self.limits),
        }
    }
}

fn log_advisory(advisory: &Advisory) {
    match advisory {
        Advisory::SampleAbove8Bit { max } => {
            tracing::warn!(max, "max sample exceeds the 8-bit display range");
        }
        Advisory::NegativeMinimum { min } => {
            tracing::warn!(min, "negative minimum sample");
        }
        // maxval and form type are reported where they are parsed
        Advisory::MaxvalAbove8Bit { .. } | Advisory::FormTypeMismatch { .. } => {}
    }
}

/// Load `path` with default options.
pub fn load(path: impl AsRef<Path>) -> Result<Record, CodecError> {
    DecodeRequest::new().load(path)
}
