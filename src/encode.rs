use std::io::Write;
use std::path::Path;

use crate::decode::lowercase_name;
use crate::error::CodecError;
use crate::pnm::{AnymapEncoder, AnymapSampleWidth};
use crate::record::Record;
use crate::timer::Stopwatch;

/// Encoder family chosen from a destination filename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// `.binary.pnm`, `.binary.ppm`, `.binary.pgm`
    BinaryAnymap,
    /// `.pnm`, `.ppm`, `.pgm`
    AsciiAnymap,
    /// `.wav`, `.wave`
    Wave,
    /// Anything else: platform encoder chosen by extension.
    Bitmap,
}

impl TargetKind {
    /// Case-insensitive suffix dispatch; the `.binary.*` forms win over plain anymap.
    pub fn from_path(path: &Path) -> Self {
        let name = lowercase_name(path);
        if ends_with_any(&name, &[".binary.pnm", ".binary.ppm", ".binary.pgm"]) {
            Self::BinaryAnymap
        } else if ends_with_any(&name, &[".pnm", ".ppm", ".pgm"]) {
            Self::AsciiAnymap
        } else if ends_with_any(&name, &[".wav", ".wave"]) {
            Self::Wave
        } else {
            Self::Bitmap
        }
    }
}

fn ends_with_any(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s))
}

/// Sample rate used when an image record is written as wave.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Encode configuration.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    binary_width: AnymapSampleWidth,
    fallback_sample_rate: u32,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self {
            binary_width: AnymapSampleWidth::Byte,
            fallback_sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample width for `.binary.*` anymap targets.
    pub fn binary_width(mut self, width: AnymapSampleWidth) -> Self {
        self.binary_width = width;
        self
    }

    /// Sample rate for records that carry none (image records saved as wave).
    pub fn fallback_sample_rate(mut self, rate: u32) -> Self {
        self.fallback_sample_rate = rate;
        self
    }

    /// Encode `record` as `kind`. `path` picks the platform format for bitmaps.
    pub fn encode(
        &self,
        record: &Record,
        kind: TargetKind,
        path: &Path,
    ) -> Result<Vec<u8>, CodecError> {
        match kind {
            TargetKind::BinaryAnymap => {
                AnymapEncoder::binary(self.binary_width).encode_record(record)
            }
            TargetKind::AsciiAnymap => AnymapEncoder::ascii().encode_record(record),
            TargetKind::Wave => crate::wav::encode_record(record, self.fallback_sample_rate),
            TargetKind::Bitmap => encode_bitmap(record, path),
        }
    }

    /// Serialize the record's output samples (working buffer if present) to
    /// `path`, with the encoder selected by the destination suffix.
    pub fn save(&self, record: &Record, path: impl AsRef<Path>) -> Result<(), CodecError> {
        self.save_path(record, path.as_ref())
    }

    #[tracing::instrument(skip(self, record), fields(width = record.width(), height = record.height()))]
    fn save_path(&self, record: &Record, path: &Path) -> Result<(), CodecError> {
        let watch = Stopwatch::start();
        let kind = TargetKind::from_path(path);
        let bytes = self.encode(record, kind, path)?;
        watch.lap("encode");
        write_atomic(path, &bytes)?;
        watch.lap("write");
        tracing::debug!(?kind, bytes = bytes.len(), "saved");
        Ok(())
    }
}

#[cfg(feature = "platform")]
fn encode_bitmap(record: &Record, path: &Path) -> Result<Vec<u8>, CodecError> {
    let clamped: Vec<u8> = record
        .output_samples()
        .iter()
        .map(|&v| v.clamp(0, 255) as u8)
        .collect();
    crate::bitmap::encode_platform(
        &clamped,
        record.width(),
        record.height(),
        record.is_color(),
        path,
    )
}

#[cfg(not(feature = "platform"))]
fn encode_bitmap(_record: &Record, _path: &Path) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::NotImplemented(
        "platform bitmap encoding requires the `platform` feature",
    ))
}

/// Write through a temporary file in the destination directory, renamed
/// into place only once every byte is written.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CodecError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| CodecError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| CodecError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| CodecError::io(path, e.error))?;
    Ok(())
}

/// Save `record` to `path` with default options.
pub fn save(record: &Record, path: impl AsRef<Path>) -> Result<(), CodecError> {
    EncodeRequest::new().save(record, path)
}
