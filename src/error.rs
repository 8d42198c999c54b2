use std::path::PathBuf;

/// Errors from anymap, bitmap, and RIFF wave decoding and encoding.
///
/// A decode failure never yields a partial [`crate::Record`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Malformed input: bad magic token, unexpected chunk sequencing,
    /// out-of-range palette index.
    #[error("format error: {0}")]
    Format(String),

    /// A recognized but unhandled bitmap or sample encoding.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// Declared size or dimensions exceed the available bytes.
    #[error("truncated data: need {needed} {unit}, got {actual}")]
    TruncatedData {
        needed: usize,
        actual: usize,
        unit: &'static str,
    },

    /// RIFF container without a `fmt ` or `data` chunk.
    #[error("incomplete RIFF container (fmt chunk: {fmt}, data chunk: {data})")]
    IncompleteContainer { fmt: bool, data: bool },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Record fields that violate the buffer-length invariant.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "platform")]
    #[error("platform codec error: {0}")]
    Platform(#[from] image::ImageError),
}

impl CodecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodecError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn truncated(needed: usize, actual: usize) -> Self {
        CodecError::TruncatedData {
            needed,
            actual,
            unit: "bytes",
        }
    }
}
