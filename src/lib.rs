//! # zenraster
//!
//! Codec layer of a raster/audio viewer. Every supported encoding decodes
//! into one canonical [`Record`]: a flat, row-major, channel-interleaved
//! buffer of `i32` samples with width, height, channel layout, and min/max.
//!
//! ## Supported Formats
//!
//! ### Portable anymap ([`pnm`])
//! - **P2/P3** ascii gray/color, read and write
//! - **P5/P6** binary gray/color, 8-bit read and write
//! - Non-standard 16/32-bit native-endian binary gray words
//!
//! ### Bitmaps ([`bitmap`])
//! - Truecolor 24/32-bit and indexed 8/4-bit rasters, with palette
//!   gray/color classification
//! - Uncompressed BMP read directly; JPEG, GIF, PNG, TIFF and other BMP
//!   variants through the `image` crate (`platform` feature)
//!
//! ### RIFF wave ([`wav`])
//! - 8-bit unsigned, 16/24/32-bit signed PCM read
//! - PCM write with the narrowest fitting bit depth
//! - Audio is shaped as a gray raster: one column per channel, one row per
//!   frame
//!
//! ## Non-Goals
//!
//! - Image processing beyond [`Record::commit`]
//! - Integer rescaling of IEEE-float wave samples
//!
//! ## Usage
//!
//! ```no_run
//! use zenraster::{load, save};
//!
//! let mut record = load("scan.pgm")?;
//! for v in record.working_mut() {
//!     *v = 255 - *v;
//! }
//! record.commit();
//! save(&record, "scan-inverted.binary.pgm")?;
//! # Ok::<(), zenraster::CodecError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod limits;
mod pixel;
mod record;
mod timer;

pub mod bitmap;
pub mod pnm;
pub mod wav;

// Re-exports
pub use decode::{DecodeRequest, SourceKind, load};
pub use encode::{DEFAULT_SAMPLE_RATE, EncodeRequest, TargetKind, save};
pub use error::CodecError;
pub use limits::Limits;
pub use pixel::{PaletteEntry, PixelFormat};
pub use record::{Advisory, Channels, Domain, Record};
pub use timer::Stopwatch;
