use std::path::{Path, PathBuf};

use crate::error::CodecError;
use crate::limits::sample_count;

/// Channel layout of a record. Fixed for the life of the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// One sample per pixel (gray image, or audio).
    Gray,
    /// Three interleaved samples per pixel: R, G, B.
    Color,
}

impl Channels {
    /// Number of samples per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Color => 3,
        }
    }
}

/// What the samples represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Image,
    /// Width is the channel count, height the frame count.
    Audio,
}

/// Non-fatal, out-of-nominal-range observations made while decoding.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// Anymap header declared a maxval above 255.
    MaxvalAbove8Bit { maxval: u32 },
    /// An image sample exceeds the 8-bit display range.
    SampleAbove8Bit { max: i32 },
    /// An image sample is negative.
    NegativeMinimum { min: i32 },
    /// RIFF form type was not `WAVE`.
    FormTypeMismatch { found: [u8; 4] },
}

/// One decoded asset: a flat, row-major, channel-interleaved sample buffer
/// plus the metadata needed to interpret it.
#[derive(Clone, Debug)]
pub struct Record {
    width: u32,
    height: u32,
    channels: Channels,
    domain: Domain,
    sample_rate: Option<u32>,
    samples: Vec<i32>,
    working: Option<Vec<i32>>,
    min: i32,
    max: i32,
    modified: bool,
    source: Option<PathBuf>,
    advisories: Vec<Advisory>,
}

impl Record {
    /// Build an image record, computing min/max by scanning `samples`.
    ///
    /// Fails with [`CodecError::InvalidRecord`] unless
    /// `samples.len() == width * height * channels`.
    pub fn image(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<i32>,
    ) -> Result<Self, CodecError> {
        let (min, max) = min_max(&samples);
        Self::build(width, height, channels, Domain::Image, None, samples, min, max)
    }

    /// Build an audio record: `channel_count` columns, `frames` rows.
    pub fn audio(
        channel_count: u32,
        frames: u32,
        sample_rate: u32,
        samples: Vec<i32>,
    ) -> Result<Self, CodecError> {
        let (min, max) = min_max(&samples);
        Self::build(
            channel_count,
            frames,
            Channels::Gray,
            Domain::Audio,
            Some(sample_rate),
            samples,
            min,
            max,
        )
    }

    /// Build an image record whose min/max were tracked during decode.
    pub(crate) fn image_with_range(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<i32>,
        min: i32,
        max: i32,
    ) -> Result<Self, CodecError> {
        Self::build(width, height, channels, Domain::Image, None, samples, min, max)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        width: u32,
        height: u32,
        channels: Channels,
        domain: Domain,
        sample_rate: Option<u32>,
        samples: Vec<i32>,
        min: i32,
        max: i32,
    ) -> Result<Self, CodecError> {
        let expected = sample_count(width, height, channels.count())?;
        if samples.len() != expected {
            return Err(CodecError::InvalidRecord(format!(
                "{width}x{height}x{} needs {expected} samples, got {}",
                channels.count(),
                samples.len()
            )));
        }
        let mut record = Self {
            width,
            height,
            channels,
            domain,
            sample_rate,
            samples,
            working: None,
            min,
            max,
            modified: false,
            source: None,
            advisories: Vec::new(),
        };
        record.collect_range_advisories();
        Ok(record)
    }

    fn collect_range_advisories(&mut self) {
        if self.domain != Domain::Image || self.samples.is_empty() {
            return;
        }
        if self.max > 255 {
            self.advisories
                .push(Advisory::SampleAbove8Bit { max: self.max });
        }
        if self.min < 0 {
            self.advisories
                .push(Advisory::NegativeMinimum { min: self.min });
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_color(&self) -> bool {
        self.channels == Channels::Color
    }

    /// Sample rate in Hz; `Some` only for audio records.
    pub fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// The canonical sample buffer.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Sample `i` of the canonical buffer.
    pub fn sample(&self, i: usize) -> Option<i32> {
        self.samples.get(i).copied()
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub(crate) fn push_advisory(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }

    /// The working buffer, if one has been created.
    pub fn working(&self) -> Option<&[i32]> {
        self.working.as_deref()
    }

    /// The working buffer, cloned from the canonical buffer on first use.
    ///
    /// Min/max are not tracked while the working buffer is mutated; call
    /// [`Record::commit`] to persist the result.
    pub fn working_mut(&mut self) -> &mut [i32] {
        self.working.get_or_insert_with(|| self.samples.clone())
    }

    /// Drop the working buffer without committing it.
    pub fn discard_working(&mut self) {
        self.working = None;
    }

    /// Promote the working buffer to canonical status and recompute min/max.
    ///
    /// Returns `false` (and changes nothing) when there is no working buffer.
    /// The working buffer stays in place as a copy of the new canonical data.
    pub fn commit(&mut self) -> bool {
        let Some(working) = &self.working else {
            return false;
        };
        self.samples.copy_from_slice(working);
        let (min, max) = min_max(&self.samples);
        self.min = min;
        self.max = max;
        self.modified = true;
        true
    }

    /// The buffer a serializer writes: working if present, else canonical.
    pub fn output_samples(&self) -> &[i32] {
        self.working.as_deref().unwrap_or(&self.samples)
    }
}

/// Min and max of `samples`; `(0, 0)` when empty.
pub(crate) fn min_max(samples: &[i32]) -> (i32, i32) {
    let mut iter = samples.iter().copied();
    let Some(first) = iter.next() else {
        return (0, 0);
    };
    iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_of_gray_triple() {
        assert_eq!(min_max(&[3, 250, 10]), (3, 250));
        assert_eq!(min_max(&[]), (0, 0));
        assert_eq!(min_max(&[-7]), (-7, -7));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Record::image(2, 2, Channels::Color, vec![0; 4]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidRecord(_)));
    }

    #[test]
    fn commit_promotes_working_buffer() {
        let mut rec = Record::image(3, 1, Channels::Gray, vec![3, 250, 10]).unwrap();
        assert!(!rec.commit());
        assert!(rec.working().is_none());

        for v in rec.working_mut() {
            *v = 255 - *v;
        }
        // Canonical data is untouched until commit.
        assert_eq!(rec.samples(), &[3, 250, 10]);
        assert_eq!(rec.output_samples(), &[252, 5, 245]);

        assert!(rec.commit());
        assert_eq!(rec.samples(), &[252, 5, 245]);
        assert_eq!((rec.min(), rec.max()), (5, 252));
        assert!(rec.is_modified());
    }

    #[test]
    fn image_range_advisories() {
        let rec = Record::image(2, 1, Channels::Gray, vec![-1, 300]).unwrap();
        assert_eq!(
            rec.advisories(),
            &[
                Advisory::SampleAbove8Bit { max: 300 },
                Advisory::NegativeMinimum { min: -1 }
            ]
        );

        let audio = Record::audio(1, 2, 8000, vec![-32768, 32767]).unwrap();
        assert!(audio.advisories().is_empty());
        assert_eq!(audio.domain(), Domain::Audio);
        assert_eq!(audio.sample_rate(), Some(8000));
    }
}
