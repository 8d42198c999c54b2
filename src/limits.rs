use crate::error::CodecError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the canonical sample buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), CodecError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(CodecError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(CodecError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(CodecError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check a sample count (allocated as `i32`s) against the memory limit.
    pub(crate) fn check_samples(&self, samples: usize) -> Result<(), CodecError> {
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = (samples as u64).saturating_mul(size_of::<i32>() as u64);
            if bytes > max_mem {
                return Err(CodecError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Dimension and memory checks in one call.
    pub(crate) fn check_buffer(
        &self,
        width: u32,
        height: u32,
        channels: usize,
    ) -> Result<usize, CodecError> {
        self.check(width, height)?;
        let samples = sample_count(width, height, channels)?;
        self.check_samples(samples)?;
        Ok(samples)
    }
}

/// `width * height * channels` with overflow reported as DimensionsTooLarge.
pub(crate) fn sample_count(width: u32, height: u32, channels: usize) -> Result<usize, CodecError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(channels))
        .ok_or(CodecError::DimensionsTooLarge { width, height })
}
