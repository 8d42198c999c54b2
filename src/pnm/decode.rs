//! Anymap decoder: staged line-oriented header, ascii or binary payload.

use super::{AnymapHeader, AnymapKind, AnymapSampleWidth, PayloadBoundary};
use crate::error::CodecError;
use crate::limits::{Limits, sample_count};
use crate::record::{Advisory, Channels, Record, min_max};

/// Stateless anymap decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnymapDecoder {
    boundary: PayloadBoundary,
    sample_width: AnymapSampleWidth,
}

impl AnymapDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary(mut self, boundary: PayloadBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sample width for binary payloads. Ignored for ascii files.
    pub fn with_sample_width(mut self, sample_width: AnymapSampleWidth) -> Self {
        self.sample_width = sample_width;
        self
    }

    pub fn decode(&self, data: &[u8], limits: Option<&Limits>) -> Result<Record, CodecError> {
        let header = parse_header(data)?;
        let channels = header.kind.channels();
        let count = match limits {
            Some(limits) => limits.check_buffer(header.width, header.height, channels.count())?,
            None => sample_count(header.width, header.height, channels.count())?,
        };

        let samples = if header.kind.is_ascii() {
            read_ascii_samples(&data[header.header_end..], count)?
        } else {
            if channels == Channels::Color && self.sample_width != AnymapSampleWidth::Byte {
                return Err(CodecError::UnsupportedPixelFormat(format!(
                    "{}-byte binary color anymap samples",
                    self.sample_width.bytes()
                )));
            }
            let payload = self.binary_payload(data, &header, count)?;
            read_binary_samples(payload, self.sample_width)
        };

        let (min, max) = min_max(&samples);
        let mut record =
            Record::image_with_range(header.width, header.height, channels, samples, min, max)?;
        if header.maxval > 255 {
            tracing::warn!(maxval = header.maxval, "anymap maxval exceeds 255; samples not rescaled");
            record.push_advisory(Advisory::MaxvalAbove8Bit {
                maxval: header.maxval,
            });
        }
        Ok(record)
    }

    fn binary_payload<'a>(
        &self,
        data: &'a [u8],
        header: &AnymapHeader,
        count: usize,
    ) -> Result<&'a [u8], CodecError> {
        let need = count
            .checked_mul(self.sample_width.bytes())
            .ok_or(CodecError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            })?;
        let start = match self.boundary {
            PayloadBoundary::FromEnd => {
                let start = data.len().checked_sub(need);
                match start {
                    Some(start) if start >= header.header_end => start,
                    _ => {
                        return Err(CodecError::truncated(
                            header.header_end.saturating_add(need),
                            data.len(),
                        ));
                    }
                }
            }
            PayloadBoundary::AfterMaxval => {
                let available = data.len() - header.header_end;
                if available < need {
                    return Err(CodecError::truncated(
                        header.header_end.saturating_add(need),
                        data.len(),
                    ));
                }
                if available > need {
                    tracing::debug!(trailing = available - need, "ignoring bytes after anymap payload");
                }
                header.header_end
            }
        };
        Ok(&data[start..start + need])
    }
}

// ── Header ──────────────────────────────────────────────────────────

/// Line cursor over the header bytes.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    /// Next line without its terminator (`\n` or `\r\n`).
    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.pos..];
        let (line, advance) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        Some(line)
    }

    /// Next line that is neither a comment nor blank, trimmed.
    fn next_content(&mut self, stage: &str) -> Result<&'a [u8], CodecError> {
        loop {
            let Some(line) = self.next_line() else {
                return Err(CodecError::Format(format!(
                    "anymap header ended before {stage}"
                )));
            };
            let line = line.trim_ascii();
            if line.is_empty() || line.starts_with(b"#") {
                continue;
            }
            return Ok(line);
        }
    }
}

pub(crate) fn parse_header(data: &[u8]) -> Result<AnymapHeader, CodecError> {
    let mut lines = Lines { data, pos: 0 };

    let magic = lines.next_content("magic token")?;
    let kind = AnymapKind::from_magic(magic).ok_or_else(|| {
        CodecError::Format(format!(
            "bad anymap magic token {:?}",
            String::from_utf8_lossy(magic)
        ))
    })?;

    let dims = lines.next_content("dimensions")?;
    let mut tokens = dims.split(u8::is_ascii_whitespace).filter(|t| !t.is_empty());
    let width = parse_decimal(tokens.next(), "width")?;
    let height = parse_decimal(tokens.next(), "height")?;

    let maxval_line = lines.next_content("maxval")?;
    let maxval_token = maxval_line
        .split(u8::is_ascii_whitespace)
        .find(|t| !t.is_empty());
    let maxval = parse_decimal(maxval_token, "maxval")?;

    Ok(AnymapHeader {
        kind,
        width,
        height,
        maxval,
        header_end: lines.pos,
    })
}

fn parse_decimal(token: Option<&[u8]>, what: &str) -> Result<u32, CodecError> {
    let token = token.ok_or_else(|| CodecError::Format(format!("missing anymap {what}")))?;
    core::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            CodecError::Format(format!(
                "invalid anymap {what} {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}

// ── Payload ─────────────────────────────────────────────────────────

/// Read `count` maximal digit runs; any non-digit byte separates them.
fn read_ascii_samples(payload: &[u8], count: usize) -> Result<Vec<i32>, CodecError> {
    let mut out = Vec::with_capacity(count);
    let digit_runs = payload
        .split(|b| !b.is_ascii_digit())
        .filter(|run| !run.is_empty());
    for run in digit_runs.take(count) {
        let value = run.iter().try_fold(0i32, |acc, &d| {
            acc.checked_mul(10)?.checked_add(i32::from(d - b'0'))
        });
        let value = value.ok_or_else(|| {
            CodecError::Format(format!(
                "ascii sample {} overflows",
                String::from_utf8_lossy(run)
            ))
        })?;
        out.push(value);
    }
    if out.len() < count {
        return Err(CodecError::TruncatedData {
            needed: count,
            actual: out.len(),
            unit: "samples",
        });
    }
    Ok(out)
}

fn read_binary_samples(payload: &[u8], width: AnymapSampleWidth) -> Vec<i32> {
    match width {
        AnymapSampleWidth::Byte => payload.iter().map(|&b| i32::from(b)).collect(),
        AnymapSampleWidth::Word16 => payload
            .chunks_exact(2)
            .map(|w| i32::from(i16::from_ne_bytes([w[0], w[1]])))
            .collect(),
        AnymapSampleWidth::Word32 => payload
            .chunks_exact(4)
            .map(|w| i32::from_ne_bytes([w[0], w[1], w[2], w[3]]))
            .collect(),
    }
}
