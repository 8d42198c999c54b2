//! RIFF chunk walking over an in-memory byte slice.

use crate::error::CodecError;

/// A 4-byte chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const RIFF: Self = Self(*b"RIFF");
    pub const RIFX: Self = Self(*b"RIFX");
    pub const WAVE: Self = Self(*b"WAVE");
    pub const FMT: Self = Self(*b"fmt ");
    pub const FACT: Self = Self(*b"fact");
    pub const DATA: Self = Self(*b"data");
    pub const LIST: Self = Self(*b"LIST");
    pub const INFO: Self = Self(*b"INFO");
    pub const PEAK: Self = Self(*b"PEAK");
    pub const ID3: Self = Self(*b"id3 ");

    /// Ids that are routinely present and skipped without comment.
    pub fn is_tolerated(self) -> bool {
        matches!(
            self,
            Self::FACT | Self::LIST | Self::INFO | Self::PEAK | Self::ID3
        )
    }
}

impl core::fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

/// One chunk: id, declared length, and exactly that many payload bytes.
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
    pub id: ChunkId,
    pub payload: &'a [u8],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Iterates the chunks that follow the 12-byte RIFF header.
///
/// Each step consumes 8 header bytes plus exactly the declared length.
/// Iteration ends at end of input; fewer than 8 trailing bytes are ignored.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next chunk header.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.pos..];
        if rest.len() < 8 {
            if !rest.is_empty() {
                tracing::debug!(bytes = rest.len(), "ignoring partial chunk header at end of RIFF");
                self.pos = self.data.len();
            }
            return None;
        }
        let id = ChunkId([rest[0], rest[1], rest[2], rest[3]]);
        let len = u32::from_le_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
        let Some(payload) = 8usize.checked_add(len).and_then(|end| rest.get(8..end)) else {
            let needed = self.pos.saturating_add(8).saturating_add(len);
            self.pos = self.data.len();
            return Some(Err(CodecError::truncated(needed, self.data.len())));
        };
        self.pos += 8 + len;
        Some(Ok(Chunk { id, payload }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_declared_lengths() {
        let mut data = Vec::new();
        data.extend_from_slice(b"XTRA");
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[1, 2, 3]);
        data.extend_from_slice(b"data");
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&[9, 9]);
        data.extend_from_slice(&[0, 0, 0]); // partial trailer

        let chunks: Vec<_> = ChunkReader::new(&data).map(Result::unwrap).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, ChunkId(*b"XTRA"));
        assert_eq!(chunks[0].payload, &[1, 2, 3]);
        assert_eq!(chunks[1].id, ChunkId::DATA);
        assert_eq!(chunks[1].payload, &[9, 9]);
    }

    #[test]
    fn oversized_length_is_truncated() {
        let mut data = Vec::new();
        data.extend_from_slice(b"data");
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(&[0; 10]);
        let mut reader = ChunkReader::new(&data);
        assert!(matches!(
            reader.next(),
            Some(Err(CodecError::TruncatedData { needed: 108, actual: 18, .. }))
        ));
        assert!(reader.next().is_none());
    }
}
