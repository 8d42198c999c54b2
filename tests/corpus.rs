//! Decode corpus: hand-built fixtures covering header quirks, palette
//! classification, chunk walking, and third-party interop.

use std::io::Cursor;

use zenraster::bitmap::{Raster, decode_raster, read_bmp};
use zenraster::pnm::{AnymapSampleWidth, PayloadBoundary};
use zenraster::wav::{ChunkId, ChunkReader};
use zenraster::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn decode_anymap(data: &[u8]) -> Result<Record, CodecError> {
    DecodeRequest::new().decode(data, SourceKind::Anymap, None)
}

// ── Anymap headers ───────────────────────────────────────────────────

#[test]
fn comments_and_blank_lines_between_header_lines() {
    let data = b"P2\n# made by hand\n\n3 1\n# maxval next\n255\n1 2 3\n";
    let rec = decode_anymap(data).unwrap();
    assert_eq!((rec.width(), rec.height()), (3, 1));
    assert_eq!(rec.samples(), &[1, 2, 3]);
}

#[test]
fn ascii_payload_ignores_line_structure() {
    let data = b"P3\n2 1\n255\n10\n20 30 40\n  50\t60\n";
    let rec = decode_anymap(data).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(rec.samples(), &[10, 20, 30, 40, 50, 60]);
}

#[test]
fn ascii_short_payload_is_truncated() {
    let data = b"P2\n2 2\n255\n1 2 3\n";
    match decode_anymap(data).unwrap_err() {
        CodecError::TruncatedData { needed, actual, .. } => {
            assert_eq!((needed, actual), (4, 3));
        }
        other => panic!("expected TruncatedData, got {other:?}"),
    }
}

#[test]
fn unknown_magic_is_format_error() {
    for data in [&b"P7\n1 1\n255\n0"[..], b"P4\n1 1\n\x00", b"P5 1 1 255\n\x00"] {
        assert!(
            matches!(decode_anymap(data), Err(CodecError::Format(_))),
            "{:?}",
            String::from_utf8_lossy(data)
        );
    }
}

#[test]
fn maxval_above_255_is_advisory_only() {
    init_tracing();
    let data = b"P2\n2 1\n65535\n300 65535\n";
    let rec = decode_anymap(data).unwrap();
    assert_eq!(rec.samples(), &[300, 65535]);
    assert_eq!((rec.min(), rec.max()), (300, 65535));
    assert!(
        rec.advisories()
            .contains(&Advisory::MaxvalAbove8Bit { maxval: 65535 })
    );
}

#[test]
fn min_max_scan() {
    let rec = decode_anymap(b"P2\n3 1\n255\n3 250 10\n").unwrap();
    assert_eq!((rec.min(), rec.max()), (3, 250));
}

// ── Binary payload boundary ──────────────────────────────────────────

/// P5 2x1 followed by two junk bytes.
fn binary_with_trailing_bytes() -> Vec<u8> {
    let mut data = b"P5\n2 1\n255\n".to_vec();
    data.extend_from_slice(&[7, 9, 0xAA, 0xBB]);
    data
}

#[test]
fn from_end_takes_the_last_bytes() {
    let rec = decode_anymap(&binary_with_trailing_bytes()).unwrap();
    assert_eq!(rec.samples(), &[0xAA, 0xBB]);
}

#[test]
fn after_maxval_takes_the_following_bytes() {
    let rec = DecodeRequest::new()
        .payload_boundary(PayloadBoundary::AfterMaxval)
        .decode(&binary_with_trailing_bytes(), SourceKind::Anymap, None)
        .unwrap();
    assert_eq!(rec.samples(), &[7, 9]);
}

#[test]
fn binary_payload_shorter_than_declared() {
    let data = b"P6\n2 2\n255\n\x01\x02\x03";
    assert!(matches!(
        decode_anymap(data),
        Err(CodecError::TruncatedData { .. })
    ));
}

#[test]
fn word16_native_endian() {
    let mut data = b"P5\n2 1\n65535\n".to_vec();
    data.extend_from_slice(&8208i16.to_ne_bytes());
    data.extend_from_slice(&32767i16.to_ne_bytes());
    let rec = DecodeRequest::new()
        .anymap_sample_width(AnymapSampleWidth::Word16)
        .decode(&data, SourceKind::Anymap, None)
        .unwrap();
    assert_eq!(rec.samples(), &[8208, 32767]);
}

#[test]
fn word_width_rejects_color() {
    let mut data = b"P6\n1 1\n255\n".to_vec();
    data.extend_from_slice(&[0; 6]);
    let err = DecodeRequest::new()
        .anymap_sample_width(AnymapSampleWidth::Word16)
        .decode(&data, SourceKind::Anymap, None)
        .unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedPixelFormat(_)));
}

// ── Rasters ──────────────────────────────────────────────────────────

#[test]
fn gray_palette_yields_one_channel() {
    let palette: Vec<_> = (0..=255u8).map(PaletteEntry::gray).collect();
    let raster = Raster::packed(3, 1, PixelFormat::Indexed8, palette, vec![0, 128, 255]);
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Gray);
    assert_eq!(rec.samples(), &[0, 128, 255]);
}

#[test]
fn one_color_entry_makes_the_whole_palette_color() {
    let mut palette: Vec<_> = (0..=255u8).map(PaletteEntry::gray).collect();
    palette[200] = PaletteEntry::new(200, 10, 10);
    // entry 200 is never referenced
    let raster = Raster::packed(2, 1, PixelFormat::Indexed8, palette, vec![5, 6]);
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(rec.samples(), &[5, 5, 5, 6, 6, 6]);
}

#[test]
fn indexed4_odd_width_over_three_bytes() {
    let palette: Vec<_> = (0..16u8).map(|i| PaletteEntry::gray(i * 10)).collect();
    let raster = Raster::packed(5, 1, PixelFormat::Indexed4, palette, vec![0x12, 0x34, 0x5F]);
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.samples(), &[10, 20, 30, 40, 50]);
}

#[test]
fn truecolor_padding_and_channel_order() {
    // 1x2 BGR rows padded to 4 bytes
    let raster = Raster {
        width: 1,
        height: 2,
        stride: 4,
        format: PixelFormat::Bgr24,
        palette: Vec::new(),
        data: vec![1, 2, 3, 0xEE, 4, 5, 6, 0xEE],
    };
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(rec.samples(), &[3, 2, 1, 6, 5, 4]);
}

#[test]
fn indexed8_rows_skip_stride_padding() {
    let palette: Vec<_> = (0..=255u8).map(PaletteEntry::gray).collect();
    // 3x2, rows padded to 4 bytes with an index that would be out of order
    let raster = Raster {
        width: 3,
        height: 2,
        stride: 4,
        format: PixelFormat::Indexed8,
        palette,
        data: vec![1, 2, 3, 0xFF, 4, 5, 6, 0xFF],
    };
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.samples(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!((rec.min(), rec.max()), (1, 6));
}

#[test]
fn indexed4_rows_skip_stride_padding() {
    let palette: Vec<_> = (0..16u8).map(|i| PaletteEntry::gray(i * 10)).collect();
    // 3x2: two packed bytes per row, stride 4, low nibble of byte 2 unused
    let raster = Raster {
        width: 3,
        height: 2,
        stride: 4,
        format: PixelFormat::Indexed4,
        palette,
        data: vec![0x12, 0x3F, 0xEE, 0xEE, 0x45, 0x6F, 0xEE, 0xEE],
    };
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Gray);
    assert_eq!(rec.samples(), &[10, 20, 30, 40, 50, 60]);
}

#[test]
fn indexed4_color_palette_emits_rgb() {
    let palette = vec![PaletteEntry::new(255, 0, 0), PaletteEntry::new(0, 0, 255)];
    let raster = Raster::packed(3, 1, PixelFormat::Indexed4, palette, vec![0x01, 0x00]);
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(rec.samples(), &[255, 0, 0, 0, 0, 255, 255, 0, 0]);
}

#[test]
fn bgrx32_ignores_fourth_byte() {
    // 2x2, 4 bytes per pixel, row padding on top of that
    let raster = Raster {
        width: 2,
        height: 2,
        stride: 12,
        format: PixelFormat::Bgrx32,
        palette: Vec::new(),
        data: vec![
            10, 20, 30, 0xFF, 40, 50, 60, 0x80, 0xEE, 0xEE, 0xEE, 0xEE, //
            1, 2, 3, 0x7F, 4, 5, 6, 0x01, 0xEE, 0xEE, 0xEE, 0xEE,
        ],
    };
    let rec = decode_raster(&raster, None).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(
        rec.samples(),
        &[30, 20, 10, 60, 50, 40, 3, 2, 1, 6, 5, 4]
    );
    assert_eq!((rec.min(), rec.max()), (1, 60));
}

#[test]
fn palette_index_out_of_range() {
    let palette = vec![PaletteEntry::gray(0), PaletteEntry::gray(255)];
    let raster = Raster::packed(2, 1, PixelFormat::Indexed8, palette, vec![1, 2]);
    assert!(matches!(
        decode_raster(&raster, None),
        Err(CodecError::Format(_))
    ));
}

#[test]
fn unsupported_formats_are_named() {
    let raster = Raster {
        width: 1,
        height: 1,
        stride: 2,
        format: PixelFormat::Gray16,
        palette: Vec::new(),
        data: vec![0, 0],
    };
    match decode_raster(&raster, None).unwrap_err() {
        CodecError::UnsupportedPixelFormat(name) => assert_eq!(name, "gray-16"),
        other => panic!("expected UnsupportedPixelFormat, got {other:?}"),
    }
}

#[test]
fn raster_limits() {
    let limits = Limits {
        max_width: Some(2),
        ..Default::default()
    };
    let raster = Raster::packed(3, 1, PixelFormat::Bgr24, Vec::new(), vec![0; 9]);
    assert!(matches!(
        decode_raster(&raster, Some(&limits)),
        Err(CodecError::LimitExceeded(_))
    ));
}

/// 24-bit bottom-up BMP with 4-byte row padding.
fn bmp24(width: u32, rows: &[&[[u8; 3]]]) -> Vec<u8> {
    let stride = (width as usize * 3).div_ceil(4) * 4;
    let offset = 14 + 40;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((offset + stride * rows.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(rows.len() as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    for row in rows.iter().rev() {
        let start = out.len();
        for [r, g, b] in row.iter() {
            out.extend_from_slice(&[*b, *g, *r]);
        }
        out.resize(start + stride, 0);
    }
    out
}

#[test]
fn bmp_file_loads_top_down_rgb() {
    let data = bmp24(2, &[&[[255, 0, 0], [0, 255, 0]], &[[0, 0, 255], [9, 8, 7]]]);
    let raster = read_bmp(&data).unwrap().unwrap();
    assert_eq!(raster.stride, 8);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.Bmp");
    std::fs::write(&path, &data).unwrap();
    let rec = load(&path).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(
        rec.samples(),
        &[255, 0, 0, 0, 255, 0, 0, 0, 255, 9, 8, 7]
    );
}

// ── RIFF wave ────────────────────────────────────────────────────────

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn fmt_pcm(channels: u16, rate: u32, bits: u16) -> Vec<u8> {
    let align = channels * bits / 8;
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&channels.to_le_bytes());
    fmt.extend_from_slice(&rate.to_le_bytes());
    fmt.extend_from_slice(&(rate * u32::from(align)).to_le_bytes());
    fmt.extend_from_slice(&align.to_le_bytes());
    fmt.extend_from_slice(&bits.to_le_bytes());
    chunk(b"fmt ", &fmt)
}

fn riff(form: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
    out.extend_from_slice(form);
    out.extend_from_slice(&body);
    out
}

#[test]
fn unknown_chunk_is_skipped() {
    init_tracing();
    let data = riff(
        b"WAVE",
        &[
            fmt_pcm(1, 8000, 16),
            chunk(b"XTRA", &[1, 2, 3, 4, 5, 6]),
            chunk(b"data", &[0x10, 0x20, 0xFF, 0x7F]),
        ],
    );
    let rec = wav::decode(&data).unwrap();
    assert_eq!((rec.width(), rec.height()), (1, 2));
    assert_eq!(rec.samples(), &[8208, 32767]);
    assert_eq!(rec.sample_rate(), Some(8000));
}

#[test]
fn chunk_reader_visits_every_chunk() {
    let body = [
        chunk(b"fmt ", &[0; 16]),
        chunk(b"LIST", &[0; 3]),
        chunk(b"data", &[]),
    ]
    .concat();
    let ids: Vec<ChunkId> = ChunkReader::new(&body).map(|c| c.unwrap().id).collect();
    assert_eq!(ids, [ChunkId::FMT, ChunkId::LIST, ChunkId::DATA]);
}

#[test]
fn eight_bit_is_unsigned_and_24_bit_sign_extends() {
    let data8 = riff(
        b"WAVE",
        &[fmt_pcm(2, 11_025, 8), chunk(b"data", &[0, 128, 255, 1])],
    );
    let rec = wav::decode(&data8).unwrap();
    assert_eq!(rec.width(), 2);
    assert_eq!(rec.samples(), &[0, 128, 255, 1]);

    let data24 = riff(
        b"WAVE",
        &[
            fmt_pcm(1, 11_025, 24),
            chunk(b"data", &[0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80, 0x01, 0x00, 0x00]),
        ],
    );
    assert_eq!(wav::decode(&data24).unwrap().samples(), &[-1, -8_388_608, 1]);
}

#[test]
fn missing_chunks_are_reported() {
    let no_data = riff(b"WAVE", &[fmt_pcm(1, 8000, 16)]);
    assert!(matches!(
        wav::decode(&no_data),
        Err(CodecError::IncompleteContainer {
            fmt: true,
            data: false
        })
    ));
    let no_fmt = riff(b"WAVE", &[chunk(b"data", &[0, 0])]);
    assert!(matches!(
        wav::decode(&no_fmt),
        Err(CodecError::IncompleteContainer {
            fmt: false,
            data: true
        })
    ));
}

#[test]
fn foreign_form_type() {
    let data = riff(
        b"AVI ",
        &[fmt_pcm(1, 8000, 16), chunk(b"data", &[1, 0])],
    );
    let rec = wav::decode(&data).unwrap();
    assert!(
        rec.advisories()
            .contains(&Advisory::FormTypeMismatch { found: *b"AVI " })
    );

    let strict = DecodeRequest::new()
        .strict_riff(true)
        .decode(&data, SourceKind::Wave, None);
    assert!(matches!(strict, Err(CodecError::Format(_))));
}

#[test]
fn not_riff() {
    let mut data = riff(b"WAVE", &[fmt_pcm(1, 8000, 16), chunk(b"data", &[])]);
    data[..4].copy_from_slice(b"RIFX");
    assert!(matches!(
        wav::decode(&data),
        Err(CodecError::UnsupportedPixelFormat(_))
    ));
    data[..4].copy_from_slice(b"JUNK");
    assert!(matches!(wav::decode(&data), Err(CodecError::Format(_))));
    assert!(matches!(
        wav::decode(b"RIFF"),
        Err(CodecError::TruncatedData { .. })
    ));
}

#[test]
fn reads_hound_output() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 24,
        sample_format: hound::SampleFormat::Int,
    };
    let frames: Vec<[i32; 2]> = (0..50).map(|i| [i * 1000 - 25_000, -(i * 77)]).collect();
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for [l, r] in &frames {
            writer.write_sample(*l).unwrap();
            writer.write_sample(*r).unwrap();
        }
        writer.finalize().unwrap();
    }

    let rec = wav::decode(cursor.get_ref()).unwrap();
    assert_eq!((rec.width(), rec.height()), (2, 50));
    assert_eq!(rec.sample_rate(), Some(44_100));
    let expected: Vec<i32> = frames.iter().flatten().copied().collect();
    assert_eq!(rec.samples(), &expected[..]);
}

#[test]
fn hound_reads_our_output() {
    let samples: Vec<i32> = (0..200).map(|i| (i * 331 % 60_000) - 30_000).collect();
    let encoded = wav::encode(&samples, 1, 200, 16_000).unwrap();

    let reader = hound::WavReader::new(Cursor::new(encoded)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    let read: Vec<i32> = reader
        .into_samples::<i16>()
        .map(|s| i32::from(s.unwrap()))
        .collect();
    assert_eq!(read, samples);
}

#[test]
fn float_wave_is_flagged() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();
    }
    match wav::decode(cursor.get_ref()).unwrap_err() {
        CodecError::UnsupportedPixelFormat(msg) => assert!(msg.contains("float"), "{msg}"),
        other => panic!("expected UnsupportedPixelFormat, got {other:?}"),
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────

#[test]
fn suffix_dispatch_ignores_case() {
    use std::path::Path;
    assert_eq!(SourceKind::from_path(Path::new("a.PGM")), SourceKind::Anymap);
    assert_eq!(SourceKind::from_path(Path::new("a.Wav")), SourceKind::Wave);
    assert_eq!(SourceKind::from_path(Path::new("a.jpeg")), SourceKind::Bitmap);
    assert_eq!(SourceKind::from_path(Path::new("noext")), SourceKind::Bitmap);

    assert_eq!(
        TargetKind::from_path(Path::new("x.BINARY.PPM")),
        TargetKind::BinaryAnymap
    );
    assert_eq!(TargetKind::from_path(Path::new("x.ppm")), TargetKind::AsciiAnymap);
    assert_eq!(TargetKind::from_path(Path::new("x.WAVE")), TargetKind::Wave);
    assert_eq!(TargetKind::from_path(Path::new("x.png")), TargetKind::Bitmap);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.pgm");
    match load(&path).unwrap_err() {
        CodecError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[cfg(feature = "platform")]
#[test]
fn platform_png_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    let gray = Record::image(3, 2, Channels::Gray, vec![0, 50, 100, 150, 200, 250]).unwrap();
    let gray_path = dir.path().join("gray.png");
    save(&gray, &gray_path).unwrap();
    let back = load(&gray_path).unwrap();
    assert_eq!(back.channels(), Channels::Gray);
    assert_eq!(back.samples(), gray.samples());

    // out-of-range samples are clamped for 8-bit platform encoders
    let color = Record::image(1, 2, Channels::Color, vec![-4, 300, 7, 1, 2, 3]).unwrap();
    let color_path = dir.path().join("color.PNG");
    save(&color, &color_path).unwrap();
    let back = load(&color_path).unwrap();
    assert_eq!(back.channels(), Channels::Color);
    assert_eq!(back.samples(), &[0, 255, 7, 1, 2, 3]);
}

#[cfg(feature = "platform")]
#[test]
fn platform_sixteen_bit_is_unsupported() {
    let buffer = image::ImageBuffer::from_raw(1, 1, vec![1000u16]).unwrap();
    let image = image::DynamicImage::ImageLuma16(buffer);
    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, image::ImageFormat::Png).unwrap();

    let err = DecodeRequest::new()
        .decode(png.get_ref(), SourceKind::Bitmap, None)
        .unwrap_err();
    match err {
        CodecError::UnsupportedPixelFormat(name) => assert_eq!(name, "gray-16"),
        other => panic!("expected UnsupportedPixelFormat, got {other:?}"),
    }
}

#[cfg(feature = "platform")]
fn gif_bytes(width: u16, height: u16, palette: &[u8], indices: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, palette).unwrap();
        let frame = gif::Frame {
            width,
            height,
            buffer: std::borrow::Cow::Borrowed(indices),
            ..Default::default()
        };
        encoder.write_frame(&frame).unwrap();
    }
    out
}

#[cfg(feature = "platform")]
#[test]
fn gray_palette_gif_loads_as_gray() {
    let data = gif_bytes(2, 1, &[0, 0, 0, 255, 255, 255], &[1, 0]);
    let rec = DecodeRequest::new()
        .decode(&data, SourceKind::Bitmap, None)
        .unwrap();
    assert_eq!(rec.channels(), Channels::Gray);
    assert_eq!(rec.samples(), &[255, 0]);
}

#[cfg(feature = "platform")]
#[test]
fn color_palette_gif_loads_as_color() {
    // index 1 is never referenced but still makes the palette color
    let data = gif_bytes(1, 1, &[9, 9, 9, 255, 0, 0], &[0]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.gif");
    std::fs::write(&path, &data).unwrap();
    let rec = load(&path).unwrap();
    assert_eq!(rec.channels(), Channels::Color);
    assert_eq!(rec.samples(), &[9, 9, 9]);
}

#[cfg(feature = "platform")]
#[test]
fn indexed_png_keeps_palette() {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, 3, 2);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Four);
        encoder.set_palette(vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0x01, 0x20, 0x21, 0x00]).unwrap();
    }
    let rec = DecodeRequest::new()
        .decode(&data, SourceKind::Bitmap, None)
        .unwrap();
    assert_eq!(rec.channels(), Channels::Gray);
    assert_eq!((rec.width(), rec.height()), (3, 2));
    assert_eq!(rec.samples(), &[0, 128, 255, 255, 128, 0]);
}
