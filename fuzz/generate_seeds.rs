#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Anymap, all four kinds
    fs::write(format!("{dir}/p2_3x1.pgm"), b"P2\n# c\n3 1\n255\n3 250 10\n").unwrap();
    fs::write(format!("{dir}/p3_1x1.ppm"), b"P3\n1 1\n255\n1 2 3\n").unwrap();
    fs::write(format!("{dir}/p5_3x2.pgm"), b"P5\r\n3 2\r\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();
    fs::write(
        format!("{dir}/p6_2x2.ppm"),
        b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80",
    )
    .unwrap();
    fs::write(format!("{dir}/p5_words.pgm"), b"P5\n2 1\n65535\n\x10\x20\xff\x7f").unwrap();

    // RIFF wave, 16-bit mono with an extra chunk
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&8000u32.to_le_bytes());
    fmt.extend_from_slice(&16000u32.to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());
    let body = [
        chunk(b"fmt ", &fmt),
        chunk(b"XTRA", &[1, 2, 3]),
        chunk(b"data", &[0x10, 0x20, 0xff, 0x7f]),
    ]
    .concat();
    let mut wav = b"RIFF".to_vec();
    wav.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(&body);
    fs::write(format!("{dir}/wav_16_mono.wav"), wav).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/riff_short.bin"), b"RIFF\x04\x00\x00\x00WAVE").unwrap();

    println!("Generated seed corpus in {dir}/");
}
