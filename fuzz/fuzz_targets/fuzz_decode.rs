#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::pnm::{AnymapSampleWidth, PayloadBoundary};
use zenraster::{DecodeRequest, Limits, SourceKind};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Every decoder must reject bad input without panicking
    for boundary in [PayloadBoundary::FromEnd, PayloadBoundary::AfterMaxval] {
        for width in [
            AnymapSampleWidth::Byte,
            AnymapSampleWidth::Word16,
            AnymapSampleWidth::Word32,
        ] {
            let _ = DecodeRequest::new()
                .with_limits(&limits)
                .payload_boundary(boundary)
                .anymap_sample_width(width)
                .decode(data, SourceKind::Anymap, None);
        }
    }
    let _ = DecodeRequest::new()
        .with_limits(&limits)
        .decode(data, SourceKind::Wave, None);

    // Raw BMP rasters only; the platform codec is not built here
    if let Ok(Some(raster)) = zenraster::bitmap::read_bmp(data) {
        let _ = zenraster::bitmap::decode_raster(&raster, Some(&limits));
    }
});
