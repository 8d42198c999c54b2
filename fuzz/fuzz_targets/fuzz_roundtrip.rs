#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Anything that decodes must survive an ascii anymap or wave round trip
    if let Ok(record) = DecodeRequest::new()
        .with_limits(&limits)
        .decode(data, SourceKind::Anymap, None)
    {
        let encoded = pnm::encode_ascii(&record).expect("decoded record must encode");
        let again = pnm::decode(&encoded).expect("re-encoded anymap must decode");
        assert_eq!(record.samples(), again.samples(), "anymap roundtrip mismatch");
        assert_eq!(record.width(), again.width());
        assert_eq!(record.height(), again.height());
        assert_eq!(record.channels(), again.channels());
    }

    if let Ok(record) = DecodeRequest::new()
        .with_limits(&limits)
        .decode(data, SourceKind::Wave, None)
    {
        let Some(rate) = record.sample_rate().filter(|&r| r > 0) else {
            return;
        };
        let Ok(encoded) = wav::encode(record.samples(), record.width(), record.height(), rate)
        else {
            return;
        };
        let again = wav::decode(&encoded).expect("re-encoded wave must decode");
        assert_eq!(record.samples(), again.samples(), "wave roundtrip mismatch");
        assert_eq!(record.width(), again.width());
    }
});
