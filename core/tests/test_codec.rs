// Codec behaviour through the public API:
//
// * nil / empty argument rejection
// * size limit on decode and on the trailing drain
// * header, payload and footer corruption
// * unsupported values on the write path

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use compress_core::{
        compression::{compress, compress_with, decompress, decompress_with, CodecConfig, CompressionError},
        constants::{DEFAULT_MAX_DECOMPRESSED_SIZE, GZIP_MAGIC},
        types::ErrorCode,
    };
    use flate2::{write::GzEncoder, Compression};
    use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: u64,
        email: String,
        roles: Vec<String>,
    }

    fn sample_user() -> User {
        User {
            id: 42,
            email: "u@example.com".into(),
            roles: vec!["admin".into(), "dev".into()],
        }
    }

    fn gzip_raw(bytes: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    fn truncate_end(b: &[u8], n: usize) -> Vec<u8> {
        b[..b.len() - n].to_vec()
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("no JSON representation"))
        }
    }

// # ✅ Write path

    #[test]
    fn compress_nil_is_rejected() {
        let err = compress::<User>(None).unwrap_err();
        assert!(err.to_string().contains("data cannot be nil"));
        assert_eq!(err.code(), ErrorCode::InvalidParams);
    }

    #[test]
    fn compress_output_starts_with_gzip_magic() {
        let blob = compress(Some(&sample_user())).unwrap();
        assert!(blob.len() > 2);
        assert!(blob.starts_with(&GZIP_MAGIC));
    }

    #[test]
    fn compress_non_string_map_keys_names_the_type() {
        let mut m: HashMap<Vec<u8>, i32> = HashMap::new();
        m.insert(vec![1, 2], 3);

        let err = compress(Some(&m)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalServerError);
        let msg = err.to_string();
        assert!(msg.contains("failed to encode JSON"), "{msg}");
        assert!(msg.contains("HashMap"), "{msg}");
    }

    #[test]
    fn compress_failing_serialize_impl_names_the_type() {
        let err = compress(Some(&Unencodable)).unwrap_err();
        assert!(matches!(err, CompressionError::Encode { .. }));
        assert!(err.to_string().contains("Unencodable"));
        assert!(err.to_string().contains("no JSON representation"));
    }

    #[test]
    fn compress_level_changes_output_not_content() {
        let text = "abcdefgh".repeat(512);
        let fast = compress_with(Some(&text), &CodecConfig::new(Some(1), None)).unwrap();
        let stored = compress_with(Some(&text), &CodecConfig::new(Some(0), None)).unwrap();
        assert!(fast.len() < stored.len());

        let mut a = String::new();
        let mut b = String::new();
        decompress(&fast, Some(&mut a), 0).unwrap();
        decompress(&stored, Some(&mut b), 0).unwrap();
        assert_eq!(a, text);
        assert_eq!(b, text);
    }

// # ✅ Read path: success

    #[test]
    fn roundtrip_struct() {
        let blob = compress(Some(&sample_user())).unwrap();
        let mut got = User { id: 0, email: String::new(), roles: vec![] };
        decompress(&blob, Some(&mut got), 256).unwrap();
        assert_eq!(got, sample_user());
    }

    #[test]
    fn default_limit_matches_explicit_four_mib() {
        let blob = compress(Some(&sample_user())).unwrap();

        let mut a: Option<User> = None;
        let mut b: Option<User> = None;
        decompress(&blob, Some(&mut a), 0).unwrap();
        decompress(&blob, Some(&mut b), DEFAULT_MAX_DECOMPRESSED_SIZE as i64).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Some(sample_user()));
    }

    #[test]
    fn negative_limit_selects_default() {
        let big = "a".repeat(DEFAULT_MAX_DECOMPRESSED_SIZE as usize + 1);
        let blob = compress(Some(&big)).unwrap();

        let mut out = String::new();
        let err = decompress(&blob, Some(&mut out), -1).unwrap_err();
        assert!(err
            .to_string()
            .contains(&format!("decompressed size exceeds limit: {} bytes", DEFAULT_MAX_DECOMPRESSED_SIZE)));
    }

    #[test]
    fn config_limit_is_applied() {
        let blob = compress(Some(&"a".repeat(100))).unwrap();
        let mut out = String::new();

        let err = decompress_with(&blob, Some(&mut out), &CodecConfig::new(None, Some(10))).unwrap_err();
        assert!(matches!(err, CompressionError::LimitExceeded { limit: 10 }));

        decompress_with(&blob, Some(&mut out), &CodecConfig::default()).unwrap();
        assert_eq!(out, "a".repeat(100));
    }

// # ❌ Read path: argument rejection

    #[test]
    fn decompress_empty_input_is_rejected() {
        let mut out = sample_user();
        let err = decompress(&[], Some(&mut out), 0).unwrap_err();
        assert!(err.to_string().contains("compressed data cannot be empty"));
        assert_eq!(err.code(), ErrorCode::InvalidParams);
    }

    #[test]
    fn decompress_nil_destination_is_rejected() {
        let blob = compress(Some(&sample_user())).unwrap();
        let err = decompress::<User>(&blob, None, 0).unwrap_err();
        assert!(err.to_string().contains("output destination cannot be nil"));
        assert_eq!(err.code(), ErrorCode::InvalidParams);
    }

// # ❌ Read path: size limit

    #[test]
    fn decode_over_limit_is_reported_as_limit() {
        let blob = compress(Some(&"a".repeat(100))).unwrap();
        let mut s = String::new();
        let err = decompress(&blob, Some(&mut s), 10).unwrap_err();
        assert!(err.to_string().contains("decompressed size exceeds limit: 10 bytes"));
        assert_eq!(err.code(), ErrorCode::InvalidParams);
        assert!(s.is_empty());
    }

    #[test]
    fn padding_after_valid_value_still_hits_limit() {
        // `1` decodes after two bytes; the padding must not slip past the budget.
        let mut payload = b"1 ".to_vec();
        payload.extend(std::iter::repeat(b' ').take(64));
        let blob = gzip_raw(&payload);

        let mut n = 0u32;
        let err = decompress(&blob, Some(&mut n), 10).unwrap_err();
        assert!(err.to_string().contains("decompressed size exceeds limit: 10 bytes"));
        assert_eq!(n, 0);

        decompress(&blob, Some(&mut n), payload.len() as i64).unwrap();
        assert_eq!(n, 1);
    }

// # ❌ Read path: corruption

    #[test]
    fn non_gzip_input_fails_header() {
        let mut out = sample_user();
        let err = decompress(b"not compressed", Some(&mut out), 0).unwrap_err();
        assert!(err.to_string().contains("failed to create decompressor"));
        assert_eq!(err.code(), ErrorCode::InternalServerError);
    }

    #[test]
    fn truncated_header_fails_header() {
        let blob = compress(Some(&sample_user())).unwrap();
        let mut out = sample_user();
        let err = decompress(&blob[..5], Some(&mut out), 0).unwrap_err();
        assert!(matches!(err, CompressionError::Decompressor(_)));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let blob = gzip_raw(b"{");
        let mut m: HashMap<String, serde_json::Value> = HashMap::new();
        let err = decompress(&blob, Some(&mut m), 1024).unwrap_err();
        assert!(err.to_string().contains("failed to decode JSON"));
        assert_eq!(err.code(), ErrorCode::InternalServerError);
    }

    #[test]
    fn truncated_footer_fails_verification() {
        let blob = compress(Some(&serde_json::json!({ "ok": true }))).unwrap();
        let corrupted = truncate_end(&blob, 4);

        let mut m: HashMap<String, serde_json::Value> = HashMap::new();
        let err = decompress(&corrupted, Some(&mut m), 1024).unwrap_err();
        assert!(err.to_string().contains("failed to verify complete stream"), "{err}");
        assert_eq!(err.code(), ErrorCode::InternalServerError);
        assert!(m.is_empty());
    }

    #[test]
    fn checksum_mismatch_fails_verification() {
        let mut blob = compress(Some(&sample_user())).unwrap();
        let crc_at = blob.len() - 8;
        blob[crc_at] ^= 0xff;

        let mut out = Option::<User>::None;
        let err = decompress(&blob, Some(&mut out), 0).unwrap_err();
        assert!(matches!(err, CompressionError::Verify(_)));
        assert!(out.is_none());
    }

    #[test]
    fn junk_after_footer_fails_verification() {
        let mut blob = compress(Some(&vec![1, 2, 3])).unwrap();
        blob.extend_from_slice(b"garbage-after-footer");

        let mut out: Vec<i32> = Vec::new();
        let err = decompress(&blob, Some(&mut out), 0).unwrap_err();
        assert!(err.to_string().contains("failed to verify complete stream"), "{err}");
        assert_eq!(err.code(), ErrorCode::InternalServerError);
        assert!(out.is_empty());
    }

    #[test]
    fn trailing_member_is_charged_to_the_limit() {
        let mut blob = compress(Some(&vec![1, 2, 3])).unwrap();
        blob.extend(compress(Some(&"a".repeat(1000))).unwrap());

        let mut out: Vec<i32> = Vec::new();
        let err = decompress(&blob, Some(&mut out), 50).unwrap_err();
        assert!(err.to_string().contains("decompressed size exceeds limit: 50 bytes"), "{err}");
        assert!(out.is_empty());

        // Within budget the second member is read through and its footer checked.
        decompress(&blob, Some(&mut out), 0).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn corrupt_trailing_member_fails_verification() {
        let mut blob = compress(Some(&vec![1, 2, 3])).unwrap();
        let mut second = compress(Some(&"tail")).unwrap();
        let crc_at = second.len() - 8;
        second[crc_at] ^= 0xff;
        blob.extend(second);

        let mut out: Vec<i32> = Vec::new();
        let err = decompress(&blob, Some(&mut out), 0).unwrap_err();
        assert!(matches!(err, CompressionError::Verify(_)));
        assert!(out.is_empty());
    }

// # ✅ Reentrancy

    #[test]
    fn concurrent_calls_do_not_interfere() {
        std::thread::scope(|s| {
            for id in 0..8u64 {
                s.spawn(move || {
                    let user = User { id, ..sample_user() };
                    let blob = compress(Some(&user)).unwrap();
                    let mut got: Option<User> = None;
                    decompress(&blob, Some(&mut got), 0).unwrap();
                    assert_eq!(got, Some(user));
                });
            }
        });
    }
}
