use super::support::Fixture;
use fsv::config::HashConfig;
use fsv::hash::digest_bytes;
use fsv::{CancelToken, FsvError};

#[test]
fn hash_is_reflexive() {
    let fx = Fixture::new();
    let file = fx.file("data.bin", (0..=255u8).cycle().take(200_000).collect::<Vec<_>>());
    let digest = file.hash().unwrap();
    assert!(file.has_hash(digest).unwrap());
}

#[test]
fn hash_is_independent_of_chunk_size() {
    let fx = Fixture::new();
    let bytes: Vec<u8> = (0..10_007u32).map(|i| (i * 31 % 251) as u8).collect();
    let file = fx.file("data.bin", &bytes);
    let expected = digest_bytes(&bytes);

    for chunk_size in [1, 7, 4096, 10_007, 1 << 20] {
        let config = HashConfig {
            chunk_size,
            channel_depth: 2,
        };
        let digest = file.hash_with(&config, &CancelToken::new()).unwrap();
        assert_eq!(digest, expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn hello_files_hash_equal() {
    let fx = Fixture::new();
    let a = fx.file("a", "hello");
    let b = fx.file("b", "hello");
    let c = fx.file("c", "world");

    assert!(a.same_hash_as(&b).unwrap());
    assert!(!a.same_hash_as(&c).unwrap());
    assert_eq!(a.hash().unwrap(), b.hash().unwrap());
}

#[test]
fn hashing_a_directory_fails_with_io_error() {
    let fx = Fixture::new();
    let dir = fx.dir("d");
    assert!(matches!(dir.hash(), Err(FsvError::Io(_))));
}

#[test]
fn has_hash_propagates_open_failure() {
    let fx = Fixture::new();
    let missing = fx.path("missing");
    assert!(matches!(
        missing.has_hash(digest_bytes(b"")),
        Err(FsvError::Io(_))
    ));
}
