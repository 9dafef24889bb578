use super::support::Fixture;
use fsv::config::{CompareConfig, HashConfig};
use fsv::{CancelToken, Path};
use proptest::prelude::*;

const BUF: usize = 64;

fn both(a: &Path, b: &Path) -> (bool, bool) {
    let contents = a
        .same_contents_as_with(b, &CompareConfig { buffer_size: BUF }, &CancelToken::new())
        .unwrap();
    let hashes = a
        .same_hash_as_with(
            b,
            &HashConfig {
                chunk_size: BUF,
                channel_depth: 2,
            },
            &CancelToken::new(),
        )
        .unwrap();
    (contents, hashes)
}

#[test]
fn hello_world_scenario() {
    let fx = Fixture::new();
    let a = fx.file("a", "hello");
    let b = fx.file("b", "hello");
    let c = fx.file("c", "world");

    assert!(a.same_contents_as(&b).unwrap());
    assert!(a.same_hash_as(&b).unwrap());
    assert!(!a.same_contents_as(&c).unwrap());
    assert!(!a.same_hash_as(&c).unwrap());
}

#[test]
fn checks_agree_around_buffer_boundaries() {
    let fx = Fixture::new();
    for size in [0, 1, BUF - 1, BUF, BUF + 1, 3 * BUF] {
        let bytes: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        let a = fx.file(&format!("{}-a", size), &bytes);
        let b = fx.file(&format!("{}-b", size), &bytes);
        assert_eq!(both(&a, &b), (true, true), "identical, size {}", size);

        if size > 0 {
            let mut changed = bytes.clone();
            changed[size - 1] ^= 0xff;
            let c = fx.file(&format!("{}-c", size), &changed);
            assert_eq!(both(&a, &c), (false, false), "last byte differs, size {}", size);
        }

        let mut longer = bytes.clone();
        longer.push(0);
        let d = fx.file(&format!("{}-d", size), &longer);
        assert_eq!(both(&a, &d), (false, false), "one byte longer, size {}", size);
    }
}

#[test]
fn comparing_with_missing_file_fails() {
    let fx = Fixture::new();
    let a = fx.file("a", "x");
    assert!(a.same_contents_as(&fx.path("none")).is_err());
    assert!(fx.path("none").same_contents_as(&a).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn contents_and_hash_checks_agree(
        a in proptest::collection::vec(any::<u8>(), 0..300),
        b in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let fx = Fixture::new();
        let pa = fx.file("a", &a);
        let pb = fx.file("b", &b);
        let (contents, hashes) = both(&pa, &pb);
        prop_assert_eq!(contents, a == b);
        prop_assert_eq!(hashes, a == b);
    }
}
