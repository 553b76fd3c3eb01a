use std::sync::Arc;
use std::thread;

use zkhash_core::ec::babyjub;
use zkhash_core::hash::pedersen::{BasePointTable, PedersenHasher, BITS_PER_SEGMENT};
use zkhash_core::{pedersen_hash, PedersenConfig};

#[test]
fn concurrent_first_use_builds_each_segment_once() {
    let table = Arc::new(BasePointTable::new());
    let preimage = vec![0x5a; 2 * BITS_PER_SEGMENT / 8 + 1];
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let table = Arc::clone(&table);
            let preimage = preimage.clone();
            thread::spawn(move || {
                PedersenHasher::new(table, PedersenConfig::default())
                    .hash(&preimage)
                    .unwrap()
            })
        })
        .collect();
    let digests: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(digests.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(table.cached_segments(), 3);

    let a = table.segment(1).unwrap();
    let b = table.segment(1).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    // a private table agrees with the shared one
    assert_eq!(digests[0], pedersen_hash(&preimage).unwrap());
}

#[test]
fn digest_is_the_compressed_point() {
    let hasher = PedersenHasher::default();
    let point = hasher.hash_point(b"zkhash").unwrap();
    assert!(babyjub::in_sub_group(&point));
    let digest = hasher.hash(b"zkhash").unwrap();
    assert_eq!(
        babyjub::decompress(&digest, hasher.config().digest_endian).unwrap(),
        point
    );
}

#[test]
fn zero_bytes_still_contribute() {
    // an all-zero window adds +1 times its base
    let a = pedersen_hash(&[0x00]).unwrap();
    let b = pedersen_hash(&[0x00, 0x00]).unwrap();
    assert_ne!(a, b);
}
