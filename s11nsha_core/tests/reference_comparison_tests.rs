//! Compare the engine against the `sha1` crate on generated inputs

use s11nsha_core::codec::{self, SnapshotEncoding};
use s11nsha_core::{Sha1Hasher, StreamingHasher, sha1};
use s11nsha_test_utils::{
    ChunkPlan, ReferenceSha1, encode_hex, random_alphanumeric, seeded_alphanumeric,
};

/// Drive both hashers through the same chunk sequence
fn feed_both(chunks: &[&[u8]]) -> (String, String) {
    let mut ours = Sha1Hasher::new();
    let mut reference = ReferenceSha1::new();
    let hashers: [&mut dyn StreamingHasher; 2] = [&mut ours, &mut reference];

    let [ours, reference] = hashers.map(|hasher| {
        for chunk in chunks {
            hasher.update(chunk);
        }
        encode_hex(hasher.finalize().as_bytes())
    });

    (ours, reference)
}

#[test]
fn test_known_vectors_in_uppercase_hex() {
    assert_eq!(
        encode_hex(sha1(b"").as_bytes()),
        "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709"
    );
    assert_eq!(
        encode_hex(sha1(b"librados").as_bytes()),
        "8A5DBDE5A76A1431F092FA7DDE144F846DE3B219"
    );
}

#[test]
fn test_calculate_random_strings() {
    let mut hasher = Sha1Hasher::new();

    for seed in 0..50u64 {
        let len = (seed as usize * 7_919) % (256 * 1024) + 1;
        let plain = seeded_alphanumeric(len, seed);

        assert_eq!(
            hasher.calculate(&plain),
            ReferenceSha1::digest(&plain),
            "length {len}"
        );
    }
}

#[test]
fn test_random_chunking_matches_reference() {
    let plain = random_alphanumeric(100_000);

    for seed in 0..25 {
        let plan = ChunkPlan::random(plain.len(), 1 + seed as usize * 37, seed);
        let (ours, reference) = feed_both(&plan.split(&plain));
        assert_eq!(ours, reference, "plan seed {seed}");
    }
}

#[test]
fn test_block_sized_and_byte_at_a_time_chunking() {
    let plain = seeded_alphanumeric(4_099, 3);

    for chunk in [1, 63, 64, 65, 128, 4_096] {
        let plan = ChunkPlan::uniform(plain.len(), chunk);
        let (ours, reference) = feed_both(&plan.split(&plain));
        assert_eq!(ours, reference, "chunk size {chunk}");
    }
}

#[test]
fn test_marshal_and_unmarshal_random_strings() {
    for encoding in [SnapshotEncoding::Text, SnapshotEncoding::Compact] {
        let first = random_alphanumeric(300_001);
        let second = random_alphanumeric(70_003);
        let third = random_alphanumeric(123_457);

        let mut original = Sha1Hasher::new();
        original.update(&first);
        original.update(&second);

        let snapshot = codec::marshal_hasher(&original, encoding);
        let mut restored = Sha1Hasher::new();
        codec::unmarshal_into(&mut restored, &snapshot, encoding).unwrap();

        original.update(&third);
        restored.update(&third);

        let mut reference = ReferenceSha1::new();
        for part in [&first, &second, &third] {
            reference.update(part);
        }

        let expected = reference.finalize();
        assert_eq!(original.finalize(), expected, "{encoding}");
        assert_eq!(restored.finalize(), expected, "{encoding}");
    }
}

#[test]
fn test_repeated_snapshots_along_the_way() {
    let plain = seeded_alphanumeric(10_000, 11);
    let plan = ChunkPlan::random(plain.len(), 700, 11);

    let mut hasher = Sha1Hasher::new();
    for (i, chunk) in plan.split(&plain).into_iter().enumerate() {
        let encoding = if i % 2 == 0 {
            SnapshotEncoding::Text
        } else {
            SnapshotEncoding::Compact
        };
        let snapshot = codec::marshal_hasher(&hasher, encoding);
        hasher = Sha1Hasher::from_state(codec::unmarshal(&snapshot, encoding).unwrap());
        hasher.update(chunk);
    }

    assert_eq!(hasher.finalize(), ReferenceSha1::digest(&plain));
}

#[test]
fn test_hasher_reusable_after_finalize() {
    let mut hasher = Sha1Hasher::new();

    for seed in 0..10 {
        let plain = seeded_alphanumeric(1_000 + seed as usize, seed);
        hasher.update(&plain);
        assert_eq!(hasher.finalize(), ReferenceSha1::digest(&plain));
        assert_eq!(hasher, Sha1Hasher::new());
    }
}

/// Roughly half a gigabyte through many updates of varying sizes.
///
/// Run with `cargo test --release -- --ignored`.
#[test]
#[ignore]
fn test_large_input_matches_reference() {
    let mut ours = Sha1Hasher::new();
    let mut reference = ReferenceSha1::new();
    let mut total = 0usize;

    for seed in 0..512u64 {
        let len = (seed as usize * 104_729) % (1024 * 1024) + 1;
        let plain = seeded_alphanumeric(len, seed);
        ours.update(&plain);
        reference.update(&plain);
        total += len;
    }

    assert_eq!(ours.byte_count(), total as u64);
    assert_eq!(ours.finalize(), reference.finalize());
}
