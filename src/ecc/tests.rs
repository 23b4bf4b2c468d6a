//! End-to-end correction scenarios built on the worked example of ISO 15438 Annex Q.

use crate::ecc::{decode, ErrorCorrection, ErrorCorrectionLevel, Pdf417Codec};
use crate::error::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const PDF417_TEST: [u16; 5] = [5, 453, 178, 121, 239];
const PDF417_TEST_WITH_EC: [u16; 9] = [5, 453, 178, 121, 239, 452, 327, 657, 619];
const ECC_COUNT: usize = PDF417_TEST_WITH_EC.len() - PDF417_TEST.len();
// The example uses level 1: l + 2f <= 2^(s+1) - 2
const EC_LEVEL: u8 = 1;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0xDEAD_BEEF)
}

fn level() -> ErrorCorrectionLevel {
    ErrorCorrectionLevel::new(EC_LEVEL).unwrap()
}

/// Replace `how_many` distinct positions with different values
fn corrupt(received: &mut [u16], how_many: usize, rng: &mut StdRng) {
    let mut corrupted = HashSet::new();
    while corrupted.len() < how_many {
        let location = rng.gen_range(0..received.len());
        let value = rng.gen_range(0..929);
        if corrupted.contains(&location) || received[location] == value {
            continue;
        }
        corrupted.insert(location);
        received[location] = value;
    }
}

/// Zero out `how_many` distinct positions and return them
fn erase(received: &mut [u16], how_many: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut erasures = Vec::with_capacity(how_many);
    while erasures.len() < how_many {
        let location = rng.gen_range(0..received.len());
        if erasures.contains(&location) {
            continue;
        }
        received[location] = 0;
        erasures.push(location);
    }
    erasures
}

fn check_decode(received: &mut [u16], erasures: &[usize]) {
    decode(received, ECC_COUNT, erasures).unwrap();
    assert_eq!(&received[..PDF417_TEST.len()], &PDF417_TEST);
}

#[test]
fn test_no_error() {
    let mut received = PDF417_TEST_WITH_EC;
    assert_eq!(decode(&mut received, ECC_COUNT, &[]).unwrap(), 0);
    assert_eq!(received, PDF417_TEST_WITH_EC);
}

#[test]
fn test_one_error() {
    let mut rng = rng();
    for i in 0..PDF417_TEST_WITH_EC.len() {
        let mut received = PDF417_TEST_WITH_EC;
        received[i] = rng.gen_range(0..256);
        check_decode(&mut received, &[]);
        assert_eq!(received, PDF417_TEST_WITH_EC);
    }
}

#[test]
fn test_max_errors() {
    let mut rng = rng();
    // Inside 2f <= k the algebra always recovers the block
    for _ in 0..PDF417_TEST.len() * 20 {
        let mut received = PDF417_TEST_WITH_EC;
        corrupt(&mut received, ECC_COUNT / 2, &mut rng);
        check_decode(&mut received, &[]);
    }

    let codec = Pdf417Codec::new(level());
    for _ in 0..PDF417_TEST.len() * 20 {
        let mut received = PDF417_TEST_WITH_EC;
        corrupt(&mut received, level().max_errors(), &mut rng);
        codec.decode(&mut received, &[]).unwrap();
        assert_eq!(received, PDF417_TEST_WITH_EC);
    }
}

#[test]
fn test_too_many_errors() {
    let mut rng = rng();
    let codec = Pdf417Codec::new(level());
    for how_many in [level().max_errors() + 1, level().max_errors() + 2] {
        for _ in 0..50 {
            let mut received = PDF417_TEST_WITH_EC;
            corrupt(&mut received, how_many, &mut rng);
            let corrupted = received;
            assert!(
                matches!(
                    codec.decode(&mut received, &[]),
                    Err(Error::UncorrectableBlock(_))
                ),
                "{} errors should not decode",
                how_many
            );
            assert_eq!(received, corrupted);
        }
    }
}

#[test]
fn test_max_erasures() {
    let mut rng = rng();
    for _ in 0..PDF417_TEST.len() * 20 {
        let mut received = PDF417_TEST_WITH_EC;
        let erasures = erase(&mut received, ECC_COUNT, &mut rng);
        check_decode(&mut received, &erasures);
        assert_eq!(received, PDF417_TEST_WITH_EC);
    }

    let codec = Pdf417Codec::new(level());
    for _ in 0..PDF417_TEST.len() * 20 {
        let mut received = PDF417_TEST_WITH_EC;
        let erasures = erase(&mut received, level().max_erasures(), &mut rng);
        codec.decode(&mut received, &erasures).unwrap();
        assert_eq!(received, PDF417_TEST_WITH_EC);
    }
}

#[test]
fn test_too_many_erasures() {
    let mut rng = rng();
    let codec = Pdf417Codec::new(level());
    let mut received = PDF417_TEST_WITH_EC;
    let erasures = erase(&mut received, level().max_erasures() + 1, &mut rng);
    assert!(matches!(
        codec.decode(&mut received, &erasures),
        Err(Error::UncorrectableBlock(_))
    ));

    let mut received = PDF417_TEST_WITH_EC;
    let erasures = erase(&mut received, ECC_COUNT + 1, &mut rng);
    // No five zeroed positions of the example form another valid block
    assert!(matches!(
        decode(&mut received, ECC_COUNT, &erasures),
        Err(Error::UncorrectableBlock(_))
    ));
}

#[test]
fn test_erasure_and_error() {
    let mut rng = rng();
    for i in 0..PDF417_TEST_WITH_EC.len() {
        let mut received = PDF417_TEST_WITH_EC;
        received[i] = rng.gen_range(0..256);
        for j in 0..PDF417_TEST_WITH_EC.len() {
            if i == j {
                continue;
            }
            let mut attempt = received;
            attempt[j] = 0;
            check_decode(&mut attempt, &[j]);
            assert_eq!(attempt, PDF417_TEST_WITH_EC);
        }
    }
}

#[test]
fn test_random_blocks_at_every_level() {
    let mut rng = rng();
    for level in 0..=5 {
        let level = ErrorCorrectionLevel::new(level).unwrap();
        let codec = Pdf417Codec::new(level);
        let data: Vec<u16> = (0..30).map(|_| rng.gen_range(0..929)).collect();
        let original = codec.encode(&data).unwrap();

        for _ in 0..5 {
            let erasure_count = rng.gen_range(0..=level.max_erasures());
            let error_count = (level.correction_capacity() - erasure_count) / 2;

            let mut received = original.clone();
            let erasures = erase(&mut received, erasure_count, &mut rng);
            let mut others: Vec<u16> = received.clone();
            corrupt(&mut others, error_count, &mut rng);
            for (position, value) in others.into_iter().enumerate() {
                if !erasures.contains(&position) {
                    received[position] = value;
                }
            }

            codec.decode(&mut received, &erasures).unwrap();
            assert_eq!(received, original, "{}", level);
        }
    }
}
