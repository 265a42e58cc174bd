#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mashlf::{LineMasher, MashOptions};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, SeedableRng};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    seed: u64,
    min: u8,
    max: u8,
    split_seed: u64,
    payload: &'a [u8],
}

fn without_line_feeds(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != b'\n').collect()
}

fn mash(input: &Input<'_>) {
    let min = i64::from(input.min.max(1));
    let max = i64::from(input.max.max(1));
    let options = MashOptions {
        min_length: min,
        max_length: max,
        seed: input.seed,
        ..Default::default()
    };

    // Feed the payload in randomly sized chunks; chunks may end mid code point.
    let mut rng = SmallRng::seed_from_u64(input.split_seed);
    let mut masher = LineMasher::new(options, Vec::new()).unwrap();
    let mut rest = input.payload;
    while !rest.is_empty() {
        let size = rng.random_range(1..=rest.len());
        let (chunk, tail) = rest.split_at(size);
        masher.feed(chunk).unwrap();
        rest = tail;
    }
    let out = masher.finish().unwrap();

    assert_eq!(without_line_feeds(&out), without_line_feeds(input.payload));
    assert!(out.is_empty() || out.ends_with(b"\n"));

    if let Ok(text) = std::str::from_utf8(input.payload) {
        let out = std::str::from_utf8(&out).expect("line feed inserted inside a code point");
        let max = usize::from(input.min.max(input.max).max(1));
        let longest = out.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
        assert!(longest <= max, "line of {longest} code points, max {max}");
        assert_eq!(out.replace('\n', ""), text.replace('\n', ""));
    }
}

fuzz_target!(|input: Input<'_>| mash(&input));
