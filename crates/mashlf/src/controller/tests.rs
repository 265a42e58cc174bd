use std::{collections::VecDeque, io};

use super::*;
use crate::SeededRng;

/// Replays fixed draws, then repeats the last one.
#[derive(Debug)]
struct Scripted {
    draws: VecDeque<f64>,
    last: f64,
}

impl Scripted {
    fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            last: 0.0,
        }
    }
}

impl UniformSource for Scripted {
    fn uniform_f64(&mut self) -> f64 {
        if let Some(u) = self.draws.pop_front() {
            self.last = u;
        }
        self.last
    }

    fn next_u32(&mut self) -> u32 {
        unreachable!("line lengths only use uniform_f64")
    }
}

/// Accepts `budget` bytes, then fails every write.
#[derive(Debug)]
struct Failing {
    budget: usize,
    written: Vec<u8>,
}

impl io::Write for Failing {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn ascii(controller: &mut LineController<Vec<u8>, impl UniformSource>, text: &str) {
    for b in text.bytes() {
        controller.consume(Flush::new(&[b], 1)).unwrap();
    }
}

#[test]
fn first_cut_length_is_drawn_on_construction() {
    let range = CutRange::new(2, 5).unwrap();
    let controller = LineController::new(range, Scripted::new(&[0.5]), Vec::new());
    assert_eq!(controller.cut_length(), 4);
    assert_eq!(controller.code_count(), 0);
}

#[test]
fn terminator_after_cut_length_then_redraw() {
    // span 4: 0.0 -> 2, 0.75 -> 5
    let range = CutRange::new(2, 5).unwrap();
    let mut controller = LineController::new(range, Scripted::new(&[0.0, 0.75]), Vec::new());
    ascii(&mut controller, "abcdefg");
    assert_eq!(controller.cut_length(), 5);
    assert_eq!(controller.code_count(), 0);
    let out = controller.finalize().unwrap();
    assert_eq!(out, b"ab\ncdefg\n");
}

#[test]
fn two_unit_flush_can_overshoot_cut_length() {
    let range = CutRange::new(3, 3).unwrap();
    let mut controller = LineController::new(range, SeededRng::new(0), Vec::new());
    ascii(&mut controller, "ab");
    controller.consume(Flush::new(&[0xC3, b'x'], 2)).unwrap();
    assert_eq!(controller.code_count(), 0);
    let out = controller.finalize().unwrap();
    assert_eq!(out, b"ab\xC3x\n");
}

#[test]
fn empty_flush_changes_nothing() {
    let range = CutRange::new(1, 1).unwrap();
    let mut controller = LineController::new(range, SeededRng::new(0), Vec::new());
    controller.consume(Flush::NONE).unwrap();
    assert_eq!(controller.lines(), 0);
    assert_eq!(controller.finalize().unwrap(), b"");
}

#[test]
fn finalize_skips_terminator_on_exact_cut() {
    let range = CutRange::new(3, 3).unwrap();
    let mut controller = LineController::new(range, SeededRng::new(9), Vec::new());
    ascii(&mut controller, "abc");
    assert_eq!(controller.lines(), 1);
    assert_eq!(controller.finalize().unwrap(), b"abc\n");
}

#[test]
fn cut_lengths_stay_in_range() {
    let range = CutRange::new(3, 9).unwrap();
    let mut controller = LineController::new(range, SeededRng::new(123), Vec::new());
    let mut seen = [false; 10];
    for _ in 0..2_000 {
        let len = controller.cut_length();
        assert!((3..=9).contains(&len), "{len}");
        seen[len] = true;
        for _ in 0..len {
            controller.consume(Flush::new(b"x", 1)).unwrap();
        }
    }
    assert!(seen[3..=9].iter().all(|&s| s), "{seen:?}");
}

#[test]
fn write_failure_is_reported() {
    let range = CutRange::new(2, 2).unwrap();
    let sink = Failing {
        budget: 2,
        written: Vec::new(),
    };
    let mut controller = LineController::new(range, SeededRng::new(0), sink);
    controller.consume(Flush::new(b"a", 1)).unwrap();
    // "b" fits, the terminator does not.
    let err = controller.consume(Flush::new(b"b", 1)).unwrap_err();
    assert!(matches!(err, MashError::Write(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(err.exit_code(), 2);
}
