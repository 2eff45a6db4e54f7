//! Deterministic RNG helpers.
//!
//! Everything random in a battle goes through [`DeterministicRng`] so tests can
//! swap the production generator for a [`ScriptedRng`]. None of this is
//! cryptographic.

use std::collections::VecDeque;

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_f32_unit(&mut self) -> f32 {
        // 24 bits of mantissa -> [0, 1)
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Panics if the range is empty.
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        assert!(low < high, "empty range {low}..{high}");

        let span = (high as i64 - low as i64) as u64;
        let threshold = u64::MAX - (u64::MAX % span);
        loop {
            let x = self.next_u64();
            if x < threshold {
                return (low as i64 + (x % span) as i64) as i32;
            }
        }
    }
}

impl<R: DeterministicRng + ?Sized> DeterministicRng for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        (**self).next_in_range(low, high)
    }
}

impl<R: DeterministicRng + ?Sized> DeterministicRng for Box<R> {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        (**self).next_in_range(low, high)
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

/// Queue-backed generator for tests and replays.
///
/// Pushed values come back verbatim, in order, from `next_in_range`,
/// `next_u32` and `next_u64`. Once the script runs dry it falls back to a
/// seeded [`SplitMix64`].
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: VecDeque<i32>,
    fallback: SplitMix64,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: values.into_iter().collect(),
            fallback: SplitMix64::new(0),
        }
    }

    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = SplitMix64::new(seed);
        self
    }

    pub fn push(&mut self, value: i32) {
        self.script.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DeterministicRng for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        match self.script.pop_front() {
            Some(value) => value as u32 as u64,
            None => self.fallback.next_u64(),
        }
    }

    fn next_u32(&mut self) -> u32 {
        match self.script.pop_front() {
            Some(value) => value as u32,
            None => self.fallback.next_u32(),
        }
    }

    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        assert!(low < high, "empty range {low}..{high}");
        match self.script.pop_front() {
            Some(value) => {
                assert!(
                    (low..high).contains(&value),
                    "scripted value {value} outside requested range {low}..{high}"
                );
                value
            }
            None => self.fallback.next_in_range(low, high),
        }
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

pub fn derive_seed(global_seed: u64, agent_id: u64, stream: u64) -> u64 {
    let x = global_seed ^ mix64(agent_id.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(stream);
    mix64(x)
}
