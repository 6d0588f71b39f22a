//! Seeded random streams.
//!
//! Every population is a pure function of its seed. The default stream is a
//! small linear-congruential generator whose output is bit-compatible with
//! the reference member populations; a ChaCha8 stream is available when
//! statistical quality matters more than parity.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// LCG multiplier
const LCG_MULTIPLIER: u64 = 9301;
/// LCG increment
const LCG_INCREMENT: u64 = 49297;
/// LCG modulus (also the divisor mapping state into [0, 1))
const LCG_MODULUS: u64 = 233280;

/// A deterministic source of uniform draws in [0, 1).
pub trait UnitStream {
    /// Advances the stream and returns a value in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Draws one normal deviate.
    ///
    /// Default is Box-Muller over two uniform draws; the paired sine
    /// deviate is discarded so each call consumes exactly two draws.
    fn normal(&mut self, mean: f64, std: f64) -> f64 {
        let u1 = self.next_unit();
        let u2 = self.next_unit();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + z0 * std
    }

    /// Draws a log-normal value around `median`.
    fn log_normal(&mut self, median: f64, spread: f64) -> f64 {
        median * (self.normal(0.0, 1.0) * spread).exp()
    }
}

/// Linear-congruential stream: `state = (state * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone)]
pub struct LcgStream {
    state: u64,
}

impl LcgStream {
    /// Creates a stream from an integer seed.
    ///
    /// Only the residue of the seed modulo 233280 affects the sequence, so
    /// it is reduced up front to keep the recurrence inside `u64`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    /// Returns the current raw state.
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl UnitStream for LcgStream {
    fn next_unit(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

/// ChaCha8-backed stream. Normal draws use `rand_distr` instead of
/// Box-Muller.
#[derive(Debug, Clone)]
pub struct ChaChaStream {
    rng: ChaCha8Rng,
}

impl ChaChaStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl UnitStream for ChaChaStream {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn normal(&mut self, mean: f64, std: f64) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.rng);
        mean + z * std
    }
}

/// Which stream a generation run draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Reference LCG (parity with the published populations)
    #[default]
    Lcg,
    /// ChaCha8 with `rand_distr` normals
    ChaCha,
}

impl StreamKind {
    pub fn name(&self) -> &'static str {
        match self {
            StreamKind::Lcg => "lcg",
            StreamKind::ChaCha => "chacha",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for StreamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lcg" => Ok(StreamKind::Lcg),
            "chacha" | "chacha8" => Ok(StreamKind::ChaCha),
            _ => Err(format!("Unknown stream: {} (expected lcg or chacha)", s)),
        }
    }
}

/// One normal deviate from `stream`.
pub fn random_normal<S: UnitStream + ?Sized>(stream: &mut S, mean: f64, std: f64) -> f64 {
    stream.normal(mean, std)
}

/// `median * exp(N(0, 1) * spread)`.
pub fn random_log_normal<S: UnitStream + ?Sized>(stream: &mut S, median: f64, spread: f64) -> f64 {
    stream.log_normal(median, spread)
}
