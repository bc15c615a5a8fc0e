//! Fractalstream password-keyed keystream engine.
//!
//! Fractalstream derives a deterministic pseudorandom byte sequence from a
//! password by iterating a bounded nonlinear map over the complex plane.
//! The map's three coefficients come from SHA-256/SHA-512 digests of the
//! password; one byte is extracted per iteration from the fractional parts
//! of the state. A built-in statistical suite (Shannon entropy, monobit,
//! runs, lag-1 autocorrelation) is the correctness oracle for generated
//! streams.
//!
//! # Architecture
//!
//! ```text
//! KeyParams   (password -> SHA-256/SHA-512 -> alpha, beta, gamma)
//!     ↓
//! FractalMap  (one bounded step: sin/cos/exp recurrence + magnitude clamp)
//!     ↓ iterated from a fixed complex seed
//! KeystreamGenerator  (byte extraction via 20-bit fraction quantization)
//!     ↓
//! analysis    (entropy + frequency/runs/autocorrelation verdicts)
//!     ↓
//! report      (console summary, resistance claims, PNG charts)
//! ```
//!
//! # Examples
//!
//! Generate a keystream and check its statistical quality:
//!
//! ```
//! use fractalstream::{analyze, KeystreamGenerator};
//!
//! let gen = KeystreamGenerator::new("my_secret_password");
//! let stream = gen.generate(4096);
//! assert_eq!(stream.len(), 4096);
//!
//! let analysis = analyze(&stream);
//! assert!(analysis.entropy > 0.0);
//! ```
//!
//! Reproducibility is bit-exact for identical inputs:
//!
//! ```
//! use fractalstream::generate_keystream;
//!
//! assert_eq!(
//!     generate_keystream("secret", 64),
//!     generate_keystream("secret", 64),
//! );
//! ```
//!
//! # Reproducibility caveat
//!
//! The recurrence runs on `f64` with `sin`, `cos`, and `exp`. Streams are
//! bit-exact across runs on one platform; across platforms they are only
//! as exact as the environment's IEEE-754 double semantics and libm
//! implementations. There is no external reference vector: validate
//! streams with the statistical suite, not against pinned bytes.

#![deny(clippy::all)]

pub mod analysis;
pub mod error;
pub mod keystream;
pub mod map;
pub mod params;
pub mod report;

pub use analysis::{analyze, shannon_entropy, RandomnessReport, StreamAnalysis};
pub use error::FractalStreamError;
pub use keystream::{generate_keystream, KeystreamGenerator, Progress, DEFAULT_SEED};
pub use map::{FractalMap, DEFAULT_MAGNITUDE_CAP};
pub use params::KeyParams;
