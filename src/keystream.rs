//! Keystream generation from the iterated fractal map.
//!
//! Drives [`FractalMap`](crate::map::FractalMap) from a fixed complex seed
//! and extracts one byte per iteration. The byte comes from the fractional
//! parts of the state: both |Re| and |Im| fractions are quantized to 20
//! bits and XOR-folded down to 8, so small perturbations of the orbit
//! spread across the whole byte.
//!
//! Generation is a pure function of (password, length, seed): no hidden
//! state, bit-for-bit reproducible on any platform with conforming IEEE-754
//! double semantics (see the crate docs for the transcendental-function
//! caveat).

use num_complex::Complex64;
use tracing::debug;

use crate::error::FractalStreamError;
use crate::map::FractalMap;
use crate::params::KeyParams;

/// Default initial state of the map.
pub const DEFAULT_SEED: Complex64 = Complex64 { re: 0.5, im: 0.3 };

/// How many bytes are generated between observer notifications.
const OBSERVER_INTERVAL: usize = 5_000;

/// Snapshot handed to the generation observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes generated so far.
    pub generated: usize,
    /// Total bytes requested.
    pub requested: usize,
}

/// Password-keyed keystream generator.
///
/// Derives the map coefficients once from the password, then produces
/// byte sequences of any requested length. The generator is immutable
/// after construction; every call to [`generate`](Self::generate) replays
/// the orbit from the seed, so identical calls yield identical streams.
///
/// # Examples
///
/// ```
/// use fractalstream::KeystreamGenerator;
///
/// let gen = KeystreamGenerator::new("my_secret_password");
/// let a = gen.generate(64);
/// let b = gen.generate(64);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub struct KeystreamGenerator {
    map: FractalMap,
    seed: Complex64,
}

impl KeystreamGenerator {
    /// Creates a generator with the default seed 0.5+0.3i.
    ///
    /// # Parameters
    /// - `password`: The secret input; any string including the empty one.
    pub fn new(password: &str) -> Self {
        KeystreamGenerator {
            map: FractalMap::new(KeyParams::derive(password)),
            seed: DEFAULT_SEED,
        }
    }

    /// Creates a generator with an explicit seed.
    ///
    /// # Parameters
    /// - `password`: The secret input.
    /// - `seed`: Initial map state; both components must be finite.
    ///
    /// # Errors
    /// Returns [`FractalStreamError::NonFiniteSeed`] if either seed
    /// component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use fractalstream::KeystreamGenerator;
    /// use num_complex::Complex64;
    ///
    /// let gen = KeystreamGenerator::with_seed("secret", Complex64::new(0.1, -0.7)).unwrap();
    /// assert_eq!(gen.generate(16).len(), 16);
    ///
    /// assert!(KeystreamGenerator::with_seed("secret", Complex64::new(f64::NAN, 0.0)).is_err());
    /// ```
    pub fn with_seed(password: &str, seed: Complex64) -> Result<Self, FractalStreamError> {
        if !seed.re.is_finite() || !seed.im.is_finite() {
            return Err(FractalStreamError::NonFiniteSeed);
        }
        Ok(KeystreamGenerator {
            map: FractalMap::new(KeyParams::derive(password)),
            seed,
        })
    }

    /// Returns the coefficients derived from the password.
    pub fn params(&self) -> &KeyParams {
        self.map.params()
    }

    /// Returns the seed this generator starts from.
    pub fn seed(&self) -> Complex64 {
        self.seed
    }

    /// Generates `length` keystream bytes.
    ///
    /// `length == 0` returns an empty vector. Never fails for any valid
    /// length: a numerically bad map step degrades to the neutral zero
    /// state inside [`FractalMap::step`] and generation continues.
    pub fn generate(&self, length: usize) -> Vec<u8> {
        // The observer never cancels, so the error path is unreachable.
        match self.generate_with_observer(length, |_| true) {
            Ok(stream) => stream,
            Err(_) => unreachable!("non-cancelling observer cannot abort generation"),
        }
    }

    /// Generates `length` bytes, reporting progress to `observer`.
    ///
    /// The observer runs every 5 000 bytes and once more at completion,
    /// and only observes: it cannot alter the sequence. Returning `false`
    /// abandons the run.
    ///
    /// # Parameters
    /// - `length`: Requested byte count.
    /// - `observer`: Progress callback; return `false` to cancel.
    ///
    /// # Errors
    /// Returns [`FractalStreamError::Cancelled`] if the observer cancels.
    /// No partial stream is returned: the output is either complete or
    /// absent.
    pub fn generate_with_observer<F>(
        &self,
        length: usize,
        mut observer: F,
    ) -> Result<Vec<u8>, FractalStreamError>
    where
        F: FnMut(Progress) -> bool,
    {
        let mut keystream = Vec::with_capacity(length);
        let mut z = self.seed;

        for i in 0..length {
            if i % OBSERVER_INTERVAL == 0 {
                debug!(generated = i, requested = length, "keystream progress");
                if !observer(Progress {
                    generated: i,
                    requested: length,
                }) {
                    return Err(FractalStreamError::Cancelled);
                }
            }
            z = self.map.step(z);
            keystream.push(extract_byte(z));
        }

        debug!(generated = length, requested = length, "keystream complete");
        if !observer(Progress {
            generated: length,
            requested: length,
        }) {
            return Err(FractalStreamError::Cancelled);
        }
        Ok(keystream)
    }
}

/// Quantizes the fractional magnitude parts of the state into one byte.
///
/// Both fractions lie in [0, 1), so the 20-bit products stay below 2^20
/// and the truncating cast is exact; the 24-bit mask mirrors the wire
/// rule rather than clearing any bits.
fn extract_byte(z: Complex64) -> u8 {
    let re_frac = z.re.abs().fract();
    let im_frac = z.im.abs().fract();
    let re_int = (re_frac * (1u32 << 20) as f64) as u32 & 0xFF_FFFF;
    let im_int = (im_frac * (1u32 << 20) as f64) as u32 & 0xFF_FFFF;
    ((re_int ^ im_int) & 0xFF) as u8
}

/// Generates a keystream with the default seed.
///
/// Convenience wrapper over [`KeystreamGenerator::new`] + `generate`.
///
/// # Examples
///
/// ```
/// use fractalstream::generate_keystream;
///
/// assert!(generate_keystream("secret", 0).is_empty());
/// assert_eq!(generate_keystream("secret", 32).len(), 32);
/// ```
pub fn generate_keystream(password: &str, length: usize) -> Vec<u8> {
    KeystreamGenerator::new(password).generate(length)
}
