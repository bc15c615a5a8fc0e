//! Password-to-coefficient derivation for the fractal map.
//!
//! Turns a password string into the three fixed complex coefficients
//! (alpha, beta, gamma) that parameterize the recurrence. Two independent
//! digests of the password (SHA-256 and SHA-512) provide the raw bytes;
//! disjoint 8-byte windows of those digests are mapped into the square
//! [-2, 2] x [-2, 2] on the complex plane.

use num_complex::Complex64;
use sha2::{Digest, Sha256, Sha512};

/// The three complex coefficients parameterizing the fractal map.
///
/// Fully determined by the password and immutable for the lifetime of a
/// generation run. The coefficients are key material: they are zeroed
/// when the value is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyParams {
    /// Phase offset inside the sine term.
    pub alpha: Complex64,
    /// Weight of the half-angle cosine term.
    pub beta: Complex64,
    /// Weight of the damped linear term.
    pub gamma: Complex64,
}

impl KeyParams {
    /// Derives the coefficients from a password.
    ///
    /// Computes SHA-256 and SHA-512 over the UTF-8 bytes of the password
    /// and maps three disjoint digest windows to complex numbers:
    ///
    /// - alpha from SHA-256 bytes 0..8
    /// - beta from SHA-512 bytes 16..24
    /// - gamma from SHA-256 bytes 24..32
    ///
    /// Deterministic: the same password always yields the same
    /// coefficients. The empty password is valid and produces a
    /// well-defined triple.
    ///
    /// # Parameters
    /// - `password`: The secret input string.
    ///
    /// # Examples
    ///
    /// ```
    /// use fractalstream::KeyParams;
    ///
    /// let a = KeyParams::derive("test");
    /// let b = KeyParams::derive("test");
    /// assert_eq!(a, b);
    /// ```
    pub fn derive(password: &str) -> Self {
        let digest256 = Sha256::digest(password.as_bytes());
        let digest512 = Sha512::digest(password.as_bytes());

        KeyParams {
            alpha: bytes_to_complex(window(&digest256, 0)),
            beta: bytes_to_complex(window(&digest512, 16)),
            gamma: bytes_to_complex(window(&digest256, 24)),
        }
    }
}

impl Drop for KeyParams {
    /// Clears the derived coefficients on drop.
    fn drop(&mut self) {
        self.alpha = Complex64::new(0.0, 0.0);
        self.beta = Complex64::new(0.0, 0.0);
        self.gamma = Complex64::new(0.0, 0.0);
    }
}

/// Copies an 8-byte window starting at `offset` out of a digest.
///
/// Digest lengths are fixed (32 or 64 bytes) and all offsets used by
/// [`KeyParams::derive`] leave a full window, so the slice is always
/// well-formed.
fn window(digest: &[u8], offset: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[offset..offset + 8]);
    out
}

/// Maps 8 bytes to a point in the square [-2, 2] x [-2, 2].
///
/// The bytes are read as a big-endian unsigned 64-bit integer `v`. The
/// real part scales the full value over [0, 2^64 - 1] into [-2, 2]; the
/// imaginary part scales the low 16 bits over [0, 2^16 - 1] into the same
/// range, so the two parts are only loosely coupled.
fn bytes_to_complex(bytes: [u8; 8]) -> Complex64 {
    let v = u64::from_be_bytes(bytes);
    let re = v as f64 / u64::MAX as f64 * 4.0 - 2.0;
    let im = (v & 0xFFFF) as f64 / u16::MAX as f64 * 4.0 - 2.0;
    Complex64::new(re, im)
}
