//! Seeded 2D gradient noise and its fractal (fBm) composition.
//!
//! The permutation table is built once from an injected random source and
//! never mutated afterwards, so sampling is a pure function of `(x, y)`.

use crate::constants::{FBM_DEFAULT_OCTAVES, FBM_DEFAULT_PERSISTENCE};
use rand::Rng;

const TABLE_LEN: usize = 256;

/// Coherent noise over a doubled 256-entry permutation.
#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; TABLE_LEN * 2],
}

impl NoiseField {
    /// Shuffle `0..=255` with a Fisher-Yates pass driven by `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base = [0u8; TABLE_LEN];
        for (i, slot) in base.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in (1..TABLE_LEN).rev() {
            let j = rng.gen_range(0..=i);
            base.swap(i, j);
        }
        Self::from_permutation(&base)
    }

    /// Build from an explicit permutation; entry `i` is mirrored at `i + 256`.
    pub fn from_permutation(base: &[u8; TABLE_LEN]) -> Self {
        let mut perm = [0u8; TABLE_LEN * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i & 255];
        }
        Self { perm }
    }

    pub fn table(&self) -> &[u8; TABLE_LEN * 2] {
        &self.perm
    }

    #[inline]
    fn hash(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// Sample the noise at `(x, y)`. Zero on every integer lattice point.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;

        let row0 = self.hash(yi);
        let row1 = self.hash(yi + 1);
        let tl = self.hash(xi + row0);
        let tr = self.hash(xi + 1 + row0);
        let bl = self.hash(xi + row1);
        let br = self.hash(xi + 1 + row1);

        let u = fade(xf);
        let v = fade(yf);
        let top = lerp(grad(tl, xf, yf), grad(tr, xf - 1.0, yf), u);
        let bottom = lerp(grad(bl, xf, yf - 1.0), grad(br, xf - 1.0, yf - 1.0), u);
        lerp(top, bottom, v)
    }

    /// Sum `octaves` samples at doubling frequency, amplitude scaled by
    /// `persistence` per octave.
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        for _ in 0..octaves {
            sum += self.sample(x * freq, y * freq) * amp;
            freq *= 2.0;
            amp *= persistence;
        }
        sum
    }

    pub fn fbm_default(&self, x: f64, y: f64) -> f64 {
        self.fbm(x, y, FBM_DEFAULT_OCTAVES, FBM_DEFAULT_PERSISTENCE)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("head", &&self.perm[..8])
            .finish()
    }
}

/// Quintic smoothstep `t^3 (t (6t - 15) + 10)`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// Low two hash bits pick the sign of each axis.
#[inline]
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let u = if hash & 1 != 0 { x } else { -x };
    let v = if hash & 2 != 0 { y } else { -y };
    u + v
}
