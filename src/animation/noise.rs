//! Seeded simplex noise.
//!
//! The permutation table is a Fisher-Yates shuffle of `0..256` driven by SplitMix64, seeded with
//! the FNV-1a hash of the seed string. Same seed and coordinates give bit-identical output in every
//! process.

use crate::foundation::math::{Rng64, hash_str};

const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Noise source for one seed. Cheap to clone; holds no mutable state.
#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; 512],
    seed: String,
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = Rng64::new(hash_str(&seed));
        for i in (1..table.len()).rev() {
            let j = rng.next_below(i as u64 + 1) as usize;
            table.swap(i, j);
        }
        let perm = std::array::from_fn(|i| table[i & 255]);
        Self { perm, seed }
    }

    /// Seed the field was built from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    fn p(&self, i: usize) -> usize {
        usize::from(self.perm[i])
    }

    /// 2D simplex noise in `[-1, 1]`.
    pub fn sample2(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = lattice(i);
        let jj = lattice(j);
        let gi0 = self.p(ii + self.p(jj)) % 12;
        let gi1 = self.p(ii + i1 + self.p(jj + j1)) % 12;
        let gi2 = self.p(ii + 1 + self.p(jj + 1)) % 12;

        let n = corner2(gi0, x0, y0) + corner2(gi1, x1, y1) + corner2(gi2, x2, y2);
        (70.0 * n).clamp(-1.0, 1.0)
    }

    /// 3D simplex noise in `[-1, 1]`.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = lattice(i);
        let jj = lattice(j);
        let kk = lattice(k);
        let gi0 = self.p(ii + self.p(jj + self.p(kk))) % 12;
        let gi1 = self.p(ii + i1 + self.p(jj + j1 + self.p(kk + k1))) % 12;
        let gi2 = self.p(ii + i2 + self.p(jj + j2 + self.p(kk + k2))) % 12;
        let gi3 = self.p(ii + 1 + self.p(jj + 1 + self.p(kk + 1))) % 12;

        let n = corner3(gi0, x0, y0, z0)
            + corner3(gi1, x1, y1, z1)
            + corner3(gi2, x2, y2, z2)
            + corner3(gi3, x3, y3, z3);
        (32.0 * n).clamp(-1.0, 1.0)
    }
}

fn lattice(v: f64) -> usize {
    (v as i64).rem_euclid(256) as usize
}

fn corner2(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let g = GRAD3[gi];
    let t2 = t * t;
    t2 * t2 * (g[0] * x + g[1] * y)
}

fn corner3(gi: usize, x: f64, y: f64, z: f64) -> f64 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        return 0.0;
    }
    let g = GRAD3[gi];
    let t2 = t * t;
    t2 * t2 * (g[0] * x + g[1] * y + g[2] * z)
}

/// One-off 2D sample. Build a [`NoiseField`] when sampling one seed repeatedly.
pub fn noise2d(seed: &str, x: f64, y: f64) -> f64 {
    NoiseField::new(seed).sample2(x, y)
}

/// One-off 3D sample.
pub fn noise3d(seed: &str, x: f64, y: f64, z: f64) -> f64 {
    NoiseField::new(seed).sample3(x, y, z)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/noise.rs"]
mod tests;
