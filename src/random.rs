//! Random number generation for ray tracing.
//!
//! Every render row gets its own ChaCha20 generator derived from the render
//! seed and the row index, so output does not depend on how rows are
//! scheduled across threads.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generator for one render row: the render seed on its own ChaCha stream.
pub fn row_rng(seed: u64, row: u32) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(row));
    rng
}

/// Generate random unit vector uniformly distributed on unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    // Generate uniform theta in [0, 2pi)
    let theta = 2.0 * std::f32::consts::PI * rng.random::<f32>();

    // Generate uniform cos(phi) in [-1, 1] for proper sphere distribution
    let cos_phi = 2.0 * rng.random::<f32>() - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();

    Vec3A::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}
