//! Direction fans, rings and positional jitter.

use core::f32::consts::TAU;

use glam::Vec2;

use crate::env::RngOracle;

/// How multiple units of one cast are laid out.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpreadPattern {
    /// Symmetric fan with `spread_degrees` between neighbours, centred on the
    /// base direction.
    Fan { spread_degrees: f32 },
    /// Full circle, `360 / count` degrees apart, starting at the base direction.
    Ring,
}

impl SpreadPattern {
    pub const DEFAULT_SPREAD_DEGREES: f32 = 15.0;

    /// Unit directions for `count` units around `base`.
    ///
    /// A count of 0 or 1 yields `[base]` so callers always have at least one
    /// direction to spawn along.
    pub fn directions(self, count: u32, base: Vec2) -> Vec<Vec2> {
        match self {
            Self::Fan { spread_degrees } => fan_directions(count, base, spread_degrees),
            Self::Ring => ring_directions(count, base),
        }
    }
}

impl Default for SpreadPattern {
    fn default() -> Self {
        Self::Fan {
            spread_degrees: Self::DEFAULT_SPREAD_DEGREES,
        }
    }
}

/// Symmetric fan: angles start at `-spread × (count - 1) / 2` and step by
/// `spread`, so the whole fan covers `spread × (count - 1)`.
pub fn fan_directions(count: u32, base: Vec2, spread_degrees: f32) -> Vec<Vec2> {
    let base = normalize_or_forward(base);
    if count <= 1 {
        return vec![base];
    }
    let step = spread_degrees.to_radians();
    let start = -step * (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| rotate(base, start + step * i as f32))
        .collect()
}

/// Ring: `count` directions spaced `360 / count` apart, the first along `base`.
pub fn ring_directions(count: u32, base: Vec2) -> Vec<Vec2> {
    let base = normalize_or_forward(base);
    if count <= 1 {
        return vec![base];
    }
    let step = TAU / count as f32;
    (0..count).map(|i| rotate(base, step * i as f32)).collect()
}

/// Rotates `v` counter-clockwise by `radians`.
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (s, c) = radians.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Uniformly distributed offset inside a disc of `radius`.
///
/// Consumes two consecutive seeds: `seed` for the angle, `seed + 1` for the
/// distance.
pub fn jitter(rng: &dyn RngOracle, seed: u64, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    let angle = rng.unit(seed) * TAU;
    let distance = radius * rng.unit(seed.wrapping_add(1)).sqrt();
    let (s, c) = angle.sin_cos();
    Vec2::new(c, s) * distance
}

/// Heading of `direction` in radians, counter-clockwise from +X.
#[inline]
pub fn heading(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

fn normalize_or_forward(v: Vec2) -> Vec2 {
    let n = v.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::X } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn angle_deg(v: Vec2) -> f32 {
        v.y.atan2(v.x).to_degrees()
    }

    #[test]
    fn fan_of_three_is_symmetric() {
        let dirs = fan_directions(3, Vec2::X, 15.0);
        let angles: Vec<f32> = dirs.iter().map(|d| angle_deg(*d)).collect();
        assert_eq!(angles.len(), 3);
        assert!((angles[0] + 15.0).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4);
        assert!((angles[2] - 15.0).abs() < 1e-4);
    }

    #[test]
    fn single_unit_uses_base_direction() {
        let base = Vec2::new(0.0, 2.0);
        assert_eq!(fan_directions(1, base, 15.0), vec![Vec2::Y]);
        assert_eq!(ring_directions(0, base), vec![Vec2::Y]);
    }

    #[test]
    fn ring_covers_full_circle() {
        let dirs = ring_directions(4, Vec2::X);
        let expected = [Vec2::X, Vec2::Y, -Vec2::X, -Vec2::Y];
        for (dir, want) in dirs.iter().zip(expected) {
            assert!(dir.distance(want) < 1e-5, "{dir} != {want}");
        }
    }

    #[test]
    fn zero_base_falls_back_to_forward() {
        assert_eq!(fan_directions(1, Vec2::ZERO, 10.0), vec![Vec2::X]);
    }

    #[test]
    fn jitter_stays_inside_radius() {
        let rng = PcgRng;
        for seed in 0..500u64 {
            let offset = jitter(&rng, seed * 2, 1.5);
            assert!(offset.length() <= 1.5 + 1e-5);
        }
        assert_eq!(jitter(&rng, 1, 0.0), Vec2::ZERO);
    }
}
