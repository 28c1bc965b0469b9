//! Seeded randomness for multi-cast rolls and jitter.
//!
//! Every draw is a pure function of its seed, so a fixed game seed reproduces
//! an identical fight. Callers derive a fresh seed per roll with
//! [`compute_seed`].

/// Stateless random source: the same seed always yields the same value.
pub trait RngOracle: Send + Sync {
    /// Raw 32-bit draw for `seed`.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform draw in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        // 24 bits keep the result exactly representable as f32.
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform draw in `[0, 100)`, compared against percentage chances.
    fn roll_percent(&self, seed: u64) -> f32 {
        self.unit(seed) * 100.0
    }
}

/// PCG-XSH-RR over a single LCG step, treating the seed as the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const LCG_MUL: u64 = 6364136223846793005;
    const LCG_INC: u64 = 1442695040888963407;

    #[inline]
    fn permute(seed: u64) -> u32 {
        let state = seed.wrapping_mul(Self::LCG_MUL).wrapping_add(Self::LCG_INC);
        let shifted = (((state >> 18) ^ state) >> 27) as u32;
        shifted.rotate_right((state >> 59) as u32)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::permute(seed)
    }
}

/// Seed for one random draw, mixed from the config seed, the owner's cast
/// nonce, the casting entity and a per-roll context.
///
/// Rolls inside one cast use disjoint context ranges: the low 32 bits carry
/// the unit or replica index, the bits above select the kind of roll.
///
/// - `MULTICAST_TRIAL_CONTEXT + unit`: multi-cast Bernoulli trial per unit
/// - `ANCHOR_JITTER_CONTEXT + index`: area anchor jitter
/// - `REPLICA_JITTER_CONTEXT + index`: replica jitter
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u64) -> u64 {
    let mixed = game_seed
        ^ nonce.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ u64::from(actor_id).wrapping_mul(0x517c_c1b7_2722_0a95)
        ^ context.wrapping_mul(0x85eb_ca6b);

    // murmur3 finalizer
    let mixed = (mixed ^ (mixed >> 33)).wrapping_mul(0xff51_afd7_ed55_8ccd);
    mixed ^ (mixed >> 33)
}

/// Seed context base for per-unit multi-cast trials.
pub const MULTICAST_TRIAL_CONTEXT: u64 = 0;

/// Seed context base for staggered area anchor jitter.
pub const ANCHOR_JITTER_CONTEXT: u64 = 1 << 32;

/// Seed context base for multi-cast replica jitter.
pub const REPLICA_JITTER_CONTEXT: u64 = 2 << 32;
