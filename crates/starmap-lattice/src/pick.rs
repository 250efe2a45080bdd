//! Candidate selection heuristics.
//!
//! Each mode filters the frontier by occupancy count relative to the
//! current minimum and maximum, then a member of the pool is drawn
//! uniformly. High counts close hexagons and grow compact maps; low counts
//! extend arms outwards.

use rand::Rng;

/// Heuristic family controlling how growth picks the next candidate site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PickMode {
    /// Only the best-connected sites.
    Crystal,
    /// Best-connected, sometimes relaxed by one.
    Structured,
    /// Within one or two of the best.
    #[default]
    Arranged,
    /// Any site.
    Indifferent,
    /// Least-connected, sometimes relaxed by one.
    Shattered,
    /// Within one or two of the least connected.
    Chaotic,
    /// Only the least-connected sites.
    Tentacular,
}

impl PickMode {
    pub const ALL: [Self; 7] = [
        Self::Crystal,
        Self::Structured,
        Self::Arranged,
        Self::Indifferent,
        Self::Shattered,
        Self::Chaotic,
        Self::Tentacular,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Crystal => "crystal",
            Self::Structured => "structured",
            Self::Arranged => "arranged",
            Self::Indifferent => "indifferent",
            Self::Shattered => "shattered",
            Self::Chaotic => "chaotic",
            Self::Tentacular => "tentacular",
        }
    }

    /// Whether the filter needs the frontier's min/max counts.
    pub const fn needs_bounds(self) -> bool {
        !matches!(self, Self::Indifferent)
    }
}

impl std::fmt::Display for PickMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PickMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| format!("unknown pick mode: {s}"))
    }
}

/// Two-outcome weights `(p0, p1)` for the relaxation draws of each mode.
///
/// These encode tuned map character, not a derived distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickWeights {
    pub structured: (u32, u32),
    pub arranged: (u32, u32),
    pub shattered: (u32, u32),
    pub chaotic: (u32, u32),
}

impl PickWeights {
    pub const STRUCTURED: (u32, u32) = (70, 30);
    pub const ARRANGED: (u32, u32) = (30, 70);
    pub const SHATTERED: (u32, u32) = (70, 30);
    pub const CHAOTIC: (u32, u32) = (20, 80);
}

impl Default for PickWeights {
    fn default() -> Self {
        Self {
            structured: Self::STRUCTURED,
            arranged: Self::ARRANGED,
            shattered: Self::SHATTERED,
            chaotic: Self::CHAOTIC,
        }
    }
}

/// Draw `0` or `1`: a uniform integer in `[0, p0 + p1)` that exceeds `p0`
/// yields 1.
pub fn weighted01<R: Rng + ?Sized>(rng: &mut R, (p0, p1): (u32, u32)) -> i32 {
    let total = p0 + p1;
    if total == 0 {
        return 0;
    }
    i32::from(rng.gen_range(0..total) > p0)
}

/// Stateful filter for one pick: frontier bounds plus the weights in force.
pub(crate) struct PoolFilter {
    mode: PickMode,
    weights: PickWeights,
    min: i32,
    max: i32,
}

impl PoolFilter {
    /// Bounds over the given occupancy counts. Indifferent skips the scan.
    pub(crate) fn new(
        mode: PickMode,
        weights: PickWeights,
        counts: impl Iterator<Item = usize>,
    ) -> Self {
        let (mut min, mut max) = (7, 0);
        if mode.needs_bounds() {
            for count in counts {
                let count = count as i32;
                min = min.min(count);
                max = max.max(count);
            }
        }
        Self { mode, weights, min, max }
    }

    /// Whether a site with `count` occupied neighbors joins the pool.
    ///
    /// Relaxing modes draw from `rng` once per call.
    pub(crate) fn admits<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> bool {
        let count = count as i32;
        let w = &self.weights;
        match self.mode {
            PickMode::Crystal => count == self.max,
            PickMode::Structured => count >= self.max - weighted01(rng, w.structured),
            PickMode::Arranged => count >= self.max - 1 - weighted01(rng, w.arranged),
            PickMode::Indifferent => true,
            PickMode::Shattered => count <= self.min + weighted01(rng, w.shattered),
            PickMode::Chaotic => count <= self.min + 1 + weighted01(rng, w.chaotic),
            PickMode::Tentacular => count == self.min,
        }
    }
}
