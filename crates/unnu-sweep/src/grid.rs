use serde::{Deserialize, Serialize};
use unnu_core::{IntRange, SweepConfig};

/// One `(n, m)` point of the sweep; `n <= m` for every generated pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamPair {
    pub n: u64,
    pub m: u64,
}

impl ParamPair {
    pub const fn new(n: u64, m: u64) -> Self {
        Self { n, m }
    }
}

/// Cartesian product of both ranges filtered to `n <= m`, ordered by
/// ascending `n` and then ascending `m`.
pub fn build_grid(n_range: &IntRange, m_range: &IntRange) -> Vec<ParamPair> {
    n_range
        .values()
        .flat_map(|n| {
            m_range
                .values()
                .filter(move |&m| n <= m)
                .map(move |m| ParamPair::new(n, m))
        })
        .collect()
}

/// Grid described by a sweep configuration.
pub fn grid_for(config: &SweepConfig) -> Vec<ParamPair> {
    build_grid(&config.n_range, &config.m_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_range_keeps_upper_triangle() {
        let range = IntRange::new(1, 4, 1);
        let grid = build_grid(&range, &range);
        assert_eq!(
            grid,
            vec![
                ParamPair::new(1, 1),
                ParamPair::new(1, 2),
                ParamPair::new(1, 3),
                ParamPair::new(2, 2),
                ParamPair::new(2, 3),
                ParamPair::new(3, 3),
            ]
        );
    }

    #[test]
    fn default_configuration_has_55_pairs() {
        assert_eq!(grid_for(&SweepConfig::default()).len(), 55);
    }
}
