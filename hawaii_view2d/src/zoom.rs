// Copyright 2025 the Hawaii Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Discrete zoom ladder cycled by [`SceneCamera::toggle_zoom`](crate::SceneCamera::toggle_zoom).
///
/// Level `n` maps to a uniform scale of `1 + n * step`; levels wrap after `count`.
/// The default is four levels with unit steps: scales `1, 2, 3, 4`, then back to `1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLevels {
    /// Number of levels before wrapping back to level zero. Values below one act as one.
    pub count: u32,
    /// Scale added per level.
    pub step: f64,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            count: 4,
            step: 1.0,
        }
    }
}

impl ZoomLevels {
    /// Creates a ladder with `count` levels spaced by `step`.
    #[must_use]
    pub const fn new(count: u32, step: f64) -> Self {
        Self { count, step }
    }

    /// The level following `level`, wrapping to zero.
    #[must_use]
    pub fn next(&self, level: u32) -> u32 {
        level.saturating_add(1) % self.count.max(1)
    }

    /// The uniform scale of `level`.
    #[must_use]
    pub fn scale(&self, level: u32) -> f64 {
        1.0 + f64::from(level) * self.step
    }
}

#[cfg(test)]
mod tests {
    use super::ZoomLevels;

    #[test]
    fn default_ladder_wraps_after_four() {
        let z = ZoomLevels::default();
        let mut level = 0;
        let mut scales = [0.0; 5];
        for s in &mut scales {
            level = z.next(level);
            *s = z.scale(level);
        }
        assert_eq!(scales, [2.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn degenerate_count_stays_at_level_zero() {
        let z = ZoomLevels::new(0, 1.0);
        assert_eq!(z.next(0), 0);
        assert_eq!(z.next(7), 0);
    }
}
