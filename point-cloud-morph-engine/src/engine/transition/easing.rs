use serde::{Deserialize, Serialize};

/// Curve applied to a trajectory's normalised progress before interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// `1024^(t - 1)`, pinned to zero at `t == 0`.
    #[default]
    ExponentialIn,
}

impl Easing {
    /// Map progress `t` (clamped to [0, 1]) to an interpolation factor.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::ExponentialIn => {
                if t == 0.0 {
                    0.0
                } else {
                    1024.0_f32.powf(t - 1.0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::ExponentialIn] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn exponential_in_starts_slow() {
        let half = Easing::ExponentialIn.apply(0.5);
        assert!((half - 1.0 / 32.0).abs() < 1e-6);
        assert!(half < Easing::Linear.apply(0.5));
    }

    #[test]
    fn exponential_in_is_monotonic() {
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = Easing::ExponentialIn.apply(step as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::ExponentialIn.apply(1.7), 1.0);
        assert_eq!(Easing::Linear.apply(-0.3), 0.0);
    }
}
