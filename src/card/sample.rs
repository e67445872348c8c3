//! Rejection sampling with a per-axis distance floor

use rand::Rng;

use crate::consts::MAX_RESAMPLES;

/// Sample uniformly between the endpoints `a` and `b`, rejecting values closer
/// than `floor` to `previous`.
///
/// The endpoints may come in either order. Degenerate inputs degrade instead
/// of failing:
/// - a non-finite endpoint returns `previous` unchanged
/// - a zero-width interval returns its midpoint
/// - an interval where no value can reach the floor returns one unchecked sample
/// - if the resample cap is hit, the endpoint farthest from `previous` is used
pub fn sample_away<R: Rng>(rng: &mut R, a: f32, b: f32, previous: f32, floor: f32) -> f32 {
    if !a.is_finite() || !b.is_finite() {
        log::warn!("Non-finite sampling interval [{}, {}]", a, b);
        return previous;
    }

    if a == b {
        return (a + b) / 2.0;
    }

    let farthest = if (a - previous).abs() >= (b - previous).abs() {
        a
    } else {
        b
    };
    if (farthest - previous).abs() < floor {
        log::debug!(
            "Interval [{}, {}] too narrow for floor {} around {}",
            a,
            b,
            floor,
            previous
        );
        return lerp_within(a, b, rng.random::<f32>());
    }

    for _ in 0..MAX_RESAMPLES {
        let candidate = lerp_within(a, b, rng.random::<f32>());
        if (candidate - previous).abs() >= floor {
            return candidate;
        }
    }

    farthest
}

/// `a + t * (b - a)`, clamped so rounding never leaves the interval
#[inline]
fn lerp_within(a: f32, b: f32, t: f32) -> f32 {
    (a + t * (b - a)).clamp(a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_inverted_interval() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let v = sample_away(&mut rng, 200.0, -200.0, 0.0, 50.0);
            assert!((-200.0..=200.0).contains(&v));
            assert!(v.abs() >= 50.0);
        }
    }

    #[test]
    fn test_zero_width_returns_midpoint() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(sample_away(&mut rng, 30.0, 30.0, 0.0, 50.0), 30.0);
    }

    #[test]
    fn test_non_finite_keeps_previous() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(sample_away(&mut rng, f32::NAN, 10.0, 4.0, 50.0), 4.0);
        assert_eq!(sample_away(&mut rng, 0.0, f32::INFINITY, 4.0, 50.0), 4.0);
    }

    #[test]
    fn test_narrow_interval_single_sample() {
        // Nothing in [0, 20] is 50 away from 10: accept any sample
        let mut rng = Pcg32::seed_from_u64(7);
        let v = sample_away(&mut rng, 0.0, 20.0, 10.0, 50.0);
        assert!((0.0..=20.0).contains(&v));
    }

    #[test]
    fn test_tight_interval_still_terminates() {
        // Only a sliver near -100 satisfies the floor
        let mut rng = Pcg32::seed_from_u64(3);
        let v = sample_away(&mut rng, -100.0, 100.0, 49.0, 148.9);
        assert!((v - 49.0).abs() >= 148.9);
    }

    #[test]
    fn test_same_seed_same_sample() {
        let mut r1 = Pcg32::seed_from_u64(42);
        let mut r2 = Pcg32::seed_from_u64(42);
        assert_eq!(
            sample_away(&mut r1, -300.0, 300.0, 0.0, 50.0),
            sample_away(&mut r2, -300.0, 300.0, 0.0, 50.0)
        );
    }

    proptest! {
        #[test]
        fn prop_floor_met_when_reachable(
            seed in any::<u64>(),
            a in -1000.0f32..1000.0,
            b in -1000.0f32..1000.0,
            previous in -1000.0f32..1000.0,
        ) {
            let floor = 50.0;
            let reachable = (a - previous).abs().max((b - previous).abs()) >= floor;
            let mut rng = Pcg32::seed_from_u64(seed);
            let v = sample_away(&mut rng, a, b, previous, floor);

            prop_assert!(v >= a.min(b) && v <= a.max(b));
            if reachable && a != b {
                prop_assert!((v - previous).abs() >= floor);
            }
        }
    }
}
