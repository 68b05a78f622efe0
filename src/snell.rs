//! Snell's law at a single planar interface between two real media.
//!
//! Given the refractive index of the incident medium `n1`, that of the
//! transmitting medium `n2`, and an incidence angle measured from the normal,
//! this module decides between refraction and total internal reflection and
//! reports the critical angle whenever one exists.
//!
//! The engine provides:
//! - Critical angle for passage from a denser into a rarer medium
//! - Snapping of near-critical incidence angles onto the critical angle
//! - Refraction angle from n1·sin(θ1) = n2·sin(θ2)
//! - Law-of-reflection result when no real refraction angle exists
//!
//! # Numerical behaviour
//!
//! All angles are `f64` degrees at the boundary of the module. A transmitting
//! index of zero (or below) has no transmitted ray and is treated as total
//! internal reflection, so non-finite values never reach the renderer.

use serde::Serialize;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn critical_angle_glass_to_air() {
        let critical = critical_angle(1.5, 1.0).unwrap();
        assert!((critical - (1.0f64 / 1.5).asin().to_degrees()).abs() < 1e-9);
        assert!((critical - 41.81).abs() < 0.01);
    }

    #[test]
    fn no_critical_angle_into_denser_or_equal_medium() {
        assert_eq!(critical_angle(1.0, 1.5), None);
        assert_eq!(critical_angle(1.33, 1.33), None);
        assert_eq!(critical_angle(1.5, 0.0), None);
        assert_eq!(critical_angle(0.0, 0.0), None);
    }

    #[test]
    fn critical_angle_sampled() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n2 = rng.random_range(0.01..3.0);
            let n1 = n2 + rng.random_range(1e-6..3.0);
            let critical = critical_angle(n1, n2).unwrap();
            assert!((critical - (n2 / n1).asin().to_degrees()).abs() < 1e-9);
            assert!((0.0..90.0).contains(&critical));
        }
    }

    #[test]
    fn refraction_obeys_snell_sampled() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let n1 = rng.random_range(0.01..3.0);
            let n2 = rng.random_range(0.01..3.0);
            let theta = round_to_hundredths(rng.random_range(0.0..89.0));
            let optics = compute_outcome(n1, n2, theta);
            let theta = optics.angle_deg;
            let s = n1 / n2 * theta.to_radians().sin();
            match optics.outcome {
                Outcome::Refracted { refracted_angle_deg } => {
                    assert!(s.abs() <= 1.0 + SINE_OVERSHOOT);
                    let lhs = refracted_angle_deg.to_radians().sin() * n2;
                    let rhs = theta.to_radians().sin() * n1;
                    assert!((lhs - rhs).abs() < 1e-6, "{} vs {}", lhs, rhs);
                }
                Outcome::TotalInternalReflection { reflected_angle_deg } => {
                    assert!(s.abs() > 1.0);
                    assert_eq!(reflected_angle_deg, theta);
                }
            }
        }
    }

    #[test]
    fn snaps_within_tolerance() {
        let critical = critical_angle(1.5, 1.0).unwrap();
        for theta in [41.72, 41.75, 41.80, 41.81, 41.85, 41.9] {
            let optics = compute_outcome(1.5, 1.0, theta);
            assert_eq!(optics.angle_deg, critical, "theta = {}", theta);
            assert!(optics.snapped);
        }
        for theta in [41.6, 41.7, 41.92, 42.0] {
            let optics = compute_outcome(1.5, 1.0, theta);
            assert_eq!(optics.angle_deg, theta);
            assert!(!optics.snapped);
        }
    }

    #[test]
    fn angle_is_rounded_before_snapping() {
        // 41.70499 rounds to 41.70, which is outside the tolerance window.
        let optics = compute_outcome(1.5, 1.0, 41.70499);
        assert_eq!(optics.angle_deg, 41.70);
        let optics = compute_outcome(1.0, 1.5, 12.3456);
        assert_eq!(optics.angle_deg, 12.35);
    }

    #[test]
    fn snapped_critical_angle_grazes() {
        let optics = compute_outcome(1.5, 1.0, 41.8);
        match optics.outcome {
            Outcome::Refracted { refracted_angle_deg } => {
                assert!((refracted_angle_deg - 90.0).abs() < 1e-3)
            }
            other => panic!("expected refraction, got {:?}", other),
        }
    }

    #[test]
    fn identical_media_do_not_bend() {
        let optics = compute_outcome(1.0, 1.0, 45.0);
        assert_eq!(optics.critical_angle_deg, None);
        assert_eq!(optics.outcome, Outcome::Refracted { refracted_angle_deg: 45.0 });
    }

    #[test]
    fn beyond_critical_reflects() {
        let optics = compute_outcome(1.5, 1.0, 60.0);
        assert_eq!(
            optics.outcome,
            Outcome::TotalInternalReflection { reflected_angle_deg: 60.0 }
        );
        assert_eq!(optics.outcome.mode(), Mode::TotalInternalReflection);
    }

    #[test]
    fn zero_transmitting_index_reflects() {
        for theta in [0.0, 30.0, 89.0] {
            let optics = compute_outcome(1.5, 0.0, theta);
            assert_eq!(
                optics.outcome,
                Outcome::TotalInternalReflection { reflected_angle_deg: theta }
            );
        }
    }

    #[test]
    fn zero_incident_index_transmits_along_normal() {
        let optics = compute_outcome(0.0, 1.5, 30.0);
        assert_eq!(optics.outcome, Outcome::Refracted { refracted_angle_deg: 0.0 });
    }
}

/// Distance (degrees) within which an incidence angle is snapped onto the
/// critical angle.
pub const SNAP_TOLERANCE_DEG: f64 = 0.1;
/// Largest amount by which |(n1/n2)·sin θ| may exceed one and still be
/// treated as grazing refraction.
pub const SINE_OVERSHOOT: f64 = 1e-12;

/// What happens to the ray at the interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Refracted { refracted_angle_deg: f64 },
    TotalInternalReflection { reflected_angle_deg: f64 },
}

/// Outcome without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Refracted,
    TotalInternalReflection,
}

impl Outcome {
    pub fn mode(&self) -> Mode {
        match self {
            Outcome::Refracted { .. } => Mode::Refracted,
            Outcome::TotalInternalReflection { .. } => Mode::TotalInternalReflection,
        }
    }

    /// Angle of the outgoing ray from the normal, whichever side it is on.
    pub fn outgoing_angle_deg(&self) -> f64 {
        match *self {
            Outcome::Refracted { refracted_angle_deg } => refracted_angle_deg,
            Outcome::TotalInternalReflection { reflected_angle_deg } => reflected_angle_deg,
        }
    }

    pub fn refracted_angle_deg(&self) -> Option<f64> {
        match *self {
            Outcome::Refracted { refracted_angle_deg } => Some(refracted_angle_deg),
            Outcome::TotalInternalReflection { .. } => None,
        }
    }
}

/// Result of one pass through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Optics {
    /// Incidence angle actually used: rounded, and snapped when near critical.
    pub angle_deg: f64,
    /// Whether `angle_deg` was moved onto the critical angle.
    pub snapped: bool,
    pub critical_angle_deg: Option<f64>,
    pub outcome: Outcome,
}

/// Critical angle in degrees, or `None` when light passes into an equal or
/// denser medium or either index is not positive.
pub fn critical_angle(n1: f64, n2: f64) -> Option<f64> {
    if !(n1 > n2 && n1 > 0.0 && n2 > 0.0) {
        return None;
    }
    let ratio = n2 / n1;
    if ratio <= 1.0 {
        Some(ratio.asin().to_degrees())
    } else {
        None
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Angle of the transmitted ray in degrees, or `None` for total internal
/// reflection.
///
/// A non-positive `n2` has no transmitted ray. Identical media return
/// `theta_i_deg` unchanged so that no rounding noise appears when nothing bends.
pub fn get_theta_t(theta_i_deg: f64, n1: f64, n2: f64) -> Option<f64> {
    if n2 <= 0.0 {
        return None;
    }
    if n1 == n2 {
        return Some(theta_i_deg);
    }

    let mut sin_t = n1 / n2 * theta_i_deg.to_radians().sin();
    if sin_t.abs() > 1.0 {
        if sin_t.abs() - 1.0 > SINE_OVERSHOOT {
            return None;
        }
        sin_t = sin_t.signum();
    }
    Some(sin_t.asin().to_degrees())
}

/// Runs the full engine on a pre-clamped incidence angle in `[0, 89]`.
///
/// The incidence angle is rounded to hundredths, then snapped onto the
/// critical angle when it lies strictly within [`SNAP_TOLERANCE_DEG`] of it.
/// Callers should write [`Optics::angle_deg`] back into their angle control.
pub fn compute_outcome(n1: f64, n2: f64, incidence_angle_deg: f64) -> Optics {
    let critical_angle_deg = critical_angle(n1, n2);

    let mut angle_deg = round_to_hundredths(incidence_angle_deg);
    let mut snapped = false;
    if let Some(critical) = critical_angle_deg {
        if (angle_deg - critical).abs() < SNAP_TOLERANCE_DEG {
            angle_deg = critical;
            snapped = true;
        }
    }

    let outcome = match get_theta_t(angle_deg, n1, n2) {
        Some(refracted_angle_deg) => Outcome::Refracted { refracted_angle_deg },
        None => Outcome::TotalInternalReflection {
            reflected_angle_deg: angle_deg,
        },
    };

    Optics {
        angle_deg,
        snapped,
        critical_angle_deg,
        outcome,
    }
}
