//! Interactive state and normalization of raw control input.
//!
//! Every value typed or dragged into a control passes through this module
//! before reaching the optics engine. Nothing here fails: bad input is
//! coerced to a usable value instead.

use pyo3::prelude::*;
use serde::Serialize;

use crate::snell::round_to_hundredths;


/// Upper end of the incidence angle control, in degrees.
pub const MAX_INCIDENCE_DEG: f64 = 89.0;
/// Change applied by one press (or one repeat) of an index increment button.
pub const INDEX_STEP: f64 = 0.01;

/// Snapshot of everything the user controls.
#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpticalState {
    #[pyo3(get)]
    pub n1: f64,
    #[pyo3(get)]
    pub n2: f64,
    #[pyo3(get)]
    pub incidence_angle_deg: f64,
    #[pyo3(get, set)]
    pub show_angles: bool,
}

#[pymethods]
impl OpticalState {
    #[new]
    #[pyo3(signature = (n1, n2, incidence_angle_deg, show_angles = true))]
    pub fn new(n1: f64, n2: f64, incidence_angle_deg: f64, show_angles: bool) -> Self {
        Self {
            n1: clamp_index(n1),
            n2: clamp_index(n2),
            incidence_angle_deg: clamp_angle(incidence_angle_deg),
            show_angles,
        }
    }

    #[setter]
    pub fn set_n1(&mut self, n1: f64) {
        self.n1 = clamp_index(n1);
    }

    #[setter]
    pub fn set_n2(&mut self, n2: f64) {
        self.n2 = clamp_index(n2);
    }

    #[setter]
    pub fn set_incidence_angle_deg(&mut self, angle: f64) {
        self.incidence_angle_deg = clamp_angle(angle);
    }
}

/// Non-finite or negative indices become zero.
pub fn clamp_index(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

/// Clamps to `[0, 89]` and rounds to hundredths. Non-finite input and
/// negative zero are zero.
pub fn clamp_angle(angle: f64) -> f64 {
    if !angle.is_finite() || angle <= 0.0 {
        return 0.0;
    }
    round_to_hundredths(angle.min(MAX_INCIDENCE_DEG))
}

/// Reads a refractive index typed into a custom field.
pub fn parse_index(text: &str) -> f64 {
    text.trim().parse::<f64>().map(clamp_index).unwrap_or(0.0)
}

/// Reads an incidence angle typed into the numeric field.
pub fn parse_angle(text: &str) -> f64 {
    text.trim().parse::<f64>().map(clamp_angle).unwrap_or(0.0)
}

/// One step of an increment button, kept to two decimals like the field shows.
pub fn step_index(current: f64, delta: f64) -> f64 {
    let current = if current.is_nan() { 0.0 } else { current };
    round_to_hundredths((current + delta).max(0.0))
}
