use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use snellview::{
    media::MediumChoice,
    readout::{format_result, Locale},
    render,
    scene::{ApproxTextMetrics, MediaCaptions},
    snell,
    state::{parse_angle, parse_index, OpticalState},
};

/// Runs the optics engine.
///
/// Returns `(mode, angle_deg, refracted_angle_deg, critical_angle_deg)` where
/// `angle_deg` is the incidence angle actually used after rounding and snapping.
#[pyfunction]
fn compute_outcome(
    n1: f64,
    n2: f64,
    incidence_angle_deg: f64,
) -> (&'static str, f64, Option<f64>, Option<f64>) {
    let state = OpticalState::new(n1, n2, incidence_angle_deg, false);
    let optics = snell::compute_outcome(state.n1, state.n2, state.incidence_angle_deg);
    let mode = match optics.outcome.mode() {
        snell::Mode::Refracted => "refracted",
        snell::Mode::TotalInternalReflection => "total_internal_reflection",
    };
    (
        mode,
        optics.angle_deg,
        optics.outcome.refracted_angle_deg(),
        optics.critical_angle_deg,
    )
}

/// Readout lines for the given state, in English ("en") or Thai ("th").
#[pyfunction]
#[pyo3(signature = (state, locale = "en"))]
fn readout(state: &OpticalState, locale: &str) -> PyResult<Vec<String>> {
    let locale = match locale {
        "en" => Locale::En,
        "th" => Locale::Th,
        other => return Err(PyValueError::new_err(format!("Unknown locale '{}'", other))),
    };
    let optics = snell::compute_outcome(state.n1, state.n2, state.incidence_angle_deg);
    Ok(format_result(&optics).lines(locale))
}

/// Renders one frame and returns it as JSON.
#[pyfunction]
#[pyo3(signature = (state, width = 600.0, height = 400.0))]
fn render_json(state: &OpticalState, width: f64, height: f64) -> PyResult<String> {
    let captions = MediaCaptions::new(
        MediumChoice::Custom(state.n1).label(),
        MediumChoice::Custom(state.n2).label(),
    );
    let frame = render::render(state, width, height, &captions, &ApproxTextMetrics);
    serde_json::to_string(&frame).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Normalizes text typed into an index field.
#[pyfunction]
fn normalize_index(text: &str) -> f64 {
    parse_index(text)
}

/// Normalizes text typed into the angle field.
#[pyfunction]
fn normalize_angle(text: &str) -> f64 {
    parse_angle(text)
}

/// A Python module implemented in Rust.
#[pymodule]
fn _snellview_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_outcome, m)?)?;
    m.add_function(wrap_pyfunction!(readout, m)?)?;
    m.add_function(wrap_pyfunction!(render_json, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_index, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_angle, m)?)?;
    m.add_class::<OpticalState>()?;
    Ok(())
}
