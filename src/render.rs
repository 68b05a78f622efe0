//! One full recomputation of the diagram from a state snapshot.
//!
//! [`render`] is called on every state change. It runs the optics engine,
//! builds the drawing plan and formats the readout, and hands back the
//! incidence angle actually used so the caller can move its angle control
//! onto the critical angle when the engine snapped it.

use serde::Serialize;

use crate::geom::DisplayGeometry;
use crate::readout::{format_result, Readout};
use crate::scene::{build_drawing_plan, DrawingPlan, MediaCaptions, TextMetrics};
use crate::snell::{compute_outcome, Mode, Optics};
use crate::state::{OpticalState, MAX_INCIDENCE_DEG};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ApproxTextMetrics;

    fn frame(n1: f64, n2: f64, angle: f64) -> Frame {
        render(
            &OpticalState::new(n1, n2, angle, true),
            600.0,
            400.0,
            &MediaCaptions::default(),
            &ApproxTextMetrics,
        )
    }

    #[test]
    fn summary_for_refraction() {
        let summary = frame(1.0, 1.5, 30.0).summary();
        assert_eq!(summary.mode, Mode::Refracted);
        assert_eq!(summary.critical_angle_deg, None);
        assert!((summary.refracted_angle_deg.unwrap() - 19.47).abs() < 0.01);
    }

    #[test]
    fn summary_for_reflection() {
        let summary = frame(1.5, 1.0, 60.0).summary();
        assert_eq!(summary.mode, Mode::TotalInternalReflection);
        assert_eq!(summary.refracted_angle_deg, None);
        assert!(summary.critical_angle_deg.is_some());
    }

    #[test]
    fn snapped_angle_is_written_back() {
        let mut state = OpticalState::new(1.5, 1.0, 41.75, true);
        let frame = render(&state, 600.0, 400.0, &MediaCaptions::default(), &ApproxTextMetrics);
        assert!(frame.optics.snapped);
        frame.apply_to(&mut state);
        assert_eq!(state.incidence_angle_deg, frame.optics.critical_angle_deg.unwrap());
    }

    #[test]
    fn snap_above_control_range_is_capped() {
        let n2 = 89.05f64.to_radians().sin();
        let mut state = OpticalState::new(1.0, n2, 89.0, true);
        let frame = render(&state, 600.0, 400.0, &MediaCaptions::default(), &ApproxTextMetrics);
        assert!(frame.optics.snapped);
        assert!(frame.optics.angle_deg > MAX_INCIDENCE_DEG);
        frame.apply_to(&mut state);
        assert_eq!(state.incidence_angle_deg, MAX_INCIDENCE_DEG);
    }

    #[test]
    fn plan_matches_canvas() {
        let frame = frame(1.0, 1.33, 10.0);
        assert_eq!(frame.plan.width, 600.0);
        assert_eq!(frame.plan.height, 400.0);
    }
}

/// What the control layer needs after each render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSummary {
    pub mode: Mode,
    pub refracted_angle_deg: Option<f64>,
    pub critical_angle_deg: Option<f64>,
}

/// Everything derived from one state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub optics: Optics,
    pub plan: DrawingPlan,
    pub readout: Readout,
}

impl Frame {
    pub fn summary(&self) -> RenderSummary {
        RenderSummary {
            mode: self.optics.outcome.mode(),
            refracted_angle_deg: self.optics.outcome.refracted_angle_deg(),
            critical_angle_deg: self.optics.critical_angle_deg,
        }
    }

    /// Moves the state's angle onto the angle the frame was drawn with,
    /// capped at the top of the angle control.
    pub fn apply_to(&self, state: &mut OpticalState) {
        state.incidence_angle_deg = self.optics.angle_deg.min(MAX_INCIDENCE_DEG);
    }
}

pub fn render(
    state: &OpticalState,
    canvas_width: f64,
    canvas_height: f64,
    captions: &MediaCaptions,
    metrics: &dyn TextMetrics,
) -> Frame {
    let optics = compute_outcome(state.n1, state.n2, state.incidence_angle_deg);
    let geometry = DisplayGeometry::from_canvas(canvas_width, canvas_height);
    let plan = build_drawing_plan(&optics, &geometry, state.show_angles, captions, metrics);
    let readout = format_result(&optics);

    Frame {
        optics,
        plan,
        readout,
    }
}
