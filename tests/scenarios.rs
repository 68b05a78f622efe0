use snellview::{
    media::{captions, Medium, MediumChoice},
    readout::{Locale, Notice},
    render::{render, Frame},
    scene::{ApproxTextMetrics, Primitive, Rgba},
    settings,
    snell::{critical_angle, Mode, Outcome},
    state::{parse_angle, OpticalState},
};

// Tolerance for comparing angles in degrees
const TOL: f64 = 0.01;

fn render_state(state: &OpticalState) -> Frame {
    let settings = settings::load_default_config().unwrap();
    let (width, height) = settings.canvas_size();
    render(
        state,
        width,
        height,
        &captions(&MediumChoice::Custom(state.n1), &MediumChoice::Custom(state.n2)),
        &ApproxTextMetrics,
    )
}

fn outgoing_color(frame: &Frame) -> Rgba {
    frame
        .plan
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Line { color, .. } => Some(*color),
            _ => None,
        })
        .last()
        .unwrap()
}

#[test]
fn glass_to_air_below_critical() {
    let frame = render_state(&OpticalState::new(1.5, 1.0, 30.0, true));
    let summary = frame.summary();
    assert_eq!(summary.mode, Mode::Refracted);
    assert!((summary.refracted_angle_deg.unwrap() - 48.59).abs() < TOL);
    assert!((summary.critical_angle_deg.unwrap() - 41.81).abs() < TOL);
    assert_eq!(frame.readout.notice, None);
    assert_eq!(outgoing_color(&frame), Rgba::BLUE);
}

#[test]
fn glass_to_air_snaps_to_critical() {
    let mut state = OpticalState::new(1.5, 1.0, 41.80, true);
    let frame = render_state(&state);
    let critical = critical_angle(1.5, 1.0).unwrap();

    assert_eq!(frame.optics.angle_deg, critical);
    frame.apply_to(&mut state);
    assert_eq!(state.incidence_angle_deg, critical);

    match frame.optics.outcome {
        Outcome::Refracted { refracted_angle_deg } => {
            assert!((refracted_angle_deg - 90.0).abs() < TOL)
        }
        other => panic!("expected grazing refraction, got {:?}", other),
    }
    assert!(matches!(
        frame.readout.notice,
        Some(Notice::CriticalAngle { .. })
    ));
    assert_eq!(frame.readout.lines(Locale::En)[0], "critical angle ≈ 41.81°");

    // The snapped state stays snapped on the next frame.
    let again = render_state(&state);
    assert_eq!(again.optics.angle_deg, critical);
}

#[test]
fn glass_to_air_beyond_critical() {
    let frame = render_state(&OpticalState::new(1.5, 1.0, 60.0, true));
    assert_eq!(
        frame.optics.outcome,
        Outcome::TotalInternalReflection {
            reflected_angle_deg: 60.0
        }
    );
    assert_eq!(frame.readout.notice, Some(Notice::TotalInternalReflection));
    assert_eq!(frame.readout.lines(Locale::En)[1], "reflection angle = 60.00°");
    assert_eq!(outgoing_color(&frame), Rgba::GREEN);
}

#[test]
fn identical_media() {
    let frame = render_state(&OpticalState::new(1.0, 1.0, 45.0, false));
    let summary = frame.summary();
    assert_eq!(summary.critical_angle_deg, None);
    assert_eq!(summary.refracted_angle_deg, Some(45.0));
}

#[test]
fn angle_field_is_normalized() {
    assert_eq!(parse_angle("-5"), 0.0);
    assert_eq!(parse_angle("95"), 89.0);
    let state = OpticalState::new(1.5, 1.0, parse_angle("95"), true);
    let frame = render_state(&state);
    assert_eq!(frame.optics.angle_deg, 89.0);
}

#[test]
fn default_config_renders() {
    let settings = settings::load_default_config().unwrap();
    assert_eq!(settings.incident_medium, MediumChoice::Preset(Medium::Glass));
    let frame = render_state(&settings.initial_state());
    assert!(!frame.plan.primitives.is_empty());
}

#[test]
fn degenerate_transmitting_index_does_not_produce_nan() {
    let frame = render_state(&OpticalState::new(1.5, 0.0, 30.0, true));
    assert_eq!(frame.summary().mode, Mode::TotalInternalReflection);
    for primitive in &frame.plan.primitives {
        if let Primitive::Line { from, to, .. } = primitive {
            assert!(from.x.is_finite() && from.y.is_finite());
            assert!(to.x.is_finite() && to.y.is_finite());
        }
    }
}
