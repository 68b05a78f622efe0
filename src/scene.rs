//! Drawing plans for the refraction diagram.
//!
//! A [`DrawingPlan`] is an ordered list of primitives describing one frame:
//! the media boundary, the dashed normal, the incident ray, the refracted or
//! reflected ray, and optionally the angle arcs with their floating labels.
//! Plans are built from the optics result and the display geometry, and are
//! thrown away after being replayed onto a [`Surface`].
//!
//! The renderer provides:
//! - Colour-coded rays (red incident, blue refracted, green reflected)
//! - Outgoing ray endpoints clamped to the visible canvas
//! - Angle arcs and labels measured from the normal
//! - Medium captions in the canvas corners
//! - Replay onto any backend through the [`Surface`] trait

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::geom::{
    clamp_point, label_anchor, ray_end_below, ray_end_mirrored, ray_start_above, ArcBounds,
    DisplayGeometry,
};
use crate::readout::{medium_caption, Locale};
use crate::snell::{Optics, Outcome};


/// Radius of the angle arcs, in pixels.
pub const ARC_RADIUS: f64 = 40.0;
/// Distance of an angle label from the origin, along the arc bisector.
pub const LABEL_RADIUS: f64 = 60.0;
/// Horizontal shift applied to every angle label.
pub const LABEL_X_OFFSET: f64 = -20.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const LABEL_PADDING: f64 = 4.0;
/// Dash pattern (on, off) of the normal.
pub const NORMAL_DASH: [f64; 2] = [5.0, 5.0];
pub const RAY_WIDTH: f64 = 2.0;
const AXIS_WIDTH: f64 = 1.0;
const CAPTION_MARGIN_X: f64 = 8.0;
const CAPTION_MARGIN_Y: f64 = 6.0;

/// Straight RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 0.5, 0.0, 1.0);
    pub const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
    pub const LABEL_BACKGROUND: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.75);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Which point of the text box `position` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    TopLeft,
    BottomLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        width: f64,
        color: Rgba,
        dash: Option<[f64; 2]>,
    },
    Arc {
        center: Point2<f64>,
        radius: f64,
        bounds: ArcBounds,
        width: f64,
        color: Rgba,
    },
    Rect {
        /// Top-left corner.
        origin: Point2<f64>,
        size: Vector2<f64>,
        color: Rgba,
    },
    Text {
        position: Point2<f64>,
        text: String,
        font_size: f64,
        color: Rgba,
        anchor: TextAnchor,
    },
}

/// Ordered draw calls for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawingPlan {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

/// Text measurement supplied by the render surface.
pub trait TextMetrics {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Backend able to draw every [`Primitive`].
pub trait Surface: TextMetrics {
    fn line(
        &mut self,
        from: Point2<f64>,
        to: Point2<f64>,
        width: f64,
        color: Rgba,
        dash: Option<[f64; 2]>,
    );
    fn arc(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        bounds: ArcBounds,
        width: f64,
        color: Rgba,
    );
    fn fill_rect(&mut self, origin: Point2<f64>, size: Vector2<f64>, color: Rgba);
    fn text(
        &mut self,
        position: Point2<f64>,
        text: &str,
        font_size: f64,
        color: Rgba,
        anchor: TextAnchor,
    );
}

/// Width estimate for headless use, assuming an average glyph advance of
/// 0.55 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * 0.55
    }
}

/// Captions for the two media, drawn in the top-left and bottom-left corners.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaCaptions {
    pub incident: String,
    pub transmitting: String,
    pub locale: Locale,
}

impl MediaCaptions {
    pub fn new(incident: impl Into<String>, transmitting: impl Into<String>) -> Self {
        Self {
            incident: incident.into(),
            transmitting: transmitting.into(),
            locale: Locale::default(),
        }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        Self { locale, ..self }
    }
}

pub fn caption_font_size(canvas_width: f64) -> f64 {
    if canvas_width < 500.0 {
        14.0
    } else {
        18.0
    }
}

/// Formats an angle for a diagram label.
pub fn angle_label(angle_deg: f64) -> String {
    format!("{:.2}°", angle_deg)
}

impl DrawingPlan {
    fn new(geometry: &DisplayGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            primitives: Vec::new(),
        }
    }

    fn line(&mut self, from: Point2<f64>, to: Point2<f64>, width: f64, color: Rgba) {
        self.primitives.push(Primitive::Line {
            from,
            to,
            width,
            color,
            dash: None,
        });
    }

    fn text(
        &mut self,
        position: Point2<f64>,
        text: String,
        font_size: f64,
        color: Rgba,
        anchor: TextAnchor,
    ) {
        self.primitives.push(Primitive::Text {
            position,
            text,
            font_size,
            color,
            anchor,
        });
    }

    /// Arc at the origin plus its floating label.
    fn angle_indicator(
        &mut self,
        geometry: &DisplayGeometry,
        bounds: ArcBounds,
        angle_deg: f64,
        color: Rgba,
        metrics: &dyn TextMetrics,
    ) {
        self.primitives.push(Primitive::Arc {
            center: geometry.center,
            radius: ARC_RADIUS,
            bounds,
            width: RAY_WIDTH,
            color,
        });

        let anchor = label_anchor(geometry.center, &bounds, LABEL_RADIUS, LABEL_X_OFFSET);
        let text = angle_label(angle_deg);
        let size = Vector2::new(
            metrics.text_width(&text, LABEL_FONT_SIZE) + 2.0 * LABEL_PADDING,
            LABEL_FONT_SIZE + 2.0 * LABEL_PADDING,
        );
        self.primitives.push(Primitive::Rect {
            origin: anchor - size / 2.0,
            size,
            color: Rgba::LABEL_BACKGROUND,
        });
        self.text(anchor, text, LABEL_FONT_SIZE, color, TextAnchor::Center);
    }

    /// Replays the plan in order onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Line {
                    from,
                    to,
                    width,
                    color,
                    dash,
                } => surface.line(*from, *to, *width, *color, *dash),
                Primitive::Arc {
                    center,
                    radius,
                    bounds,
                    width,
                    color,
                } => surface.arc(*center, *radius, *bounds, *width, *color),
                Primitive::Rect {
                    origin,
                    size,
                    color,
                } => surface.fill_rect(*origin, *size, *color),
                Primitive::Text {
                    position,
                    text,
                    font_size,
                    color,
                    anchor,
                } => surface.text(*position, text, *font_size, *color, *anchor),
            }
        }
    }
}

/// Builds the full diagram for one frame.
///
/// The incident ray always arrives from the upper-left at the optics result's
/// (possibly snapped) angle. The outgoing ray is blue and below the boundary
/// for refraction, green and mirrored above it for total internal reflection.
pub fn build_drawing_plan(
    optics: &Optics,
    geometry: &DisplayGeometry,
    show_angles: bool,
    captions: &MediaCaptions,
    metrics: &dyn TextMetrics,
) -> DrawingPlan {
    let mut plan = DrawingPlan::new(geometry);
    let center = geometry.center;
    let theta_i = optics.angle_deg.to_radians();

    // media boundary
    plan.line(
        Point2::new(0.0, center.y),
        Point2::new(geometry.width, center.y),
        AXIS_WIDTH,
        Rgba::BLACK,
    );

    let caption_size = caption_font_size(geometry.width);
    plan.text(
        Point2::new(CAPTION_MARGIN_X, CAPTION_MARGIN_Y),
        medium_caption(captions.locale, 1, &captions.incident),
        caption_size,
        Rgba::BLACK,
        TextAnchor::TopLeft,
    );
    plan.text(
        Point2::new(CAPTION_MARGIN_X, geometry.height - CAPTION_MARGIN_Y),
        medium_caption(captions.locale, 2, &captions.transmitting),
        caption_size,
        Rgba::BLACK,
        TextAnchor::BottomLeft,
    );

    // normal
    plan.primitives.push(Primitive::Line {
        from: Point2::new(center.x, 0.0),
        to: Point2::new(center.x, geometry.height),
        width: AXIS_WIDTH,
        color: Rgba::BLACK,
        dash: Some(NORMAL_DASH),
    });

    plan.line(
        ray_start_above(center, geometry.ray_length, theta_i),
        center,
        RAY_WIDTH,
        Rgba::RED,
    );
    if show_angles {
        plan.angle_indicator(
            geometry,
            ArcBounds::incident(theta_i),
            optics.angle_deg,
            Rgba::RED,
            metrics,
        );
    }

    let (end, bounds, color) = match optics.outcome {
        Outcome::Refracted {
            refracted_angle_deg,
        } => {
            let theta_t = refracted_angle_deg.to_radians();
            (
                ray_end_below(center, geometry.ray_length, theta_t),
                ArcBounds::transmitted(theta_t),
                Rgba::BLUE,
            )
        }
        Outcome::TotalInternalReflection { .. } => (
            ray_end_mirrored(center, geometry.ray_length, theta_i),
            ArcBounds::reflected(theta_i),
            Rgba::GREEN,
        ),
    };
    let end = clamp_point(end, geometry.width, geometry.height);
    plan.line(center, end, RAY_WIDTH, color);

    if show_angles {
        plan.angle_indicator(
            geometry,
            bounds,
            optics.outcome.outgoing_angle_deg(),
            color,
            metrics,
        );
    }

    plan
}
