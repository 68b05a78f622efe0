//! Interactive window built on macroquad.
//!
//! The viewer owns the [`OpticalState`] and mutates it in response to
//! keyboard and mouse input. Every frame it re-renders the whole diagram
//! from scratch, writes a snapped incidence angle back into the state, and
//! replays the drawing plan onto a [`MacroquadSurface`].
//!
//! Controls:
//! - Left / Right: incidence angle down / up (hold Shift for whole degrees)
//! - Drag in the upper half of the canvas: aim the incident ray
//! - Up / Down: n1 up / down by 0.01, W / S: n2 up / down by 0.01
//! - 1 / 2: cycle the preset for medium 1 / medium 2
//! - Space: toggle angle arcs, L: toggle language

use macroquad::prelude::*;
use macroquad::window::Conf;
use nalgebra::{Point2, Vector2};

use crate::geom::ArcBounds;
use crate::hold::Repeater;
use crate::media::{captions, MediumChoice};
use crate::readout::{format_index, Locale};
use crate::render::render;
use crate::scene::{Rgba, Surface, TextAnchor, TextMetrics};
use crate::settings::{Settings, CANVAS_ASPECT, MIN_CANVAS_WIDTH};
use crate::state::{clamp_angle, step_index, OpticalState, INDEX_STEP};

/// Widest the canvas grows, in pixels.
const MAX_CANVAS_WIDTH: f32 = 900.0;
const PANEL_HEIGHT: f32 = 120.0;
const ANGLE_STEP: f64 = 0.25;
const ANGLE_STEP_COARSE: f64 = 1.0;
/// Pixels per straight segment when approximating an arc.
const ARC_SEGMENT_LENGTH: f64 = 3.0;

fn to_color(rgba: Rgba) -> Color {
    Color::new(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Draws plan primitives with macroquad, offset to the canvas position.
pub struct MacroquadSurface {
    origin: Vector2<f64>,
}

impl MacroquadSurface {
    pub fn new(origin_x: f32, origin_y: f32) -> Self {
        Self {
            origin: Vector2::new(origin_x as f64, origin_y as f64),
        }
    }

    fn screen(&self, p: Point2<f64>) -> (f32, f32) {
        let p = p + self.origin;
        (p.x as f32, p.y as f32)
    }
}

impl TextMetrics for MacroquadSurface {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        measure_text(text, None, font_size as u16, 1.0).width as f64
    }
}

impl Surface for MacroquadSurface {
    fn line(
        &mut self,
        from: Point2<f64>,
        to: Point2<f64>,
        width: f64,
        color: Rgba,
        dash: Option<[f64; 2]>,
    ) {
        let color = to_color(color);
        let Some([on, off]) = dash else {
            let (x1, y1) = self.screen(from);
            let (x2, y2) = self.screen(to);
            draw_line(x1, y1, x2, y2, width as f32, color);
            return;
        };

        let length = (to - from).norm();
        if length == 0.0 || on + off <= 0.0 {
            return;
        }
        let direction = (to - from) / length;
        let mut travelled = 0.0;
        while travelled < length {
            let dash_end = (travelled + on).min(length);
            let (x1, y1) = self.screen(from + direction * travelled);
            let (x2, y2) = self.screen(from + direction * dash_end);
            draw_line(x1, y1, x2, y2, width as f32, color);
            travelled += on + off;
        }
    }

    fn arc(
        &mut self,
        center: Point2<f64>,
        radius: f64,
        bounds: ArcBounds,
        width: f64,
        color: Rgba,
    ) {
        let color = to_color(color);
        let segments =
            ((bounds.sweep().abs() * radius / ARC_SEGMENT_LENGTH).ceil() as usize).max(1);
        let step = bounds.sweep() / segments as f64;
        let point = |i: usize| {
            let angle = bounds.start + step * i as f64;
            self.screen(center + Vector2::new(angle.cos(), angle.sin()) * radius)
        };
        for i in 0..segments {
            let (x1, y1) = point(i);
            let (x2, y2) = point(i + 1);
            draw_line(x1, y1, x2, y2, width as f32, color);
        }
    }

    fn fill_rect(&mut self, origin: Point2<f64>, size: Vector2<f64>, color: Rgba) {
        let (x, y) = self.screen(origin);
        draw_rectangle(x, y, size.x as f32, size.y as f32, to_color(color));
    }

    fn text(
        &mut self,
        position: Point2<f64>,
        text: &str,
        font_size: f64,
        color: Rgba,
        anchor: TextAnchor,
    ) {
        let (x, y) = self.screen(position);
        let dims = measure_text(text, None, font_size as u16, 1.0);
        // macroquad places text by its baseline
        let (x, y) = match anchor {
            TextAnchor::TopLeft => (x, y + dims.offset_y),
            TextAnchor::BottomLeft => (x, y - (dims.height - dims.offset_y)),
            TextAnchor::Center => (x - dims.width / 2.0, y - dims.height / 2.0 + dims.offset_y),
        };
        draw_text(text, x, y, font_size as f32, to_color(color));
    }
}

#[derive(Debug, Clone, Copy)]
enum Adjust {
    Angle(f64),
    N1(f64),
    N2(f64),
}

struct HeldKey {
    key: KeyCode,
    adjust: Adjust,
    repeater: Repeater,
}

impl HeldKey {
    fn new(key: KeyCode, adjust: Adjust) -> Self {
        Self {
            key,
            adjust,
            repeater: Repeater::default(),
        }
    }
}

struct Viewer {
    state: OpticalState,
    medium1: MediumChoice,
    medium2: MediumChoice,
    locale: Locale,
    keys: Vec<HeldKey>,
}

impl Viewer {
    fn new(settings: &Settings) -> Self {
        Self {
            state: settings.initial_state(),
            medium1: settings.incident_medium,
            medium2: settings.transmitting_medium,
            locale: settings.locale,
            keys: vec![
                HeldKey::new(KeyCode::Left, Adjust::Angle(-1.0)),
                HeldKey::new(KeyCode::Right, Adjust::Angle(1.0)),
                HeldKey::new(KeyCode::Up, Adjust::N1(INDEX_STEP)),
                HeldKey::new(KeyCode::Down, Adjust::N1(-INDEX_STEP)),
                HeldKey::new(KeyCode::W, Adjust::N2(INDEX_STEP)),
                HeldKey::new(KeyCode::S, Adjust::N2(-INDEX_STEP)),
            ],
        }
    }

    fn apply(&mut self, adjust: Adjust, coarse: bool) {
        match adjust {
            Adjust::Angle(direction) => {
                let step = if coarse { ANGLE_STEP_COARSE } else { ANGLE_STEP };
                self.state
                    .set_incidence_angle_deg(self.state.incidence_angle_deg + direction * step);
            }
            Adjust::N1(delta) => {
                self.medium1 = MediumChoice::Custom(step_index(self.medium1.index(), delta));
            }
            Adjust::N2(delta) => {
                self.medium2 = MediumChoice::Custom(step_index(self.medium2.index(), delta));
            }
        }
    }

    fn handle_input(&mut self, canvas_origin: (f32, f32), canvas_size: (f32, f32)) {
        let now = get_time();
        let coarse = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);

        let mut due = Vec::new();
        for held in &mut self.keys {
            let down = is_key_down(held.key) && !is_key_released(held.key);
            for _ in 0..held.repeater.follow(now, down) {
                due.push(held.adjust);
            }
        }
        for adjust in due {
            self.apply(adjust, coarse);
        }

        if is_key_pressed(KeyCode::Key1) {
            self.medium1 = self.medium1.next();
        }
        if is_key_pressed(KeyCode::Key2) {
            self.medium2 = self.medium2.next();
        }
        if is_key_pressed(KeyCode::Space) {
            self.state.show_angles = !self.state.show_angles;
        }
        if is_key_pressed(KeyCode::L) {
            self.locale = match self.locale {
                Locale::En => Locale::Th,
                Locale::Th => Locale::En,
            };
        }

        if is_mouse_button_down(MouseButton::Left) {
            let (mx, my) = mouse_position();
            let dx = (canvas_origin.0 + canvas_size.0 / 2.0 - mx) as f64;
            let dy = (canvas_origin.1 + canvas_size.1 / 2.0 - my) as f64;
            let inside = mx >= canvas_origin.0
                && mx <= canvas_origin.0 + canvas_size.0
                && my >= canvas_origin.1;
            if inside && dy > 0.0 {
                self.state.incidence_angle_deg = clamp_angle(dx.atan2(dy).to_degrees());
            }
        }

        self.state.set_n1(self.medium1.index());
        self.state.set_n2(self.medium2.index());
    }

    fn draw_panel(&self, lines: &[String], top: f32, left: f32) {
        let mut y = top;
        for line in lines {
            y += 22.0;
            draw_text(line, left, y, 20.0, DARKGRAY);
        }
    }
}

fn canvas_size() -> (f32, f32) {
    let width = (screen_width().min(MAX_CANVAS_WIDTH) * 0.98).max(MIN_CANVAS_WIDTH as f32);
    let height = (width / CANVAS_ASPECT as f32).round();
    (width, height)
}

async fn run(settings: Settings) {
    let mut viewer = Viewer::new(&settings);
    log::info!("Viewer started with {:?}", viewer.state);

    loop {
        let (width, height) = canvas_size();
        let origin = (((screen_width() - width) / 2.0).max(0.0), 8.0);

        viewer.handle_input(origin, (width, height));

        let mut surface = MacroquadSurface::new(origin.0, origin.1);
        let frame = render(
            &viewer.state,
            width as f64,
            height as f64,
            &captions(&viewer.medium1, &viewer.medium2).with_locale(viewer.locale),
            &surface,
        );
        if frame.optics.snapped && frame.optics.angle_deg != viewer.state.incidence_angle_deg {
            log::debug!("Snapped incidence angle to {:.4}", frame.optics.angle_deg);
        }
        frame.apply_to(&mut viewer.state);

        clear_background(LIGHTGRAY);
        draw_rectangle(origin.0, origin.1, width, height, WHITE);
        frame.plan.draw(&mut surface);

        let mut lines = vec![format!(
            "n1 = {}   n2 = {}   angle = {:.2}",
            format_index(viewer.state.n1),
            format_index(viewer.state.n2),
            viewer.state.incidence_angle_deg
        )];
        lines.extend(frame.readout.lines(viewer.locale));
        lines.push(
            "arrows: angle / n1   W S: n2   1 2: presets   space: arcs   L: language".to_string(),
        );
        viewer.draw_panel(&lines, origin.1 + height + 4.0, origin.0);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }
}

/// Opens the window and blocks until it is closed.
pub fn launch(settings: Settings) {
    let (width, height) = settings.canvas_size();
    let conf = Conf {
        window_title: "Snell's law".to_string(),
        window_width: width as i32 + 20,
        window_height: (height as f32 + PANEL_HEIGHT) as i32,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, run(settings));
}
