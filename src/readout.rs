//! Text readouts for the result panel.
//!
//! Formatting only: the readout is derived from an [`Optics`] result and
//! carries no state of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snell::{Optics, Outcome};


/// Distance (degrees) from the critical angle within which the critical
/// angle notice is shown, checked after snapping.
pub const CRITICAL_NOTICE_TOLERANCE_DEG: f64 = 0.05;

/// Language of the readout text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Th,
}

/// Highlighted message above the result line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    CriticalAngle { critical_angle_deg: f64 },
    TotalInternalReflection,
}

/// The number being reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reading {
    RefractionAngle { degrees: f64 },
    ReflectionAngle { degrees: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readout {
    pub notice: Option<Notice>,
    pub reading: Reading,
}

pub fn format_result(optics: &Optics) -> Readout {
    match optics.outcome {
        Outcome::Refracted {
            refracted_angle_deg,
        } => {
            let notice = optics
                .critical_angle_deg
                .filter(|c| (optics.angle_deg - c).abs() < CRITICAL_NOTICE_TOLERANCE_DEG)
                .map(|critical_angle_deg| Notice::CriticalAngle { critical_angle_deg });
            Readout {
                notice,
                reading: Reading::RefractionAngle {
                    degrees: refracted_angle_deg,
                },
            }
        }
        Outcome::TotalInternalReflection {
            reflected_angle_deg,
        } => Readout {
            notice: Some(Notice::TotalInternalReflection),
            reading: Reading::ReflectionAngle {
                degrees: reflected_angle_deg,
            },
        },
    }
}

/// Refractive index as shown next to a medium selector.
pub fn format_index(n: f64) -> String {
    let n = if n > 0.0 { n } else { 0.0 };
    format!("{:.4}", n)
}

/// Caption naming medium `slot` (1 or 2) on the canvas.
pub fn medium_caption(locale: Locale, slot: u8, label: &str) -> String {
    match locale {
        Locale::En => format!("Medium {} : {}", slot, label),
        Locale::Th => format!("ตัวกลางที่ {} : {}", slot, label),
    }
}

impl Notice {
    pub fn text(&self, locale: Locale) -> String {
        match (self, locale) {
            (Notice::CriticalAngle { critical_angle_deg }, Locale::En) => {
                format!("critical angle ≈ {:.2}°", critical_angle_deg)
            }
            (Notice::CriticalAngle { critical_angle_deg }, Locale::Th) => {
                format!("มุมวิกฤต ≈ {:.2}°", critical_angle_deg)
            }
            (Notice::TotalInternalReflection, Locale::En) => {
                "total internal reflection occurred".to_string()
            }
            (Notice::TotalInternalReflection, Locale::Th) => "เกิดการสะท้อนกลับหมด".to_string(),
        }
    }
}

impl Reading {
    pub fn text(&self, locale: Locale) -> String {
        match (self, locale) {
            (Reading::RefractionAngle { degrees }, Locale::En) => {
                format!("refraction angle = {:.2}°", degrees)
            }
            (Reading::RefractionAngle { degrees }, Locale::Th) => {
                format!("มุมหักเห = {:.2}°", degrees)
            }
            (Reading::ReflectionAngle { degrees }, Locale::En) => {
                format!("reflection angle = {:.2}°", degrees)
            }
            (Reading::ReflectionAngle { degrees }, Locale::Th) => {
                format!("มุมสะท้อน = {:.2}°", degrees)
            }
        }
    }
}

impl Readout {
    /// Notice slot followed by the reading. The notice slot is an empty line
    /// when there is nothing to highlight, so the reading never jumps.
    pub fn lines(&self, locale: Locale) -> Vec<String> {
        vec![
            self.notice.map(|n| n.text(locale)).unwrap_or_default(),
            self.reading.text(locale),
        ]
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = self.notice {
            writeln!(f, "{}", notice.text(Locale::En))?;
        }
        write!(f, "{}", self.reading.text(Locale::En))
    }
}
