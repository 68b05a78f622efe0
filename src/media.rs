//! Preset optical media and custom refractive indices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scene::MediaCaptions;
use crate::state::clamp_index;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preset_and_custom() {
        assert_eq!("glass".parse::<MediumChoice>().unwrap().index(), 1.5);
        assert_eq!("Water".parse::<MediumChoice>().unwrap().index(), 1.333);
        assert_eq!("1.42".parse::<MediumChoice>().unwrap(), MediumChoice::Custom(1.42));
        assert!("unobtainium".parse::<MediumChoice>().is_err());
    }

    #[test]
    fn negative_custom_index_resets() {
        assert_eq!("-2".parse::<MediumChoice>().unwrap(), MediumChoice::Custom(0.0));
    }

    #[test]
    fn labels() {
        assert_eq!(MediumChoice::Preset(Medium::Diamond).label(), "Diamond (n = 2.4170)");
        assert_eq!(MediumChoice::Custom(1.2).label(), "Custom (n = 1.2000)");
    }

    #[test]
    fn captions_use_labels() {
        let captions = captions(&MediumChoice::Preset(Medium::Glass), &MediumChoice::Custom(1.0));
        assert_eq!(captions.incident, "Glass (n = 1.5000)");
        assert_eq!(captions.transmitting, "Custom (n = 1.0000)");
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(Medium::Diamond.next(), Medium::Vacuum);
        assert_eq!(Medium::Vacuum.previous(), Medium::Diamond);
        assert_eq!(MediumChoice::Custom(1.0).next(), MediumChoice::Preset(Medium::Vacuum));
    }

    #[test]
    fn deserialize_from_name_or_number() {
        let choice: MediumChoice = serde_json::from_str("\"air\"").unwrap();
        assert_eq!(choice, MediumChoice::Preset(Medium::Air));
        let choice: MediumChoice = serde_json::from_str("1.25").unwrap();
        assert_eq!(choice, MediumChoice::Custom(1.25));
    }
}

/// Common media with tabulated refractive indices (visible light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Vacuum,
    Air,
    Water,
    Ethanol,
    Glass,
    Diamond,
}

impl Medium {
    pub const ALL: [Medium; 6] = [
        Medium::Vacuum,
        Medium::Air,
        Medium::Water,
        Medium::Ethanol,
        Medium::Glass,
        Medium::Diamond,
    ];

    pub fn index(&self) -> f64 {
        match self {
            Medium::Vacuum => 1.0,
            Medium::Air => 1.0003,
            Medium::Water => 1.333,
            Medium::Ethanol => 1.361,
            Medium::Glass => 1.5,
            Medium::Diamond => 2.417,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Medium::Vacuum => "Vacuum",
            Medium::Air => "Air",
            Medium::Water => "Water",
            Medium::Ethanol => "Ethanol",
            Medium::Glass => "Glass",
            Medium::Diamond => "Diamond",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> Medium {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Medium {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Either a preset medium or a user-entered index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediumChoice {
    Preset(Medium),
    Custom(f64),
}

impl MediumChoice {
    pub fn index(&self) -> f64 {
        match self {
            MediumChoice::Preset(medium) => medium.index(),
            MediumChoice::Custom(n) => clamp_index(*n),
        }
    }

    /// Caption drawn next to the medium on the canvas.
    pub fn label(&self) -> String {
        match self {
            MediumChoice::Preset(medium) => {
                format!("{} (n = {:.4})", medium.name(), medium.index())
            }
            MediumChoice::Custom(n) => format!("Custom (n = {:.4})", clamp_index(*n)),
        }
    }

    /// Next preset; a custom index moves to the first preset.
    pub fn next(&self) -> MediumChoice {
        match self {
            MediumChoice::Preset(medium) => MediumChoice::Preset(medium.next()),
            MediumChoice::Custom(_) => MediumChoice::Preset(Medium::ALL[0]),
        }
    }
}

impl FromStr for MediumChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(medium) = Medium::ALL
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(MediumChoice::Preset(*medium));
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(MediumChoice::Custom(clamp_index(n))),
            _ => Err(format!(
                "Unknown medium '{}'. Expected a refractive index or one of: {}",
                s,
                Medium::ALL
                    .iter()
                    .map(|m| m.name().to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl fmt::Display for MediumChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Canvas captions for a pair of media.
pub fn captions(incident: &MediumChoice, transmitting: &MediumChoice) -> MediaCaptions {
    MediaCaptions::new(incident.label(), transmitting.label())
}
