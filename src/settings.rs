use anyhow::{bail, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::media::MediumChoice;
use crate::readout::Locale;
use crate::state::OpticalState;

/// Smallest canvas the headless renderer accepts, in pixels.
pub const MIN_CANVAS_WIDTH: f64 = 280.0;
/// Width / height ratio of the default canvas.
pub const CANVAS_ASPECT: f64 = 600.0 / 400.0;

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub incident_medium: MediumChoice,
    pub transmitting_medium: MediumChoice,
    pub incidence_angle: f64,
    pub show_angles: bool,
    pub canvas_width: f64,
    #[serde(default)]
    pub canvas_height: Option<f64>,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub headless: bool,
    /// Where to write the drawing plan as JSON in headless mode.
    #[serde(default)]
    pub plan_output: Option<PathBuf>,
}

impl Settings {
    /// Normalized state snapshot for the configured media and angle.
    pub fn initial_state(&self) -> OpticalState {
        OpticalState::new(
            self.incident_medium.index(),
            self.transmitting_medium.index(),
            self.incidence_angle,
            self.show_angles,
        )
    }

    /// Canvas size, keeping the 3:2 aspect ratio when no height is given.
    pub fn canvas_size(&self) -> (f64, f64) {
        let width = self.canvas_width.max(MIN_CANVAS_WIDTH);
        let height = self
            .canvas_height
            .unwrap_or_else(|| (width / CANVAS_ASPECT).round());
        (width, height)
    }
}

pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings: Config = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

pub fn load_config() -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        log::info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        log::info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings: Config = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("snellview").try_parsing(true))
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    // Parse command-line arguments and override values
    let args = CliArgs::parse();
    apply_args(&mut config, args);

    validate_config(&config)?;

    log::debug!("{:#?}", config);

    Ok(config)
}

fn apply_args(config: &mut Settings, args: CliArgs) {
    if let Some(n1) = args.n1 {
        config.incident_medium = n1;
    }
    if let Some(n2) = args.n2 {
        config.transmitting_medium = n2;
    }
    if let Some(angle) = args.angle {
        config.incidence_angle = angle;
    }
    if args.show_angles {
        config.show_angles = true;
    }
    if args.hide_angles {
        config.show_angles = false;
    }
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = Some(height);
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if args.headless {
        config.headless = true;
    }
    if let Some(plan) = args.plan {
        config.plan_output = Some(plan);
        config.headless = true;
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the SNELLVIEW_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its
///    parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("SNELLVIEW_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    let mut current_dir = exe_path.parent();
    while let Some(dir) = current_dir {
        if dir.join("config").is_dir() {
            return Ok(dir.to_path_buf());
        }
        current_dir = dir.parent();
    }
    bail!("Could not find project root directory")
}

fn validate_config(config: &Settings) -> Result<()> {
    if !config.incidence_angle.is_finite() {
        bail!("Incidence angle must be a finite number");
    }
    if !(config.canvas_width.is_finite() && config.canvas_width > 0.0) {
        bail!("Canvas width must be greater than 0");
    }
    if let Some(height) = config.canvas_height {
        if !(height.is_finite() && height > 0.0) {
            bail!("Canvas height must be greater than 0");
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "snellview - refraction at a planar interface")]
pub struct CliArgs {
    /// Incident medium: a preset name (vacuum, air, water, ethanol, glass, diamond)
    /// or a refractive index.
    #[arg(long)]
    n1: Option<MediumChoice>,

    /// Transmitting medium, in the same format as --n1.
    #[arg(long)]
    n2: Option<MediumChoice>,

    /// Incidence angle in degrees. Clamped to [0, 89] and rounded to hundredths.
    #[arg(short, long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Draw the angle arcs and labels.
    #[arg(long, conflicts_with = "hide_angles")]
    show_angles: bool,

    /// Hide the angle arcs and labels.
    #[arg(long)]
    hide_angles: bool,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels. Defaults to a 3:2 aspect ratio.
    #[arg(long)]
    height: Option<f64>,

    /// Language of the result text.
    #[arg(long, value_enum)]
    locale: Option<Locale>,

    /// Print the result instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Write the drawing plan to this file as JSON (implies --headless).
    #[arg(long)]
    plan: Option<PathBuf>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.canvas_size();
        write!(
            f,
            "Settings:
  - Medium 1: {}
  - Medium 2: {}
  - Incidence Angle: {:.2}
  - Show Angles: {}
  - Canvas: {} x {}
  - Locale: {:?}
  ",
            self.incident_medium,
            self.transmitting_medium,
            self.incidence_angle,
            self.show_angles,
            width,
            height,
            self.locale,
        )
    }
}
