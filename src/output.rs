use std::{fs::File, io::BufWriter, io::Write, path::Path};

use anyhow::{Context, Result};

use crate::media::captions;
use crate::readout::{format_index, Locale};
use crate::render::{render, Frame};
use crate::scene::ApproxTextMetrics;
use crate::settings::Settings;
use crate::state::OpticalState;


/// Human-readable summary of one frame.
pub fn report(state: &OpticalState, frame: &Frame, locale: Locale) -> String {
    let mut lines = vec![
        format!("n1 = {}", format_index(state.n1)),
        format!("n2 = {}", format_index(state.n2)),
        format!("incidence angle = {:.2}°", frame.optics.angle_deg),
    ];
    lines.extend(
        frame
            .readout
            .lines(locale)
            .into_iter()
            .filter(|line| !line.is_empty()),
    );
    lines.join("\n")
}

/// Serializes the frame (optics, drawing plan and readout) as pretty JSON.
pub fn write_frame<W: Write>(writer: W, frame: &Frame) -> Result<()> {
    serde_json::to_writer_pretty(writer, frame).context("Failed to serialize frame")?;
    Ok(())
}

/// Write the frame to a JSON file.
pub fn writeup(path: &Path, frame: &Frame) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_frame(&mut writer, frame)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Renders the configured state once, prints the report and writes the
/// frame to `plan_output` when one is set.
pub fn run_headless(settings: &Settings) -> Result<Frame> {
    let mut state = settings.initial_state();
    let (width, height) = settings.canvas_size();
    let frame = render(
        &state,
        width,
        height,
        &captions(&settings.incident_medium, &settings.transmitting_medium)
            .with_locale(settings.locale),
        &ApproxTextMetrics,
    );
    frame.apply_to(&mut state);

    println!("{}", report(&state, &frame, settings.locale));

    if let Some(path) = &settings.plan_output {
        writeup(path, &frame)?;
        log::info!("Wrote drawing plan to {:?}", path);
    }

    Ok(frame)
}
