use anyhow::Result;
use snellview::{output, settings};

fn main() -> Result<()> {
    env_logger::init();
    let settings = settings::load_config()?;
    log::info!("{}", settings);

    #[cfg(feature = "macroquad")]
    {
        if !settings.headless {
            snellview::viewer::launch(settings);
            return Ok(());
        }
    }

    output::run_headless(&settings)?;
    Ok(())
}
