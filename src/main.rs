use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use torlife::config::Config;
use torlife::io::Keyboard;
use torlife::io::Screen;
use torlife::simulation::Simulation;

/// Logs go to stderr so they can be redirected away from the drawing, e.g. `2> life.log`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Invalid configuration")?;
    info!(?config, "Loaded configuration");

    let sim = Simulation::from_config(&config).context("Failed to seed the world")?;

    let sim = {
        let mut screen = Screen::new(config.size).context("Failed to set up the terminal")?;
        let mut keyboard = Keyboard::default();

        sim.run(&mut screen, &mut keyboard)?
    };

    println!(
        "Stopped after {} generations with {} live cells",
        sim.generation(),
        sim.world().population()
    );

    Ok(())
}
