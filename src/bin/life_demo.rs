//! Headless demo driver
//!
//! Configures the simulation from the command line, pumps the timer loop,
//! and dumps each generation to the terminal as ASCII.
//!
//! Usage: `life_demo [random|glider|gosper|pulsar] [generations]`

use std::time::Duration;

use anyhow::Context;
use gridlife::{
    GpuContext, Grid, LifeSimulation, Pattern, PresetLibrary, SimulationConfig,
};

fn parse_pattern(arg: &str) -> anyhow::Result<Pattern> {
    match arg.to_ascii_lowercase().as_str() {
        "random" => Ok(Pattern::Random),
        "glider" => Ok(Pattern::Glider),
        "gosper" | "gosperglider" => Ok(Pattern::GosperGlider),
        "pulsar" => Ok(Pattern::Pulsar),
        other => anyhow::bail!("unknown pattern `{other}`"),
    }
}

fn print_frame(frame: &Grid) {
    let mut out = String::with_capacity((frame.size() * (frame.size() + 1)) as usize);
    for y in 0..frame.size() {
        for x in 0..frame.size() {
            out.push(if frame.get(x, y) >= gridlife::grid::ALIVE_THRESHOLD {
                '#'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    println!("{out}");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let pattern = match args.next() {
        Some(arg) => parse_pattern(&arg)?,
        None => Pattern::Pulsar,
    };
    let generations: u64 = match args.next() {
        Some(arg) => arg.parse().context("generations must be a number")?,
        None => 20,
    };

    let presets = PresetLibrary::from_dir("assets").context("loading preset bitmaps")?;
    let gpu = GpuContext::new_blocking().context("acquiring GPU device")?;
    let config = SimulationConfig {
        grid_size: 48,
        update_interval: Duration::from_millis(100),
        ..Default::default()
    };

    let mut simulation = LifeSimulation::new(gpu, presets, config)?;
    simulation.configure(pattern)?;

    println!(
        "{} on a {}x{} torus",
        pattern,
        simulation.grid_size().unwrap_or(0),
        simulation.grid_size().unwrap_or(0)
    );

    while simulation.generation() < generations {
        if simulation.pump()? > 0 {
            if let Some(frame) = simulation.frame() {
                println!("generation {}:", simulation.generation());
                print_frame(frame);
            }
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    simulation.shutdown();
    Ok(())
}
