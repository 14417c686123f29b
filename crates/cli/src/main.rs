#![deny(unsafe_code)]
//! CLI binary for the fieldlab electromagnetism lab.
//!
//! Subcommands:
//! - `list`: print available simulations and their parameters
//! - `run <sim>`: step a simulation N frames and print the final snapshot
//! - `render`: reveal field lines with scattered filings and write a PNG
//! - `quiz`: play the quiz from a JSON list of answers

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use fieldlab_core::{Scene, Simulation};
use fieldlab_quiz::{Answer, QuizSession};
use fieldlab_sims::field_lines::FieldLines;
use fieldlab_sims::SimKind;
use serde_json::Value;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "fieldlab", about = "Electromagnetism lab: simulations and quiz")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available simulations and their parameters.
    List,
    /// Step a simulation and print its final snapshot.
    Run {
        /// Simulation name (e.g. "electromagnet").
        simulation: Option<String>,

        /// Canvas width.
        #[arg(short = 'W', long, default_value_t = fieldlab_core::scene::DEFAULT_WIDTH)]
        width: u32,

        /// Canvas height.
        #[arg(short = 'H', long, default_value_t = fieldlab_core::scene::DEFAULT_HEIGHT)]
        height: u32,

        /// Number of frames to step.
        #[arg(short, long, default_value_t = 60)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Simulation parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Scene file; replaces every other option.
        #[arg(long, conflicts_with = "simulation")]
        scene: Option<PathBuf>,
    },
    /// Sprinkle filings over the field-lines canvas and write a PNG.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = fieldlab_core::scene::DEFAULT_WIDTH)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = fieldlab_core::scene::DEFAULT_HEIGHT)]
        height: u32,

        /// Filings scattered uniformly over the canvas.
        #[arg(long, default_value_t = 300)]
        filings: usize,

        /// Draw every line at full opacity (needs enough filings to unlock).
        #[arg(long)]
        show_all: bool,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path.
        #[arg(short, long, default_value = "field-lines.png")]
        output: PathBuf,
    },
    /// Play the quiz with answers given as JSON, e.g.
    /// '[{"slider":{"current":50,"turns":60}},{"choice":"out"},{"choice":"up"}]'.
    Quiz {
        /// JSON array of answers, submitted in order.
        #[arg(long)]
        answers: String,
    },
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_scene(
    scene: Option<PathBuf>,
    simulation: Option<String>,
    width: u32,
    height: u32,
    frames: u64,
    seed: u64,
    params: &str,
) -> Result<Scene, CliError> {
    let scene = match scene {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            Scene::from_json(&text)?
        }
        None => {
            let simulation = simulation
                .ok_or_else(|| CliError::Input("a simulation name or --scene is required".into()))?;
            let mut scene = Scene::new(&simulation, width, height, seed);
            scene.params = serde_json::from_str(params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            scene.frames = frames;
            scene
        }
    };
    scene.validate()?;
    Ok(scene)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let mut entries = Vec::new();
            for name in SimKind::list_simulations() {
                let sim = SimKind::from_name(
                    name,
                    fieldlab_core::scene::DEFAULT_WIDTH,
                    fieldlab_core::scene::DEFAULT_HEIGHT,
                    0,
                    &serde_json::json!({}),
                )?;
                entries.push((*name, sim.param_schema()));
            }
            if cli.json {
                let sims: Vec<Value> = entries
                    .into_iter()
                    .map(|(name, schema)| serde_json::json!({"name": name, "params": schema}))
                    .collect();
                print_json(&serde_json::json!({ "simulations": sims }))?;
            } else {
                println!("Simulations:");
                for (name, schema) in entries {
                    let keys: Vec<&str> = schema
                        .as_object()
                        .map(|m| m.keys().map(String::as_str).collect())
                        .unwrap_or_default();
                    println!("  {name:<14} {}", keys.join(", "));
                }
            }
        }
        Command::Run {
            simulation,
            width,
            height,
            frames,
            seed,
            params,
            scene,
        } => {
            let scene = load_scene(scene, simulation, width, height, frames, seed, &params)?;
            let mut sim = SimKind::from_name(
                &scene.simulation,
                scene.width,
                scene.height,
                scene.seed,
                &scene.params,
            )?;
            (0..scene.frames).try_for_each(|_| sim.step())?;
            let snapshot = sim.snapshot();

            if cli.json {
                print_json(&serde_json::json!({
                    "scene": serde_json::to_value(&scene)?,
                    "snapshot": snapshot,
                }))?;
            } else {
                eprintln!(
                    "ran {} ({}x{}, {} frames, seed {})",
                    scene.simulation, scene.width, scene.height, scene.frames, scene.seed
                );
                println!("{}", serde_json::to_string(&sim.params())?);
                println!("{}", serde_json::to_string(&snapshot)?);
            }
        }
        Command::Render {
            width,
            height,
            filings,
            show_all,
            seed,
            output,
        } => {
            let mut sim = FieldLines::new(width, height, seed)?;
            sim.scatter(filings);
            sim.set_params(&serde_json::json!({ "show_all": show_all }))?;
            sim.step()?;
            if show_all && !sim.showing_all() {
                log::warn!(
                    "--show-all needs more exposed cells ({} so far); drawing revealed lines only",
                    sim.grid().len()
                );
            }

            let raster = fieldlab_sims::raster::render_field_lines(&sim);
            fieldlab_sims::snapshot::write_png(&raster, &output)?;

            if cli.json {
                print_json(&serde_json::json!({
                    "width": width,
                    "height": height,
                    "filings": filings,
                    "exposed_cells": sim.grid().len(),
                    "show_all": sim.showing_all(),
                    "seed": seed,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "rendered field lines ({width}x{height}, {filings} filings, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Quiz { answers } => {
            let answers: Vec<Answer> = serde_json::from_str(&answers)
                .map_err(|e| CliError::Input(format!("invalid --answers JSON: {e}")))?;
            let mut session = QuizSession::default();
            let mut outcomes = Vec::with_capacity(answers.len());
            for answer in &answers {
                let level = session.current_level().map(|l| l.title.clone());
                let outcome = session.submit(answer)?;
                if !cli.json {
                    println!(
                        "{}: {}",
                        level.as_deref().unwrap_or("-"),
                        outcome.message
                    );
                }
                outcomes.push(outcome);
            }
            let status = session.status();
            if cli.json {
                print_json(&serde_json::json!({
                    "outcomes": serde_json::to_value(&outcomes)?,
                    "status": serde_json::to_value(&status)?,
                    "summary": session.summary(),
                }))?;
            } else if status.complete {
                println!("Assessment Complete! {}", session.summary());
                println!("Rank: {}", status.rank);
            } else {
                println!("Score: {} ({})", status.score, status.rank);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
