//! deepnote - Render gliding Deep Note voices

use anyhow::{bail, Result};
use clap::Parser;
use deepnote::config::{self, DeepnoteConfig, EXAMPLE_CONFIG};
use deepnote::engine::{CsvTrace, Engine, Recorder};
use deepnote::synth::{FrequencySpec, Waveform};
use std::path::Path;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Render {
            config: config_path,
            output,
            duration,
            trace,
            trace_voice,
        } => {
            log::info!("loading configuration from {:?}", config_path);
            let cfg = config::load_config(&config_path)?;
            let duration = duration.unwrap_or(cfg.audio.duration_secs);
            if !(duration.is_finite() && duration > 0.0) {
                bail!("Duration must be a positive number of seconds");
            }
            if trace.is_some() && trace_voice >= cfg.voices.len() {
                bail!(
                    "Cannot trace voice {}: configuration has {} voices",
                    trace_voice,
                    cfg.voices.len()
                );
            }

            render(&cfg, &output, duration, trace.as_deref(), trace_voice)?;
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    print_summary(&cfg);
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = "deepnote.yaml";
            if Path::new(path).exists() {
                println!("deepnote.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, EXAMPLE_CONFIG)?;
                println!("Created deepnote.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

fn render(
    cfg: &DeepnoteConfig,
    output: &Path,
    duration: f64,
    trace_path: Option<&Path>,
    trace_voice: usize,
) -> Result<()> {
    let sample_rate = cfg.audio.sample_rate;
    let total_samples = (duration * sample_rate as f64).round() as u64;

    let mut engine = Engine::new(cfg)?;
    let mut recorder = Recorder::new(output, sample_rate)?;
    let mut trace = match trace_path {
        Some(path) => Some(CsvTrace::create(path)?),
        None => None,
    };

    // Cue sample positions, earliest first
    let mut cues = cfg
        .sorted_cues()
        .into_iter()
        .map(|cue| ((cue.at_secs * sample_rate as f64).round() as u64, cue.chord))
        .peekable();

    log::info!("rendering {:.2}s to {:?}", duration, output);

    for i in 0..total_samples {
        while let Some(&(at, chord)) = cues.peek() {
            if at > i {
                break;
            }
            engine.apply_chord(chord)?;
            cues.next();
        }

        let sample = match trace.as_mut() {
            Some(trace) => engine.process_traced(trace_voice, trace),
            None => engine.process(),
        };
        recorder.write_sample(sample)?;

        // Progress update every second
        if i > 0 && i % sample_rate as u64 == 0 {
            log::debug!(
                "progress: {}s / {:.0}s, {} of {} voices at target",
                i / sample_rate as u64,
                duration,
                engine.voices().iter().filter(|v| v.is_at_target()).count(),
                engine.voices().len()
            );
        }
    }

    let skipped = cues.count();
    if skipped > 0 {
        log::warn!("{} cues fall after the end of the render", skipped);
    }

    let written = recorder.duration_secs();
    let peak = recorder.peak();
    let clipped = recorder.clipped();
    recorder.finalize()?;

    if let Some(trace) = trace {
        let lines = trace.lines();
        trace.finish()?;
        log::info!("wrote {} trace lines for voice {}", lines, trace_voice);
    }

    if clipped {
        log::warn!("output clipped (peak {:.3}); lower master volume", peak);
    }
    println!(
        "Rendered {:.2}s to {:?} (peak {:.3})",
        written, output, peak
    );
    Ok(())
}

fn print_summary(cfg: &DeepnoteConfig) {
    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
    println!("  Duration: {}s", cfg.audio.duration_secs);
    println!("  Master volume: {:.0}%", cfg.master.volume * 100.0);
    println!(
        "  Animation: {} Hz x {}, control points {} / {}",
        cfg.animation.base_frequency,
        cfg.animation.multiplier,
        cfg.animation.control_point_1,
        cfg.animation.control_point_2
    );
    println!("  Detune: {} Hz", cfg.animation.detune);
    println!("  Voices: {}", cfg.voices.len());
    for (i, voice) in cfg.voices.iter().enumerate() {
        println!(
            "    - {}: {} oscillators, start {}, {:?}",
            i,
            voice.oscillators,
            describe(&voice.start),
            voice.waveform.unwrap_or(Waveform::PolyBlepSaw)
        );
    }
    println!("  Chords: {}", cfg.chords.len());
    for (i, chord) in cfg.chords.iter().enumerate() {
        let pitches: Vec<String> = chord.iter().map(describe).collect();
        println!("    - {}: {}", i, pitches.join(", "));
    }
    println!("  Cues: {}", cfg.cues.len());
    for cue in cfg.sorted_cues() {
        println!("    - {}s -> chord {}", cue.at_secs, cue.chord);
    }
    match cfg.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
}

fn describe(spec: &FrequencySpec) -> String {
    match spec {
        FrequencySpec::Fixed(hz) => format!("{} Hz", hz),
        FrequencySpec::Between { low, high } => format!("{}-{} Hz", low, high),
    }
}
