//! The upscale command

use std::process::ExitCode;
use std::sync::Arc;

use super::{Cli, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::codec::{load_rgba, output_path, save_rgba};
use crate::config::{check, load_config, merge_cli_overrides, Anime4kConfig, CliOverrides};
use crate::pipeline::Anime4k;
use crate::progress::{ActivityTracker, ConsoleProgress, ProgressReporter, StageEvent};

/// Forwards every event to each inner reporter.
struct Fanout(Vec<Arc<dyn ProgressReporter>>);

impl ProgressReporter for Fanout {
    fn report(&self, event: StageEvent) {
        for reporter in &self.0 {
            reporter.report(event.clone());
        }
    }

    fn is_verbose(&self) -> bool {
        self.0.iter().any(|r| r.is_verbose())
    }
}

fn overrides(args: &Cli) -> CliOverrides {
    CliOverrides {
        scale: args.scale,
        width: args.width,
        height: args.height,
        strategy: args.strategy,
        jobs: args.jobs.map(|j| j as usize),
        passes: args.passes,
        timings: args.timings.then_some(true),
    }
}

fn resolve_config(args: &Cli) -> Result<Anime4kConfig, String> {
    let mut config = load_config(args.config.as_deref()).map_err(|e| e.to_string())?;
    merge_cli_overrides(&mut config, &overrides(args));
    check(&config).map_err(|e| e.to_string())?;
    Ok(config)
}

/// Upscale `args.input` and save the result.
pub fn run_upscale(args: &Cli) -> ExitCode {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let settings = &config.upscale;

    let image = match load_rgba(&args.input) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", args.input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let (source_width, source_height) = image.dimensions();
    let (target_width, target_height) = config.target_size(source_width, source_height);

    let tracker = Arc::new(ActivityTracker::new());
    let mut reporters: Vec<Arc<dyn ProgressReporter>> = Vec::new();
    reporters.push(tracker.clone());
    if args.verbose {
        reporters.push(Arc::new(ConsoleProgress::new().with_verbose(true)));
    }

    let upscaler = match Anime4k::new(
        source_width,
        source_height,
        image.into_raw(),
        target_width,
        target_height,
    ) {
        Ok(upscaler) => upscaler,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let mut upscaler = upscaler
        .with_strategy(settings.strategy)
        .with_reporter(Arc::new(Fanout(reporters)));
    if let Some(jobs) = settings.jobs {
        upscaler = match upscaler.with_jobs(jobs) {
            Ok(upscaler) => upscaler,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
    }

    tracker.reset();
    for _ in 0..settings.passes {
        if let Err(e) = upscaler.run() {
            eprintln!("Pipeline error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if settings.timings {
        eprintln!(
            "{} pass(es), {} strategy, {} thread(s)",
            tracker.runs(),
            settings.strategy,
            upscaler.threads()
        );
        eprint!("{}", tracker.summary());
    }

    let Some(bytes) = upscaler.into_result() else {
        eprintln!("Pipeline error: no result produced");
        return ExitCode::from(EXIT_ERROR);
    };
    let Some(output_image) = image::RgbaImage::from_raw(target_width, target_height, bytes) else {
        eprintln!("Pipeline error: result does not match {}x{}", target_width, target_height);
        return ExitCode::from(EXIT_ERROR);
    };

    let out = output_path(&args.input, args.output.as_deref());
    if let Err(e) = save_rgba(&output_image, &out) {
        eprintln!("Error: cannot write {}: {}", out.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {} ({}x{})", out.display(), target_width, target_height);
    ExitCode::from(EXIT_SUCCESS)
}
