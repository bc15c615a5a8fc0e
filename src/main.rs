//! Command-line front end for the fractalstream engine.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fractalstream::report::{
    plot_autocorrelation, plot_byte_distribution, render_report, DEFAULT_MAX_LAG,
};
use fractalstream::{analyze, KeystreamGenerator};
use num_complex::Complex64;

/// Default password for the comprehensive test run.
const DEFAULT_TEST_PASSWORD: &str = "YourSecurePassword123";

/// Default keystream length for the comprehensive test run.
const DEFAULT_TEST_LENGTH: usize = 50_000;

#[derive(Parser)]
#[command(name = "fractalstream")]
#[command(about = "Password-keyed fractal keystream generator and quality analyzer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a keystream and write it out
    Generate {
        /// Password keying the generator
        #[arg(short, long)]
        password: String,

        /// Number of bytes to generate
        #[arg(short, long)]
        length: usize,

        /// Real part of the initial map state
        #[arg(long, default_value_t = 0.5)]
        seed_re: f64,

        /// Imaginary part of the initial map state
        #[arg(long, default_value_t = 0.3)]
        seed_im: f64,

        /// Write raw bytes to this file instead of hex to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the comprehensive quality test and print the report
    Test {
        /// Password keying the generator
        #[arg(short, long, default_value = DEFAULT_TEST_PASSWORD)]
        password: String,

        /// Number of bytes to generate
        #[arg(short, long, default_value_t = DEFAULT_TEST_LENGTH)]
        length: usize,

        /// Also render the histogram and autocorrelation charts here
        #[arg(long)]
        plots_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate {
            password,
            length,
            seed_re,
            seed_im,
            output,
        } => generate(&password, length, Complex64::new(seed_re, seed_im), output),
        Commands::Test {
            password,
            length,
            plots_dir,
        } => comprehensive_test(&password, length, plots_dir),
    }
}

fn generate(
    password: &str,
    length: usize,
    seed: Complex64,
    output: Option<PathBuf>,
) -> Result<()> {
    let gen = KeystreamGenerator::with_seed(password, seed)?;

    let pb = ProgressBar::new(length as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} bytes ({elapsed})")
            .expect("static progress template is valid"),
    );
    let stream = gen.generate_with_observer(length, |p| {
        pb.set_position(p.generated as u64);
        true
    })?;
    pb.finish_and_clear();

    match output {
        Some(path) => {
            fs::write(&path, &stream)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(bytes = stream.len(), path = %path.display(), "keystream written");
        }
        None => {
            let hex: String = stream.iter().map(|b| format!("{:02x}", b)).collect();
            println!("{}", hex);
        }
    }
    Ok(())
}

fn comprehensive_test(password: &str, length: usize, plots_dir: Option<PathBuf>) -> Result<()> {
    info!(length, "generating keystream");
    let gen = KeystreamGenerator::new(password);

    let start = Instant::now();
    let stream = gen.generate(length);
    let generation_time = start.elapsed();

    let analysis = analyze(&stream);
    print!(
        "{}",
        render_report(password, &stream, &analysis, generation_time)
    );

    if let Some(dir) = plots_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let histogram = dir.join("byte_distribution.png");
        plot_byte_distribution(&stream, &histogram)?;
        println!("Byte distribution histogram saved as {}", histogram.display());

        let autocorr = dir.join("autocorrelation.png");
        plot_autocorrelation(&stream, DEFAULT_MAX_LAG, &autocorr)?;
        println!("Autocorrelation plot saved as {}", autocorr.display());
    }

    Ok(())
}
