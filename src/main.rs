use std::path::PathBuf;
use std::process::ExitCode;

use airscribe::config::SAMPLE_RATE;
use airscribe::decoder::Decoded;
use airscribe::retrieval::Index;
use airscribe::{contour, decoder, io, postprocess, spectrogram, Config};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "airscribe", about = "Transcribe and retrieve monophonic folk-tune audio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe a WAV recording and print its query string.
    Transcribe { wav: PathBuf },
    /// Transcribe a WAV recording and print ranked matches against an index.
    Query { wav: PathBuf, index: PathBuf },
}

fn load_mono_samples(wav: &PathBuf) -> Result<Vec<f32>> {
    let (samples, sr) = io::audio::read_audio_file_mono(wav)
        .with_context(|| format!("failed to read {wav:?}"))?;
    if sr != SAMPLE_RATE {
        anyhow::bail!(
            "{wav:?} is at {sr} Hz, expected {SAMPLE_RATE} Hz (resample externally before transcribing)"
        );
    }
    Ok(samples)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::global();

    match cli.command {
        Command::Transcribe { wav } => {
            let samples = load_mono_samples(&wav)?;
            let fine = spectrogram::build_fine_spectrogram(&samples, cfg)?;
            let coarse = postprocess::build_coarse_spectrogram(&fine);
            match decoder::decode(coarse, cfg)? {
                Decoded::NoSignal => {
                    log::warn!("{wav:?}: no detectable pitched content");
                }
                Decoded::Contour(c) => {
                    println!("{}", contour::encode(&c));
                }
            }
        }
        Command::Query { wav, index } => {
            let samples = load_mono_samples(&wav)?;
            let index = Index::load_from_path(&index)?;
            log::info!("loaded index with {} settings", index.contours.len());

            let results = airscribe::query(&samples, cfg, &index)?;
            for (setting_id, score) in results {
                println!("{setting_id},{score:.6}");
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
