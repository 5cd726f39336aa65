//! fxlab - batch renderer
//!
//! Loads a dry recording, runs it through the console effect list and
//! writes one WAV per effect. When a folder of console recordings is
//! configured, each render is compared against its hardware counterpart.
//!
//! Usage: `fxlab [input] [output_dir]`

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use fxlab_analysis::{note_interval, Comparison};
use fxlab_dsp::{
    apply_flanger, apply_reverb_stereo, apply_tremolo, FlangerParams, PitchShifter, TremoloParams,
};
use fxlab_library::{
    downmix, reference_path, save_wav, save_wav_stereo, Config, ReverbPreset, TrackLoader,
};

/// What to render for one effect label
#[derive(Debug, Clone, Copy)]
enum Task {
    Reverb(ReverbPreset),
    /// Shift from the root note to this note, then stage reverb
    StageAt(&'static str),
    Flanger,
    Tremolo,
}

/// Output label, console recording label, render
const TASKS: [(&str, &str, Task); 8] = [
    ("REV-HALL", "REV-HALL1", Task::Reverb(ReverbPreset::Hall)),
    ("REV-ROOM2", "REV-ROOM2", Task::Reverb(ReverbPreset::Room)),
    ("REV-STAGE B", "REV-STAGE B", Task::StageAt("B4")),
    ("REV-STAGE D", "REV-STAGE D", Task::StageAt("D4")),
    ("REV-STAGE F", "REV-STAGE F", Task::StageAt("F4")),
    ("REV-STAGE Gb", "REV-STAGE Gb", Task::StageAt("F#4")),
    ("FLANGER", "FLANGER", Task::Flanger),
    ("TREMOLO", "TREMOLO", Task::Tremolo),
];

/// Rendered output, mono or interleaved stereo frames
enum Rendered {
    Mono(Vec<f32>),
    Stereo(Vec<[f32; 2]>),
}

impl Rendered {
    fn save(&self, path: &Path, sample_rate: u32) -> anyhow::Result<()> {
        match self {
            Rendered::Mono(samples) => save_wav(path, sample_rate, samples),
            Rendered::Stereo(frames) => save_wav_stereo(path, sample_rate, frames),
        }
        .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Mono view for comparison against single-channel references
    fn to_mono(&self) -> Vec<f32> {
        match self {
            Rendered::Mono(samples) => samples.clone(),
            Rendered::Stereo(frames) => {
                let interleaved: Vec<f32> = frames.iter().flatten().copied().collect();
                downmix(&interleaved, 2)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::load();
    let mut args = std::env::args().skip(1);
    if let Some(input) = args.next() {
        config.input = Some(PathBuf::from(input));
    }
    if let Some(output_dir) = args.next() {
        config.output_dir = PathBuf::from(output_dir);
    }

    let Some(input) = config.input.clone() else {
        bail!(
            "no input file: pass one as the first argument or set `input` in {}",
            Config::config_path().display()
        );
    };

    let track = TrackLoader::new()
        .load(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        sample_rate = track.sample_rate,
        duration_secs = track.duration_secs(),
        "processing"
    );

    for (label, reference, task) in TASKS {
        let rendered = render(task, &track.samples, track.sample_rate, &config)
            .with_context(|| format!("{label} failed"))?;

        let path = config.output_dir.join(output_file_name(label));
        rendered.save(&path, track.sample_rate)?;
        tracing::info!(effect = label, path = %path.display(), "rendered");

        if let Some(dir) = &config.reference_dir {
            compare_with_reference(dir, reference, &rendered)?;
        }
    }

    tracing::info!(output_dir = %config.output_dir.display(), "all effects rendered");
    Ok(())
}

fn render(task: Task, input: &[f32], sample_rate: u32, config: &Config) -> anyhow::Result<Rendered> {
    let rendered = match task {
        Task::Reverb(preset) => Rendered::Stereo(apply_reverb_stereo(
            input,
            sample_rate,
            &preset.params(),
            config.stereo_spread,
        )?),
        Task::StageAt(note) => {
            let semitones = note_interval(&config.root_note, note)?;
            let mut shifter = PitchShifter::new(sample_rate, config.pitch_window_ms)?;
            let shifted = shifter.process_block(input, semitones);
            Rendered::Stereo(apply_reverb_stereo(
                &shifted,
                sample_rate,
                &ReverbPreset::Stage.params(),
                config.stereo_spread,
            )?)
        }
        Task::Flanger => Rendered::Mono(apply_flanger(input, sample_rate, FlangerParams::default())?),
        Task::Tremolo => Rendered::Mono(apply_tremolo(input, sample_rate, TremoloParams::default())),
    };
    Ok(rendered)
}

fn compare_with_reference(dir: &Path, label: &str, rendered: &Rendered) -> anyhow::Result<()> {
    let Some(path) = reference_path(dir, label).filter(|p| p.exists()) else {
        tracing::debug!(effect = label, "no reference recording");
        return Ok(());
    };

    let reference = TrackLoader::new()
        .load(&path)
        .with_context(|| format!("failed to load reference {}", path.display()))?;
    let cmp = Comparison::between(&reference.samples, &rendered.to_mono());
    tracing::info!(
        effect = label,
        mse = cmp.mse,
        snr_db = cmp.snr_db,
        prd = cmp.prd,
        "compared with console recording"
    );
    Ok(())
}

/// "REV-STAGE Gb" -> "REV-STAGE_Gb.wav"
fn output_file_name(label: &str) -> String {
    format!("{}.wav", label.replace(' ', "_"))
}
