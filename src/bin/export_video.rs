use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow, bail};
use chrysanthemum::animation::{BloomState, Direction};
use chrysanthemum::raster::Canvas;
use chrysanthemum::scene::Scene;
use clap::Parser;

const DEFAULT_OUTPUT: &str = "bloom.mp4";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "export_video",
    version,
    about = "Offline bloom export (raw RGBA frames -> MP4 via ffmpeg)"
)]
pub(crate) struct Cli {
    #[arg(long, value_name = "MP4", default_value = DEFAULT_OUTPUT)]
    pub(crate) out: PathBuf,

    #[arg(long, default_value_t = 600)]
    pub(crate) width: usize,

    #[arg(long, default_value_t = 800)]
    pub(crate) height: usize,

    #[arg(long, default_value_t = 60)]
    pub(crate) fps: u32,

    /// Full open/close oscillations to record.
    #[arg(long, default_value_t = 1)]
    pub(crate) cycles: u32,
}

/// One presented tick and how many video frames it is held for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Shot {
    pub(crate) progress: f64,
    pub(crate) frames: usize,
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    if args.width == 0 {
        bail!("--width must be >= 1");
    }
    if args.height == 0 {
        bail!("--height must be >= 1");
    }
    if args.fps == 0 {
        bail!("--fps must be >= 1");
    }
    if args.cycles == 0 {
        bail!("--cycles must be >= 1");
    }
    Ok(())
}

/// Replays the live loop from a closed bud: every tick is one frame, and
/// the open/closed holds become repeated frames.
pub(crate) fn build_schedule(cycles: u32, fps: u32) -> Vec<Shot> {
    let mut state = BloomState::default();
    let mut shots = Vec::new();
    let mut completed = 0u32;

    while completed < cycles {
        let progress = state.progress();
        let before = state.direction();
        let frames = match state.advance() {
            Some(hold) => ((hold.as_secs_f64() * fps as f64).round() as usize).max(1),
            None => 1,
        };
        shots.push(Shot { progress, frames });

        if before == Direction::Falling && state.direction() == Direction::Rising {
            completed += 1;
        }
    }

    shots
}

pub(crate) fn compute_frame_count(shots: &[Shot]) -> usize {
    shots.iter().map(|s| s.frames).sum()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    run(args)
}

fn run(args: Cli) -> Result<()> {
    validate_args(&args)?;

    ensure_ffmpeg_available()?;

    let mut parent = args.out.parent().unwrap_or_else(|| Path::new(""));
    if parent == Path::new("") {
        parent = Path::new(".");
    }
    fs::create_dir_all(parent)
        .with_context(|| format!("create output directory {}", parent.display()))?;

    let shots = build_schedule(args.cycles, args.fps);
    let frame_count = compute_frame_count(&shots);

    let mut ffmpeg = spawn_ffmpeg(&args.out, args.width, args.height, args.fps)?;
    let mut ffmpeg_in = ffmpeg
        .stdin
        .take()
        .context("failed to open ffmpeg stdin for rawvideo input")?;

    render_frames(&shots, args.width, args.height, &mut ffmpeg_in)?;
    drop(ffmpeg_in);

    let status = ffmpeg.wait().context("wait for ffmpeg")?;
    if !status.success() {
        bail!("ffmpeg exited with status {status}");
    }

    log::info!("exported {} ticks as {} frames", shots.len(), frame_count);
    println!(
        "exported {} frames @ {} fps (duration {:.3}s) -> {}",
        frame_count,
        args.fps,
        frame_count as f64 / args.fps as f64,
        args.out.display()
    );
    Ok(())
}

fn ensure_ffmpeg_available() -> Result<()> {
    match Command::new("ffmpeg")
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("ffmpeg not found in PATH (install ffmpeg and retry)")
        }
        Err(err) => Err(anyhow!("failed to run ffmpeg: {err}")),
    }
}

fn spawn_ffmpeg(
    out_path: &Path,
    width: usize,
    height: usize,
    fps: u32,
) -> Result<std::process::Child> {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-y")
        .arg("-f")
        .arg("rawvideo")
        .arg("-pix_fmt")
        .arg("rgba")
        .arg("-video_size")
        .arg(format!("{width}x{height}"))
        .arg("-framerate")
        .arg(fps.to_string())
        .arg("-i")
        .arg("-")
        .arg("-c:v")
        .arg("libx264")
        .arg("-pix_fmt")
        .arg("yuv420p")
        .arg("-movflags")
        .arg("+faststart")
        .arg(out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    cmd.spawn()
        .with_context(|| format!("spawn ffmpeg for output {}", out_path.display()))
}

fn render_frames(shots: &[Shot], width: usize, height: usize, sink: &mut dyn Write) -> Result<()> {
    let mut canvas = Canvas::new(width, height, 1.0);

    for shot in shots {
        canvas.draw(&Scene::compose(shot.progress));
        for _ in 0..shot.frames {
            sink.write_all(canvas.pixels_rgba())
                .context("write frame to ffmpeg stdin")?;
        }
    }

    Ok(())
}
