use crate::animation::BloomState;
use crate::config::Config;
use crate::scene::{Scene, TITLE};
use crate::surface::{Surface, SurfaceStatus, TerminalSurface};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames presented before the surface closed.
    pub ticks: u64,
    pub state: BloomState,
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;

    let mut surface = TerminalSurface::open(&cfg)?;
    let summary = animate(&mut surface, BloomState::default(), cfg.frame_interval());
    // Restore the terminal before anything else is written to it.
    drop(surface);

    let summary = summary?;
    log::info!(
        "surface closed after {} ticks at {:.0}% bloom",
        summary.ticks,
        summary.state.progress() * 100.0
    );
    Ok(())
}

/// Drives the bloom on `surface` until it reports `Closed`.
///
/// Each tick composes and presents the scene for the current progress, then
/// advances it, then waits: for the boundary hold if one was hit, otherwise
/// for `frame_interval`.
pub fn animate<S: Surface + ?Sized>(
    surface: &mut S,
    mut state: BloomState,
    frame_interval: Duration,
) -> anyhow::Result<RunSummary> {
    let mut ticks = 0u64;

    loop {
        if surface.poll()? == SurfaceStatus::Closed {
            break;
        }

        let scene = Scene::compose(state.progress());
        let hud = hud_line(&state);
        if surface.present(&scene, &hud)? == SurfaceStatus::Closed {
            break;
        }
        ticks += 1;

        let hold = state.advance().unwrap_or(frame_interval);
        if surface.wait(hold)? == SurfaceStatus::Closed {
            break;
        }
    }

    Ok(RunSummary { ticks, state })
}

pub fn hud_line(state: &BloomState) -> String {
    format!(
        "bloom {:>3.0}% {} | q / Esc / Ctrl+C to stop | {TITLE}",
        state.progress() * 100.0,
        state.direction().label()
    )
}
