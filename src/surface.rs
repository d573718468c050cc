use crate::config::{Config, RendererMode};
use crate::raster::Canvas;
use crate::render::{Frame, Renderer};
use crate::scene::{Scene, TITLE};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    Open,
    Closed,
}

/// Somewhere frames can be shown. Once a surface reports `Closed` the
/// animation stops; any `Err` is fatal.
pub trait Surface {
    /// Paints `scene` and shows it, together with a one-line status text.
    fn present(&mut self, scene: &Scene, hud: &str) -> anyhow::Result<SurfaceStatus>;

    /// Blocks for `timeout`, returning early with `Closed` if the surface goes away.
    fn wait(&mut self, timeout: Duration) -> anyhow::Result<SurfaceStatus>;

    fn poll(&mut self) -> anyhow::Result<SurfaceStatus> {
        self.wait(Duration::ZERO)
    }
}

/// Errors meaning the terminal we draw on no longer exists.
pub fn is_surface_gone(err: &io::Error) -> bool {
    // EIO is what a tty read/write returns once its controlling terminal hung up.
    const EIO: i32 = 5;
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::WriteZero
            | io::ErrorKind::ConnectionReset
    ) || (cfg!(unix) && err.raw_os_error() == Some(EIO))
}

pub fn is_quit_key(code: KeyCode, mods: KeyModifiers) -> bool {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return true;
    }
    matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn closed_or(err: io::Error, what: &'static str) -> anyhow::Result<SurfaceStatus> {
    if is_surface_gone(&err) {
        log::warn!("{what}: terminal went away ({err})");
        return Ok(SurfaceStatus::Closed);
    }
    Err(anyhow::Error::new(err).context(what))
}

/// Full-screen terminal surface: the stage is rasterised into a pixel grid
/// sized to the terminal and handed to a cell renderer once per frame.
pub struct TerminalSurface {
    out: BufWriter<Stdout>,
    renderer: Box<dyn Renderer>,
    mode: RendererMode,
    canvas: Canvas,
    show_hud: bool,
    sync_updates: bool,
    last_size: (u16, u16),
    // Dropped last so the terminal is restored after everything else.
    _term: TerminalGuard,
}

impl TerminalSurface {
    pub fn open(cfg: &Config) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size().context("get terminal size")?;
        if size.1 < 2 || size.0 < 4 {
            return Err(anyhow::anyhow!(
                "terminal too small (need at least 4x2, got {}x{})",
                size.0,
                size.1
            ));
        }

        let term = TerminalGuard::new(TITLE)?;
        let mode = cfg.renderer;
        let renderer = mode.build();
        log::info!(
            "surface open: {}x{} cells, renderer={}",
            size.0,
            size.1,
            renderer.name()
        );

        Ok(Self {
            out: BufWriter::new(io::stdout()),
            renderer,
            mode,
            canvas: Canvas::new(0, 0, mode.pixel_aspect()),
            show_hud: cfg.hud,
            sync_updates: cfg.sync_updates,
            last_size: size,
            _term: term,
        })
    }

    fn hud_rows(&self, term_rows: u16) -> u16 {
        if self.show_hud && term_rows > 1 { 1 } else { 0 }
    }

    fn draw(&mut self, scene: &Scene, hud: &str) -> anyhow::Result<()> {
        let size = crossterm::terminal::size()?;
        if size != self.last_size {
            self.last_size = size;
            // Stale cells outside the new grid would otherwise linger.
            self.out.write_all(b"\x1b[0m\x1b[2J")?;
        }

        let (term_cols, term_rows) = size;
        let hud_rows = self.hud_rows(term_rows);
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        let (cw, ch) = self.mode.cell_pixels();
        let w = (term_cols as usize).saturating_mul(cw);
        let h = (visual_rows as usize).saturating_mul(ch);

        if self.canvas.resize(w, h) {
            log::debug!("canvas resized to {w}x{h} pixels");
        }
        self.canvas.draw(scene);

        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: self.canvas.pixels_rgba(),
            hud,
            hud_rows,
            sync_updates: self.sync_updates,
        };
        self.renderer.render(&frame, &mut self.out)
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, scene: &Scene, hud: &str) -> anyhow::Result<SurfaceStatus> {
        match self.draw(scene, hud) {
            Ok(()) => Ok(SurfaceStatus::Open),
            Err(err) => match err.downcast::<io::Error>() {
                Ok(io_err) => closed_or(io_err, "present frame"),
                Err(other) => Err(other),
            },
        }
    }

    fn wait(&mut self, timeout: Duration) -> anyhow::Result<SurfaceStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let ready = match event::poll(remaining) {
                Ok(ready) => ready,
                Err(err) => return closed_or(err, "poll terminal events"),
            };
            if !ready {
                return Ok(SurfaceStatus::Open);
            }
            match event::read() {
                Ok(Event::Key(k))
                    if k.kind != KeyEventKind::Release && is_quit_key(k.code, k.modifiers) =>
                {
                    return Ok(SurfaceStatus::Closed);
                }
                Ok(_) => {}
                Err(err) => return closed_or(err, "read terminal event"),
            }
        }
    }
}
