mod bloom;
mod lens;
mod stem;

use crate::geometry::{Bounds, Point};
use crate::palette::{BACKGROUND, Rgb};

pub use bloom::{PetalLayer, SPREAD, bloom, layers};
pub use lens::Lens;
pub use stem::{FLOWER_BASE, LEFT_LEAF, PEN_WIDTH, RIGHT_LEAF, STEM_START, stem_and_leaves};

/// Logical stage size, in turtle units.
pub const STAGE_WIDTH: f64 = 600.0;
pub const STAGE_HEIGHT: f64 = 800.0;
pub const TITLE: &str = "Blooming Chrysanthemum";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Straight pen stroke with round caps.
    Stroke {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb,
    },
    Lens(Lens),
}

impl DrawCommand {
    pub fn color(&self) -> Rgb {
        match self {
            Self::Stroke { color, .. } => *color,
            Self::Lens(lens) => lens.color,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Stroke {
                from, to, width, ..
            } => Bounds::spanning(*from, *to).inflate(width * 0.5),
            Self::Lens(lens) => lens.bounds(),
        }
    }

    pub fn covers(&self, p: Point) -> bool {
        match self {
            Self::Stroke {
                from, to, width, ..
            } => p.distance_to_segment(*from, *to) <= width * 0.5,
            Self::Lens(lens) => lens.covers(p),
        }
    }
}

/// Everything needed to paint one frame, in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub anchor: Point,
    pub progress: f64,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Builds the full frame for a bloom `progress`, clamped into `[0, 1]`.
    pub fn compose(progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let mut commands = Vec::new();
        let anchor = stem_and_leaves(&mut commands);
        bloom(anchor, progress, &mut commands);
        Self {
            background: BACKGROUND,
            anchor,
            progress,
            commands,
        }
    }

    pub fn petals(&self) -> impl Iterator<Item = &Lens> {
        // The first three commands are the stem and leaves.
        self.commands.iter().skip(3).filter_map(|cmd| match cmd {
            DrawCommand::Lens(lens) => Some(lens),
            DrawCommand::Stroke { .. } => None,
        })
    }
}
