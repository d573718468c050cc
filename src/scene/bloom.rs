use super::{DrawCommand, Lens};
use crate::geometry::Point;
use crate::palette::{LAYER_COUNT, PETALS, Rgb};

use super::stem::PEN_WIDTH;

/// Fraction of a layer's maximum spread reached when fully open.
pub const SPREAD: f64 = 0.8;

/// One concentric ring of petals at a given bloom progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalLayer {
    pub index: usize,
    pub color: Rgb,
    pub count: usize,
    pub max_distance: f64,
    pub distance: f64,
    pub size: f64,
    pub angle_offset: f64,
}

impl PetalLayer {
    /// Layer `index` (0 = outermost) at `progress` in `[0, 1]`.
    ///
    /// Indices past the palette reuse the innermost colour.
    pub fn new(index: usize, progress: f64) -> Self {
        let i = index as f64;
        let max_distance = 20.0 + 18.0 * i;
        Self {
            index,
            color: PETALS[index.min(LAYER_COUNT - 1)],
            count: 10 + 2 * index,
            max_distance,
            distance: max_distance * progress * SPREAD,
            size: 20.0 + 8.0 * i,
            angle_offset: 15.0 * i,
        }
    }

    /// Final heading-free angle of each petal, in degrees.
    pub fn petal_angles(&self) -> impl Iterator<Item = f64> + '_ {
        let step = 360.0 / self.count as f64;
        (0..self.count).map(move |j| step * j as f64 + self.angle_offset)
    }

    pub fn petal_centers(&self, anchor: Point) -> impl Iterator<Item = Point> + '_ {
        self.petal_angles()
            .map(move |angle| anchor.offset(angle, self.distance))
    }

    pub fn petals(&self, anchor: Point) -> impl Iterator<Item = Lens> + '_ {
        self.petal_angles().map(move |angle| Lens {
            origin: anchor.offset(angle, self.distance),
            heading_deg: angle - 45.0,
            radius: self.size,
            color: self.color,
            pen_width: PEN_WIDTH,
        })
    }
}

/// All petal layers for `progress`, outermost first (drawing order).
pub fn layers(progress: f64) -> impl Iterator<Item = PetalLayer> {
    (0..LAYER_COUNT).map(move |i| PetalLayer::new(i, progress))
}

pub fn bloom(anchor: Point, progress: f64, commands: &mut Vec<DrawCommand>) {
    for layer in layers(progress) {
        commands.extend(layer.petals(anchor).map(DrawCommand::Lens));
    }
}
