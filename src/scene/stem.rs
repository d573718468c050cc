use super::{DrawCommand, Lens};
use crate::geometry::Point;
use crate::palette::STEM;

pub const STEM_START: Point = Point::new(0.0, -350.0);
pub const FLOWER_BASE: Point = Point::new(0.0, 100.0);
pub const PEN_WIDTH: f64 = 6.0;

pub const LEFT_LEAF: Lens = Lens {
    origin: Point::new(0.0, -100.0),
    heading_deg: 135.0,
    radius: 60.0,
    color: STEM,
    pen_width: PEN_WIDTH,
};

pub const RIGHT_LEAF: Lens = Lens {
    origin: Point::new(0.0, -180.0),
    heading_deg: 45.0,
    radius: 50.0,
    color: STEM,
    pen_width: PEN_WIDTH,
};

/// Emits the stem and both leaves, returning the anchor the bloom hangs from.
pub fn stem_and_leaves(commands: &mut Vec<DrawCommand>) -> Point {
    commands.push(DrawCommand::Stroke {
        from: STEM_START,
        to: FLOWER_BASE,
        width: PEN_WIDTH,
        color: STEM,
    });
    commands.push(DrawCommand::Lens(LEFT_LEAF));
    commands.push(DrawCommand::Lens(RIGHT_LEAF));
    FLOWER_BASE
}
