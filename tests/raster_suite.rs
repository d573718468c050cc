use chrysanthemum::geometry::Point;
use chrysanthemum::palette::{BACKGROUND, PETALS, Rgb, STEM};
use chrysanthemum::raster::{Canvas, Viewport};
use chrysanthemum::scene::{DrawCommand, FLOWER_BASE, Scene};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Viewport ───────────────────────────────────────────────────────────────

#[test]
fn viewport_maps_full_stage_one_to_one() {
    let vp = Viewport::fit(600, 800, 1.0);
    assert!(approx(vp.scale_x, 1.0) && approx(vp.scale_y, 1.0));
    assert!(approx(vp.offset_x, 0.0) && approx(vp.offset_y, 0.0));

    let (cx, cy) = vp.to_pixel(Point::ORIGIN);
    assert!(approx(cx, 300.0) && approx(cy, 400.0));
    let (lx, ty) = vp.to_pixel(Point::new(-300.0, 400.0));
    assert!(approx(lx, 0.0) && approx(ty, 0.0));
}

#[test]
fn viewport_letterboxes_narrow_grids() {
    let vp = Viewport::fit(300, 800, 1.0);
    assert!(approx(vp.scale_x, 0.5));
    assert!(approx(vp.offset_x, 0.0));
    assert!(approx(vp.offset_y, 200.0));
}

#[test]
fn viewport_compensates_for_tall_pixels() {
    // One terminal cell per pixel: each pixel is twice as tall as wide.
    let vp = Viewport::fit(120, 40, 2.0);
    assert!(approx(vp.scale_x, 0.1));
    assert!(approx(vp.scale_y, 0.05));
    assert!(approx(vp.offset_x, 30.0));
    assert!(approx(vp.offset_y, 0.0));
}

#[test]
fn viewport_round_trips() {
    let vp = Viewport::fit(173, 91, 1.0);
    for p in [Point::new(12.5, -40.0), Point::new(-299.0, 399.0), FLOWER_BASE] {
        let (px, py) = vp.to_pixel(p);
        let back = vp.to_stage(px, py);
        assert!(back.distance(p) < 1e-9);
    }
}

// ── Canvas ─────────────────────────────────────────────────────────────────

#[test]
fn canvas_resize_reallocates_only_on_change() {
    let mut canvas = Canvas::new(10, 20, 1.0);
    assert_eq!(canvas.pixels_rgba().len(), 10 * 20 * 4);
    assert!(!canvas.resize(10, 20));
    assert!(canvas.resize(30, 40));
    assert_eq!((canvas.width(), canvas.height()), (30, 40));
    assert_eq!(canvas.pixels_rgba().len(), 30 * 40 * 4);
}

#[test]
fn clear_fills_every_pixel() {
    let mut canvas = Canvas::new(7, 5, 1.0);
    canvas.clear(Rgb::new(9, 8, 7));
    for px in canvas.pixels_rgba().chunks_exact(4) {
        assert_eq!(px, &[9u8, 8, 7, 255][..]);
    }
}

#[test]
fn later_commands_paint_over_earlier_ones() {
    let mut canvas = Canvas::new(600, 800, 1.0);
    canvas.clear(BACKGROUND);
    let red = Rgb::new(255, 0, 0);
    let blue = Rgb::new(0, 0, 255);
    let stroke = |color| DrawCommand::Stroke {
        from: Point::new(-50.0, 0.0),
        to: Point::new(50.0, 0.0),
        width: 10.0,
        color,
    };
    canvas.paint(&stroke(red));
    assert_eq!(canvas.sample(Point::new(0.0, 0.0)), Some(red));
    canvas.paint(&stroke(blue));
    assert_eq!(canvas.sample(Point::new(0.0, 0.0)), Some(blue));
    assert_eq!(canvas.sample(Point::new(0.0, 20.0)), Some(BACKGROUND));
}

#[test]
fn full_scene_shows_stem_background_and_bud() {
    let mut canvas = Canvas::new(600, 800, 1.0);
    canvas.draw(&Scene::compose(0.0));

    assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
    assert_eq!(canvas.pixel(599, 799), Some(BACKGROUND));
    // Below both leaves, only the stem is there.
    assert_eq!(canvas.sample(Point::new(0.0, -300.0)), Some(STEM));
    // Every closed petal starts at the anchor; the innermost layer is drawn last.
    assert_eq!(canvas.sample(FLOWER_BASE), Some(PETALS[5]));
}

#[test]
fn open_bloom_covers_more_pixels_than_closed_bud() {
    let count_petal_pixels = |progress: f64| {
        let mut canvas = Canvas::new(300, 400, 1.0);
        canvas.draw(&Scene::compose(progress));
        canvas
            .pixels_rgba()
            .chunks_exact(4)
            .filter(|px| PETALS.iter().any(|c| px[..3] == [c.r, c.g, c.b]))
            .count()
    };
    assert!(count_petal_pixels(1.0) > count_petal_pixels(0.0));
}

#[test]
fn zero_sized_canvas_is_harmless() {
    let mut canvas = Canvas::new(0, 0, 1.0);
    canvas.draw(&Scene::compose(0.5));
    assert!(canvas.pixels_rgba().is_empty());
    assert_eq!(canvas.sample(Point::ORIGIN), None);
}

#[test]
fn repeated_draws_are_identical() {
    let mut a = Canvas::new(120, 160, 1.0);
    let mut b = Canvas::new(120, 160, 1.0);
    a.draw(&Scene::compose(0.42));
    a.draw(&Scene::compose(0.42));
    b.draw(&Scene::compose(0.42));
    assert_eq!(a.pixels_rgba(), b.pixels_rgba());
}
