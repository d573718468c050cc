use crate::geometry::{Bounds, Point};
use crate::palette::Rgb;

/// An almond-shaped fill traced by two quarter-circle arcs.
///
/// Starting at `origin` facing `heading_deg`, the pen sweeps a 90° arc of
/// `radius` to the left, turns left 90° and sweeps a second 90° arc back to
/// `origin`. The enclosed region is the intersection of the two discs the
/// arcs belong to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub origin: Point,
    pub heading_deg: f64,
    pub radius: f64,
    pub color: Rgb,
    pub pen_width: f64,
}

impl Lens {
    /// Centre of the first arc's circle (to the left of the start heading).
    pub fn first_center(&self) -> Point {
        self.origin.offset(self.heading_deg + 90.0, self.radius)
    }

    /// Centre of the second arc's circle.
    pub fn second_center(&self) -> Point {
        self.origin.offset(self.heading_deg, self.radius)
    }

    /// The point where the first arc ends and the second begins.
    pub fn tip(&self) -> Point {
        self.first_center().offset(self.heading_deg, self.radius)
    }

    /// Signed distance to the lens fill: negative inside, positive outside.
    ///
    /// This is the max of the two disc distances, which is exact along the
    /// arcs and slightly underestimates near the two pointed ends.
    pub fn signed_distance(&self, p: Point) -> f64 {
        let a = p.distance(self.first_center()) - self.radius;
        let b = p.distance(self.second_center()) - self.radius;
        a.max(b)
    }

    /// Whether `p` is covered by the fill or its same-coloured outline.
    pub fn covers(&self, p: Point) -> bool {
        self.signed_distance(p) <= self.pen_width * 0.5
    }

    pub fn bounds(&self) -> Bounds {
        let r = self.radius.abs();
        Bounds::around(self.first_center(), r)
            .intersect(Bounds::around(self.second_center(), r))
            .inflate(self.pen_width * 0.5)
    }

    /// Polyline along the lens boundary, `steps` segments per arc, starting
    /// and ending at `origin`.
    pub fn outline(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut points = Vec::with_capacity(steps * 2 + 1);
        let c1 = self.first_center();
        let c2 = self.second_center();
        // First arc runs counter-clockwise around c1 from heading-90 to heading.
        for k in 0..=steps {
            let a = self.heading_deg - 90.0 + 90.0 * k as f64 / steps as f64;
            points.push(c1.offset(a, self.radius));
        }
        // Second arc runs counter-clockwise around c2 from heading+90 to heading+180.
        for k in 1..=steps {
            let a = self.heading_deg + 90.0 + 90.0 * k as f64 / steps as f64;
            points.push(c2.offset(a, self.radius));
        }
        points
    }
}
