use std::time::Duration;

/// Progress change per tick.
pub const STEP: f64 = 0.01;
/// Hold time once the flower is fully open.
pub const OPEN_PAUSE: Duration = Duration::from_millis(1500);
/// Hold time once the flower is fully closed.
pub const CLOSED_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Rising => 1.0,
            Self::Falling => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rising => "opening",
            Self::Falling => "closing",
        }
    }
}

/// Bloom openness and the way it is heading. Progress stays in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomState {
    progress: f64,
    direction: Direction,
}

impl Default for BloomState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            direction: Direction::Rising,
        }
    }
}

impl BloomState {
    pub fn new(progress: f64, direction: Direction) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
            direction,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves one step. When a bound is reached the progress is clamped, the
    /// direction flips and the pause to hold there is returned.
    pub fn advance(&mut self) -> Option<Duration> {
        self.progress += STEP * self.direction.sign();

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.direction = Direction::Falling;
            log::debug!("bloom fully open, holding {:?}", OPEN_PAUSE);
            Some(OPEN_PAUSE)
        } else if self.progress <= 0.0 {
            self.progress = 0.0;
            self.direction = Direction::Rising;
            log::debug!("bloom fully closed, holding {:?}", CLOSED_PAUSE);
            Some(CLOSED_PAUSE)
        } else {
            None
        }
    }
}
