//! Fire-once countdown driven by the tick clock

/// Counts down simulated seconds. Dropping it cancels it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
            fired: false,
        }
    }

    /// Advance by `dt`. Returns true on the first tick that reaches zero and
    /// never again after that.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.fired = self.remaining <= 0.0;
        self.fired
    }

    pub fn finished(&self) -> bool {
        self.fired
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
