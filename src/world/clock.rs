//! Fixed-timestep driver.

use super::physics_world::{TickReport, World};

/// Turns variable frame times into whole baseline ticks.
///
/// Real time accumulates between frames and is drained one baseline tick at
/// a time. After a stall the backlog is capped so a single frame never runs
/// more than `max_catch_up_ticks` ticks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock::default()
    }

    /// Milliseconds of real time not yet simulated.
    pub fn pending_ms(&self) -> f64 {
        self.accumulator
    }

    /// Adds `elapsed_ms` of real time and runs every whole tick now due.
    pub fn advance(&mut self, world: &mut World, elapsed_ms: f64) -> Vec<TickReport> {
        let tick = world.config().baseline_timestep_ms;
        let cap = world.config().max_accumulated_ms();

        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator += elapsed_ms;
        }
        if self.accumulator > cap {
            log::warn!(
                "frame clock fell {:.1} ms behind; dropping to {:.1} ms",
                self.accumulator,
                cap
            );
            self.accumulator = cap;
        }

        let mut reports = Vec::new();
        while self.accumulator >= tick {
            reports.push(world.step(tick));
            self.accumulator -= tick;
        }
        reports
    }
}
