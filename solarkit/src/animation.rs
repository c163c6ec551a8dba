//! The animation engine: a Stopped/Running/Paused state machine stepped
//! by an external host loop. The driver never owns a timer; whoever calls
//! [`AnimationDriver::tick`] decides the cadence.

use tracing::{debug, info};

use crate::render::{Frame, RenderError, Renderer};
use crate::system::System;
use crate::units::Time;
use crate::FrameSink;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    Stopped,
    Running,
    Paused,
}

/// `start` was refused because a run is already active. The rejected
/// system is handed back so the caller can stop and retry.
#[derive(Debug, thiserror::Error)]
#[error("An animation is already running over system '{running}'")]
pub struct AlreadyRunningError {
    pub running: String,
    pub rejected: System,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("No animation is running")]
    NotRunning,

    #[error("The animation is not paused")]
    NotPaused,
}

/// Live animation state. Owns the System for the duration of the run so
/// nothing else can mutate bodies mid-tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    system: System,
    time: Time,
    step: Time,
    ticks: u64,
}

impl SimulationState {
    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn step(&self) -> Time {
        self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[derive(Debug)]
enum Phase {
    Stopped,
    Running(SimulationState),
    Paused(SimulationState),
}

#[derive(Debug)]
pub struct AnimationDriver {
    renderer: Renderer,
    phase: Phase,
}

impl AnimationDriver {
    pub fn new(renderer: Renderer) -> Self {
        AnimationDriver {
            renderer,
            phase: Phase::Stopped,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn state(&self) -> DriverState {
        match self.phase {
            Phase::Stopped => DriverState::Stopped,
            Phase::Running(_) => DriverState::Running,
            Phase::Paused(_) => DriverState::Paused,
        }
    }

    pub fn simulation(&self) -> Option<&SimulationState> {
        match &self.phase {
            Phase::Stopped => None,
            Phase::Running(sim) | Phase::Paused(sim) => Some(sim),
        }
    }

    /// Take ownership of `system` and begin a run at t = 0.
    pub fn start(&mut self, system: System, step: Time) -> Result<(), AlreadyRunningError> {
        match self.simulation() {
            Some(active) => Err(AlreadyRunningError {
                running: active.system().name().to_string(),
                rejected: system,
            }),
            None => {
                info!(
                    system = system.name(),
                    step_days = step.as_days(),
                    "Starting animation"
                );
                self.phase = Phase::Running(SimulationState {
                    system,
                    time: Time::zero(),
                    step,
                    ticks: 0,
                });
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), AnimationError> {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running(sim) => {
                debug!(time_days = sim.time.as_days(), "Pausing animation");
                self.phase = Phase::Paused(sim);
                Ok(())
            }
            other => {
                self.phase = other;
                Err(AnimationError::NotRunning)
            }
        }
    }

    pub fn resume(&mut self) -> Result<(), AnimationError> {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Paused(sim) => {
                debug!(time_days = sim.time.as_days(), "Resuming animation");
                self.phase = Phase::Running(sim);
                Ok(())
            }
            other => {
                self.phase = other;
                Err(AnimationError::NotPaused)
            }
        }
    }

    /// Discard the simulation state and hand the System back. Valid in
    /// any state; after `stop` no further frame is emitted until the next
    /// `start`.
    pub fn stop(&mut self) -> Option<System> {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running(sim) | Phase::Paused(sim) => {
                info!(
                    system = sim.system.name(),
                    ticks = sim.ticks,
                    "Stopping animation"
                );
                Some(sim.system)
            }
            Phase::Stopped => None,
        }
    }

    /// Advance one step, render, and emit the frame to `sink`.
    ///
    /// Returns `Ok(None)` without touching the sink while Paused or
    /// Stopped. A solver failure aborts the tick and leaves the
    /// simulation clock where it was.
    pub fn tick(&mut self, sink: &mut dyn FrameSink) -> Result<Option<Frame>, RenderError> {
        let Phase::Running(sim) = &mut self.phase else {
            return Ok(None);
        };

        let t = sim.time + sim.step;
        let frame = self.renderer.render_frame(&sim.system, t)?;
        sim.time = t;
        sim.ticks += 1;

        sink.accept_frame(&frame);
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::tests::{body_with, earth};
    use crate::propagator::SolverConfig;
    use crate::render::{Renderer, RendererConfig};
    use approx::assert_relative_eq;

    fn sol() -> System {
        let mut sys = System::new("Sol");
        sys.add_body(earth()).unwrap();
        sys
    }

    fn driver() -> AnimationDriver {
        AnimationDriver::new(Renderer::default())
    }

    #[test]
    fn fresh_driver_is_stopped_and_ticks_do_nothing() {
        let mut d = driver();
        assert_eq!(d.state(), DriverState::Stopped);

        let mut frames: Vec<Frame> = Vec::new();
        let mut sink = |f: &Frame| frames.push(f.clone());
        assert!(d.tick(&mut sink).unwrap().is_none());
        assert!(frames.is_empty());
    }

    #[test]
    fn ticks_advance_time_by_step_and_feed_the_sink() {
        let mut d = driver();
        d.start(sol(), Time::from_days(10.0)).unwrap();
        assert_eq!(d.state(), DriverState::Running);

        let mut frames: Vec<Frame> = Vec::new();
        let mut sink = |f: &Frame| frames.push(f.clone());
        d.tick(&mut sink).unwrap();
        d.tick(&mut sink).unwrap();

        assert_eq!(frames.len(), 2);
        assert_relative_eq!(frames[0].time.as_days(), 10.0);
        assert_relative_eq!(frames[1].time.as_days(), 20.0);
        assert_eq!(d.simulation().unwrap().ticks(), 2);
    }

    #[test]
    fn paused_driver_emits_no_frames_and_resumes_in_place() {
        let mut d = driver();
        d.start(sol(), Time::from_days(5.0)).unwrap();

        let mut frames: Vec<Frame> = Vec::new();
        d.tick(&mut |f: &Frame| frames.push(f.clone())).unwrap();

        d.pause().unwrap();
        assert_eq!(d.state(), DriverState::Paused);
        assert!(d.tick(&mut |f: &Frame| frames.push(f.clone())).unwrap().is_none());
        assert_eq!(frames.len(), 1);

        d.resume().unwrap();
        d.tick(&mut |f: &Frame| frames.push(f.clone())).unwrap();
        assert_relative_eq!(frames[1].time.as_days(), 10.0);
    }

    #[test]
    fn stop_returns_the_system_and_suppresses_further_frames() {
        let mut d = driver();
        d.start(sol(), Time::from_days(1.0)).unwrap();

        let mut frames: Vec<Frame> = Vec::new();
        let mut sink = |f: &Frame| frames.push(f.clone());
        d.tick(&mut sink).unwrap();

        let system = d.stop().expect("stop hands the system back");
        assert_eq!(system.name(), "Sol");
        assert_eq!(d.state(), DriverState::Stopped);
        assert!(d.simulation().is_none());

        // No frame for a cancelled tick.
        assert!(d.tick(&mut sink).unwrap().is_none());
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn double_start_is_refused_and_leaves_the_run_untouched() {
        let mut d = driver();
        d.start(sol(), Time::from_days(10.0)).unwrap();

        let mut other = System::new("Other");
        other.add_body(body_with("X", 1.0, 0.0, 50.0)).unwrap();
        let err = d.start(other, Time::from_days(1.0)).unwrap_err();
        assert_eq!(err.running, "Sol");
        assert_eq!(err.rejected.name(), "Other");

        // The original run carries on unaffected.
        let mut frames: Vec<Frame> = Vec::new();
        let mut sink = |f: &Frame| frames.push(f.clone());
        d.tick(&mut sink).unwrap();
        assert_relative_eq!(frames[0].time.as_days(), 10.0);
    }

    #[test]
    fn pause_and_resume_guard_their_source_states() {
        let mut d = driver();
        assert_eq!(d.pause().unwrap_err(), AnimationError::NotRunning);
        assert_eq!(d.resume().unwrap_err(), AnimationError::NotPaused);

        d.start(sol(), Time::from_days(1.0)).unwrap();
        assert_eq!(d.resume().unwrap_err(), AnimationError::NotPaused);
        d.pause().unwrap();
        assert_eq!(d.pause().unwrap_err(), AnimationError::NotRunning);
    }

    #[test]
    fn stop_when_stopped_is_a_quiet_noop() {
        let mut d = driver();
        assert!(d.stop().is_none());
    }

    #[test]
    fn failed_tick_aborts_without_advancing_the_clock() {
        let mut d = AnimationDriver::new(Renderer::new(RendererConfig {
            solver: SolverConfig {
                tolerance: 1e-8,
                max_iterations: 1,
            },
            ..RendererConfig::default()
        }));
        let mut sys = System::new("Sol");
        sys.add_body(body_with("Stubborn", 1.0, 0.9, 365.25)).unwrap();
        d.start(sys, Time::from_days(100.0)).unwrap();

        let mut frames: Vec<Frame> = Vec::new();
        let mut sink = |f: &Frame| frames.push(f.clone());
        assert!(d.tick(&mut sink).is_err());

        assert!(frames.is_empty());
        assert_relative_eq!(d.simulation().unwrap().time().as_days(), 0.0);
        assert_eq!(d.simulation().unwrap().ticks(), 0);
    }
}
