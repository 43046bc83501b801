//! Simulation state machine
//!
//! `LifeSimulation` drives the whole tick protocol: configure tears down the
//! previous generation of device resources, seeds a fresh session from the
//! requested pattern, and arms the timer; each tick dispatches one compute
//! pass, reading back the previous pass's output first — except on the very
//! first tick after a configure, when no compute pass has produced a valid
//! output image yet.

use crate::config::SimulationConfig;
use crate::display::DisplayBridge;
use crate::error::{ConfigurationError, Result};
use crate::gpu::{ComputeProgram, DeviceSession, GpuContext, GridBuffers, KernelSource};
use crate::grid::Grid;
use crate::pattern::{Pattern, PatternSource, PresetLibrary};
use crate::simulation::timer::TickTimer;

/// Where the loop currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No configuration; timer not running.
    Idle,
    /// Configured, timer running, first tick not yet fired.
    Armed,
    /// Ticking; every tick reads back before dispatching.
    Steady,
}

/// GPU-backed Game of Life simulation core.
///
/// External collaborators (scene wiring, UI) call [`configure`] to (re)seed
/// and [`pump`] from the thread that owns the device to drain timer ticks.
/// The current generation is always available as a byte buffer via
/// [`frame`].
///
/// [`configure`]: LifeSimulation::configure
/// [`pump`]: LifeSimulation::pump
/// [`frame`]: LifeSimulation::frame
pub struct LifeSimulation {
    gpu: GpuContext,
    presets: PresetLibrary,
    kernel: KernelSource,
    config: SimulationConfig,
    bridge: Option<Box<dyn DisplayBridge>>,
    session: Option<DeviceSession>,
    timer: Option<TickTimer>,
    first_tick: bool,
    generation: u64,
}

impl LifeSimulation {
    /// Builds an idle simulation. `config` is validated here; presets and
    /// the kernel are injected rather than resolved at configure time.
    pub fn new(gpu: GpuContext, presets: PresetLibrary, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            gpu,
            presets,
            kernel: KernelSource::builtin(),
            config,
            bridge: None,
            session: None,
            timer: None,
            first_tick: false,
            generation: 0,
        })
    }

    /// Replaces the builtin kernel. Takes effect on the next configure.
    pub fn with_kernel(mut self, kernel: KernelSource) -> Self {
        self.kernel = kernel;
        self
    }

    /// Attaches the display consumer; it receives the merged seed frame on
    /// configure and every generation thereafter.
    pub fn with_display(mut self, bridge: Box<dyn DisplayBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Tears down the previous configuration and seeds a new one.
    ///
    /// The timer stops before any resource is released, so no pending tick
    /// can dispatch against freed handles. On any error the simulation is
    /// left idle with no partially-constructed device resources.
    pub fn configure(&mut self, pattern: Pattern) -> Result<()> {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
        // Drops buffer, pipeline, kernel module, and both textures in one go.
        drop(self.session.take());
        self.first_tick = false;
        self.generation = 0;

        let (size, initial) = PatternSource::load(
            pattern,
            &self.presets,
            self.config.grid_size,
            self.config.noise_frequency,
        )?;
        log::info!("configuring {pattern} at {size}x{size}");

        let (buffers, merged) =
            GridBuffers::initialize(self.gpu.device(), self.gpu.queue(), &initial);
        let program = ComputeProgram::build(self.gpu.device(), &self.kernel, &buffers)?;

        if let Some(bridge) = self.bridge.as_mut() {
            bridge.present(&merged);
        }

        self.session = Some(DeviceSession::new(buffers, program, merged));
        self.first_tick = true;
        self.timer = Some(TickTimer::start(self.config.update_interval));
        Ok(())
    }

    /// Drains pending timer ticks serially on the calling thread.
    ///
    /// This is the single consumer of the tick queue; calling it from the
    /// thread that owns the device preserves the no-concurrent-ticks
    /// invariant without any thread-affinity machinery. Returns the number
    /// of ticks advanced; the bounded tick channel keeps a slow consumer
    /// from accumulating a backlog here.
    pub fn pump(&mut self) -> Result<u32> {
        let mut advanced = 0;
        while self.timer.as_ref().is_some_and(|t| t.try_tick()) {
            self.advance()?;
            advanced += 1;
        }
        Ok(advanced)
    }

    /// Runs exactly one tick: conditional readback, then dispatch.
    ///
    /// In `Armed` the readback is skipped — no compute pass has executed
    /// since configure, so the output image holds only the merged seed. In
    /// `Steady` the previous generation is read back and merged before the
    /// next dispatch, so the kernel always reads a settled input.
    pub fn advance(&mut self) -> Result<()> {
        let session = self
            .session
            .as_mut()
            .ok_or(ConfigurationError::NotConfigured)?;

        if self.first_tick {
            self.first_tick = false;
        } else {
            let frame = session.readback_and_merge(self.gpu.device(), self.gpu.queue())?;
            if let Some(bridge) = self.bridge.as_mut() {
                bridge.present(frame);
            }
        }

        session.dispatch(self.gpu.device(), self.gpu.queue());
        self.generation += 1;
        Ok(())
    }

    /// Stops the timer and releases all device resources.
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
        drop(self.session.take());
        self.first_tick = false;
        self.generation = 0;
    }

    pub fn state(&self) -> LoopState {
        match (&self.session, self.first_tick) {
            (None, _) => LoopState::Idle,
            (Some(_), true) => LoopState::Armed,
            (Some(_), false) => LoopState::Steady,
        }
    }

    /// True between configure and the first fired tick.
    pub fn is_first_tick_pending(&self) -> bool {
        self.first_tick
    }

    /// Ticks fired since the last configure.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Effective grid side length of the current configuration.
    pub fn grid_size(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.size())
    }

    /// The current generation as a single-channel byte buffer, if configured.
    pub fn frame(&self) -> Option<&Grid> {
        self.session.as_ref().map(|s| s.frame())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Drop for LifeSimulation {
    fn drop(&mut self) {
        self.shutdown();
    }
}
