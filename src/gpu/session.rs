//! Per-configuration device resource session
//!
//! One `DeviceSession` owns every device handle a configure cycle creates:
//! the dimension uniform, the compute pipeline, the shader module (held by
//! the pipeline), and both cell textures. The session is recreated wholesale
//! on every configure; dropping the previous one releases each resource
//! exactly once, so there is never partially-updated device state to reason
//! about. A live counter instruments the no-leak invariant.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;
use crate::gpu::buffers::GridBuffers;
use crate::gpu::pipeline::ComputeProgram;
use crate::gpu::readback;
use crate::grid::Grid;

static LIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// Workgroups dispatched per tick on each axis. With the kernel's 16×16
/// local size this covers the full 512-cell maximum grid.
pub const DISPATCH_WORKGROUPS: u32 = 32;

/// Live device resources plus the host-side frame for one configuration.
pub struct DeviceSession {
    buffers: GridBuffers,
    program: ComputeProgram,
    frame: Grid,
}

impl DeviceSession {
    pub fn new(buffers: GridBuffers, program: ComputeProgram, frame: Grid) -> Self {
        let live = LIVE_SESSIONS.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("device session created ({live} live)");
        Self {
            buffers,
            program,
            frame,
        }
    }

    /// Number of sessions currently holding device resources.
    pub fn live_count() -> usize {
        LIVE_SESSIONS.load(Ordering::SeqCst)
    }

    pub fn size(&self) -> u32 {
        self.buffers.size()
    }

    /// The software-side copy of the current generation.
    pub fn frame(&self) -> &Grid {
        &self.frame
    }

    /// Records and submits one compute pass over the fixed workgroup grid.
    pub fn dispatch(&self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("life tick encoder"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("life tick pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(self.program.pipeline());
            compute_pass.set_bind_group(0, self.program.bind_group(), &[]);
            compute_pass.dispatch_workgroups(DISPATCH_WORKGROUPS, DISPATCH_WORKGROUPS, 1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Reads the settled output generation and propagates it three ways:
    /// back into the input texture as the next neighbor source, into the
    /// host frame for display, and to the caller.
    ///
    /// This is the double-buffering discipline — the kernel only ever reads
    /// a synchronized previous generation and writes a separate output.
    pub fn readback_and_merge(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<&Grid> {
        let size = self.buffers.size();
        let bytes = readback::read_cells(device, queue, self.buffers.output(), size)?;
        readback::upload_cells(queue, self.buffers.input(), &bytes, size);
        self.frame.copy_from_bytes(&bytes);
        Ok(&self.frame)
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        let live = LIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!("device session released ({live} live)");
    }
}
