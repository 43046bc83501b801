//! Device-side simulation resources
//!
//! Headless wgpu plumbing for the compute pipeline: device acquisition, the
//! double-buffered cell textures, the fixed-layout compute program, blocking
//! readback, and the per-configuration resource session.

mod bindings;
mod buffers;
mod context;
mod pipeline;
mod readback;
mod session;
mod uniform;

pub use buffers::{GridBuffers, GridDims};
pub use context::GpuContext;
pub use pipeline::{ComputeProgram, KernelSource};
pub use session::DeviceSession;
pub use uniform::UniformBuffer;
