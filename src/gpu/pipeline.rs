//! Compute kernel compilation and binding
//!
//! Builds the compute pipeline and the single bind group wiring the grid
//! resources to the kernel's declared slots. The binding layout is fixed:
//! binding 0 is the dimension uniform, binding 1 the input image the kernel
//! reads neighbor states from, binding 2 the output image it writes the next
//! generation into. Rebinding requires a full configure cycle.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{ConfigurationError, Result};
use crate::gpu::bindings;
use crate::gpu::buffers::GridBuffers;

/// WGSL text for the simulation kernel.
#[derive(Debug)]
pub struct KernelSource {
    source: Cow<'static, str>,
}

impl KernelSource {
    /// The crate's toroidal Game of Life kernel.
    pub fn builtin() -> Self {
        Self {
            source: Cow::Borrowed(include_str!("../shaders/life.wgsl")),
        }
    }

    /// Loads a replacement kernel from disk. The kernel must declare the
    /// fixed three-slot binding layout.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| {
            ConfigurationError::KernelRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            source: Cow::Owned(source),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Compiled kernel, pipeline, and the one bind group for a configuration.
pub struct ComputeProgram {
    pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
}

impl ComputeProgram {
    /// Compiles `kernel` and wires `buffers` to its binding slots.
    ///
    /// Compilation runs inside a validation error scope: a malformed kernel
    /// or one whose bindings do not match the fixed layout is a fatal
    /// configuration error, surfaced instead of panicking the device.
    pub fn build(
        device: &wgpu::Device,
        kernel: &KernelSource,
        buffers: &GridBuffers,
    ) -> Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("life kernel"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(kernel.as_str())),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("life bind group layout"),
            entries: &[
                bindings::compute_entry(0, bindings::uniform()),
                bindings::compute_entry(
                    1,
                    bindings::storage_image_2d(
                        GridBuffers::CELL_FORMAT,
                        wgpu::StorageTextureAccess::ReadOnly,
                    ),
                ),
                bindings::compute_entry(
                    2,
                    bindings::storage_image_2d(
                        GridBuffers::CELL_FORMAT,
                        wgpu::StorageTextureAccess::WriteOnly,
                    ),
                ),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("life pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("life pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("life bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.dims().binding_resource(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(buffers.input_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(buffers.output_view()),
                },
            ],
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ConfigurationError::KernelValidation(error.to_string()));
        }

        Ok(Self {
            pipeline,
            bind_group,
        })
    }

    pub fn pipeline(&self) -> &wgpu::ComputePipeline {
        &self.pipeline
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
