//! Double-buffered grid textures
//!
//! Owns the two device-side cell images plus the small uniform buffer carrying
//! the grid dimensions. WebGPU storage textures have no 8-bit single-channel
//! format, so cells are `R32Uint` texels holding the intensity in the low
//! byte; the host-side [`Grid`] stays a byte field.

use crate::gpu::readback;
use crate::gpu::uniform::UniformBuffer;
use crate::grid::Grid;

/// The `{N, N}` pair the kernel reads at binding 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
}

/// Input/output cell textures plus the dimension uniform for one
/// configuration. Input and output always share dimensions N×N.
pub struct GridBuffers {
    input: wgpu::Texture,
    output: wgpu::Texture,
    input_view: wgpu::TextureView,
    output_view: wgpu::TextureView,
    dims: UniformBuffer<GridDims>,
    size: u32,
}

impl GridBuffers {
    /// Texel format for both cell textures.
    pub const CELL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R32Uint;

    /// Allocates and seeds the device resources from `initial`.
    ///
    /// Seeds a dead output grid, merges the initial pattern into it cell by
    /// cell, re-derives the input bytes from the merged output, and uploads
    /// both textures plus the `{N, N}` uniform. Returns the merged host grid
    /// alongside the buffers: that merge is the only place the initial
    /// pattern enters the GPU pipeline, and it guarantees the first readback
    /// shows the pattern rather than garbage.
    pub fn initialize(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        initial: &Grid,
    ) -> (Self, Grid) {
        let size = initial.size();

        let mut merged = Grid::new(size);
        merged.merge_from(initial);

        let input = create_cell_texture(device, size, "life input grid");
        let output = create_cell_texture(device, size, "life output grid");
        readback::upload_cells(queue, &input, merged.as_bytes(), size);
        readback::upload_cells(queue, &output, merged.as_bytes(), size);

        let dims = UniformBuffer::new_with_data(
            device,
            &GridDims {
                width: size,
                height: size,
            },
        );

        let input_view = input.create_view(&wgpu::TextureViewDescriptor::default());
        let output_view = output.create_view(&wgpu::TextureViewDescriptor::default());

        let buffers = Self {
            input,
            output,
            input_view,
            output_view,
            dims,
            size,
        };
        (buffers, merged)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn input(&self) -> &wgpu::Texture {
        &self.input
    }

    pub fn output(&self) -> &wgpu::Texture {
        &self.output
    }

    pub fn input_view(&self) -> &wgpu::TextureView {
        &self.input_view
    }

    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.output_view
    }

    pub fn dims(&self) -> &UniformBuffer<GridDims> {
        &self.dims
    }
}

/// Storage binding for the kernel, partial updates, and copy-out for readback.
fn create_cell_texture(device: &wgpu::Device, size: u32, label: &str) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: GridBuffers::CELL_FORMAT,
        usage: wgpu::TextureUsages::STORAGE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}
