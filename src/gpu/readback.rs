//! Blocking texture upload and readback
//!
//! Host cells are single bytes; device texels are `R32Uint`. Upload widens
//! u8 → u32 and readback narrows back, stripping the 256-byte row alignment
//! the copy-out path requires.

use crate::error::{ConfigurationError, Result};

// R32Uint texels.
const TEXEL_BYTES: u32 = 4;

/// Writes `cells` (row-major, `size²` bytes) into a cell texture.
pub fn upload_cells(queue: &wgpu::Queue, texture: &wgpu::Texture, cells: &[u8], size: u32) {
    debug_assert_eq!(cells.len(), (size * size) as usize);

    let texels: Vec<u32> = cells.iter().map(|&c| u32::from(c)).collect();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bytemuck::cast_slice(&texels),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(TEXEL_BYTES * size),
            rows_per_image: Some(size),
        },
        wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
    );
}

/// Reads a cell texture back into `size²` host bytes.
///
/// Blocks until the device has finished all prior submitted work, so the
/// bytes always reflect a settled generation.
pub fn read_cells(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    size: u32,
) -> Result<Vec<u8>> {
    // Rows in the staging buffer are padded out to the copy alignment.
    let unpadded_bytes_per_row = TEXEL_BYTES * size;
    let padded_bytes_per_row = (unpadded_bytes_per_row + wgpu::COPY_BYTES_PER_ROW_ALIGNMENT - 1)
        & !(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT - 1);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("life readback staging"),
        size: u64::from(padded_bytes_per_row) * u64::from(size),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("life readback encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(size),
            },
        },
        wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = futures::channel::oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    // Full synchronize: the prior dispatch and the copy above must both land.
    let _ = device.poll(wgpu::MaintainBase::Wait);

    match futures::executor::block_on(rx) {
        Ok(Ok(())) => {}
        _ => return Err(ConfigurationError::ReadbackFailed),
    }

    let mapped = slice.get_mapped_range();
    let mut cells = Vec::with_capacity((size * size) as usize);
    for row in 0..size {
        let start = (row * padded_bytes_per_row) as usize;
        let row_bytes = &mapped[start..start + unpadded_bytes_per_row as usize];
        let texels: &[u32] = bytemuck::cast_slice(row_bytes);
        cells.extend(texels.iter().map(|&t| t as u8));
    }
    drop(mapped);
    staging.unmap();

    Ok(cells)
}
