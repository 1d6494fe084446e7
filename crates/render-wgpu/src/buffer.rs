use crate::context::GpuContext;
use crate::error::GpuError;

/// Upload `data` into a new GPU buffer of exactly `data.len() * 4` bytes.
///
/// The buffer is mapped at creation, filled, and unmapped before returning,
/// so it is readable by the GPU without any further call.
pub fn create_buffer(
    ctx: &GpuContext,
    label: &str,
    data: &[f32],
    usage: wgpu::BufferUsages,
) -> Result<wgpu::Buffer, GpuError> {
    if data.is_empty() {
        return Err(GpuError::EmptyBuffer);
    }
    let bytes: &[u8] = bytemuck::cast_slice(data);

    let buffer = ctx.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes.len() as wgpu::BufferAddress,
        usage,
        mapped_at_creation: true,
    });
    buffer.slice(..).get_mapped_range_mut().copy_from_slice(bytes);
    buffer.unmap();

    tracing::debug!(label, bytes = bytes.len(), "buffer uploaded");
    Ok(buffer)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn headless() -> Option<GpuContext> {
        match pollster::block_on(GpuContext::headless()) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                eprintln!("skipping GPU test: {e}");
                None
            }
        }
    }

    pub(crate) fn read_back(ctx: &GpuContext, source: &wgpu::Buffer) -> Vec<u8> {
        let size = source.size();
        let staging = ctx.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback_encoder"),
            });
        encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
        ctx.queue().submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = ctx.device().poll(wgpu::Maintain::Wait);
        rx.recv().unwrap().unwrap();

        let bytes = slice.get_mapped_range().to_vec();
        staging.unmap();
        bytes
    }

    fn read_floats(ctx: &GpuContext, source: &wgpu::Buffer) -> Vec<f32> {
        read_back(ctx, source)
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    const READABLE: wgpu::BufferUsages =
        wgpu::BufferUsages::VERTEX.union(wgpu::BufferUsages::COPY_SRC);

    #[test]
    fn empty_data_is_rejected() {
        let Some(ctx) = headless() else { return };
        let err = create_buffer(&ctx, "empty", &[], READABLE).unwrap_err();
        assert!(matches!(err, GpuError::EmptyBuffer));
    }

    #[test]
    fn size_is_four_bytes_per_float() {
        let Some(ctx) = headless() else { return };
        let data = [0.5_f32; 9];
        let buffer = create_buffer(&ctx, "sized", &data, READABLE).unwrap();
        assert_eq!(buffer.size(), 36);
    }

    #[test]
    fn contents_round_trip() {
        let Some(ctx) = headless() else { return };
        let data = [1.0_f32, -2.5, 3.25, 0.0, f32::MAX, f32::MIN_POSITIVE];
        let buffer = create_buffer(&ctx, "round_trip", &data, READABLE).unwrap();
        assert_eq!(read_floats(&ctx, &buffer), data);
    }

    #[test]
    fn repeated_uploads_do_not_alias() {
        let Some(ctx) = headless() else { return };
        let data = [7.0_f32, 8.0, 9.0, 10.0];
        let usage = READABLE | wgpu::BufferUsages::COPY_DST;
        let first = create_buffer(&ctx, "first", &data, usage).unwrap();
        let second = create_buffer(&ctx, "second", &data, usage).unwrap();
        assert_eq!(read_floats(&ctx, &first), read_floats(&ctx, &second));

        ctx.queue()
            .write_buffer(&first, 0, bytemuck::cast_slice(&[0.0_f32; 4]));
        assert_eq!(read_floats(&ctx, &first), [0.0; 4]);
        assert_eq!(read_floats(&ctx, &second), data);
    }
}
