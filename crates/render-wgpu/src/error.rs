/// Errors from GPU bootstrap and resource creation.
///
/// All of these are fatal at startup; there is no fallback rendering path.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("cannot upload an empty buffer")]
    EmptyBuffer,
}
