use crate::error::GpuError;
use spincube_common::SurfaceExtent;
use std::sync::Arc;
use winit::window::Window;

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode. `AutoVsync` lets presentation pace frames.
    pub present_mode: wgpu::PresentMode,

    /// Compositing alpha mode; falls back to the first supported mode.
    pub alpha_mode: wgpu::CompositeAlphaMode,

    pub power_preference: wgpu::PowerPreference,

    /// Frames the presentation engine may queue before `acquire` blocks.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            power_preference: wgpu::PowerPreference::HighPerformance,
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Owns the adapter, device and queue for the lifetime of the process.
pub struct GpuContext {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuContext {
    /// Create a context and a configured presentation surface for `window`.
    pub async fn for_window(
        window: Arc<Window>,
        extent: SurfaceExtent,
        init: &GpuInit,
    ) -> Result<(Self, SurfaceTarget), GpuError> {
        let instance = new_instance();
        let surface = instance.create_surface(window)?;
        let ctx = Self::request(&instance, Some(&surface), init).await?;
        let target = SurfaceTarget::configure(&ctx, surface, extent, init)?;
        Ok((ctx, target))
    }

    /// Create a context with no surface, for offscreen work and probing.
    pub async fn headless() -> Result<Self, GpuError> {
        let instance = new_instance();
        Self::request(&instance, None, &GpuInit::default()).await
    }

    async fn request(
        instance: &wgpu::Instance,
        surface: Option<&wgpu::Surface<'static>>,
        init: &GpuInit,
    ) -> Result<Self, GpuError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("spincube_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let info = adapter.get_info();
        tracing::info!(
            "GPU initialized: {} ({} backend)",
            info.name,
            info.backend.to_str()
        );

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

fn new_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory; stop the loop.
    Fatal,
}

/// The window surface and its active configuration.
pub struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl SurfaceTarget {
    fn configure(
        ctx: &GpuContext,
        surface: wgpu::Surface<'static>,
        extent: SurfaceExtent,
        init: &GpuInit,
    ) -> Result<Self, GpuError> {
        let caps = surface.get_capabilities(&ctx.adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: extent.width,
            height: extent.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&ctx.device, &config);
        tracing::debug!(?format, ?alpha_mode, ?extent, "surface configured");

        Ok(Self { surface, config })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn extent(&self) -> SurfaceExtent {
        SurfaceExtent::new(self.config.width, self.config.height)
    }

    pub fn resize(&mut self, ctx: &GpuContext, extent: SurfaceExtent) {
        self.config.width = extent.width;
        self.config.height = extent.height;
        self.surface.configure(&ctx.device, &self.config);
    }

    /// Acquire the texture to draw this frame into.
    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn handle_error(&self, ctx: &GpuContext, err: &wgpu::SurfaceError) -> SurfaceErrorAction {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.surface.configure(&ctx.device, &self.config);
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            _ => SurfaceErrorAction::SkipFrame,
        }
    }
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = formats.first().copied()?;
    if prefer_srgb {
        if let Some(srgb) = formats.iter().find(|f| f.is_srgb()) {
            return Some(*srgb);
        }
    }
    Some(first)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    preferred: wgpu::CompositeAlphaMode,
) -> wgpu::CompositeAlphaMode {
    if supported.contains(&preferred) {
        preferred
    } else {
        supported
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}
