use std::sync::Arc;

use winit::window::Window;

use crate::render::ClearColor;

use super::surface;
use super::{
    Bundle, ConfigRequest, GpuFrame, GpuInit, GraphicsBackend, ResourceError,
    SurfaceErrorAction, SurfaceSize,
};

/// Graphics backend over wgpu.
///
/// Mapping onto the abstract handles:
/// - display: `wgpu::Instance`
/// - config: selected adapter plus the channel-precision request
/// - surface: `wgpu::Surface` with its configuration
/// - context: logical device and queue
/// - bind: configuring the surface against the device
pub struct WgpuBackend {
    init: GpuInit,
}

impl WgpuBackend {
    pub fn new(init: GpuInit) -> Self {
        Self { init }
    }
}

pub struct WgpuConfig {
    adapter: wgpu::Adapter,
    min_channel_bits: u8,
}

pub struct WgpuSurface {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    configured: bool,
}

impl WgpuSurface {
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

pub struct WgpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsBackend for WgpuBackend {
    type Window = Arc<Window>;
    type Display = wgpu::Instance;
    type Config = WgpuConfig;
    type Surface = WgpuSurface;
    type Context = WgpuContext;
    type Frame = GpuFrame;

    fn open_display(&mut self) -> Result<Self::Display, ResourceError> {
        Ok(wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        }))
    }

    fn choose_config(
        &mut self,
        display: &Self::Display,
        request: &ConfigRequest,
    ) -> Result<Self::Config, ResourceError> {
        let adapter = pollster::block_on(display.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: self.init.power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| ResourceError::Config(e.to_string()))?;

        let info = adapter.get_info();
        log::debug!("adapter: {} ({:?})", info.name, info.backend);

        Ok(WgpuConfig {
            adapter,
            min_channel_bits: request.min_channel_bits,
        })
    }

    fn create_surface(
        &mut self,
        display: &Self::Display,
        config: &Self::Config,
        window: &Self::Window,
    ) -> Result<Self::Surface, ResourceError> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(ResourceError::Surface("window has zero size".into()));
        }

        let surface = display
            .create_surface(Arc::clone(window))
            .map_err(|e| ResourceError::Surface(e.to_string()))?;

        if !config.adapter.is_surface_supported(&surface) {
            return Err(ResourceError::Surface(
                "selected adapter cannot present to this window".into(),
            ));
        }

        let caps = surface.get_capabilities(&config.adapter);
        if !surface::is_presentable(&caps) {
            return Err(ResourceError::Surface(
                "adapter reports no formats or present modes for this window".into(),
            ));
        }
        let format = surface::choose_surface_format(
            &caps.formats,
            self.init.prefer_srgb,
            config.min_channel_bits,
        )
        .ok_or_else(|| {
            ResourceError::Config(format!(
                "no surface format with {} bits per channel",
                config.min_channel_bits
            ))
        })?;

        let present_mode = if caps.present_modes.contains(&self.init.present_mode) {
            self.init.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps, self.init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        Ok(WgpuSurface {
            window: Arc::clone(window),
            surface,
            config: surface_config,
            configured: false,
        })
    }

    fn create_context(
        &mut self,
        _display: &Self::Display,
        config: &Self::Config,
    ) -> Result<Self::Context, ResourceError> {
        let (device, queue) = pollster::block_on(config.adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("million-engine device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(config.adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            },
        ))
        .map_err(|e| ResourceError::Context(e.to_string()))?;

        Ok(WgpuContext { device, queue })
    }

    fn make_current(
        &mut self,
        _display: &Self::Display,
        surface: &mut Self::Surface,
        context: &Self::Context,
    ) -> bool {
        if surface.config.width == 0 || surface.config.height == 0 {
            return false;
        }
        surface.surface.configure(&context.device, &surface.config);
        surface.configured = true;
        true
    }

    fn query_size(&self, _display: &Self::Display, surface: &Self::Surface) -> SurfaceSize {
        SurfaceSize::new(surface.config.width, surface.config.height)
    }

    fn resize_surface(
        &mut self,
        surface: &mut Self::Surface,
        context: &Self::Context,
        size: SurfaceSize,
    ) -> SurfaceSize {
        let WgpuSurface { surface: s, config, .. } = surface;
        if !surface::apply_resize(s, &context.device, config, size) {
            log::debug!("ignoring resize to empty surface");
        }
        SurfaceSize::new(config.width, config.height)
    }

    fn unbind(&mut self, _display: &Self::Display, surface: &mut Self::Surface) {
        surface.configured = false;
    }

    fn destroy_context(&mut self, _display: &Self::Display, context: Self::Context) {
        context.device.destroy();
    }

    fn destroy_surface(&mut self, _display: &Self::Display, surface: Self::Surface) {
        drop(surface);
    }

    fn close_display(&mut self, display: Self::Display) {
        drop(display);
    }

    fn begin_frame(&mut self, bundle: &mut Bundle<Self>) -> Option<Self::Frame> {
        let surface = &bundle.surface;
        if !surface.configured {
            return None;
        }

        let surface_texture = match surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => {
                let msg = err.to_string();
                let action = surface::map_surface_error(
                    &surface.surface,
                    &bundle.context.device,
                    &surface.config,
                    err,
                );
                match action {
                    SurfaceErrorAction::Fatal => log::warn!("surface error: {msg}; dropping frame"),
                    _ => log::debug!("surface error: {msg} ({action:?})"),
                }
                return None;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = bundle
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("million frame encoder"),
            });

        Some(GpuFrame {
            surface_texture,
            view,
            encoder,
            format: surface.config.format,
        })
    }

    fn clear(&mut self, _bundle: &Bundle<Self>, frame: &mut Self::Frame, color: ClearColor) {
        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("million clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: color.r as f64,
                        g: color.g as f64,
                        b: color.b as f64,
                        a: color.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn present(&mut self, bundle: &Bundle<Self>, frame: Self::Frame) {
        let GpuFrame { surface_texture, view, encoder, .. } = frame;
        bundle
            .context
            .queue
            .submit(std::iter::once(encoder.finish()));
        drop(view);
        bundle.surface.window.pre_present_notify();
        surface_texture.present();
    }
}
