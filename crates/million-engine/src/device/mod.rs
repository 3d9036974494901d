//! Presentation resources.
//!
//! This module is responsible for:
//! - the backend seam (`GraphicsBackend`) and the bound `Bundle`
//! - acquiring/releasing display, surface and context as one unit
//! - the wgpu implementation used on real windows

mod backend;
mod error;
mod frame;
mod gpu;
mod init;
mod manager;
mod surface;

pub use backend::{Bundle, ConfigRequest, GraphicsBackend, SurfaceSize};
pub use error::{ResourceError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::{WgpuBackend, WgpuConfig, WgpuContext, WgpuSurface};
pub use init::GpuInit;
pub use manager::ResourceManager;
