//! Window-system input translation.

pub mod winit;
