//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, off-screen render targets,
//! bind group helpers, and shader composition.

/// Shared wgpu boilerplate helpers for layouts and screen-space pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Off-screen render-target textures and supersampled sizing.
pub mod texture;
