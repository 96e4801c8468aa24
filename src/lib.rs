// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time wgpu demo scene: a lit sphere over a ground plane, viewed by
//! an auto-rotating orbit camera, with a nav bar overlay.
//!
//! At startup the sphere scales in from nothing while the nav bar slides
//! down from above the output. Both are tweens on an
//! [`animation::Timeline`].
//!
//! # Key entry points
//!
//! - [`engine::Stage`] - the application context: scene, camera, controls,
//!   nav bar, intro and renderer
//! - [`renderer::SceneRenderer`] - the drawing seam, implemented on the
//!   GPU by [`renderer::GpuRenderer`]
//! - [`engine::frame`] - per-refresh driving and a fixed-step fallback loop
//! - [`options::Options`] - runtime configuration (camera, controls, scene,
//!   lighting, display, intro, keybindings) with TOML presets
//!
//! # Architecture
//!
//! Each refresh steps the [`camera::OrbitController`], advances the intro
//! timeline and draws. The GPU renderer rasterizes the scene into a
//! supersampled HDR buffer sized by the pixel ratio, filters it down to the
//! output and composites the nav bar on top.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod nav;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
pub mod viewport;

pub use engine::Stage;
pub use error::StageError;
pub use input::{InputEvent, KeyAction, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
