use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::StageError;

/// Shared WGSL modules, in dependency order. Import path is declared in
/// each file with `#define_import_path`.
const MODULES: &[(&str, &str)] = &[
    (
        "modules/fullscreen.wgsl",
        include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
    ),
    (
        "modules/camera.wgsl",
        include_str!("../../assets/shaders/modules/camera.wgsl"),
    ),
    (
        "modules/lighting.wgsl",
        include_str!("../../assets/shaders/modules/lighting.wgsl"),
    ),
];

/// Entry-point shaders, keyed by path under `assets/shaders/`.
const SHADERS: &[(&str, &str)] = &[
    (
        "raster/mesh.wgsl",
        include_str!("../../assets/shaders/raster/mesh.wgsl"),
    ),
    (
        "screen/blit.wgsl",
        include_str!("../../assets/shaders/screen/blit.wgsl"),
    ),
    (
        "screen/nav_overlay.wgsl",
        include_str!("../../assets/shaders/screen/nav_overlay.wgsl"),
    ),
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared modules are registered at construction. Entry-point shaders are
/// embedded and looked up by path; consuming shaders use
/// `#import sphere_stage::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    pub fn new() -> Result<Self, StageError> {
        let mut composer = Composer::default();
        for (file_path, source) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| shader_error(file_path, &e))?;
        }
        Ok(Self { composer })
    }

    /// Compose the embedded shader at `file_path` into a
    /// `wgpu::ShaderModule` ready for pipeline creation.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, StageError> {
        let source = embedded_source(file_path)?;
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without a GPU device.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, StageError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| shader_error(file_path, &e))
    }
}

fn embedded_source(file_path: &str) -> Result<&'static str, StageError> {
    SHADERS
        .iter()
        .find(|(path, _)| *path == file_path)
        .map(|(_, source)| *source)
        .ok_or_else(|| StageError::Shader(format!("unknown shader '{file_path}'")))
}

fn shader_error(file_path: &str, e: &ComposerError) -> StageError {
    StageError::Shader(format!("'{file_path}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (file_path, source) in SHADERS {
            let module = composer
                .compose_naga(source, file_path)
                .unwrap_or_else(|e| panic!("{e}"));
            assert!(
                module.entry_points.iter().any(|ep| ep.name == "vs_main"),
                "{file_path} has no vertex entry"
            );
            assert!(
                module.entry_points.iter().any(|ep| ep.name == "fs_main"),
                "{file_path} has no fragment entry"
            );
        }
    }

    #[test]
    fn unknown_shader_is_an_error() {
        let err = embedded_source("screen/missing.wgsl").unwrap_err();
        assert!(err.to_string().contains("missing.wgsl"));
    }

    #[test]
    fn broken_import_reports_path() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("#import sphere_stage::nope\n", "broken.wgsl")
            .unwrap_err();
        assert!(err.to_string().contains("broken.wgsl"));
    }
}
