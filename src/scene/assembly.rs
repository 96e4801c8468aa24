use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use super::{
    AmbientLight, Geometry, Material, Mesh, NodeId, PointLight, Scene, Side,
    Transform,
};
use crate::options::{LightingOptions, SceneOptions};

/// The assembled demo scene and handles to its nodes.
#[derive(Debug, Clone)]
pub struct DemoScene {
    /// Scene owning every node below.
    pub scene: Scene,
    /// The sphere, centered on the origin.
    pub sphere: NodeId,
    /// The ground plane just below the sphere.
    pub plane: NodeId,
    /// The point light.
    pub point_light: NodeId,
    /// The ambient light.
    pub ambient_light: NodeId,
}

impl DemoScene {
    /// Build the sphere, the plane under it and both lights.
    #[must_use]
    pub fn assemble(opts: &SceneOptions, lighting: &LightingOptions) -> Self {
        let mut scene = Scene::new();

        let sphere = scene.add(Mesh::new(
            Geometry::sphere(
                opts.sphere_radius,
                opts.sphere_width_segments,
                opts.sphere_height_segments,
            ),
            Material::standard(opts.sphere_color)
                .with_surface(opts.roughness, opts.metalness),
        ));

        let plane_side = if opts.plane_double_sided {
            Side::Double
        } else {
            Side::Front
        };
        // Plane geometry faces +Z; tip it back so the normal points up.
        let plane = scene.add_with_transform(
            Mesh::new(
                Geometry::plane(opts.plane_width, opts.plane_height),
                Material::standard(opts.plane_color)
                    .with_surface(opts.roughness, opts.metalness)
                    .with_side(plane_side),
            ),
            Transform {
                position: Vec3::new(0.0, -opts.sphere_radius, 0.0),
                rotation: Quat::from_rotation_x(-FRAC_PI_2),
                scale: Vec3::ONE,
            },
        );

        let point_light = scene.add_with_transform(
            PointLight {
                color: lighting.point_color,
                intensity: lighting.point_intensity,
                distance: lighting.point_distance,
                decay: lighting.point_decay,
            },
            Transform::from_position(Vec3::from(lighting.point_position)),
        );
        let ambient_light = scene.add(AmbientLight {
            color: lighting.ambient_color,
            intensity: lighting.ambient_intensity,
        });

        log::info!(
            "assembled scene: {} nodes, sphere radius {}",
            scene.len(),
            opts.sphere_radius
        );

        Self {
            scene,
            sphere,
            plane,
            point_light,
            ambient_light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Light, SceneObject};

    fn demo() -> DemoScene {
        DemoScene::assemble(&SceneOptions::default(), &LightingOptions::default())
    }

    #[test]
    fn plane_sits_at_negative_radius() {
        let d = demo();
        let plane = d.scene.transform(d.plane).unwrap();
        assert_eq!(plane.position.y, -3.0);
    }

    #[test]
    fn plane_tracks_configured_radius() {
        let opts = SceneOptions {
            sphere_radius: 1.25,
            ..SceneOptions::default()
        };
        let d = DemoScene::assemble(&opts, &LightingOptions::default());
        assert_eq!(d.scene.transform(d.plane).unwrap().position.y, -1.25);
    }

    #[test]
    fn plane_normal_points_up() {
        let d = demo();
        let rotation = d.scene.transform(d.plane).unwrap().rotation;
        assert!((rotation * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn plane_is_double_sided_and_sphere_is_not() {
        let d = demo();
        let side = |id| match d.scene.node(id).unwrap().object() {
            SceneObject::Mesh(m) => m.material().side,
            SceneObject::Light(_) => unreachable!(),
        };
        assert_eq!(side(d.plane), Side::Double);
        assert_eq!(side(d.sphere), Side::Front);
    }

    #[test]
    fn every_entity_is_in_the_scene() {
        let d = demo();
        assert_eq!(d.scene.len(), 4);
        assert_eq!(d.scene.meshes().count(), 2);
        let lights: Vec<_> = d.scene.lights().collect();
        assert!(matches!(lights[0].0, Light::Point(_)));
        assert_eq!(lights[0].1.position, Vec3::new(0.0, 10.0, 10.0));
        assert!(matches!(lights[1].0, Light::Ambient(_)));
        assert_eq!(d.scene.transform(d.sphere).unwrap().scale, Vec3::ONE);
    }
}
