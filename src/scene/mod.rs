//! Scene graph: the single ownership root for meshes and lights.
//!
//! Adding an object moves it into the [`Scene`] and returns a [`NodeId`].
//! Geometry and material are fixed once added; only a node's
//! [`Transform`] can be changed afterwards. Nodes are never removed.

/// Demo scene construction from options.
pub mod assembly;
/// Parametric shapes and tessellation.
pub mod geometry;
/// Point and ambient lights.
pub mod light;
/// Surface materials.
pub mod material;
/// Node transforms.
pub mod transform;

pub use assembly::DemoScene;
pub use geometry::{Geometry, MeshData, Vertex};
pub use light::{AmbientLight, Light, PointLight};
pub use material::{Material, Side};
pub use transform::Transform;

/// Handle to a node inside the [`Scene`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index, stable for the lifetime of the scene.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A drawable shape with a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    geometry: Geometry,
    material: Material,
}

impl Mesh {
    /// Pair a shape with a material.
    #[must_use]
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    /// The mesh's shape.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The mesh's surface.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// Anything that can live in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// Drawable mesh.
    Mesh(Mesh),
    /// Light source.
    Light(Light),
}

impl From<Mesh> for SceneObject {
    fn from(mesh: Mesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Light> for SceneObject {
    fn from(light: Light) -> Self {
        Self::Light(light)
    }
}

impl From<PointLight> for SceneObject {
    fn from(light: PointLight) -> Self {
        Self::Light(light.into())
    }
}

impl From<AmbientLight> for SceneObject {
    fn from(light: AmbientLight) -> Self {
        Self::Light(light.into())
    }
}

/// An object plus its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    object: SceneObject,
    /// Mutable placement of the node.
    pub transform: Transform,
}

impl Node {
    /// The owned object.
    #[must_use]
    pub fn object(&self) -> &SceneObject {
        &self.object
    }
}

/// Owns every mesh and light that gets drawn.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an object into the scene with an identity transform.
    pub fn add(&mut self, object: impl Into<SceneObject>) -> NodeId {
        self.add_with_transform(object, Transform::IDENTITY)
    }

    /// Move an object into the scene at the given transform.
    pub fn add_with_transform(
        &mut self,
        object: impl Into<SceneObject>,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let object = object.into();
        log::debug!("scene: added node {} ({})", id.0, kind_name(&object));
        self.nodes.push(Node { object, transform });
        id
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// A node's transform.
    #[must_use]
    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|n| &n.transform)
    }

    /// Mutable access to a node's transform.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0 as usize).map(|n| &mut n.transform)
    }

    /// Every mesh with its id and transform, in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Mesh, &Transform)> {
        self.iter().filter_map(|(id, node)| match &node.object {
            SceneObject::Mesh(mesh) => Some((id, mesh, &node.transform)),
            SceneObject::Light(_) => None,
        })
    }

    /// Every light with its transform, in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = (&Light, &Transform)> {
        self.nodes.iter().filter_map(|node| match &node.object {
            SceneObject::Light(light) => Some((light, &node.transform)),
            SceneObject::Mesh(_) => None,
        })
    }

    /// Every node with its id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn kind_name(object: &SceneObject) -> &'static str {
    match object {
        SceneObject::Mesh(mesh) => match mesh.geometry {
            Geometry::Sphere { .. } => "sphere mesh",
            Geometry::Plane { .. } => "plane mesh",
        },
        SceneObject::Light(Light::Point(_)) => "point light",
        SceneObject::Light(Light::Ambient(_)) => "ambient light",
    }
}
