use glam::{Mat3, Mat4, Quat, Vec3};

/// Position, rotation and scale of a scene node.
///
/// The only per-node state that changes after assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space translation.
    pub position: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform translated to `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }

    /// Inverse-transpose of the upper 3×3 for transforming normals.
    ///
    /// A collapsed scale (any axis at zero, e.g. the first frame of a
    /// scale-in) has no inverse; the rotation alone is used then, since the
    /// node covers no pixels anyway.
    #[must_use]
    pub fn normal_matrix(&self) -> Mat3 {
        let linear = Mat3::from_mat4(self.matrix());
        if linear.determinant().abs() <= f32::EPSILON {
            return Mat3::from_quat(self.rotation);
        }
        linear.inverse().transpose()
    }
}
