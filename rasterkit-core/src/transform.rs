/// Affine transform operations and their composition into one matrix
use nalgebra::{Matrix4, Point3, Vector3};

/// A single named affine operation. Rotation angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(f64, f64, f64),
    Scale(f64, f64, f64),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
}

impl TransformOp {
    /// Elementary matrix for this operation
    pub fn matrix(&self) -> Matrix4<f64> {
        match *self {
            TransformOp::Translate(x, y, z) => Transform::translation_matrix(x, y, z),
            TransformOp::Scale(x, y, z) => Transform::scale_matrix(x, y, z),
            TransformOp::RotateX(deg) => Transform::rotation_x(deg),
            TransformOp::RotateY(deg) => Transform::rotation_y(deg),
            TransformOp::RotateZ(deg) => Transform::rotation_z(deg),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about +X by `degrees`, right-handed
    pub fn rotation_x(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(degrees.to_radians(), 0.0, 0.0))
    }

    /// Rotation about +Y by `degrees`, right-handed
    pub fn rotation_y(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(0.0, degrees.to_radians(), 0.0))
    }

    /// Rotation about +Z by `degrees`, right-handed
    pub fn rotation_z(degrees: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, degrees.to_radians()))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Apply a composed matrix to a point
    pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
        matrix.transform_point(point)
    }

    /// Apply a composed matrix to a direction, ignoring translation
    pub fn apply_vector(matrix: &Matrix4<f64>, vector: &Vector3<f64>) -> Vector3<f64> {
        matrix.transform_vector(vector)
    }
}

/// Compose `ops` into a single matrix.
///
/// The first op is applied to a point first: each op matrix is multiplied
/// on the left of the running product, starting from the identity.
pub fn compute_transformation(ops: &[TransformOp]) -> Matrix4<f64> {
    ops.iter()
        .fold(Matrix4::identity(), |result, op| op.matrix() * result)
}
