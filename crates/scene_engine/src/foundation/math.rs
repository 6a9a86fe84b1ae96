//! Math utilities and types
//!
//! Provides fundamental math types for scene placement and spatial queries.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
///
/// Composition order is scale, then rotation, then translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from position, Euler rotation (radians) and scale
    pub fn from_euler(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: utils::euler_to_quat(rotation),
            scale,
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from(self.position + self.rotation * self.scale.component_mul(&point.coords))
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Build a rotation from Euler angles in radians (x, y, z)
    pub fn euler_to_quat(euler: Vec3) -> Quat {
        Quat::from_euler_angles(euler.x, euler.y, euler.z)
    }

    /// Fast estimate of a vector's length.
    ///
    /// Uses a single Newton step on a bit-level reciprocal square root guess,
    /// so the result is within a fraction of a percent of the true length.
    pub fn length_estimate(v: &Vec3) -> f32 {
        let sq = v.norm_squared();
        if sq <= 0.0 {
            return 0.0;
        }
        let guess = f32::from_bits(0x5f37_59df - (sq.to_bits() >> 1));
        let inv = guess * (1.5 - 0.5 * sq * guess * guess);
        sq * inv
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a perspective projection matrix (view space looks down +Z)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a view matrix for an eye at `eye` looking along `forward`
    fn look_to(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();

        // P = [1/(a·tan(φ/2))  0              0          0          ]
        //     [0               1/tan(φ/2)     0          0          ]
        //     [0               0              f/(f-n)    -nf/(f-n)  ]
        //     [0               0              1          0          ]
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }

    fn look_to(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
        let forward = forward.normalize();
        let right = up.cross(&forward).normalize();
        let camera_up = forward.cross(&right);

        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            forward.x, forward.y, forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_matrix_matches_point_transform() {
        let transform = Transform::from_euler(
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(0.3, 0.7, -0.2),
            Vec3::new(2.0, 1.0, 0.5),
        );
        let point = Point3::new(0.5, 1.5, -1.0);

        let by_matrix = transform.to_matrix().transform_point(&point);
        let direct = transform.transform_point(point);
        assert_relative_eq!(by_matrix, direct, epsilon = 1e-5);
    }

    #[test]
    fn test_length_estimate_close_to_norm() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(1000.0, 5.0, -20.0),
            Vec3::new(0.001, 0.002, 0.0),
        ] {
            let estimate = utils::length_estimate(&v);
            assert_relative_eq!(estimate, v.norm(), max_relative = 0.005);
        }
        assert_eq!(utils::length_estimate(&Vec3::zeros()), 0.0);
    }

    #[test]
    fn test_look_to_maps_eye_to_origin_and_forward_to_z() {
        let eye = Vec3::new(2.0, 1.0, -4.0);
        let view = Mat4::look_to(eye, Vec3::new(0.0, 0.0, 1.0), Vec3::y());

        let eye_in_view = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(eye_in_view, Point3::origin(), epsilon = 1e-5);

        let ahead = view.transform_point(&Point3::from(eye + Vec3::new(0.0, 0.0, 5.0)));
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_diagonal_terms() {
        let projection = Mat4::perspective(std::f32::consts::FRAC_PI_2, 2.0, 0.1, 100.0);
        assert_relative_eq!(projection[(1, 1)], 1.0, epsilon = 1e-5);
        assert_relative_eq!(projection[(0, 0)], 0.5, epsilon = 1e-5);
    }
}
