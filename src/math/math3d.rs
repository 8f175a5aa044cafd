/// 3D Math library
///
/// Vector and matrix operations with f64 precision, plus a CPU model of the
/// host's push/pop transform stack.

use crate::engine::types::Vec3D;

/// 3×3 rotation matrix.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

// ─── Vector operations ───────────────────────────────────────

#[inline(always)]
pub fn vec3d_add(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
}

#[inline(always)]
pub fn vec3d_scale(v: &Vec3D, s: f64) -> Vec3D {
    Vec3D {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

// ─── Matrix operations ───────────────────────────────────────

/// Multiply matrix × vector: result = M * v
#[inline]
pub fn mat3_mul_vec(m: &Matrix3, v: &Vec3D) -> Vec3D {
    Vec3D {
        x: m.m[0][0] * v.x + m.m[0][1] * v.y + m.m[0][2] * v.z,
        y: m.m[1][0] * v.x + m.m[1][1] * v.y + m.m[1][2] * v.z,
        z: m.m[2][0] * v.x + m.m[2][1] * v.y + m.m[2][2] * v.z,
    }
}

/// Multiply two 3×3 matrices: result = A * B
pub fn mat3_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = Matrix3::default();
    for i in 0..3 {
        for j in 0..3 {
            result.m[i][j] = a.m[i][0] * b.m[0][j]
                           + a.m[i][1] * b.m[1][j]
                           + a.m[i][2] * b.m[2][j];
        }
    }
    result
}

/// Build identity matrix
pub fn mat3_identity() -> Matrix3 {
    Matrix3 {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    }
}

/// Rotation about the vertical (Y) axis, right-handed, angle in radians.
pub fn mat3_rotation_y(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    Matrix3 {
        m: [
            [c, 0.0, s],
            [0.0, 1.0, 0.0],
            [-s, 0.0, c],
        ],
    }
}

// ─── Transform stack ─────────────────────────────────────────

/// Affine transform: rotation followed by translation.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub rotation: Matrix3,
    pub translation: Vec3D,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            rotation: mat3_identity(),
            translation: Vec3D::ORIGIN,
        }
    }
}

impl Transform {
    /// Map a point from local space into the space this transform is relative to.
    #[inline]
    pub fn apply(&self, p: &Vec3D) -> Vec3D {
        vec3d_add(&mat3_mul_vec(&self.rotation, p), &self.translation)
    }
}

/// Mirror of the host's immediate-mode matrix stack.
///
/// Translations and rotations compose onto the current transform in local
/// space, the same way successive `translate`/`rotateY` calls do on the host.
/// The root entry can never be popped.
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Transform::default(),
            saved: Vec::new(),
        }
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn current(&self) -> &Transform {
        &self.current
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved state. Returns false on underflow, leaving the
    /// current transform untouched.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(t) => {
                self.current = t;
                true
            }
            None => {
                tracing::warn!("transform stack underflow: pop without matching push");
                false
            }
        }
    }

    pub fn translate(&mut self, offset: &Vec3D) {
        let world = mat3_mul_vec(&self.current.rotation, offset);
        self.current.translation = vec3d_add(&self.current.translation, &world);
    }

    pub fn rotate_y(&mut self, angle: f64) {
        self.current.rotation = mat3_mul(&self.current.rotation, &mat3_rotation_y(angle));
    }

    /// Current transform applied to a local point.
    pub fn apply(&self, p: &Vec3D) -> Vec3D {
        self.current.apply(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_mat3_identity() {
        let i = mat3_identity();
        let v = Vec3D { x: 1.0, y: 2.0, z: 3.0 };
        let r = mat3_mul_vec(&i, &v);
        assert!((r.x - 1.0).abs() < 1e-10);
        assert!((r.y - 2.0).abs() < 1e-10);
        assert!((r.z - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let m = mat3_rotation_y(FRAC_PI_2);
        let r = mat3_mul_vec(&m, &Vec3D::new(1.0, 0.0, 0.0));
        assert!(r.x.abs() < 1e-10);
        assert!(r.y.abs() < 1e-10);
        assert!((r.z + 1.0).abs() < 1e-10);

        // Y is the rotation axis
        let up = mat3_mul_vec(&m, &Vec3D::new(0.0, 5.0, 0.0));
        assert!((up.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_rotations_compose_additively() {
        let a = mat3_mul(&mat3_rotation_y(0.3), &mat3_rotation_y(0.4));
        let b = mat3_rotation_y(0.7);
        for i in 0..3 {
            for j in 0..3 {
                assert!((a.m[i][j] - b.m[i][j]).abs() < 1e-12,
                    "Mismatch at [{i}][{j}]: {} vs {}", a.m[i][j], b.m[i][j]);
            }
        }
    }

    #[test]
    fn test_stack_push_pop_restores() {
        let mut stack = TransformStack::new();
        stack.rotate_y(0.5);
        let before = *stack.current();

        stack.push();
        stack.translate(&Vec3D::new(10.0, 20.0, 30.0));
        assert_eq!(stack.depth(), 1);
        assert!(stack.pop());

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current().rotation, before.rotation);
        assert_eq!(stack.current().translation, before.translation);
    }

    #[test]
    fn test_stack_pop_underflow_is_noop() {
        let mut stack = TransformStack::new();
        stack.translate(&Vec3D::new(1.0, 0.0, 0.0));
        assert!(!stack.pop());
        assert_eq!(stack.current().translation, Vec3D::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_translate_after_rotation_is_local() {
        let mut stack = TransformStack::new();
        stack.rotate_y(FRAC_PI_2);
        stack.translate(&Vec3D::new(100.0, 0.0, 0.0));
        let p = stack.apply(&Vec3D::ORIGIN);
        assert!(p.x.abs() < 1e-9);
        assert!((p.z + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vec3d_scale_add() {
        let v = vec3d_add(&Vec3D::new(1.0, 1.0, 1.0), &vec3d_scale(&Vec3D::new(1.0, -1.0, 0.0), 100.0));
        assert_eq!(v, Vec3D::new(101.0, -99.0, 1.0));
    }
}
