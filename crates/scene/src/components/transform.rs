use foundation::math::{SceneOffset, Vec3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::zero(),
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self { position }
    }

    pub fn at_offset(offset: SceneOffset) -> Self {
        Self::translate(offset.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::{SceneOffset, Vec3};

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn offset_axes_carry_over() {
        let transform = Transform::at_offset(SceneOffset::ground(12.5, -3.0));
        assert_eq!(transform.position, Vec3::new(12.5, 0.0, -3.0));
    }
}
