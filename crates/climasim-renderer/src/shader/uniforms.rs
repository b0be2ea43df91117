//! CPU staging copy of a program's uniform block.

use tracing::trace;

use super::reflect::{UniformKind, UniformLayout};
use crate::sphere::matrix::Mat4;

/// Staging bytes for the uniform block, written through typed setters.
///
/// Setting a name the block doesn't declare, or with the wrong kind, is a
/// no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    layout: UniformLayout,
    data: Vec<u8>,
}

impl UniformBlock {
    pub fn new(layout: UniformLayout) -> Self {
        let data = vec![0; layout.size as usize];
        Self { layout, data }
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Current staging bytes, laid out exactly as the shader expects.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn has(&self, name: &str) -> bool {
        self.layout.slot(name).is_some()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformKind::Float, bytemuck::bytes_of(&value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformKind::Int, bytemuck::bytes_of(&value));
    }

    pub fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.write(name, UniformKind::Vec2, bytemuck::cast_slice(&value));
    }

    pub fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.write(name, UniformKind::Vec3, bytemuck::cast_slice(&value));
    }

    pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.write(name, UniformKind::Vec4, bytemuck::cast_slice(&value));
    }

    pub fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.write(name, UniformKind::Mat4, bytemuck::cast_slice(value));
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.layout.read_float(&self.data, name)
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.layout.read_int(&self.data, name)
    }

    pub fn vec3(&self, name: &str) -> Option<[f32; 3]> {
        self.layout.read_vec3(&self.data, name)
    }

    fn write(&mut self, name: &str, kind: UniformKind, bytes: &[u8]) {
        let Some(slot) = self.layout.slot(name) else {
            trace!("uniform '{name}' not in block, ignoring");
            return;
        };
        if slot.kind != kind {
            trace!("uniform '{name}' is {:?}, not {kind:?}, ignoring", slot.kind);
            return;
        }

        let start = slot.offset as usize;
        if let Some(dst) = self.data.get_mut(start..start + bytes.len()) {
            dst.copy_from_slice(bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::reflect_uniform_block;
    use crate::sphere::matrix;

    fn block() -> UniformBlock {
        let module = naga::front::wgsl::parse_str(
            "struct P {
                mvp: mat4x4<f32>,
                color: vec3<f32>,
                level: f32,
                pass_index: i32,
            }
            @group(0) @binding(0) var<uniform> p: P;",
        )
        .unwrap();
        UniformBlock::new(reflect_uniform_block(&module).unwrap().unwrap())
    }

    #[test]
    fn setters_write_at_reflected_offsets() {
        let mut block = block();
        block.set_float("level", 0.75);
        block.set_int("pass_index", 1);
        block.set_vec3("color", [0.1, 0.2, 0.3]);
        assert_eq!(block.float("level"), Some(0.75));
        assert_eq!(block.int("pass_index"), Some(1));
        assert_eq!(block.vec3("color"), Some([0.1, 0.2, 0.3]));
    }

    #[test]
    fn mat4_is_column_major() {
        let mut block = block();
        block.set_mat4("mvp", &matrix::translate(1.0, 2.0, 3.0));
        let bytes = block.bytes();
        let x = f32::from_le_bytes(bytes[48..52].try_into().unwrap());
        assert_eq!(x, 1.0);
    }

    #[test]
    fn unknown_name_is_noop() {
        let mut block = block();
        let before = block.bytes().to_vec();
        block.set_float("does_not_exist", 9.0);
        assert_eq!(block.bytes(), &before[..]);
        assert!(!block.has("does_not_exist"));
    }

    #[test]
    fn wrong_kind_is_noop() {
        let mut block = block();
        block.set_float("pass_index", 3.0);
        block.set_vec2("color", [1.0, 1.0]);
        assert_eq!(block.int("pass_index"), Some(0));
        assert_eq!(block.vec3("color"), Some([0.0; 3]));
    }
}
