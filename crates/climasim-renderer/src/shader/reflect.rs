//! Uniform block reflection from a validated naga module.

use std::collections::BTreeMap;

use naga::{AddressSpace, ScalarKind, TypeInner, VectorSize};

/// Value kinds the typed setters can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl UniformKind {
    /// Bytes written for one value of this kind.
    pub fn size(self) -> u32 {
        match self {
            UniformKind::Float | UniformKind::Int => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 => 12,
            UniformKind::Vec4 => 16,
            UniformKind::Mat4 => 64,
        }
    }
}

/// Where one named member lives in the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlot {
    pub offset: u32,
    pub kind: UniformKind,
}

/// Byte layout of the uniform block at group 0, binding 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformLayout {
    /// Total size including trailing padding.
    pub size: u32,
    pub slots: BTreeMap<String, UniformSlot>,
}

impl UniformLayout {
    pub fn slot(&self, name: &str) -> Option<UniformSlot> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read a float member out of a snapshot of this block.
    pub fn read_float(&self, data: &[u8], name: &str) -> Option<f32> {
        let slot = self.slot(name).filter(|s| s.kind == UniformKind::Float)?;
        read_word(data, slot.offset).map(f32::from_le_bytes)
    }

    /// Read an int member out of a snapshot of this block.
    pub fn read_int(&self, data: &[u8], name: &str) -> Option<i32> {
        let slot = self.slot(name).filter(|s| s.kind == UniformKind::Int)?;
        read_word(data, slot.offset).map(i32::from_le_bytes)
    }

    /// Read a vec3 member out of a snapshot of this block.
    pub fn read_vec3(&self, data: &[u8], name: &str) -> Option<[f32; 3]> {
        let slot = self.slot(name).filter(|s| s.kind == UniformKind::Vec3)?;
        let mut out = [0.0; 3];
        for (i, value) in out.iter_mut().enumerate() {
            *value = f32::from_le_bytes(read_word(data, slot.offset + 4 * i as u32)?);
        }
        Some(out)
    }
}

fn read_word(data: &[u8], offset: u32) -> Option<[u8; 4]> {
    let start = offset as usize;
    data.get(start..start + 4)?.try_into().ok()
}

/// Reflect the uniform block at group 0, binding 0.
///
/// Returns `Ok(None)` when the module declares no such block, and an error
/// naming the member when the block holds a type no setter can write.
pub fn reflect_uniform_block(module: &naga::Module) -> Result<Option<UniformLayout>, String> {
    let block = module.global_variables.iter().find(|(_, var)| {
        var.space == AddressSpace::Uniform
            && var
                .binding
                .as_ref()
                .is_some_and(|b| b.group == 0 && b.binding == 0)
    });
    let Some((_, var)) = block else {
        return Ok(None);
    };

    let TypeInner::Struct { members, span } = &module.types[var.ty].inner else {
        return Err("uniform block at group 0 binding 0 is not a struct".into());
    };

    let mut slots = BTreeMap::new();
    for member in members {
        let name = member.name.clone().unwrap_or_default();
        let kind = uniform_kind(&module.types[member.ty].inner)
            .ok_or_else(|| format!("uniform member '{name}' has an unsupported type"))?;
        slots.insert(
            name,
            UniformSlot {
                offset: member.offset,
                kind,
            },
        );
    }

    Ok(Some(UniformLayout { size: *span, slots }))
}

fn uniform_kind(inner: &TypeInner) -> Option<UniformKind> {
    match *inner {
        TypeInner::Scalar(scalar) if scalar.width == 4 => match scalar.kind {
            ScalarKind::Float => Some(UniformKind::Float),
            ScalarKind::Sint => Some(UniformKind::Int),
            _ => None,
        },
        TypeInner::Vector { size, scalar }
            if scalar.kind == ScalarKind::Float && scalar.width == 4 =>
        {
            match size {
                VectorSize::Bi => Some(UniformKind::Vec2),
                VectorSize::Tri => Some(UniformKind::Vec3),
                VectorSize::Quad => Some(UniformKind::Vec4),
            }
        }
        TypeInner::Matrix {
            columns: VectorSize::Quad,
            rows: VectorSize::Quad,
            scalar,
        } if scalar.kind == ScalarKind::Float => Some(UniformKind::Mat4),
        _ => None,
    }
}

/// Number of sampled textures bound at group 1.
pub fn reflect_texture_count(module: &naga::Module) -> u32 {
    module
        .global_variables
        .iter()
        .filter(|(_, var)| {
            var.binding.as_ref().is_some_and(|b| b.group == 1)
                && matches!(module.types[var.ty].inner, TypeInner::Image { .. })
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> naga::Module {
        naga::front::wgsl::parse_str(src).unwrap()
    }

    const BLOCK: &str = "
        struct Params {
            transform: mat4x4<f32>,
            tint: vec3<f32>,
            strength: f32,
            offset: vec2<f32>,
            mode: i32,
        }
        @group(0) @binding(0) var<uniform> params: Params;
        @group(1) @binding(0) var base_texture: texture_2d<f32>;
        @group(1) @binding(1) var base_sampler: sampler;
    ";

    #[test]
    fn reflects_offsets_and_kinds() {
        let layout = reflect_uniform_block(&parse(BLOCK)).unwrap().unwrap();
        assert_eq!(layout.len(), 5);
        assert_eq!(
            layout.slot("transform"),
            Some(UniformSlot {
                offset: 0,
                kind: UniformKind::Mat4
            })
        );
        assert_eq!(layout.slot("tint").unwrap().offset, 64);
        assert_eq!(layout.slot("strength").unwrap().offset, 76);
        assert_eq!(layout.slot("offset").unwrap().kind, UniformKind::Vec2);
        assert_eq!(layout.slot("mode").unwrap().kind, UniformKind::Int);
        assert_eq!(layout.size % 16, 0);
    }

    #[test]
    fn missing_block_is_none() {
        let module = parse("@group(1) @binding(0) var t: texture_2d<f32>;");
        assert!(reflect_uniform_block(&module).unwrap().is_none());
    }

    #[test]
    fn unsupported_member_is_error() {
        let module = parse(
            "struct P { flags: u32 }
             @group(0) @binding(0) var<uniform> p: P;",
        );
        let err = reflect_uniform_block(&module).unwrap_err();
        assert!(err.contains("flags"));
    }

    #[test]
    fn counts_group_one_textures() {
        assert_eq!(reflect_texture_count(&parse(BLOCK)), 1);
    }

    #[test]
    fn read_back_from_snapshot() {
        let layout = reflect_uniform_block(&parse(BLOCK)).unwrap().unwrap();
        let mut data = vec![0u8; layout.size as usize];
        data[76..80].copy_from_slice(&2.5f32.to_le_bytes());
        assert_eq!(layout.read_float(&data, "strength"), Some(2.5));
        assert_eq!(layout.read_float(&data, "mode"), None);
        assert_eq!(layout.read_int(&data, "mode"), Some(0));
    }
}
