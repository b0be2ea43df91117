//! Sphere mesh generation.
//!
//! Ring `r` sweeps the polar angle from the north pole (r = 0) to the south
//! pole; sector `s` sweeps the azimuth once around, with the last column
//! duplicating the first so the UV seam stays clean. Pole rows keep one
//! vertex per column so each triangle fan gets its own `u`.

use std::f32::consts::PI;

use super::types::{GlobeMesh, GlobeVertex, Mesh, ShellMesh, ShellVertex, SphereLod};

/// Radial displacement as a fraction of the radius per unit of elevation.
const ELEVATION_SCALE: f32 = 0.05;

/// Smallest radius a mesh is built with.
const MIN_RADIUS: f32 = 1e-3;

/// Largest ring or sector count. Keeps every vertex index within `u32`.
pub const MAX_GRID: u32 = 4096;

/// Build the globe surface mesh.
///
/// Vertex count is `(rings + 1) * (sectors + 1)`, index count is
/// `rings * sectors * 6`. Triangles wind counter-clockwise seen from outside.
pub fn build_sphere(rings: u32, sectors: u32, radius: f32) -> GlobeMesh {
    let (rings, sectors) = clamp_grid(rings, sectors);
    let radius = clamp_radius(radius);

    let mut vertices = Vec::with_capacity(vertex_count(rings, sectors));
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=sectors {
            let theta = 2.0 * PI * s as f32 / sectors as f32;
            let normal = direction(phi, theta);
            let tangent = [-theta.sin(), 0.0, theta.cos()];
            let bitangent = cross(normal, tangent);

            let elevation = elevation(phi, theta);
            let scaled = radius * (1.0 + elevation * ELEVATION_SCALE);

            vertices.push(GlobeVertex {
                position: [normal[0] * scaled, normal[1] * scaled, normal[2] * scaled],
                normal,
                uv: [s as f32 / sectors as f32, r as f32 / rings as f32],
                tangent,
                bitangent,
                elevation,
                moisture: moisture(phi),
            });
        }
    }

    Mesh {
        vertices,
        indices: grid_indices(rings, sectors),
    }
}

/// Build the globe surface from a quality preset.
pub fn build_sphere_lod(lod: SphereLod, radius: f32) -> GlobeMesh {
    build_sphere(lod.rings, lod.sectors, radius)
}

/// Build the atmosphere shell: same grid, no displacement, no tangent frame.
pub fn build_atmosphere_shell(rings: u32, sectors: u32, radius: f32) -> ShellMesh {
    let (rings, sectors) = clamp_grid(rings, sectors);
    let radius = clamp_radius(radius);

    let mut vertices = Vec::with_capacity(vertex_count(rings, sectors));
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=sectors {
            let theta = 2.0 * PI * s as f32 / sectors as f32;
            let normal = direction(phi, theta);
            vertices.push(ShellVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                uv: [s as f32 / sectors as f32, r as f32 / rings as f32],
            });
        }
    }

    Mesh {
        vertices,
        indices: grid_indices(rings, sectors),
    }
}

/// Build the atmosphere shell from a quality preset.
pub fn build_atmosphere_shell_lod(lod: SphereLod, radius: f32) -> ShellMesh {
    build_atmosphere_shell(lod.rings, lod.sectors, radius)
}

/// Procedural terrain height in roughly `[-0.075, 0.075]`.
///
/// `phi` is the polar angle, `theta` the azimuth.
pub fn elevation(phi: f32, theta: f32) -> f32 {
    let continental = 0.1 * (theta * 4.0).sin() * (phi * 3.0).cos();
    let ridges = 0.05 * (theta * 12.0).sin() * (phi * 8.0).sin();
    (continental + ridges) * 0.5
}

/// Moisture from the latitude band of polar angle `phi`.
pub fn moisture(phi: f32) -> f32 {
    let lat = (90.0 - phi.to_degrees()).abs();
    if lat < 20.0 {
        0.8
    } else if (lat - 30.0).abs() < 15.0 {
        0.2
    } else if lat > 60.0 {
        0.3
    } else {
        0.5
    }
}

fn clamp_grid(rings: u32, sectors: u32) -> (u32, u32) {
    if rings < 2 || sectors < 2 {
        tracing::warn!(rings, sectors, "sphere grid below 2x2, clamping");
    }
    if rings > MAX_GRID || sectors > MAX_GRID {
        tracing::warn!(rings, sectors, "sphere grid above {MAX_GRID}, clamping");
    }
    (rings.clamp(2, MAX_GRID), sectors.clamp(2, MAX_GRID))
}

fn vertex_count(rings: u32, sectors: u32) -> usize {
    (rings as usize + 1) * (sectors as usize + 1)
}

fn clamp_radius(radius: f32) -> f32 {
    if radius.is_finite() && radius > MIN_RADIUS {
        radius
    } else {
        tracing::warn!(radius, "invalid sphere radius, clamping to {MIN_RADIUS}");
        MIN_RADIUS
    }
}

fn direction(phi: f32, theta: f32) -> [f32; 3] {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn grid_indices(rings: u32, sectors: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(rings as usize * sectors as usize * 6);
    for r in 0..rings {
        for s in 0..sectors {
            let current = r * (sectors + 1) + s;
            let next = current + sectors + 1;
            indices.extend_from_slice(&[current, current + 1, next]);
            indices.extend_from_slice(&[current + 1, next + 1, next]);
        }
    }
    indices
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn length(a: [f32; 3]) -> f32 {
        dot(a, a).sqrt()
    }

    #[test]
    fn vertex_and_index_counts() {
        let mesh = build_sphere(8, 16, 1.0);
        assert_eq!(mesh.vertices.len(), 9 * 17);
        assert_eq!(mesh.indices.len(), 8 * 16 * 6);
        assert_eq!(mesh.triangle_count(), 8 * 16 * 2);
    }

    #[test]
    fn indices_in_bounds() {
        let mesh = build_sphere(12, 24, 1.2);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn frame_vectors_are_unit_and_orthogonal() {
        let mesh = build_sphere(10, 20, 1.2);
        for (i, v) in mesh.vertices.iter().enumerate() {
            assert!((length(v.normal) - 1.0).abs() < 1e-4, "normal {i}");
            assert!((length(v.tangent) - 1.0).abs() < 1e-4, "tangent {i}");
            assert!((length(v.bitangent) - 1.0).abs() < 1e-4, "bitangent {i}");
            assert!(dot(v.normal, v.tangent).abs() < 1e-4, "n.t {i}");
            assert!(dot(v.normal, v.bitangent).abs() < 1e-4, "n.b {i}");
            assert!(dot(v.tangent, v.bitangent).abs() < 1e-4, "t.b {i}");
        }
    }

    #[test]
    fn bitangent_is_normal_cross_tangent() {
        let mesh = build_sphere(6, 12, 1.0);
        for v in &mesh.vertices {
            let expected = cross(v.normal, v.tangent);
            assert!(length(sub(expected, v.bitangent)) < 1e-5);
        }
    }

    #[test]
    fn uv_range_and_monotonicity() {
        let rings = 6;
        let sectors = 12;
        let mesh = build_sphere(rings, sectors, 1.0);
        for r in 0..=rings {
            for s in 0..=sectors {
                let v = &mesh.vertices[(r * (sectors + 1) + s) as usize];
                assert!((0.0..=1.0).contains(&v.uv[0]));
                assert!((0.0..=1.0).contains(&v.uv[1]));
                if s > 0 {
                    let prev = &mesh.vertices[(r * (sectors + 1) + s - 1) as usize];
                    assert!(v.uv[0] > prev.uv[0]);
                }
                if r > 0 {
                    let above = &mesh.vertices[((r - 1) * (sectors + 1) + s) as usize];
                    assert!(v.uv[1] > above.uv[1]);
                }
            }
        }
    }

    #[test]
    fn seam_column_duplicates_first_column() {
        let sectors = 16;
        let mesh = build_sphere(8, sectors, 1.0);
        for r in 0..=8u32 {
            let first = &mesh.vertices[(r * (sectors + 1)) as usize];
            let last = &mesh.vertices[(r * (sectors + 1) + sectors) as usize];
            assert!(length(sub(first.position, last.position)) < 1e-5);
            assert_eq!(first.uv[0], 0.0);
            assert_eq!(last.uv[0], 1.0);
        }
    }

    #[test]
    fn poles_are_at_top_and_bottom() {
        let mesh = build_sphere(4, 8, 1.0);
        assert!((mesh.vertices[0].normal[1] - 1.0).abs() < 1e-6);
        let last = mesh.vertices.last().unwrap();
        assert!((last.normal[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn triangles_face_outward() {
        let mesh = build_sphere(16, 32, 1.2);
        let mut checked = 0;
        for tri in mesh.indices.chunks(3) {
            let a = mesh.vertices[tri[0] as usize].position;
            let b = mesh.vertices[tri[1] as usize].position;
            let c = mesh.vertices[tri[2] as usize].position;
            let n = cross(sub(b, a), sub(c, a));
            // Pole fans have one collapsed edge.
            if length(n) < 1e-7 {
                continue;
            }
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            assert!(dot(n, centroid) > 0.0, "triangle {tri:?} faces inward");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn displacement_stays_within_half_percent() {
        let radius = 1.2;
        let mesh = build_sphere(32, 64, radius);
        for v in &mesh.vertices {
            let r = length(v.position);
            assert!((r - radius).abs() <= radius * 0.005 + 1e-5, "r = {r}");
        }
    }

    #[test]
    fn moisture_bands() {
        assert_eq!(moisture(PI / 2.0), 0.8); // equator
        assert_eq!(moisture((90.0f32 - 30.0).to_radians()), 0.2); // desert belt
        assert_eq!(moisture(0.0), 0.3); // pole
        assert_eq!(moisture((90.0f32 - 50.0).to_radians()), 0.5);
    }

    #[test]
    fn grid_minimum_clamp() {
        let mesh = build_sphere(1, 0, 1.0);
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.indices.len(), 2 * 2 * 6);
    }

    #[test]
    fn grid_maximum_clamp() {
        assert_eq!(clamp_grid(u32::MAX, u32::MAX), (MAX_GRID, MAX_GRID));

        let mesh = build_sphere(u32::MAX, 2, 1.0);
        assert_eq!(mesh.vertices.len(), (MAX_GRID as usize + 1) * 3);
        assert_eq!(mesh.indices.len(), MAX_GRID as usize * 2 * 6);
        let last = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < last));
    }

    #[test]
    fn largest_grid_indices_fit_u32() {
        let vertices = vertex_count(MAX_GRID, MAX_GRID);
        assert!(vertices <= u32::MAX as usize);
        assert!(MAX_GRID as usize * MAX_GRID as usize * 6 <= u32::MAX as usize);
    }

    #[test]
    fn invalid_radius_is_clamped() {
        let mesh = build_atmosphere_shell(4, 4, f32::NAN);
        assert!(mesh.vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
        let mesh = build_atmosphere_shell(4, 4, -3.0);
        assert!(length(mesh.vertices[0].position) > 0.0);
    }

    #[test]
    fn shell_is_undisplaced() {
        let mesh = build_atmosphere_shell(8, 16, 1.35);
        assert_eq!(mesh.vertices.len(), 9 * 17);
        assert_eq!(mesh.indices.len(), 8 * 16 * 6);
        for v in &mesh.vertices {
            assert!((length(v.position) - 1.35).abs() < 1e-5);
        }
    }

    #[test]
    fn lod_builders_match_presets() {
        let mesh = build_atmosphere_shell_lod(SphereLod::LOW, 1.35);
        assert_eq!(mesh.vertices.len(), (33 * 65) as usize);
        let mesh = build_sphere_lod(SphereLod::LOW, 1.2);
        assert_eq!(mesh.indices.len(), (32 * 64 * 6) as usize);
    }
}
