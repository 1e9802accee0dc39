use std::collections::BTreeMap;

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::math::AABB;

/// Default crease angle for outlines: anything sharper than this is an edge.
pub const EDGE_THRESHOLD_DEGREES: f32 = 1.0;

/// Position + orientation of a scene node
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Place a node at `position` with its local +Z axis turned toward `target`.
    ///
    /// World +Y is the reference up. When the direction is parallel to it the
    /// local X axis falls back to world +X. A zero-length direction keeps the
    /// identity orientation.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let direction = target - position;
        if direction.length_squared() <= f32::EPSILON * f32::EPSILON {
            return Self::from_translation(position);
        }

        let z = direction.normalize();
        let x = Vec3::Y.cross(z).try_normalize().unwrap_or(Vec3::X);
        let y = z.cross(x);

        Self {
            translation: position,
            rotation: Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }
}

/// Indexed triangle mesh. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        Self { positions, indices }
    }

    /// Axis-aligned box centred at the origin: `width` along X, `height`
    /// along Y, `depth` along Z. Faces wind counter-clockwise seen from outside.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let positions = (0..8u32)
            .map(|i| {
                Vec3::new(
                    if i & 1 != 0 { half.x } else { -half.x },
                    if i & 2 != 0 { half.y } else { -half.y },
                    if i & 4 != 0 { half.z } else { -half.z },
                )
            })
            .collect();

        const FACES: [[u32; 4]; 6] = [
            [1, 3, 7, 5], // +X
            [0, 4, 6, 2], // -X
            [2, 6, 7, 3], // +Y
            [0, 1, 5, 4], // -Y
            [4, 5, 7, 6], // +Z
            [0, 2, 3, 1], // -Z
        ];
        let indices = FACES
            .iter()
            .flat_map(|&[a, b, c, d]| [a, b, c, a, c, d])
            .collect();

        Self::new(positions, indices)
    }

    /// Quadrilateral split into `(0,1,2)` and `(0,2,3)`. Planarity and
    /// winding are taken as given.
    pub fn quad(corners: [Vec3; 4]) -> Self {
        Self::new(corners.to_vec(), vec![0, 1, 2, 0, 2, 3])
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(&self.positions)
    }

    /// Line segments along the creases and borders of the mesh.
    ///
    /// Two triangles sharing an edge produce a segment when their normals
    /// differ by more than `threshold_degrees`; an edge owned by a single
    /// triangle always does. Vertices are merged by position, so meshes with
    /// unshared corners outline the same way as indexed ones.
    pub fn edges(&self, threshold_degrees: f32) -> EdgeGeometry {
        let threshold_dot = threshold_degrees.to_radians().cos();
        let mut open: BTreeMap<(VertexKey, VertexKey), (Vec3, [Vec3; 2])> = BTreeMap::new();
        let mut segments = Vec::new();

        for tri in self.triangles() {
            let keys = tri.map(VertexKey::of);
            if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
                continue;
            }

            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();

            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                let key = if keys[i] < keys[j] {
                    (keys[i], keys[j])
                } else {
                    (keys[j], keys[i])
                };

                match open.remove(&key) {
                    Some((other_normal, segment)) => {
                        if normal.dot(other_normal) <= threshold_dot {
                            segments.push(segment);
                        }
                    }
                    None => {
                        open.insert(key, (normal, [tri[i], tri[j]]));
                    }
                }
            }
        }

        segments.extend(open.into_values().map(|(_, segment)| segment));
        EdgeGeometry { segments }
    }
}

/// Position quantized to 1e-4 units, used to weld vertices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct VertexKey(i64, i64, i64);

impl VertexKey {
    fn of(p: Vec3) -> Self {
        const PRECISION: f32 = 1e4;
        Self(
            (p.x * PRECISION).round() as i64,
            (p.y * PRECISION).round() as i64,
            (p.z * PRECISION).round() as i64,
        )
    }
}

/// Edges-only view of a [`Geometry`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeGeometry {
    segments: Vec<[Vec3; 2]>,
}

impl EdgeGeometry {
    pub fn from_segments(segments: Vec<[Vec3; 2]>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[[Vec3; 2]] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
