use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use std::collections::VecDeque;

/// Trail samples fainter than this are dropped.
const VISIBLE_ALPHA: f32 = 0.01;

#[derive(Clone)]
pub struct MeshRibbonParams {
    pub width: f32,
    pub color: Color,
    /// Opacity lost per frame of age, like repainting the canvas with a
    /// translucent fill every frame
    pub fade_per_frame: f32,
}

impl Default for MeshRibbonParams {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: Color::WHITE,
            fade_per_frame: 0.05,
        }
    }
}

impl MeshRibbonParams {
    /// Number of frames before a sample has faded below visibility.
    pub fn max_points(&self) -> usize {
        let keep = 1.0 - self.fade_per_frame.clamp(0.0, 1.0);
        if keep <= 0.0 {
            return 1;
        }
        if keep >= 1.0 {
            // no fade at all; cap at a long but finite trail
            return 10_000;
        }
        (VISIBLE_ALPHA.ln() / keep.ln()).ceil() as usize
    }

    /// Opacity of a sample `age` frames old.
    pub fn alpha_at(&self, age: usize) -> f32 {
        (1.0 - self.fade_per_frame.clamp(0.0, 1.0)).powi(age as i32)
    }
}

#[derive(Component)]
pub struct MeshRibbon {
    pub params: MeshRibbonParams,
    /// Oldest first
    pub positions: VecDeque<Vec3>,
    pub mesh_handle: Handle<Mesh>,
}

impl MeshRibbon {
    pub fn push(&mut self, position: Vec3) {
        self.positions.push_back(position);
        while self.positions.len() > self.params.max_points() {
            self.positions.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Spawns a mesh-based ribbon entity
pub fn spawn_mesh_ribbon(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    name: String,
    params: MeshRibbonParams,
) -> Entity {
    let mesh_handle = meshes.add(create_empty_ribbon_mesh());

    let material = materials.add(ColorMaterial {
        color: params.color,
        ..default()
    });

    commands.spawn((
        MeshRibbon {
            positions: VecDeque::with_capacity(params.max_points()),
            params,
            mesh_handle: mesh_handle.clone(),
        },
        Mesh2d(mesh_handle),
        MeshMaterial2d(material),
        Transform::from_translation(Vec3::new(0.0, 0.0, -0.1)),
        Name::new(name),
    ))
    .id()
}

/// Creates an empty ribbon mesh
fn create_empty_ribbon_mesh() -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Rebuilds the ribbon mesh from its position history
pub fn update_ribbon_mesh(
    ribbon: &MeshRibbon,
    meshes: &mut Assets<Mesh>,
) {
    let Some(mesh) = meshes.get_mut(&ribbon.mesh_handle) else {
        return;
    };

    let positions = &ribbon.positions;
    let len = positions.len();
    let mut vertices = Vec::with_capacity(len * 2);
    let mut normals = Vec::with_capacity(len * 2);
    let mut uvs = Vec::with_capacity(len * 2);
    let mut colors = Vec::with_capacity(len * 2);
    let mut indices = Vec::with_capacity(len.saturating_sub(1) * 6);

    if len >= 2 {
        let half_width = ribbon.params.width * 0.5;
        let mut perpendicular = Vec3::Y;

        for (i, pos) in positions.iter().enumerate() {
            let age = len - 1 - i;
            let progress = i as f32 / (len - 1) as f32;

            let tangent = if i < len - 1 {
                (positions[i + 1] - *pos).normalize_or_zero()
            } else {
                (*pos - positions[i - 1]).normalize_or_zero()
            };

            // Keep the previous side vector where the bob stood still
            let candidate = Vec3::new(-tangent.y, tangent.x, 0.0);
            if candidate.length_squared() > 0.01 {
                perpendicular = candidate;
            }

            let left = *pos + perpendicular * half_width;
            let right = *pos - perpendicular * half_width;
            vertices.push([left.x, left.y, left.z]);
            vertices.push([right.x, right.y, right.z]);

            // Normals pointing toward camera (for 2D)
            normals.push([0.0, 0.0, 1.0]);
            normals.push([0.0, 0.0, 1.0]);

            uvs.push([0.0, progress]);
            uvs.push([1.0, progress]);

            let alpha = ribbon.params.alpha_at(age);
            colors.push([1.0, 1.0, 1.0, alpha]);
            colors.push([1.0, 1.0, 1.0, alpha]);
        }

        for i in 0..(len - 1) {
            let base = (i * 2) as u32;
            indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
        }
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_length_matches_fade() {
        let params = MeshRibbonParams {
            fade_per_frame: 0.05,
            ..default()
        };
        // 0.95^90 < 0.01 < 0.95^89
        assert_eq!(params.max_points(), 90);
        assert!(params.alpha_at(90) < VISIBLE_ALPHA);
        assert!(params.alpha_at(89) > VISIBLE_ALPHA);
        assert_eq!(params.alpha_at(0), 1.0);
    }

    #[test]
    fn full_fade_keeps_only_latest() {
        let params = MeshRibbonParams {
            fade_per_frame: 1.0,
            ..default()
        };
        assert_eq!(params.max_points(), 1);
    }

    #[test]
    fn push_drops_oldest_positions() {
        let mut ribbon = MeshRibbon {
            params: MeshRibbonParams {
                fade_per_frame: 0.5,
                ..default()
            },
            positions: VecDeque::new(),
            mesh_handle: Handle::default(),
        };
        // 0.5^7 < 0.01, so seven samples survive
        for i in 0..20 {
            ribbon.push(Vec3::new(i as f32, 0.0, 0.0));
        }
        assert_eq!(ribbon.positions.len(), 7);
        assert_eq!(ribbon.positions.front(), Some(&Vec3::new(13.0, 0.0, 0.0)));
        ribbon.clear();
        assert!(ribbon.positions.is_empty());
    }
}
