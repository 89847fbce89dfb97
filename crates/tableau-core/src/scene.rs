//! Scene description shared between the loader and the renderer.
//!
//! The scene is plain data: nodes with world transforms and optional meshes,
//! a light rig and fog. Installing a model bumps `revision` so the renderer
//! knows to re-upload geometry.

use crate::constants::{CAMERA_FAR, FOG_COLOR, FOG_DENSITY, SHADOW_NEAR};
use crate::geometry::MeshData;
use glam::{Mat4, Vec3};

/// Semantic names the presentation cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneSlot {
    Table,
    Chair,
    Glass,
    Floor,
}

impl SceneSlot {
    pub const ALL: [SceneSlot; 4] = [
        SceneSlot::Table,
        SceneSlot::Chair,
        SceneSlot::Glass,
        SceneSlot::Floor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneSlot::Table => "Table",
            SceneSlot::Chair => "Chair",
            SceneSlot::Glass => "Glass",
            SceneSlot::Floor => "floor",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Slot for a loaded node name. Only the exact capitalised or lowercase
/// spellings match, e.g. `Table` and `table` but not `TABLE`.
pub fn slot_for_node_name(name: &str) -> Option<SceneSlot> {
    match name {
        "Table" | "table" => Some(SceneSlot::Table),
        "Chair" | "chair" => Some(SceneSlot::Chair),
        "Glass" | "glass" => Some(SceneSlot::Glass),
        _ => None,
    }
}

/// Floor meshes are matched case-insensitively on their own or their
/// parent's name.
pub fn is_floor_mesh(name: &str, parent_name: Option<&str>) -> bool {
    name.eq_ignore_ascii_case("floor")
        || parent_name.is_some_and(|p| p.eq_ignore_ascii_case("floor"))
}

/// Registry from semantic slot to node index. At most one node per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneObjects {
    slots: [Option<usize>; 4],
}

impl SceneObjects {
    pub fn get(&self, slot: SceneSlot) -> Option<usize> {
        self.slots[slot.index()]
    }

    /// Register `node` for `slot`, replacing any earlier entry.
    pub fn set(&mut self, slot: SceneSlot, node: usize) {
        self.slots[slot.index()] = Some(node);
    }

    pub fn contains(&self, slot: SceneSlot) -> bool {
        self.get(slot).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub transmission: f32,
    pub ior: f32,
    pub clearcoat: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            transmission: 0.0,
            ior: 1.5,
            clearcoat: 0.0,
        }
    }
}

impl Material {
    pub fn standard(hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            base_color: linear_from_hex(hex),
            roughness,
            metalness,
            ..Self::default()
        }
    }

    /// Reflective black glass used for every floor surface.
    pub fn black_glass() -> Self {
        Self {
            base_color: [0.0, 0.0, 0.0],
            roughness: 0.1,
            metalness: 0.2,
            clearcoat: 1.0,
            ..Self::default()
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.transmission > 0.0
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
pub fn linear_from_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
    pub world: Mat4,
    pub mesh: Option<MeshData>,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Node {
    pub fn group(name: impl Into<String>, parent: Option<usize>, world: Mat4) -> Self {
        Self {
            name: name.into(),
            parent,
            world,
            mesh: None,
            material: Material::default(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn mesh(
        name: impl Into<String>,
        parent: Option<usize>,
        world: Mat4,
        mesh: MeshData,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            world,
            mesh: Some(mesh),
            material,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// A model ready to be installed: flattened nodes plus its registry.
#[derive(Clone, Debug, Default)]
pub struct SceneModel {
    pub nodes: Vec<Node>,
    pub objects: SceneObjects,
}

impl SceneModel {
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.mesh.is_some()).count()
    }

    pub fn node(&self, slot: SceneSlot) -> Option<&Node> {
        self.objects.get(slot).and_then(|i| self.nodes.get(i))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Spot {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
        target: Vec3,
        angle: f32,
        penumbra: f32,
        decay: f32,
        distance: f32,
    },
    Directional {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
    },
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
}

/// Warm key spot over the table, cool rim from behind-left, faint ambient.
pub fn tableau_lights() -> Vec<Light> {
    vec![
        Light::Spot {
            color: linear_from_hex(0xFFDCA8),
            intensity: 1.0,
            position: Vec3::new(0.0, 8.0, 0.0),
            target: Vec3::ZERO,
            angle: std::f32::consts::PI / 6.0,
            penumbra: 0.4,
            decay: 2.0,
            distance: 30.0,
        },
        Light::Directional {
            color: linear_from_hex(0xA8D1FF),
            intensity: 0.2,
            position: Vec3::new(-4.0, 2.0, -5.0),
        },
        Light::Ambient {
            color: linear_from_hex(0x333333),
            intensity: 0.1,
        },
    ]
}

/// Perspective light camera covering a spot's cone, for its shadow map.
pub fn spot_view_projection(position: Vec3, target: Vec3, angle: f32, distance: f32) -> Mat4 {
    let dir = (target - position).try_normalize().unwrap_or(Vec3::NEG_Y);
    // straight down makes +Y a degenerate up vector
    let up = if dir.dot(Vec3::Y).abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let far = if distance > 0.0 { distance } else { CAMERA_FAR };
    Mat4::perspective_rh(2.0 * angle, 1.0, SHADOW_NEAR, far) * Mat4::look_at_rh(position, target, up)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub density: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Real,
    Placeholder,
}

pub struct Scene {
    pub background: [f32; 3],
    pub fog: Fog,
    pub nodes: Vec<Node>,
    pub lights: Vec<Light>,
    pub objects: SceneObjects,
    installed: Option<ModelKind>,
    revision: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            fog: Fog {
                color: FOG_COLOR,
                density: FOG_DENSITY,
            },
            nodes: Vec::new(),
            lights: Vec::new(),
            objects: SceneObjects::default(),
            installed: None,
            revision: 0,
        }
    }

    pub fn installed(&self) -> Option<ModelKind> {
        self.installed
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Install a model and the light rig. Only the first install takes
    /// effect; later calls return false and leave the scene untouched.
    pub fn install(&mut self, model: SceneModel, kind: ModelKind) -> bool {
        if self.installed.is_some() {
            log::warn!("[scene] ignoring second {:?} install", kind);
            return false;
        }
        log::info!(
            "[scene] installing {:?} model: nodes={} meshes={} slots={}",
            kind,
            model.nodes.len(),
            model.mesh_count(),
            model.objects.len()
        );
        self.nodes = model.nodes;
        self.objects = model.objects;
        self.lights = tableau_lights();
        self.installed = Some(kind);
        self.revision += 1;
        true
    }

    pub fn node(&self, slot: SceneSlot) -> Option<&Node> {
        self.objects.get(slot).and_then(|i| self.nodes.get(i))
    }

    /// Light-space transform of the shadow-casting spot, if one is installed.
    pub fn spot_shadow_view_proj(&self) -> Option<Mat4> {
        self.lights.iter().find_map(|light| match *light {
            Light::Spot {
                position,
                target,
                angle,
                distance,
                ..
            } => Some(spot_view_projection(position, target, angle, distance)),
            _ => None,
        })
    }
}
