// Scene registry, placeholder build, procedural geometry and glb parsing.

use tableau_core::constants::*;
use tableau_core::{
    apply_decoded, build_placeholder, generate_box, generate_cylinder, generate_plane,
    is_floor_mesh, parse_glb, slot_for_node_name, spot_view_projection, AttributeKind,
    ComponentType, Cue, DracoAttribute, DracoRequest, Light, LoadError, Material, ModelKind,
    Node, Scene, SceneModel, SceneSlot,
};

#[test]
fn slot_names_match_exact_spellings() {
    assert_eq!(slot_for_node_name("Table"), Some(SceneSlot::Table));
    assert_eq!(slot_for_node_name("table"), Some(SceneSlot::Table));
    assert_eq!(slot_for_node_name("chair"), Some(SceneSlot::Chair));
    assert_eq!(slot_for_node_name("Glass"), Some(SceneSlot::Glass));
    assert_eq!(slot_for_node_name("TABLE"), None);
    assert_eq!(slot_for_node_name("Table.001"), None);
    assert_eq!(slot_for_node_name("floor"), None);

    assert!(is_floor_mesh("FLOOR", None));
    assert!(is_floor_mesh("Plane", Some("Floor")));
    assert!(!is_floor_mesh("Plane", Some("Ground")));
}

#[test]
fn placeholder_fills_every_slot() {
    let model = build_placeholder();
    for slot in SceneSlot::ALL {
        assert!(model.objects.contains(slot), "{:?}", slot);
    }
    // table, seat, back, four legs, glass, floor
    assert_eq!(model.mesh_count(), 9);

    let table = model.node(SceneSlot::Table).unwrap();
    assert_eq!(table.world.w_axis.y, 0.8);
    let chair = model.node(SceneSlot::Chair).unwrap();
    assert!(chair.mesh.is_none());
    let children = model
        .nodes
        .iter()
        .filter(|n| n.parent == model.objects.get(SceneSlot::Chair))
        .count();
    assert_eq!(children, 6);

    let glass = model.node(SceneSlot::Glass).unwrap();
    assert!(glass.material.is_transparent());
    assert_eq!(glass.material.opacity, 0.5);
    assert_eq!(glass.material.transmission, 0.9);

    let floor = model.node(SceneSlot::Floor).unwrap();
    assert_eq!(floor.material, Material::black_glass());
    assert!(!floor.cast_shadow);
    assert!(floor.receive_shadow);
    // rotated plane faces up
    let up = floor.world.transform_vector3(glam::Vec3::Z);
    assert!((up - glam::Vec3::Y).length() < 1e-5);
}

#[test]
fn spot_shadow_camera_frames_table_above_floor() {
    let mut scene = Scene::new();
    assert!(scene.spot_shadow_view_proj().is_none());
    scene.install(build_placeholder(), ModelKind::Placeholder);
    let vp = scene.spot_shadow_view_proj().unwrap();

    let table = vp.project_point3(glam::Vec3::new(0.0, 0.8, 0.0));
    let floor = vp.project_point3(glam::Vec3::ZERO);
    for p in [table, floor] {
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4, "{:?}", p);
        assert!(p.z > 0.0 && p.z < 1.0, "{:?}", p);
    }
    // the table top is nearer the light, so it occludes the floor beneath
    assert!(table.z < floor.z);

    // floor under the chair still falls inside the cone's map
    let chair = vp.project_point3(glam::Vec3::new(0.0, 0.0, 1.2));
    assert!(chair.x.abs() < 1.0 && chair.y.abs() < 1.0);
}

#[test]
fn spot_camera_keeps_a_valid_up_when_aimed_sideways() {
    let vp = spot_view_projection(
        glam::Vec3::new(0.0, 1.0, 5.0),
        glam::Vec3::new(0.0, 1.0, 0.0),
        0.5,
        0.0,
    );
    let p = vp.project_point3(glam::Vec3::new(0.0, 1.0, 0.0));
    assert!(p.is_finite());
    assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
    assert!(p.z > 0.0 && p.z < 1.0);
}

#[test]
fn scene_installs_once_with_lights() {
    let mut scene = Scene::new();
    assert!(scene.lights.is_empty());
    assert_eq!(scene.fog.density, FOG_DENSITY);
    assert!(scene.install(build_placeholder(), ModelKind::Placeholder));
    assert!(!scene.install(SceneModel::default(), ModelKind::Real));
    assert_eq!(scene.installed(), Some(ModelKind::Placeholder));
    assert_eq!(scene.revision(), 1);
    assert_eq!(scene.lights.len(), 3);
    assert!(scene.lights.iter().any(|l| matches!(l, Light::Spot { .. })));
    assert!(scene.node(SceneSlot::Glass).is_some());
}

#[test]
fn primitives_have_expected_shape() {
    let b = generate_box(2.0, 0.1, 1.0);
    assert_eq!(b.vertices.len(), 24);
    assert_eq!(b.triangle_count(), 12);

    let p = generate_plane(20.0, 20.0);
    assert_eq!(p.triangle_count(), 2);
    assert!(p.vertices.iter().all(|v| v.nrm == [0.0, 0.0, 1.0]));

    let c = generate_cylinder(0.1, 0.1, 0.2, 16);
    // sides plus two capped fans
    assert_eq!(c.triangle_count(), 16 * 2 + 16 * 2);
    for v in &c.vertices {
        let n = glam::Vec3::from(v.nrm);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(v.pos[1].abs() <= 0.1 + 1e-6);
    }
    assert!(c
        .indices
        .iter()
        .all(|&i| (i as usize) < c.vertices.len()));
}

#[test]
fn box_winding_faces_outward() {
    let b = generate_box(1.0, 1.0, 1.0);
    for tri in b.indices.chunks_exact(3) {
        let [a, bb, c] = [0, 1, 2].map(|k| glam::Vec3::from(b.vertices[tri[k] as usize].pos));
        let face = (bb - a).cross(c - a).normalize();
        let nrm = glam::Vec3::from(b.vertices[tri[0] as usize].nrm);
        assert!(face.dot(nrm) > 0.99);
    }
}

#[test]
fn cue_table_matches_assets() {
    assert_eq!(Cue::Ambient.spec().path, "/audio/ambient.mp3");
    assert!(Cue::Ambient.spec().looped);
    assert_eq!(Cue::PianoStab.spec().volume, 0.7);
    assert_eq!(Cue::ChairCreak.spec().volume, 0.4);
    assert_eq!(Cue::Whisper.spec().volume, 0.5);
    assert_eq!(Cue::WindChime.spec().path, "/audio/wind_chime.mp3");
    assert_eq!(Cue::ALL.iter().filter(|c| c.spec().looped).count(), 1);
}

fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.to_vec();
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}

fn triangle_bin() -> Vec<u8> {
    let mut bin = Vec::new();
    for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for f in p {
            bin.extend_from_slice(&f.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin
}

const TRIANGLE_JSON: &str = r#"{
  "asset": {"version": "2.0"},
  "scene": 0,
  "scenes": [{"nodes": [0, 1]}],
  "nodes": [
    {"name": "table", "mesh": 0},
    {"name": "Floor", "mesh": 0, "translation": [0, -1, 0]}
  ],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1}]}],
  "buffers": [{"byteLength": 44}],
  "bufferViews": [
    {"buffer": 0, "byteOffset": 0, "byteLength": 36},
    {"buffer": 0, "byteOffset": 36, "byteLength": 6}
  ],
  "accessors": [
    {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
     "min": [0, 0, 0], "max": [1, 1, 0]},
    {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
  ]
}"#;

#[test]
fn parses_glb_into_registry() {
    let parsed = parse_glb(&glb(TRIANGLE_JSON, &triangle_bin())).expect("valid glb");
    assert!(parsed.draco.is_empty());
    let model = parsed.into_model().unwrap();
    assert_eq!(model.mesh_count(), 2);

    let table = model.node(SceneSlot::Table).unwrap();
    let mesh = table.mesh.as_ref().unwrap();
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    // normals derived from the winding
    assert!(mesh.vertices.iter().all(|v| v.nrm == [0.0, 0.0, 1.0]));

    let floor = model.node(SceneSlot::Floor).unwrap();
    assert_eq!(floor.material, Material::black_glass());
    assert_eq!(floor.world.w_axis.y, -1.0);
    assert!(!model.objects.contains(SceneSlot::Chair));
}

#[test]
fn garbage_is_a_parse_error() {
    assert!(matches!(parse_glb(b"definitely not a model"), Err(LoadError::Parse(_))));
}

#[test]
fn model_without_meshes_is_empty() {
    // plain JSON glTF is accepted too; it simply has no binary chunk
    let json = r#"{"asset": {"version": "2.0"}, "nodes": [{"name": "Table"}]}"#;
    assert!(matches!(parse_glb(json.as_bytes()), Err(LoadError::Empty)));
}

fn draco_request(index_count: u32, with_normals: bool) -> DracoRequest {
    let mut attributes = vec![DracoAttribute {
        kind: AttributeKind::Position,
        dimensions: 3,
        component: ComponentType::F32,
    }];
    if with_normals {
        attributes.push(DracoAttribute {
            kind: AttributeKind::Normal,
            dimensions: 3,
            component: ComponentType::F32,
        });
    }
    DracoRequest {
        node: 0,
        bytes: Vec::new(),
        vertex_count: 3,
        index_count,
        attributes,
    }
}

fn one_node_model() -> SceneModel {
    let mut model = SceneModel::default();
    model.nodes.push(Node::group("Glass", None, glam::Mat4::IDENTITY));
    model
}

#[test]
fn decoded_stream_becomes_mesh() {
    let mut stream = Vec::new();
    for i in [0u16, 1, 2] {
        stream.extend_from_slice(&i.to_le_bytes());
    }
    for f in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        stream.extend_from_slice(&f.to_le_bytes());
    }
    for _ in 0..3 {
        for f in [0.0f32, 1.0, 0.0] {
            stream.extend_from_slice(&f.to_le_bytes());
        }
    }

    let mut model = one_node_model();
    apply_decoded(&mut model, &draco_request(3, true), &stream).unwrap();
    let mesh = model.nodes[0].mesh.as_ref().unwrap();
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.vertices[1].pos, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices[2].nrm, [0.0, 1.0, 0.0]);
}

#[test]
fn decoded_stream_errors_are_reported() {
    let mut model = one_node_model();
    // indices only, positions missing
    let short = [0u8, 0, 1, 0, 2, 0];
    assert!(matches!(
        apply_decoded(&mut model, &draco_request(3, false), &short),
        Err(LoadError::DracoDecode(_))
    ));

    let mut stream = Vec::new();
    for i in [0u16, 1, 7] {
        stream.extend_from_slice(&i.to_le_bytes());
    }
    for _ in 0..9 {
        stream.extend_from_slice(&0.5f32.to_le_bytes());
    }
    assert!(matches!(
        apply_decoded(&mut model, &draco_request(3, false), &stream),
        Err(LoadError::DracoDecode(_))
    ));
    assert!(model.nodes[0].mesh.is_none());
}
