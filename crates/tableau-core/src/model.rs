//! glTF binary (`.glb`) parsing into a flattened [`SceneModel`].
//!
//! Plain primitives are read directly. Primitives using
//! `KHR_draco_mesh_compression` are returned as [`DracoRequest`]s: the web
//! front end hands the compressed bytes to the decoder and feeds the decoded
//! stream back through [`apply_decoded`].

use crate::error::LoadError;
use crate::geometry::{compute_normals, MeshData, Vertex};
use crate::scene::{is_floor_mesh, slot_for_node_name, Material, Node, SceneModel, SceneSlot};
use glam::Mat4;
use gltf::buffer::Source;
use gltf::mesh::{Mode, Semantic};
use gltf::Gltf;

const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentType {
    F32,
    U32,
    U16,
    I16,
    U8,
    I8,
}

impl ComponentType {
    pub fn size_in_bytes(self) -> usize {
        match self {
            ComponentType::F32 | ComponentType::U32 => 4,
            ComponentType::U16 | ComponentType::I16 => 2,
            ComponentType::U8 | ComponentType::I8 => 1,
        }
    }
}

impl From<gltf::accessor::DataType> for ComponentType {
    fn from(ty: gltf::accessor::DataType) -> Self {
        use gltf::accessor::DataType;
        match ty {
            DataType::F32 => ComponentType::F32,
            DataType::U32 => ComponentType::U32,
            DataType::U16 => ComponentType::U16,
            DataType::I16 => ComponentType::I16,
            DataType::U8 => ComponentType::U8,
            DataType::I8 => ComponentType::I8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DracoAttribute {
    pub kind: AttributeKind,
    pub dimensions: u32,
    pub component: ComponentType,
}

/// A compressed primitive waiting for the decoder. Attributes are listed in
/// Draco attribute-id order, which is also the order of the decoded stream.
#[derive(Clone, Debug)]
pub struct DracoRequest {
    pub node: usize,
    pub bytes: Vec<u8>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub attributes: Vec<DracoAttribute>,
}

#[derive(Clone, Debug, Default)]
pub struct ParsedModel {
    pub model: SceneModel,
    pub draco: Vec<DracoRequest>,
}

impl ParsedModel {
    /// Finish a parse once every Draco request has been applied.
    pub fn into_model(self) -> Result<SceneModel, LoadError> {
        if self.model.mesh_count() == 0 {
            return Err(LoadError::Empty);
        }
        Ok(self.model)
    }
}

/// Parse a `.glb` byte slice. Only the default (or first) scene is walked.
pub fn parse_glb(bytes: &[u8]) -> Result<ParsedModel, LoadError> {
    // Validation rejects files that list Draco under extensionsRequired.
    let gltf = Gltf::from_slice_without_validation(bytes)?;
    let buffers = resolve_buffers(&gltf)?;

    let scene = gltf.default_scene().or_else(|| gltf.scenes().next());
    let roots: Vec<gltf::scene::Node> = match scene {
        Some(scene) => scene.nodes().collect(),
        None => {
            let children: Vec<usize> = gltf
                .nodes()
                .flat_map(|n| n.children().map(|c| c.index()).collect::<Vec<_>>())
                .collect();
            gltf.nodes()
                .filter(|n| !children.contains(&n.index()))
                .collect()
        }
    };

    let mut out = ParsedModel::default();
    for node in &roots {
        visit(&gltf, node, None, Mat4::IDENTITY, &buffers, &mut out)?;
    }
    if out.model.mesh_count() == 0 && out.draco.is_empty() {
        return Err(LoadError::Empty);
    }
    log::info!(
        "[model] parsed nodes={} meshes={} draco={} slots={}",
        out.model.nodes.len(),
        out.model.mesh_count(),
        out.draco.len(),
        out.model.objects.len()
    );
    Ok(out)
}

fn resolve_buffers(gltf: &Gltf) -> Result<Vec<&[u8]>, LoadError> {
    gltf.buffers()
        .map(|b| match b.source() {
            Source::Bin => Ok(gltf.blob.as_deref().unwrap_or(&[])),
            Source::Uri(uri) => Err(LoadError::ExternalBuffer {
                index: b.index(),
                uri: uri.to_string(),
            }),
        })
        .collect()
}

fn visit(
    doc: &gltf::Document,
    node: &gltf::scene::Node,
    parent: Option<usize>,
    parent_world: Mat4,
    buffers: &[&[u8]],
    out: &mut ParsedModel,
) -> Result<(), LoadError> {
    let world = parent_world * Mat4::from_cols_array_2d(&node.transform().matrix());
    let name = node.name().unwrap_or_default().to_string();

    let index = match node.mesh() {
        Some(mesh) if mesh.primitives().len() == 1 => {
            let parent_name = parent.map(|p| out.model.nodes[p].name.clone());
            let prim = mesh.primitives().next().ok_or(LoadError::Empty)?;
            push_primitive(
                doc,
                &prim,
                name.clone(),
                parent,
                parent_name.as_deref(),
                world,
                buffers,
                out,
            )?
        }
        Some(mesh) => {
            let group = push_node(out, Node::group(name.clone(), parent, world));
            for (i, prim) in mesh.primitives().enumerate() {
                push_primitive(
                    doc,
                    &prim,
                    format!("{}_{}", name, i),
                    Some(group),
                    Some(name.as_str()),
                    world,
                    buffers,
                    out,
                )?;
            }
            group
        }
        None => push_node(out, Node::group(name.clone(), parent, world)),
    };

    if let Some(slot) = slot_for_node_name(&name) {
        out.model.objects.set(slot, index);
    }
    for child in node.children() {
        visit(doc, &child, Some(index), world, buffers, out)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn push_primitive(
    doc: &gltf::Document,
    prim: &gltf::mesh::Primitive,
    name: String,
    parent: Option<usize>,
    parent_name: Option<&str>,
    world: Mat4,
    buffers: &[&[u8]],
    out: &mut ParsedModel,
) -> Result<usize, LoadError> {
    let floor = is_floor_mesh(&name, parent_name);
    let material = if floor {
        Material::black_glass()
    } else {
        material_from(&prim.material())
    };
    let mut node = Node::mesh(name, parent, world, MeshData::default(), material);
    node.mesh = None;

    if prim.mode() != Mode::Triangles {
        log::debug!("[model] skipping {:?} primitive on {}", prim.mode(), node.name);
        return Ok(push_node(out, node));
    }

    if let Some(request) = draco_request(doc, buffers, prim)? {
        let index = push_node(out, node);
        out.draco.push(DracoRequest { node: index, ..request });
        if floor {
            out.model.objects.set(SceneSlot::Floor, index);
        }
        return Ok(index);
    }

    node.mesh = read_primitive(prim, buffers);
    let index = push_node(out, node);
    if floor {
        out.model.objects.set(SceneSlot::Floor, index);
    }
    Ok(index)
}

fn push_node(out: &mut ParsedModel, node: Node) -> usize {
    out.model.nodes.push(node);
    out.model.nodes.len() - 1
}

fn material_from(m: &gltf::material::Material) -> Material {
    let pbr = m.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    Material {
        base_color: [r, g, b],
        roughness: pbr.roughness_factor(),
        metalness: pbr.metallic_factor(),
        opacity: match m.alpha_mode() {
            gltf::material::AlphaMode::Blend => a,
            _ => 1.0,
        },
        transmission: m
            .transmission()
            .map(|t| t.transmission_factor())
            .unwrap_or(0.0),
        ior: m.ior().unwrap_or(1.5),
        clearcoat: 0.0,
    }
}

fn read_primitive(prim: &gltf::mesh::Primitive, buffers: &[&[u8]]) -> Option<MeshData> {
    let reader = prim.reader(|b| buffers.get(b.index()).copied());
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|it| it.collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(it) => it.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let has_normals = normals.as_ref().is_some_and(|n| n.len() == positions.len());
    let mut mesh = MeshData {
        vertices: positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Vertex {
                pos,
                nrm: normals
                    .as_ref()
                    .and_then(|n| n.get(i).copied())
                    .unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect(),
        indices,
    };
    if !has_normals {
        compute_normals(&mut mesh);
    }
    (!mesh.is_empty()).then_some(mesh)
}

fn draco_request(
    doc: &gltf::Document,
    buffers: &[&[u8]],
    prim: &gltf::mesh::Primitive,
) -> Result<Option<DracoRequest>, LoadError> {
    let Some(ext) = prim.extension_value(DRACO_EXTENSION) else {
        return Ok(None);
    };
    let malformed = |what: &str| LoadError::DracoExtension(what.to_string());
    let obj = ext.as_object().ok_or_else(|| malformed("extension is not an object"))?;
    let view_index = obj
        .get("bufferView")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| malformed("bufferView missing"))? as usize;
    let attr_map = obj
        .get("attributes")
        .and_then(|v| v.as_object())
        .ok_or_else(|| malformed("attributes missing"))?;

    let view = doc
        .views()
        .nth(view_index)
        .ok_or_else(|| malformed("bufferView index out of range"))?;
    let data = buffers
        .get(view.buffer().index())
        .ok_or_else(|| malformed("buffer index out of range"))?;
    let bytes = data
        .get(view.offset()..view.offset() + view.length())
        .ok_or_else(|| malformed("bufferView exceeds buffer"))?
        .to_vec();

    let vertex_count = prim
        .get(&Semantic::Positions)
        .ok_or_else(|| malformed("POSITION accessor missing"))?
        .count() as u32;
    let index_count = prim.indices().map(|a| a.count() as u32).unwrap_or(0);

    let mut mapped: Vec<(u64, DracoAttribute)> = Vec::new();
    for (key, id) in attr_map.iter() {
        let Some(id) = id.as_u64() else { continue };
        let (semantic, kind) = match key.as_str() {
            "POSITION" => (Semantic::Positions, AttributeKind::Position),
            "NORMAL" => (Semantic::Normals, AttributeKind::Normal),
            s if s.starts_with("TEXCOORD_") => {
                let set: u32 = s[9..].parse().unwrap_or(0);
                (Semantic::TexCoords(set), AttributeKind::Other)
            }
            _ => continue,
        };
        let acc = prim
            .get(&semantic)
            .ok_or_else(|| malformed("accessor for mapped attribute missing"))?;
        mapped.push((
            id,
            DracoAttribute {
                kind,
                dimensions: acc.dimensions().multiplicity() as u32,
                component: acc.data_type().into(),
            },
        ));
    }
    mapped.sort_by_key(|(id, _)| *id);

    Ok(Some(DracoRequest {
        node: 0,
        bytes,
        vertex_count,
        index_count,
        attributes: mapped.into_iter().map(|(_, a)| a).collect(),
    }))
}

/// Install a decoded Draco stream (indices first, then attributes in request
/// order) as the mesh of the requesting node.
pub fn apply_decoded(
    model: &mut SceneModel,
    request: &DracoRequest,
    decoded: &[u8],
) -> Result<(), LoadError> {
    let short = |what: &str| LoadError::DracoDecode(format!("decoded stream too short for {}", what));
    let vertex_count = request.vertex_count as usize;
    let index_count = request.index_count as usize;
    let mut off = 0usize;

    let mut indices: Vec<u32> = Vec::with_capacity(index_count);
    if index_count > 0 {
        let wide = request.index_count > u16::MAX as u32;
        let width = if wide { 4 } else { 2 };
        let slice = decoded
            .get(off..off + index_count * width)
            .ok_or_else(|| short("indices"))?;
        off += index_count * width;
        if wide {
            indices.extend(
                slice
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
            );
        } else {
            indices.extend(
                slice
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]) as u32),
            );
        }
    } else {
        indices.extend(0..request.vertex_count);
    }

    let mut positions: Option<Vec<[f32; 3]>> = None;
    let mut normals: Option<Vec<[f32; 3]>> = None;
    for attr in &request.attributes {
        let dim = attr.dimensions as usize;
        let len = dim * vertex_count * attr.component.size_in_bytes();
        let slice = decoded.get(off..off + len).ok_or_else(|| short("attribute"))?;
        off += len;
        if attr.component != ComponentType::F32 || dim < 2 {
            continue;
        }
        let read: Vec<[f32; 3]> = slice
            .chunks_exact(4 * dim)
            .map(|c| {
                let f = |i: usize| f32::from_le_bytes([c[i], c[i + 1], c[i + 2], c[i + 3]]);
                [f(0), f(4), if dim > 2 { f(8) } else { 0.0 }]
            })
            .collect();
        match attr.kind {
            AttributeKind::Position => positions = Some(read),
            AttributeKind::Normal => normals = Some(read),
            AttributeKind::Other => {}
        }
    }

    let positions =
        positions.ok_or_else(|| LoadError::DracoDecode("decoded POSITION missing".into()))?;
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(LoadError::DracoDecode(format!(
            "index {} out of range for {} vertices",
            bad,
            positions.len()
        )));
    }
    let has_normals = normals.as_ref().is_some_and(|n| n.len() == positions.len());
    let mut mesh = MeshData {
        vertices: positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Vertex {
                pos,
                nrm: normals
                    .as_ref()
                    .and_then(|n| n.get(i).copied())
                    .unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect(),
        indices,
    };
    if !has_normals {
        compute_normals(&mut mesh);
    }

    let node = model
        .nodes
        .get_mut(request.node)
        .ok_or_else(|| LoadError::DracoDecode(format!("node {} missing", request.node)))?;
    node.mesh = Some(mesh);
    Ok(())
}
