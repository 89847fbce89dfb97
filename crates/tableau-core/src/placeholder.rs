use crate::geometry::{generate_box, generate_cylinder, generate_plane};
use crate::scene::{Material, Node, SceneModel, SceneSlot};
use glam::{Mat4, Vec3};

// Chair leg positions relative to the scene origin
const CHAIR_LEGS: [[f32; 3]; 4] = [
    [0.25, 0.225, -0.7],
    [-0.25, 0.225, -0.7],
    [0.25, 0.225, -1.1],
    [-0.25, 0.225, -1.1],
];

/// Build the primitive stand-in tableau: table, chair, glass and floor.
pub fn build_placeholder() -> SceneModel {
    let mut model = SceneModel::default();

    let table = push(
        &mut model,
        Node::mesh(
            "Table",
            None,
            Mat4::from_translation(Vec3::new(0.0, 0.8, 0.0)),
            generate_box(2.0, 0.1, 1.0),
            Material::standard(0x5c3a21, 0.7, 0.1),
        ),
    );
    model.objects.set(SceneSlot::Table, table);

    let chair = push(&mut model, Node::group("Chair", None, Mat4::IDENTITY));
    model.objects.set(SceneSlot::Chair, chair);
    let wood = Material::standard(0x3c2a12, 0.8, 0.05);
    push(
        &mut model,
        Node::mesh(
            "ChairSeat",
            Some(chair),
            Mat4::from_translation(Vec3::new(0.0, 0.45, -0.9)),
            generate_box(0.6, 0.1, 0.6),
            wood,
        ),
    );
    push(
        &mut model,
        Node::mesh(
            "ChairBack",
            Some(chair),
            Mat4::from_translation(Vec3::new(0.0, 0.8, -1.15)),
            generate_box(0.6, 0.6, 0.1),
            wood,
        ),
    );
    let leg_material = Material::standard(0x2c1a08, 0.8, 0.1);
    for (i, [x, y, z]) in CHAIR_LEGS.into_iter().enumerate() {
        push(
            &mut model,
            Node::mesh(
                format!("ChairLeg{}", i),
                Some(chair),
                Mat4::from_translation(Vec3::new(x, y, z)),
                generate_box(0.05, 0.45, 0.05),
                leg_material,
            ),
        );
    }

    let glass = push(
        &mut model,
        Node::mesh(
            "Glass",
            None,
            Mat4::from_translation(Vec3::new(0.5, 0.95, 0.0)),
            generate_cylinder(0.1, 0.1, 0.2, 16),
            Material {
                roughness: 0.0,
                metalness: 0.0,
                transmission: 0.9,
                ior: 1.5,
                opacity: 0.5,
                ..Material::default()
            },
        ),
    );
    model.objects.set(SceneSlot::Glass, glass);

    let mut floor = Node::mesh(
        "floor",
        None,
        Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        generate_plane(20.0, 20.0),
        Material::black_glass(),
    );
    floor.cast_shadow = false;
    let floor = push(&mut model, floor);
    model.objects.set(SceneSlot::Floor, floor);

    model
}

fn push(model: &mut SceneModel, node: Node) -> usize {
    model.nodes.push(node);
    model.nodes.len() - 1
}
