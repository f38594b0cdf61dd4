// scene.rs - Scene-graph node types and tree assembly
//
// The document is built fully in memory and handed to the serializer as one
// value, so geometry can be tested structurally instead of by string diff.

/// One affine operation inside a transform block. Order matters: later ops
/// apply in the local frame established by earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Translate([f64; 3]),
    Scale([f64; 3]),
    Rotate { axis: [f64; 3], angle_deg: f64 },
}

/// Applies an ordered op sequence to exactly one child.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNode {
    pub ops: Vec<TransformOp>,
    pub child: Box<SceneNode>,
}

/// Leaf naming a renderable shape with its diffuse color, channels in [0,1].
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveNode {
    pub shape: String,
    pub diffuse: [f64; 3],
}

/// Unordered grouping node, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: Option<String>,
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Transform(TransformNode),
    Tree(TreeNode),
    Primitive(PrimitiveNode),
}

/// Global shading coefficients applied scene-wide.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalData {
    pub diffuse: f64,
    pub specular: f64,
    pub ambient: f64,
}

/// A point light.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub id: u32,
    pub color: [f64; 3],
    pub position: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub pos: [f64; 3],
    pub focus: [f64; 3],
    pub up: [f64; 3],
    pub height_angle: f64,
}

/// The complete scene description handed to the serializer.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDocument {
    pub global: GlobalData,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub root: SceneNode,
}

/// Wrap the per-pixel transform nodes in the fixed scene scaffolding.
///
/// The view rotation (Y first, then X) is applied once by an outer transform
/// block, not per pixel. Lights, camera and shading coefficients are static
/// constants of the system: one light behind the camera, one at the origin,
/// one behind the image, and a camera just off the XY plane looking at the
/// origin.
pub fn assemble(pixel_nodes: Vec<SceneNode>, anglex: f64, angley: f64) -> SceneDocument {
    let inner = SceneNode::Tree(TreeNode {
        name: None,
        children: pixel_nodes,
    });

    let view = SceneNode::Transform(TransformNode {
        ops: vec![
            TransformOp::Rotate { axis: [0.0, 1.0, 0.0], angle_deg: angley },
            TransformOp::Rotate { axis: [1.0, 0.0, 0.0], angle_deg: anglex },
        ],
        child: Box::new(inner),
    });

    let root = SceneNode::Tree(TreeNode {
        name: Some("root".into()),
        children: vec![view],
    });

    SceneDocument {
        global: GlobalData { diffuse: 1.0, specular: 1.0, ambient: 1.0 },
        lights: (0..3)
            .map(|i| Light {
                id: i,
                color: [1.0, 1.0, 1.0],
                position: [0.0, 0.0, 20.0 - 20.0 * i as f64],
            })
            .collect(),
        camera: Camera {
            pos: [0.0, 0.1, 2.0],
            focus: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            height_angle: 45.0,
        },
        root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> SceneNode {
        SceneNode::Primitive(PrimitiveNode {
            shape: "cube".into(),
            diffuse: [1.0, 1.0, 1.0],
        })
    }

    #[test]
    fn fixed_lights_and_camera() {
        let doc = assemble(vec![], 0.0, 0.0);
        assert_eq!(doc.lights.len(), 3);
        let zs: Vec<f64> = doc.lights.iter().map(|l| l.position[2]).collect();
        assert_eq!(zs, vec![20.0, 0.0, -20.0]);
        for (i, l) in doc.lights.iter().enumerate() {
            assert_eq!(l.id, i as u32);
            assert_eq!(l.color, [1.0, 1.0, 1.0]);
        }
        assert_eq!(doc.camera.pos, [0.0, 0.1, 2.0]);
        assert_eq!(doc.camera.focus, [0.0, 0.0, 0.0]);
        assert_eq!(doc.camera.height_angle, 45.0);
        assert_eq!(doc.global.ambient, 1.0);
    }

    #[test]
    fn view_rotations_wrap_pixel_tree_y_then_x() {
        let doc = assemble(vec![leaf(), leaf()], 30.0, -15.0);

        let SceneNode::Tree(root) = &doc.root else { panic!("root not a tree") };
        assert_eq!(root.name.as_deref(), Some("root"));
        assert_eq!(root.children.len(), 1);

        let SceneNode::Transform(view) = &root.children[0] else {
            panic!("view node not a transform")
        };
        assert_eq!(
            view.ops,
            vec![
                TransformOp::Rotate { axis: [0.0, 1.0, 0.0], angle_deg: -15.0 },
                TransformOp::Rotate { axis: [1.0, 0.0, 0.0], angle_deg: 30.0 },
            ]
        );

        let SceneNode::Tree(inner) = view.child.as_ref() else {
            panic!("inner node not a tree")
        };
        assert_eq!(inner.name, None);
        assert_eq!(inner.children.len(), 2);
    }
}
