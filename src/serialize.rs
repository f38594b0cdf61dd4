// serialize.rs - Scene document to tagged text
//
// One pass over the in-memory tree onto any io::Write. Floats are fixed
// 5-decimal, light ids plain integers, indentation four spaces per level.

use std::io::{self, Write};

use crate::scene::{SceneDocument, SceneNode, TransformOp};

const INDENT: &str = "    ";

/// Write the whole document. Nothing is emitted until the tree is fully
/// built, so a failed run never leaves a partial document behind.
pub fn write_scene<W: Write>(out: &mut W, doc: &SceneDocument) -> io::Result<()> {
    writeln!(out, "<scenefile>")?;

    writeln!(out, "{INDENT}<globaldata>")?;
    let g = &doc.global;
    writeln!(out, "{INDENT}{INDENT}<diffusecoeff v=\"{:.5}\"/>", g.diffuse)?;
    writeln!(out, "{INDENT}{INDENT}<specularcoeff v=\"{:.5}\"/>", g.specular)?;
    writeln!(out, "{INDENT}{INDENT}<ambientcoeff v=\"{:.5}\"/>", g.ambient)?;
    writeln!(out, "{INDENT}</globaldata>")?;

    for light in &doc.lights {
        writeln!(out, "{INDENT}<lightdata>")?;
        writeln!(out, "{INDENT}{INDENT}<id v=\"{}\"/>", light.id)?;
        let [r, g, b] = light.color;
        writeln!(
            out,
            "{INDENT}{INDENT}<color r=\"{r:.5}\" g=\"{g:.5}\" b=\"{b:.5}\"/>"
        )?;
        let [x, y, z] = light.position;
        writeln!(
            out,
            "{INDENT}{INDENT}<position x=\"{x:.5}\" y=\"{y:.5}\" z=\"{z:.5}\"/>"
        )?;
        writeln!(out, "{INDENT}</lightdata>")?;
    }

    let cam = &doc.camera;
    writeln!(out, "{INDENT}<cameradata>")?;
    write_vec3(out, 2, "pos", cam.pos)?;
    write_vec3(out, 2, "focus", cam.focus)?;
    write_vec3(out, 2, "up", cam.up)?;
    writeln!(out, "{INDENT}{INDENT}<heightangle v=\"{:.5}\"/>", cam.height_angle)?;
    writeln!(out, "{INDENT}</cameradata>")?;

    write_node(out, 1, &doc.root)?;
    writeln!(out, "</scenefile>")
}

fn write_vec3<W: Write>(out: &mut W, depth: usize, tag: &str, v: [f64; 3]) -> io::Result<()> {
    write_pad(out, depth)?;
    writeln!(out, "<{tag} x=\"{:.5}\" y=\"{:.5}\" z=\"{:.5}\"/>", v[0], v[1], v[2])
}

fn write_pad<W: Write>(out: &mut W, depth: usize) -> io::Result<()> {
    for _ in 0..depth {
        out.write_all(INDENT.as_bytes())?;
    }
    Ok(())
}

fn write_node<W: Write>(out: &mut W, depth: usize, node: &SceneNode) -> io::Result<()> {
    match node {
        SceneNode::Tree(tree) => {
            write_pad(out, depth)?;
            match &tree.name {
                Some(name) => writeln!(out, "<object type=\"tree\" name=\"{name}\">")?,
                None => writeln!(out, "<object type=\"tree\">")?,
            }
            for child in &tree.children {
                write_node(out, depth + 1, child)?;
            }
            write_pad(out, depth)?;
            writeln!(out, "</object>")
        }
        SceneNode::Transform(t) => {
            write_pad(out, depth)?;
            writeln!(out, "<transblock>")?;
            for op in &t.ops {
                write_op(out, depth + 1, op)?;
            }
            write_node(out, depth + 1, &t.child)?;
            write_pad(out, depth)?;
            writeln!(out, "</transblock>")
        }
        SceneNode::Primitive(p) => {
            write_pad(out, depth)?;
            writeln!(out, "<object type=\"primitive\" name=\"{}\">", p.shape)?;
            let [r, g, b] = p.diffuse;
            write_pad(out, depth + 1)?;
            writeln!(out, "<diffuse r=\"{r:.5}\" g=\"{g:.5}\" b=\"{b:.5}\"/>")?;
            write_pad(out, depth)?;
            writeln!(out, "</object>")
        }
    }
}

fn write_op<W: Write>(out: &mut W, depth: usize, op: &TransformOp) -> io::Result<()> {
    match op {
        TransformOp::Translate(v) => write_vec3(out, depth, "translate", *v),
        TransformOp::Scale(v) => write_vec3(out, depth, "scale", *v),
        TransformOp::Rotate { axis, angle_deg } => {
            write_pad(out, depth)?;
            writeln!(
                out,
                "<rotate x=\"{:.5}\" y=\"{:.5}\" z=\"{:.5}\" angle=\"{angle_deg:.5}\"/>",
                axis[0], axis[1], axis[2]
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PrimitiveNode, SceneNode, TransformNode, TransformOp, assemble};

    fn render(doc: &SceneDocument) -> String {
        let mut buf = Vec::new();
        write_scene(&mut buf, doc).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn one_pixel_doc() -> SceneDocument {
        let leaf = SceneNode::Primitive(PrimitiveNode {
            shape: "cube".into(),
            diffuse: [1.0, 0.5, 0.0],
        });
        let block = SceneNode::Transform(TransformNode {
            ops: vec![
                TransformOp::Translate([-0.25, 0.0, 0.0]),
                TransformOp::Scale([0.5, 0.5, 1.0]),
            ],
            child: Box::new(leaf),
        });
        assemble(vec![block], 0.0, 0.0)
    }

    #[test]
    fn header_blocks_and_formatting() {
        let text = render(&one_pixel_doc());
        assert!(text.starts_with("<scenefile>\n"));
        assert!(text.ends_with("</scenefile>\n"));
        // Integer light ids, 5-decimal floats.
        assert!(text.contains("<id v=\"0\"/>"));
        assert!(text.contains("<id v=\"2\"/>"));
        assert!(!text.contains("<id v=\"0."));
        assert!(text.contains("<position x=\"0.00000\" y=\"0.00000\" z=\"-20.00000\"/>"));
        assert!(text.contains("<pos x=\"0.00000\" y=\"0.10000\" z=\"2.00000\"/>"));
        assert!(text.contains("<heightangle v=\"45.00000\"/>"));
        assert!(text.contains("<diffuse r=\"1.00000\" g=\"0.50000\" b=\"0.00000\"/>"));
    }

    #[test]
    fn nesting_depth_drives_indentation() {
        let text = render(&one_pixel_doc());
        // root tree at depth 1, view transblock at 2, inner tree at 3,
        // pixel transblock at 4, primitive at 5, diffuse at 6.
        assert!(text.contains("\n    <object type=\"tree\" name=\"root\">\n"));
        assert!(text.contains("\n        <transblock>\n"));
        assert!(text.contains("\n            <object type=\"tree\">\n"));
        assert!(text.contains("\n                <transblock>\n"));
        assert!(text.contains("\n                    <object type=\"primitive\" name=\"cube\">\n"));
        assert!(text.contains("\n                        <diffuse "));
    }

    #[test]
    fn every_open_tag_is_closed() {
        let text = render(&one_pixel_doc());
        let mut stack: Vec<&str> = Vec::new();
        for line in text.lines() {
            let tag = line.trim();
            if tag.ends_with("/>") {
                continue;
            }
            if let Some(name) = tag.strip_prefix("</") {
                let name = name.trim_end_matches('>');
                assert_eq!(stack.pop(), Some(name), "mismatched close: {tag}");
            } else {
                let name = tag[1..]
                    .split([' ', '>'])
                    .next()
                    .unwrap();
                stack.push(name);
            }
        }
        assert!(stack.is_empty(), "unclosed tags: {stack:?}");
    }

    #[test]
    fn output_is_deterministic() {
        let doc = one_pixel_doc();
        assert_eq!(render(&doc), render(&doc));
    }
}
