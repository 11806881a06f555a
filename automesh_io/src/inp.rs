// `.inp` collaborator: Abaqus-style ASCII mesh export/import.
//
// No crate in the corpus speaks this format, so the writer is hand-rolled
// text assembly and the reader a small line-oriented parser — the same
// register the corpus uses for its few genuinely bespoke formats rather
// than reaching for a generic parser-combinator dependency.
//
// Byte-exact reproducibility is guaranteed for every line except the
// version comment and the `autogenerated on` timestamp comment.

use std::path::Path;

use automesh_core::mesh::{Block, Element, Mesh};
use automesh_core::{Coord, Label, NodeId};
use chrono::Utc;

use crate::error::IoError;

fn io_err(path: &Path, source: std::io::Error) -> IoError {
    IoError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write `mesh` to an Abaqus-style `.inp` file.
pub fn write_inp(path: &Path, mesh: &Mesh) -> Result<(), IoError> {
    let mut out = String::new();
    out.push_str("*HEADING\n");
    out.push_str(&format!(
        "** automesh_io v{}\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!(
        "** autogenerated on {}\n",
        Utc::now().to_rfc3339()
    ));

    out.push_str("*NODE\n");
    for (idx, coord) in mesh.coordinates.iter().enumerate() {
        let node = idx as NodeId + 1;
        out.push_str(&format_node_line(node, *coord));
        out.push('\n');
    }

    let mut element_id: u64 = 1;
    for block in &mesh.blocks {
        out.push_str(&format!(
            "*ELEMENT, TYPE=C3D8R, ELSET=EB{}\n",
            block.label
        ));
        for element in &block.elements {
            out.push_str(&format_element_line(element_id, element));
            out.push('\n');
            element_id += 1;
        }
    }

    std::fs::write(path, out).map_err(|e| io_err(path, e))?;
    tracing::info!(
        path = %path.display(),
        nodes = mesh.node_count(),
        elements = mesh.element_count(),
        "wrote .inp mesh"
    );
    Ok(())
}

fn format_node_line(node: NodeId, coord: Coord) -> String {
    format!("{}, {}, {}, {}", node, coord[0], coord[1], coord[2])
}

fn format_element_line(element_id: u64, element: &Element) -> String {
    let nodes = element
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{element_id}, {nodes}")
}

/// Read a mesh back from an `.inp` file written by `write_inp`. Blocks are
/// returned in the order their `*ELEMENT` sections appeared in the file.
pub fn read_inp(path: &Path) -> Result<Mesh, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut coordinates: Vec<Coord> = Vec::new();
    let mut blocks: Vec<Block> = Vec::new();
    let mut current_label: Option<Label> = None;
    let mut current_elements: Vec<Element> = Vec::new();

    #[derive(PartialEq)]
    enum Section {
        None,
        Node,
        Element,
    }
    let mut section = Section::None;

    let flush = |label: Option<Label>, elements: &mut Vec<Element>, blocks: &mut Vec<Block>| {
        if let Some(label) = label {
            blocks.push(Block {
                label,
                elements: std::mem::take(elements),
            });
        }
    };

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with("**") {
            continue;
        }
        if line.eq_ignore_ascii_case("*HEADING") {
            section = Section::None;
            continue;
        }
        if line.eq_ignore_ascii_case("*NODE") {
            section = Section::Node;
            continue;
        }
        if let Some(rest) = strip_keyword_ci(line, "*ELEMENT") {
            flush(current_label.take(), &mut current_elements, &mut blocks);
            let label = parse_elset_label(rest)?;
            current_label = Some(label);
            section = Section::Element;
            continue;
        }

        match section {
            Section::Node => {
                let (_, coord) = parse_node_line(line)?;
                coordinates.push(coord);
            }
            Section::Element => {
                let (_, nodes) = parse_element_line(line)?;
                current_elements.push(nodes);
            }
            Section::None => {}
        }
    }
    flush(current_label.take(), &mut current_elements, &mut blocks);

    if coordinates.is_empty() || blocks.is_empty() {
        return Err(IoError::Inp(format!(
            "{} contains no nodes or no elements",
            path.display()
        )));
    }

    Ok(Mesh {
        blocks,
        coordinates,
    })
}

fn strip_keyword_ci<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    if line.len() >= keyword.len() && line[..keyword.len()].eq_ignore_ascii_case(keyword) {
        Some(&line[keyword.len()..])
    } else {
        None
    }
}

fn parse_elset_label(rest: &str) -> Result<Label, IoError> {
    for field in rest.split(',') {
        let field = field.trim();
        if let Some(value) = field.strip_prefix("ELSET=EB") {
            return value
                .trim()
                .parse::<Label>()
                .map_err(|e| IoError::Inp(format!("bad ELSET label {value:?}: {e}")));
        }
    }
    Err(IoError::Inp(format!(
        "*ELEMENT line missing ELSET=EB<label>: {rest:?}"
    )))
}

fn parse_node_line(line: &str) -> Result<(NodeId, Coord), IoError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(IoError::Inp(format!(
            "expected `id, x, y, z` on *NODE line, got {line:?}"
        )));
    }
    let id = fields[0]
        .parse::<NodeId>()
        .map_err(|e| IoError::Inp(format!("bad node id {:?}: {e}", fields[0])))?;
    let mut coord = [0.0f64; 3];
    for (slot, field) in coord.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse::<f64>()
            .map_err(|e| IoError::Inp(format!("bad coordinate {field:?}: {e}")))?;
    }
    Ok((id, coord))
}

fn parse_element_line(line: &str) -> Result<(u64, Element), IoError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 9 {
        return Err(IoError::Inp(format!(
            "expected `id, n1, .., n8` on *ELEMENT line, got {line:?}"
        )));
    }
    let id = fields[0]
        .parse::<u64>()
        .map_err(|e| IoError::Inp(format!("bad element id {:?}: {e}", fields[0])))?;
    let mut nodes = [0 as NodeId; 8];
    for (slot, field) in nodes.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse::<NodeId>()
            .map_err(|e| IoError::Inp(format!("bad node reference {field:?}: {e}")))?;
    }
    Ok((id, nodes))
}
