use std::fmt;

use crate::registry::Registry;
use crate::tree::{ChunkNode, ChunkTree, Payload};

/// Longest text preview shown for text chunks.
const TEXT_PREVIEW: usize = 48;

/// Indented, human-readable listing of a chunk tree.
///
/// ```text
/// W3D_CHUNK_MESH 0x00000000 container [3] (404 bytes)
///   W3D_CHUNK_MESH_HEADER3 0x0000001f struct MeshHeader3 (116 bytes)
///   W3D_CHUNK_VERTICES 0x00000002 array of Vector3 [8] (96 bytes)
/// ```
pub struct TreeDump<'a> {
    tree: &'a ChunkTree,
    registry: &'a Registry,
    verbose: bool,
}

impl<'a> TreeDump<'a> {
    pub fn new(tree: &'a ChunkTree, registry: &'a Registry) -> Self {
        Self {
            tree,
            registry,
            verbose: false,
        }
    }

    /// Also print decoded struct fields.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn fmt_node(&self, node: &ChunkNode, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = depth * 2;
        write!(
            f,
            "{:indent$}{} {} {}",
            "",
            self.registry.name_of(node.id),
            node.id,
            node.payload.shape()
        )?;
        match &node.payload {
            Payload::Children(children) => write!(f, " [{}]", children.len())?,
            Payload::Array(items) => write!(f, " [{}]", items.len())?,
            Payload::Text(_) => {
                let text = node.text_str().unwrap_or_default();
                let preview: String = text.chars().take(TEXT_PREVIEW).collect();
                let ellipsis = if text.chars().count() > TEXT_PREVIEW { "..." } else { "" };
                write!(f, " {preview:?}{ellipsis}")?;
            }
            _ => {}
        }
        writeln!(f, " ({} bytes)", node.declared_length)?;

        if self.verbose {
            if let Payload::Struct(value) = &node.payload {
                writeln!(f, "{:indent$}  {value:?}", "")?;
            }
        }
        for child in node.children() {
            self.fmt_node(child, depth + 1, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.tree {
            self.fmt_node(node, 0, f)?;
        }
        Ok(())
    }
}
