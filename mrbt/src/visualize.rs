//! Plain-text drawing of trees and digests.

use std::io::{Result, Write};

use itertools::Itertools;

use crate::{
    color::Color,
    hash::NodeHasher,
    tree::{MerkleRbTree, NodeId, NodeKind},
};

/// Hex digits kept at each end of an abbreviated digest.
const HEX_EDGE: usize = 8;
/// Spaces of indentation per nesting level.
const INDENT: usize = 2;

/// Anything that can draw itself through a [`Drawer`].
pub trait Visualize {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// Writer that indents every new line to the current nesting depth.
pub struct Drawer<W: Write> {
    depth: usize,
    out: W,
}

impl<W: Write> Drawer<W> {
    pub fn new(out: W) -> Self {
        Drawer { depth: 0, out }
    }

    /// Nests subsequent lines one level deeper.
    pub fn down(&mut self) {
        self.depth += 1;
    }

    pub fn up(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `buf`; each `\n` inside it starts an indented line.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let mut line_break = vec![b'\n'];
        line_break.resize(1 + INDENT * self.depth, b' ');
        let lines = buf.split(|b| *b == b'\n');
        for chunk in Itertools::intersperse(lines, line_break.as_slice()) {
            self.out.write_all(chunk)?;
        }
        Ok(())
    }

    /// Ends the drawing with a newline and flushes the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Hex of `bytes`, shortened to `head..tail` when long.
pub fn to_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    if encoded.len() <= 3 * HEX_EDGE {
        return encoded;
    }
    format!(
        "{}..{}",
        &encoded[..HEX_EDGE],
        &encoded[encoded.len() - HEX_EDGE..]
    )
}

impl<const N: usize> Visualize for [u8; N] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(to_hex(self).as_bytes())?;
        Ok(drawer)
    }
}

impl<T: Visualize> Visualize for Option<T> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        match self {
            Some(value) => value.visualize(drawer),
            None => {
                drawer.write(b"None")?;
                Ok(drawer)
            }
        }
    }
}

/// Draws `value` to stdout.
pub fn visualize_stdout<T: Visualize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut drawer = value.visualize(Drawer::new(stdout.lock()))?;
    drawer.flush()
}

/// Draws `value` into `out`, without a trailing newline.
pub fn visualize_to_vec<T: Visualize + ?Sized>(out: &mut Vec<u8>, value: &T) -> Result<()> {
    value.visualize(Drawer::new(out))?;
    Ok(())
}

struct VisualizableNode<'a, H> {
    tree: &'a MerkleRbTree<H>,
    id: NodeId,
}

impl<H: NodeHasher> Visualize for MerkleRbTree<H> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(
            format!(
                "Merkle RB tree ({} entries, {} nodes) root: ",
                self.len(),
                self.node_count()
            )
            .as_bytes(),
        )?;
        match self.root() {
            Some(id) => VisualizableNode { tree: self, id }.visualize(drawer),
            None => {
                drawer.write(b"empty")?;
                Ok(drawer)
            }
        }
    }
}

impl<H: NodeHasher> Visualize for VisualizableNode<'_, H> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        let node = self.tree.node(self.id);
        let kind = match node.kind {
            NodeKind::Leaf => "leaf",
            NodeKind::Aggregate => "aggregate",
        };
        let color = match self.tree.color(Some(self.id)) {
            Color::Red => "red",
            Color::Black => "black",
        };
        drawer.write(format!("[key: {}, {kind}, {color}, digest: ", node.key).as_bytes())?;
        drawer = node.digest.visualize(drawer)?;
        drawer.write(b"]")?;

        let child = |id| VisualizableNode {
            tree: self.tree,
            id,
        };
        drawer.down();
        drawer.write(b"\nleft: ")?;
        drawer = node.left.map(child).visualize(drawer)?;
        drawer.write(b"\nright: ")?;
        drawer = node.right.map(child).visualize(drawer)?;
        drawer.up();

        Ok(drawer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn digest_hex_is_abbreviated() {
        assert_eq!(to_hex(&[0xab, 0xcd]), "abcd");
        assert_eq!(to_hex(&[0x11u8; 32]), "11111111..11111111");
    }

    #[test]
    fn nested_lines_are_indented() {
        let mut out = Vec::new();
        let mut drawer = Drawer::new(&mut out);
        drawer.write(b"root").unwrap();
        drawer.down();
        drawer.write(b"\nchild").unwrap();
        drawer.down();
        drawer.write(b"\ngrandchild").unwrap();
        drawer.up();
        drawer.up();
        drawer.write(b"\nsibling").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "root\n  child\n    grandchild\nsibling"
        );
    }

    #[test]
    fn draws_single_entry() {
        let tree = make_tree_seq(1);
        let mut out = Vec::new();
        visualize_to_vec(&mut out, &tree).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Merkle RB tree (1 entries, 2 nodes) root: [key: 0, leaf, black"));
        assert!(out.contains("\n  left: None"));
        assert!(out.contains("\n  right: [key: 50, aggregate, red"));
    }

    #[test]
    fn draws_empty_tree() {
        let mut out = Vec::new();
        visualize_to_vec(&mut out, &MerkleRbTree::new()).unwrap();
        assert_eq!(out, b"Merkle RB tree (0 entries, 0 nodes) root: empty");
    }

    #[test]
    fn draws_every_node() {
        let tree = make_tree_seq(6);
        let mut out = Vec::new();
        visualize_to_vec(&mut out, &tree).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("[key: ").count(), tree.node_count());
    }
}
