use crate::{
    error::{Error, Result},
    tree::{Arena, NodeId},
};

struct Emitter<'a, T> {
    arena: &'a Arena,
    rank: usize,
    source: &'a [T],
    output: &'a mut [T],
    cursor: usize,
}

impl<T: Copy> Emitter<'_, T> {
    fn visit(&mut self, id: NodeId, depth: usize) -> Result<()> {
        let arena = self.arena;
        let node = arena.node(id);

        if depth == self.rank {
            let flat_index = node.value().ok_or(Error::UnboundLeaf { node: id.index() })?;
            self.output[self.cursor] = self.source[flat_index];
            self.cursor += 1;
            return Ok(());
        }

        for &next in node
            .left_mirror()
            .iter()
            .chain(node.children())
            .chain(node.right_mirror())
        {
            self.visit(next, depth + 1)?;
        }

        Ok(())
    }
}

/// Writes the padded tree below `root` into `output` in row-major order and
/// returns the number of elements written.
///
/// Each interior node emits its left mirror, then its children, then its
/// right mirror. `output` must be sized for the padded shape.
pub(super) fn emit<T: Copy>(
    arena: &Arena,
    root: NodeId,
    rank: usize,
    source: &[T],
    output: &mut [T],
) -> Result<usize> {
    let mut emitter = Emitter {
        arena,
        rank,
        source,
        output,
        cursor: 0,
    };

    emitter.visit(root, 0)?;

    Ok(emitter.cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{padding::dim, MirrorPadMode};

    #[test]
    fn unpadded_tree_is_copied_in_order() {
        let mut arena = Arena::new();
        let root = arena.build(&[2, 2], 4).unwrap();

        let source = [1u8, 2, 3, 4];
        let mut output = [0u8; 4];

        assert_eq!(emit(&arena, root, 2, &source, &mut output), Ok(4));
        assert_eq!(output, source);
    }

    #[test]
    fn mirrors_wrap_children() {
        let mut arena = Arena::new();
        let root = arena.build(&[3], 3).unwrap();
        dim::link_mirrors(&mut arena, root, &[[1, 2]], MirrorPadMode::Symmetric);

        let source = [10i64, 20, 30];
        let mut output = [0i64; 6];

        assert_eq!(emit(&arena, root, 1, &source, &mut output), Ok(6));
        assert_eq!(output, [10, 10, 20, 30, 30, 20]);
    }

    #[test]
    fn unbound_leaf_aborts() {
        let mut arena = Arena::new();
        let root = arena.build(&[2], 2).unwrap();
        let second = arena.node(root).children()[1];
        arena.node_mut(second).value = None;

        let mut output = [0f32; 2];

        assert_eq!(
            emit(&arena, root, 1, &[1.0, 2.0], &mut output),
            Err(Error::UnboundLeaf {
                node: second.index()
            })
        );
    }
}
