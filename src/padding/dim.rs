use crate::{
    error::{Error, Result},
    tree::{Arena, NodeId},
    MirrorPadMode,
};

/// Checks that every dimension has enough children to mirror from.
///
/// Only the first child of each level is descended into. This relies on the
/// tree being rectangular (all siblings of a level have the same number of
/// children), which holds for any tree built by [`Arena::build`]. A ragged
/// tree is not supported and may pass validation while lacking data in a
/// later sibling.
pub(super) fn validate(
    arena: &Arena,
    root: NodeId,
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) -> Result<()> {
    validate_dim(arena, root, padding, mode.offset(), 0)
}

fn validate_dim(
    arena: &Arena,
    id: NodeId,
    padding: &[[usize; 2]],
    offset: usize,
    dim: usize,
) -> Result<()> {
    let Some(&[left, right]) = padding.get(dim) else {
        return Ok(());
    };

    let children = arena.node(id).children();
    let available = children.len();

    for required in [left.saturating_add(offset), right.saturating_add(offset)] {
        if required > available {
            return Err(Error::InsufficientData {
                dimension: dim,
                required,
                available,
            });
        }
    }

    match children.first() {
        Some(&first) => validate_dim(arena, first, padding, offset, dim + 1),
        None => Ok(()),
    }
}

/// Fills `left_mirror` and `right_mirror` of every interior node.
///
/// For children `c[0..n]` the left list is `c[offset + left - 1]` down to
/// `c[offset]` and the right list is `c[n - 1 - offset]` down to
/// `c[n - right - offset]`. Both are clamped to the available children, so a
/// tree that failed [`validate`] produces short lists instead of panicking.
pub(super) fn link_mirrors(
    arena: &mut Arena,
    root: NodeId,
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) {
    link_dim(arena, root, padding, mode.offset(), 0);
}

fn link_dim(arena: &mut Arena, id: NodeId, padding: &[[usize; 2]], offset: usize, dim: usize) {
    let Some(&[left, right]) = padding.get(dim) else {
        return;
    };

    let children = std::mem::take(&mut arena.node_mut(id).children);
    let n = children.len();

    let left_mirror = (offset.min(n)..offset.saturating_add(left).min(n))
        .rev()
        .map(|i| children[i])
        .collect();
    let right_end = n.saturating_sub(offset);
    let right_mirror = (n.saturating_sub(right.saturating_add(offset))..right_end)
        .rev()
        .map(|i| children[i])
        .collect();

    for &child in &children {
        link_dim(arena, child, padding, offset, dim + 1);
    }

    let node = arena.node_mut(id);
    node.children = children;
    node.left_mirror = left_mirror;
    node.right_mirror = right_mirror;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(shape: &[usize]) -> (Arena, NodeId) {
        let mut arena = Arena::new();
        let len = shape.iter().product();
        let root = arena.build(shape, len).unwrap();
        (arena, root)
    }

    fn leaf_values(arena: &Arena, ids: &[NodeId]) -> Vec<usize> {
        ids.iter()
            .map(|&id| arena.node(id).value().unwrap())
            .collect()
    }

    #[test]
    fn reflect_needs_one_extra_child() {
        let (arena, root) = built(&[3]);

        assert!(validate(&arena, root, &[[2, 2]], MirrorPadMode::Reflect).is_ok());
        assert_eq!(
            validate(&arena, root, &[[3, 0]], MirrorPadMode::Reflect),
            Err(Error::InsufficientData {
                dimension: 0,
                required: 4,
                available: 3
            })
        );
        assert!(validate(&arena, root, &[[3, 3]], MirrorPadMode::Symmetric).is_ok());
    }

    #[test]
    fn right_side_is_checked() {
        let (arena, root) = built(&[2, 3]);

        assert_eq!(
            validate(&arena, root, &[[0, 0], [1, 4]], MirrorPadMode::Symmetric),
            Err(Error::InsufficientData {
                dimension: 1,
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn shallow_failure_stops_descent() {
        let (arena, root) = built(&[2, 1]);

        // both dimensions are short, only the outer one is reported
        assert_eq!(
            validate(&arena, root, &[[2, 0], [5, 5]], MirrorPadMode::Reflect),
            Err(Error::InsufficientData {
                dimension: 0,
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn huge_pad_saturates_required() {
        let (arena, root) = built(&[3]);

        assert_eq!(
            validate(&arena, root, &[[usize::MAX, 0]], MirrorPadMode::Reflect),
            Err(Error::InsufficientData {
                dimension: 0,
                required: usize::MAX,
                available: 3
            })
        );
    }

    #[test]
    fn mirror_lists_1d() {
        let (mut arena, root) = built(&[4]);

        link_mirrors(&mut arena, root, &[[2, 1]], MirrorPadMode::Symmetric);
        let node = arena.node(root);
        assert_eq!(leaf_values(&arena, node.left_mirror()), vec![1, 0]);
        assert_eq!(leaf_values(&arena, node.right_mirror()), vec![3]);

        link_mirrors(&mut arena, root, &[[2, 1]], MirrorPadMode::Reflect);
        let node = arena.node(root);
        assert_eq!(leaf_values(&arena, node.left_mirror()), vec![2, 1]);
        assert_eq!(leaf_values(&arena, node.right_mirror()), vec![2]);
    }

    #[test]
    fn every_interior_node_is_linked() {
        let (mut arena, root) = built(&[2, 3]);

        link_mirrors(&mut arena, root, &[[1, 0], [0, 2]], MirrorPadMode::Reflect);

        let rows = arena.node(root).children().to_vec();
        assert_eq!(arena.node(root).left_mirror(), &[rows[1]]);
        assert!(arena.node(root).right_mirror().is_empty());

        for (r, &row) in rows.iter().enumerate() {
            let node = arena.node(row);
            assert!(node.left_mirror().is_empty());
            assert_eq!(
                leaf_values(&arena, node.right_mirror()),
                vec![r * 3 + 1, r * 3]
            );
        }
    }
}
