use std::borrow::Cow;

use ndarray::{Array, ArrayBase, Data, Dim, Dimension, IntoDimension, Ix};
use num::traits::Zero;

use crate::{
    error::{Error, Result},
    tree::{Arena, NodeId},
    MirrorPadMode, MAX_RANK,
};

mod dim;
mod emit;


pub type ExplicitPadding<const N: usize> = [[usize; 2]; N];

pub trait MirrorPadExt<const N: usize, T: Copy, Output> {
    fn mirror_pad(&self, mode: MirrorPadMode, padding_size: ExplicitPadding<N>) -> Result<Output>;
}

impl<const N: usize, T, S> MirrorPadExt<N, T, Array<T, Dim<[Ix; N]>>>
    for ArrayBase<S, Dim<[Ix; N]>>
where
    T: Zero + Copy,
    S: Data<Elem = T>,
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    fn mirror_pad(
        &self,
        mode: MirrorPadMode,
        explicit_padding: ExplicitPadding<N>,
    ) -> Result<Array<T, Dim<[Ix; N]>>> {
        let source = flatten(self);
        let mut arena = Arena::with_shape(self.shape());
        let output = pad_vec(&mut arena, &source, self.shape(), &explicit_padding, mode)?;

        let shape = output_shape(self.shape(), &explicit_padding)?;
        let output_dim: [usize; N] = std::array::from_fn(|i| shape[i]);

        Ok(Array::from_shape_vec(output_dim, output)?)
    }
}

/// Row-major elements of `input`, borrowed when the array is already
/// contiguous in standard order.
pub(crate) fn flatten<'a, T, S, D>(input: &'a ArrayBase<S, D>) -> Cow<'a, [T]>
where
    T: Copy,
    S: Data<Elem = T>,
    D: Dimension,
{
    match input.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(input.iter().copied().collect()),
    }
}

/// Shape of `shape` after padding, the same for both modes.
pub fn output_shape(shape: &[usize], padding: &[[usize; 2]]) -> Result<Vec<usize>> {
    shape
        .iter()
        .zip(padding)
        .enumerate()
        .map(|(dimension, (&size, &[left, right]))| {
            size.checked_add(left)
                .and_then(|size| size.checked_add(right))
                .ok_or(Error::PaddedSizeOverflow { dimension })
        })
        .collect()
}

/// Number of elements of the padded array.
fn padded_len(shape: &[usize], padding: &[[usize; 2]]) -> Result<usize> {
    output_shape(shape, padding)?
        .iter()
        .enumerate()
        .try_fold(1usize, |len, (dimension, &size)| {
            len.checked_mul(size)
                .ok_or(Error::PaddedSizeOverflow { dimension })
        })
}

/// Builds, validates and mirror-links the tree of a `shape` array.
fn link_tree(
    arena: &mut Arena,
    source_len: usize,
    shape: &[usize],
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) -> Result<NodeId> {
    if shape.is_empty() || shape.len() > MAX_RANK {
        return Err(Error::InvalidRank(shape.len()));
    }
    if padding.len() != shape.len() {
        return Err(Error::PaddingRankMismatch {
            expected: shape.len(),
            actual: padding.len(),
        });
    }

    tracing::debug!(?shape, ?padding, %mode, "mirror pad");

    let root = arena.build(shape, source_len)?;
    dim::validate(arena, root, padding, mode)?;
    dim::link_mirrors(arena, root, padding, mode);

    Ok(root)
}

/// Checks that `padding` can be applied to a `shape` array without reading
/// any data and returns the padded shape.
pub(crate) fn check(
    arena: &mut Arena,
    shape: &[usize],
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) -> Result<Vec<usize>> {
    let source_len = shape.iter().product();
    link_tree(arena, source_len, shape, padding, mode)?;
    output_shape(shape, padding)
}

/// Mirror pads the row-major `source` of a `shape` array into `output`.
///
/// `output` must hold exactly as many elements as `output_shape(shape,
/// padding)` describes. The arena is reset and rebuilt for `shape`, so a
/// caller may keep one around across calls.
pub fn pad_into<T: Copy>(
    arena: &mut Arena,
    source: &[T],
    shape: &[usize],
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
    output: &mut [T],
) -> Result<()> {
    let root = link_tree(arena, source.len(), shape, padding, mode)?;

    let expected = padded_len(shape, padding)?;
    if output.len() != expected {
        return Err(Error::OutputSizeMismatch {
            expected,
            actual: output.len(),
        });
    }

    let written = emit::emit(arena, root, shape.len(), source, output)?;
    debug_assert_eq!(written, expected);

    Ok(())
}

pub(crate) fn pad_vec<T: Zero + Copy>(
    arena: &mut Arena,
    source: &[T],
    shape: &[usize],
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) -> Result<Vec<T>> {
    let root = link_tree(arena, source.len(), shape, padding, mode)?;

    let mut output = vec![T::zero(); padded_len(shape, padding)?];
    emit::emit(arena, root, shape.len(), source, &mut output)?;

    Ok(output)
}
