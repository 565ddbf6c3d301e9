use crate::{
    error::{Error, Result},
    padding,
    tensor::{self, PaddingMatrix, TensorData},
    tree::Arena,
    MirrorPadMode, MAX_RANK,
};

/// Result of [`MirrorPadOp::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// Nodes the tree of this input shape occupies in the scratch arena.
    pub arena_nodes: usize,
    /// Output shape, known only when the padding was given at prepare time.
    pub output_shape: Option<Vec<usize>>,
}

/// A mirror pad operator with a scratch arena reused across evaluations.
///
/// `prepare` sizes the arena for an input shape and, when the padding table
/// is already known, computes the output shape. `eval` runs the full pass and
/// can be called repeatedly without reallocating as long as the shape does
/// not grow.
#[derive(Debug)]
pub struct MirrorPadOp {
    mode: MirrorPadMode,
    arena: Arena,
}

impl MirrorPadOp {
    pub fn new(mode: MirrorPadMode) -> Self {
        Self {
            mode,
            arena: Arena::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> MirrorPadMode {
        self.mode
    }

    pub fn prepare(
        &mut self,
        input_shape: &[usize],
        padding: Option<&PaddingMatrix>,
    ) -> Result<Prepared> {
        let rank = input_shape.len();
        if rank == 0 || rank > MAX_RANK {
            return Err(Error::InvalidRank(rank));
        }

        self.arena.reset(input_shape);

        // constant padding is checked against the shape now, dynamic padding in eval
        let output_shape = padding
            .map(|table| -> Result<Vec<usize>> {
                let explicit = table.to_explicit(rank)?;
                padding::check(&mut self.arena, input_shape, &explicit, self.mode)
            })
            .transpose()?;

        tracing::debug!(
            ?input_shape,
            ?output_shape,
            mode = %self.mode,
            "prepared mirror pad"
        );

        Ok(Prepared {
            arena_nodes: Arena::node_count(input_shape),
            output_shape,
        })
    }

    pub fn eval(&mut self, input: &TensorData, padding: &PaddingMatrix) -> Result<TensorData> {
        tracing::trace!(
            element_type = %input.element_type(),
            shape = ?input.shape(),
            "evaluating mirror pad"
        );

        tensor::pad_tensor(&mut self.arena, input, padding, self.mode)
    }
}
