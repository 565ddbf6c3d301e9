//! N-dimensional mirror padding for `ndarray`.
//!
//! Borders are filled by reflecting interior values, either repeating the
//! border element ([`MirrorPadMode::Symmetric`]) or skipping it
//! ([`MirrorPadMode::Reflect`]).
//!
//! ```
//! use ndarray::array;
//! use ndarray_mirror_pad::{MirrorPadExt, MirrorPadMode};
//!
//! let arr = array![1, 2, 3, 4];
//! let padded = arr.mirror_pad(MirrorPadMode::Reflect, [[2, 1]]).unwrap();
//! assert_eq!(padded, array![3, 2, 1, 2, 3, 4, 3]);
//! ```

use std::{fmt, str::FromStr};

mod error;
mod op;
mod padding;
pub mod tensor;
pub mod tree;

pub use error::{Error, Result};
pub use op::{MirrorPadOp, Prepared};
pub use padding::{output_shape, pad_into, ExplicitPadding, MirrorPadExt};
pub use tensor::{mirror_pad, ElementType, PaddingMatrix, TensorData};

/// Highest rank the padding engine accepts.
pub const MAX_RANK: usize = 4;

// mirror padding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorPadMode {
    /// `[a, b, c]` padded by 2 on the left gives `[c, b, a, b, c]`.
    Reflect,
    /// `[a, b, c]` padded by 2 on the left gives `[b, a, a, b, c]`.
    Symmetric,
}

impl MirrorPadMode {
    /// How far inward from the border mirroring starts.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            MirrorPadMode::Reflect => 1,
            MirrorPadMode::Symmetric => 0,
        }
    }
}

impl fmt::Display for MirrorPadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorPadMode::Reflect => f.write_str("reflect"),
            MirrorPadMode::Symmetric => f.write_str("symmetric"),
        }
    }
}

impl FromStr for MirrorPadMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("reflect") {
            Ok(MirrorPadMode::Reflect)
        } else if s.eq_ignore_ascii_case("symmetric") {
            Ok(MirrorPadMode::Symmetric)
        } else {
            Err(Error::UnknownMode(s.to_owned()))
        }
    }
}
