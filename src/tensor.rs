//! Runtime-typed tensors and padding tables.
//!
//! The element type is matched once here and the padding engine runs
//! monomorphized for it.

use std::fmt;

use ndarray::{ArrayD, Ix2, IxDyn};
use num::traits::{ToPrimitive, Zero};

use crate::{
    error::{Error, Result},
    padding::{self, flatten},
    tree::Arena,
    MirrorPadMode, MAX_RANK,
};

/// Element type tag of a [`TensorData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    Bool,
}

impl ElementType {
    /// Whether mirror padding can produce this element type.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            ElementType::Float32 | ElementType::Int32 | ElementType::Int64 | ElementType::UInt8
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::UInt8 => "uint8",
            ElementType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A dense tensor of one of the tagged element types.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    Bool(ArrayD<bool>),
}

macro_rules! tensor_data_from {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$elem>> for TensorData {
                #[inline]
                fn from(array: ArrayD<$elem>) -> Self {
                    TensorData::$variant(array)
                }
            }
        )*
    };
}

tensor_data_from!(
    f32 => Float32,
    f64 => Float64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    bool => Bool,
);

impl TensorData {
    pub fn element_type(&self) -> ElementType {
        match self {
            TensorData::Float32(_) => ElementType::Float32,
            TensorData::Float64(_) => ElementType::Float64,
            TensorData::Int8(_) => ElementType::Int8,
            TensorData::Int16(_) => ElementType::Int16,
            TensorData::Int32(_) => ElementType::Int32,
            TensorData::Int64(_) => ElementType::Int64,
            TensorData::UInt8(_) => ElementType::UInt8,
            TensorData::Bool(_) => ElementType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            TensorData::Float32(a) => a.shape(),
            TensorData::Float64(a) => a.shape(),
            TensorData::Int8(a) => a.shape(),
            TensorData::Int16(a) => a.shape(),
            TensorData::Int32(a) => a.shape(),
            TensorData::Int64(a) => a.shape(),
            TensorData::UInt8(a) => a.shape(),
            TensorData::Bool(a) => a.shape(),
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape().len()
    }
}

/// Per-dimension `(left, right)` padding amounts as a `[rank, 2]` table.
#[derive(Debug, Clone, PartialEq)]
pub enum PaddingMatrix {
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
}

impl From<ArrayD<i32>> for PaddingMatrix {
    fn from(table: ArrayD<i32>) -> Self {
        PaddingMatrix::Int32(table)
    }
}

impl From<ArrayD<i64>> for PaddingMatrix {
    fn from(table: ArrayD<i64>) -> Self {
        PaddingMatrix::Int64(table)
    }
}

impl PaddingMatrix {
    pub fn shape(&self) -> &[usize] {
        match self {
            PaddingMatrix::Int32(t) => t.shape(),
            PaddingMatrix::Int64(t) => t.shape(),
        }
    }

    /// Parses the table into `[left, right]` pairs for a `rank` input.
    pub fn to_explicit(&self, rank: usize) -> Result<Vec<[usize; 2]>> {
        match self {
            PaddingMatrix::Int32(t) => parse_table(t, rank),
            PaddingMatrix::Int64(t) => parse_table(t, rank),
        }
    }
}

fn parse_table<P>(table: &ArrayD<P>, rank: usize) -> Result<Vec<[usize; 2]>>
where
    P: ToPrimitive + Copy + Into<i64>,
{
    let invalid = || Error::InvalidPaddingMatrix {
        shape: table.shape().to_vec(),
    };

    let table = table.view().into_dimensionality::<Ix2>().map_err(|_| invalid())?;
    if table.ncols() != 2 {
        return Err(invalid());
    }
    if table.nrows() != rank {
        return Err(Error::PaddingRankMismatch {
            expected: rank,
            actual: table.nrows(),
        });
    }

    table
        .rows()
        .into_iter()
        .enumerate()
        .map(|(dimension, row)| -> Result<[usize; 2]> {
            let size = |value: P| {
                value.to_usize().ok_or(Error::NegativePadding {
                    dimension,
                    value: value.into(),
                })
            };
            Ok([size(row[0])?, size(row[1])?])
        })
        .collect()
}

fn pad_array<T: Zero + Copy>(
    arena: &mut Arena,
    input: &ArrayD<T>,
    padding: &[[usize; 2]],
    mode: MirrorPadMode,
) -> Result<ArrayD<T>> {
    let source = flatten(input);
    let output = padding::pad_vec(arena, &source, input.shape(), padding, mode)?;
    let shape = padding::output_shape(input.shape(), padding)?;

    Ok(ArrayD::from_shape_vec(IxDyn(&shape), output)?)
}

/// Checks the rank and element type of `input` and parses `padding` for it.
pub(crate) fn check_input(
    input: &TensorData,
    padding: &PaddingMatrix,
) -> Result<Vec<[usize; 2]>> {
    let rank = input.rank();
    if rank == 0 || rank > MAX_RANK {
        return Err(Error::InvalidRank(rank));
    }

    let padding = padding.to_explicit(rank)?;

    let element_type = input.element_type();
    if !element_type.is_supported() {
        return Err(Error::UnsupportedElementType(element_type));
    }

    Ok(padding)
}

pub(crate) fn pad_tensor(
    arena: &mut Arena,
    input: &TensorData,
    padding: &PaddingMatrix,
    mode: MirrorPadMode,
) -> Result<TensorData> {
    let padding = check_input(input, padding)?;

    match input {
        TensorData::Float32(a) => pad_array(arena, a, &padding, mode).map(TensorData::Float32),
        TensorData::Int32(a) => pad_array(arena, a, &padding, mode).map(TensorData::Int32),
        TensorData::Int64(a) => pad_array(arena, a, &padding, mode).map(TensorData::Int64),
        TensorData::UInt8(a) => pad_array(arena, a, &padding, mode).map(TensorData::UInt8),
        other => Err(Error::UnsupportedElementType(other.element_type())),
    }
}

/// Mirror pads a runtime-typed tensor.
///
/// Only `float32`, `int32`, `int64` and `uint8` tensors are supported.
pub fn mirror_pad(
    input: &TensorData,
    padding: &PaddingMatrix,
    mode: MirrorPadMode,
) -> Result<TensorData> {
    let mut arena = Arena::with_shape(input.shape());
    pad_tensor(&mut arena, input, padding, mode)
}
