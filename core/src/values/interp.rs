use core::fmt;

/// How a value varies across the primitive it is attached to.
///
/// Purely descriptive: storage and retrieval never look at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Interp {
    /// One value for the whole primitive.
    #[default]
    Constant = 0,
    /// One value per piece (face, curve, patch).
    PerPiece = 1,
    /// Interpolated linearly across each piece.
    Linear = 2,
    /// Interpolated using the primitive's basis, one value per vertex.
    Vertex = 3,
}

impl fmt::Display for Interp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interp::Constant => "constant",
            Interp::PerPiece => "perpiece",
            Interp::Linear => "linear",
            Interp::Vertex => "vertex",
        })
    }
}
