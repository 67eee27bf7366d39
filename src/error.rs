use core::fmt;

/// Ways a decode can find the tree and the bitstream disagreeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// A node with exactly one child.
    HalfLeaf { node: usize },
    /// A child link pointing outside the tree.
    DanglingLink { node: usize },
    /// The recorded bit length does not fit in the packed buffer.
    LengthOverrun { bits: usize, capacity: usize },
    /// The stream ended partway through a code.
    TruncatedCode { consumed: usize },
    /// More symbols decoded than the output can hold.
    OutputOverflow { capacity: usize },
    /// A single-symbol stream carried a 1 bit.
    UnexpectedBit { position: usize },
    /// A leaf carrying no symbol.
    EmptyLeaf { node: usize },
    /// A symbol the tree has no leaf for.
    UnknownSymbol { symbol: u8 },
    /// A descent longer than any code the domain allows.
    TooDeep { node: usize },
    /// Coding was asked for against an empty tree.
    EmptyTree,
}

/// Errors that abort a kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input symbol outside `' '..='~'`.
    Domain { symbol: u8, position: usize },
    /// A fixed-capacity buffer is too small.
    Capacity { needed: usize, available: usize },
    /// The tree and the bitstream disagree.
    Corrupt(Corruption),
    /// The decoded sequence differs from the input.
    Mismatch { position: usize },
}

impl From<Corruption> for Error {
    fn from(c: Corruption) -> Self {
        Error::Corrupt(c)
    }
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HalfLeaf { node } => write!(f, "node {node} has exactly one child"),
            Self::DanglingLink { node } => write!(f, "node {node} links outside the tree"),
            Self::LengthOverrun { bits, capacity } => {
                write!(f, "{bits} encoded bits exceed the {capacity}-bit buffer")
            }
            Self::TruncatedCode { consumed } => {
                write!(f, "stream ended mid-code after {consumed} bits")
            }
            Self::OutputOverflow { capacity } => {
                write!(f, "more than {capacity} symbols decoded")
            }
            Self::UnexpectedBit { position } => {
                write!(f, "1 bit at {position} in a single-symbol stream")
            }
            Self::EmptyLeaf { node } => write!(f, "leaf {node} holds no symbol"),
            Self::UnknownSymbol { symbol } => write!(f, "no leaf for symbol {symbol:#04x}"),
            Self::TooDeep { node } => {
                write!(f, "descent passed the maximum code length at node {node}")
            }
            Self::EmptyTree => write!(f, "empty tree"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { symbol, position } => {
                write!(f, "symbol {symbol:#04x} at {position} is outside the printable domain")
            }
            Self::Capacity { needed, available } => {
                write!(f, "capacity exceeded: need {needed}, have {available}")
            }
            Self::Corrupt(c) => write!(f, "corrupt stream: {c}"),
            Self::Mismatch { position } => write!(f, "round trip differs at {position}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
