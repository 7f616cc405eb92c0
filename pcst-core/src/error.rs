//! Error types for the prize-collecting Steiner tree solver.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias. Every variant describes a caller contract
//! violation detected before growth starts.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running [`crate::PcstFast`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PcstError {
    /// A node carried a negative prize.
    #[error("node {node} has negative prize {prize}")]
    NegativePrize {
        /// The offending node id.
        node: usize,
        /// The prize reported for the node.
        prize: f64,
    },
    /// A node carried a NaN or infinite prize.
    #[error("node {node} has a non-finite prize")]
    NonFinitePrize {
        /// The offending node id.
        node: usize,
    },
    /// A relationship carried a negative cost.
    #[error("relationship ({node}, {neighbor}) has negative cost {cost}")]
    NegativeCost {
        /// Endpoint the relationship was read from.
        node: usize,
        /// Opposite endpoint of the relationship.
        neighbor: usize,
        /// The cost reported for the relationship.
        cost: f64,
    },
    /// A relationship carried a NaN or infinite cost.
    #[error("relationship ({node}, {neighbor}) has a non-finite cost")]
    NonFiniteCost {
        /// Endpoint the relationship was read from.
        node: usize,
        /// Opposite endpoint of the relationship.
        neighbor: usize,
    },
    /// A relationship referenced a node outside the graph.
    #[error("relationship references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// The graph is too large for the cluster id domain.
    #[error("node_count {node_count} exceeds the supported maximum of {max}")]
    CapacityExceeded {
        /// The number of nodes in the graph.
        node_count: usize,
        /// The largest supported node count.
        max: u64,
    },
    /// The tightness epsilon must be finite and within `[0, 1)`.
    #[error("tightness epsilon must be finite and within [0, 1) (got {got})")]
    InvalidEpsilon {
        /// The rejected epsilon.
        got: f64,
    },
    /// A prize slice did not cover every node of the graph.
    #[error("{prizes} prizes were supplied for a graph with {node_count} nodes")]
    PrizeCountMismatch {
        /// Number of prizes supplied by the caller.
        prizes: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A caller id list did not cover every node of the graph.
    #[error("{ids} original ids were supplied for a graph with {node_count} nodes")]
    OriginalIdCountMismatch {
        /// Number of ids supplied by the caller.
        ids: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PcstError`] variants.
    enum PcstErrorCode for PcstError {
        /// A node carried a negative prize.
        NegativePrize => NegativePrize { .. } => "PCST_NEGATIVE_PRIZE",
        /// A node carried a NaN or infinite prize.
        NonFinitePrize => NonFinitePrize { .. } => "PCST_NON_FINITE_PRIZE",
        /// A relationship carried a negative cost.
        NegativeCost => NegativeCost { .. } => "PCST_NEGATIVE_COST",
        /// A relationship carried a NaN or infinite cost.
        NonFiniteCost => NonFiniteCost { .. } => "PCST_NON_FINITE_COST",
        /// A relationship referenced a node outside the graph.
        InvalidNodeId => InvalidNodeId { .. } => "PCST_INVALID_NODE_ID",
        /// The graph is too large for the cluster id domain.
        CapacityExceeded => CapacityExceeded { .. } => "PCST_CAPACITY_EXCEEDED",
        /// The tightness epsilon was rejected.
        InvalidEpsilon => InvalidEpsilon { .. } => "PCST_INVALID_EPSILON",
        /// A prize slice did not cover every node of the graph.
        PrizeCountMismatch => PrizeCountMismatch { .. } => "PCST_PRIZE_COUNT_MISMATCH",
        /// A caller id list did not cover every node of the graph.
        OriginalIdCountMismatch => OriginalIdCountMismatch { .. } => "PCST_ORIGINAL_ID_COUNT_MISMATCH",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PcstError>;
