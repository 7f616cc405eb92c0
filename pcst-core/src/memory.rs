//! Pre-flight memory estimation for the solver.
//!
//! Provides a conservative estimate of peak memory consumption so callers can
//! reject oversized graphs before any allocation occurs. The host graph is
//! owned by the caller and is not counted.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Safety multiplier applied to the raw estimate to cover heap
/// fragmentation and transient allocations (1.5×).
const SAFETY_MULTIPLIER_NUMERATOR: u64 = 3;
const SAFETY_MULTIPLIER_DENOMINATOR: u64 = 2;

/// Per-cluster bookkeeping: hierarchy links, birth and deactivation times,
/// prize, spent budget, path-compression shortcut, activity slot, the
/// cluster's heap handle, its published event key and its deadline entry.
const CLUSTER_BYTES: u64 = 176;

/// One pairing-heap node (element, value, offset, child vector) plus the
/// slot that points at it, the part's endpoint and its ticket.
const EDGE_PART_BYTES: u64 = 80;

/// Edge cost plus one entry in the list of tight edges.
const EDGE_BYTES: u64 = 16;

/// Per-node tree and pruning state: adjacency header, degree, parent link,
/// parent cost, subtree value, traversal queue slot, prize and result entry.
const NODE_BYTES: u64 = 128;

/// One `(neighbour, cost)` adjacency entry of the candidate tree.
const ADJACENCY_ENTRY_BYTES: u64 = 16;

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Returns a conservative estimate of peak memory (in bytes) needed to solve
/// a graph with `node_count` nodes and `relationship_count` reported
/// relationships.
///
/// The estimate covers:
///
/// - Cluster state for up to `2n − 1` clusters.
/// - Two heap entries per edge, one for each endpoint.
/// - Edge costs and the list of tight edges.
/// - Candidate tree adjacency (two entries per tree edge, at most `n − 1`
///   edges).
/// - Per-node pruning and result arrays.
///
/// Every relationship is counted as a distinct edge, which overestimates
/// graphs that report each edge from both endpoints. A 1.5× safety
/// multiplier is applied to the raw total.
///
/// # Examples
///
/// ```
/// use pcst_core::estimate_peak_bytes;
///
/// let bytes = estimate_peak_bytes(1_000, 4_000);
/// assert!(bytes > 0, "estimate must be positive for non-empty graphs");
///
/// let zero = estimate_peak_bytes(0, 0);
/// assert_eq!(zero, 0, "empty graph requires no memory");
/// ```
#[must_use]
pub fn estimate_peak_bytes(node_count: usize, relationship_count: usize) -> u64 {
    if node_count == 0 {
        return 0;
    }

    let n = node_count as u64;
    let m = relationship_count as u64;

    let clusters = n
        .saturating_mul(2)
        .saturating_sub(1)
        .saturating_mul(CLUSTER_BYTES);
    let edge_parts = m.saturating_mul(2).saturating_mul(EDGE_PART_BYTES);
    let edges = m.saturating_mul(EDGE_BYTES);
    let adjacency = n
        .saturating_sub(1)
        .saturating_mul(2)
        .saturating_mul(ADJACENCY_ENTRY_BYTES);
    let nodes = n.saturating_mul(NODE_BYTES);

    let subtotal = clusters
        .saturating_add(edge_parts)
        .saturating_add(edges)
        .saturating_add(adjacency)
        .saturating_add(nodes);

    // Apply safety multiplier (3/2 = 1.5×) using integer arithmetic.
    subtotal
        .saturating_mul(SAFETY_MULTIPLIER_NUMERATOR)
        .saturating_div(SAFETY_MULTIPLIER_DENOMINATOR)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Formats a byte count as a human-readable string using binary units.
///
/// Returns values like `"0 B"`, `"1.0 KiB"`, `"2.4 GiB"`. The result uses
/// one decimal place for values of at least 1 KiB.
///
/// # Examples
///
/// ```
/// use pcst_core::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1023), "1023 B");
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1_073_741_824), "1.0 GiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (1 << 40, "TiB"),
        (1 << 30, "GiB"),
        (1 << 20, "MiB"),
        (1 << 10, "KiB"),
    ];

    UNITS
        .iter()
        .find(|(scale, _)| bytes >= *scale)
        .map_or_else(
            || format!("{bytes} B"),
            |(scale, unit)| format!("{:.1} {unit}", bytes as f64 / *scale as f64),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
