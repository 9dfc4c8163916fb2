//! Ordering of the prerequisite graph.
//!
//! Edges run from a prerequisite to the technology that requires it. The
//! catalog is small (tens of nodes) so everything here works on plain
//! index vectors.

use std::collections::VecDeque;

/// Result of ordering the prerequisite graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrerequisiteOrder {
    /// Node indices in dependency order (prerequisites first). Ties are
    /// broken by catalog position.
    pub order: Vec<usize>,
    /// Nodes that lie on a cycle, in catalog order. Empty for a valid graph.
    pub cyclic: Vec<usize>,
}

/// Run Kahn's algorithm over `prerequisites[i]` (the indices node `i` depends on).
///
/// Nodes left over after the forward pass are on a cycle or downstream of
/// one. A reverse pass then peels off the ones with no remaining
/// dependents, leaving only the nodes that actually participate in a cycle.
pub(crate) fn prerequisite_order(prerequisites: &[Vec<usize>]) -> PrerequisiteOrder {
    let n = prerequisites.len();

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for (node, prereqs) in prerequisites.iter().enumerate() {
        for &p in prereqs {
            dependents[p].push(node);
            in_degree[node] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    let mut remaining_in = in_degree;

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &dep in &dependents[node] {
            remaining_in[dep] -= 1;
            if remaining_in[dep] == 0 {
                queue.push_back(dep);
            }
        }
    }

    if order.len() == n {
        return PrerequisiteOrder {
            order,
            cyclic: Vec::new(),
        };
    }

    // Reverse peel over the leftover subgraph.
    let mut leftover: Vec<bool> = remaining_in.iter().map(|&d| d > 0).collect();
    let mut out_degree = vec![0usize; n];
    for node in 0..n {
        if leftover[node] {
            out_degree[node] = dependents[node].iter().filter(|&&d| leftover[d]).count();
        }
    }
    let mut peel: VecDeque<usize> = (0..n).filter(|&i| leftover[i] && out_degree[i] == 0).collect();
    while let Some(node) = peel.pop_front() {
        leftover[node] = false;
        for &p in &prerequisites[node] {
            if leftover[p] {
                out_degree[p] -= 1;
                if out_degree[p] == 0 {
                    peel.push_back(p);
                }
            }
        }
    }

    PrerequisiteOrder {
        order,
        cyclic: (0..n).filter(|&i| leftover[i]).collect(),
    }
}
