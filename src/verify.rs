/* standard use */
use std::sync::atomic::{AtomicUsize, Ordering};

/* crate use */
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/* private use */
use crate::handle::{Edge, Handle};
use crate::haplotype::ThreadIndex;
use crate::mapping::IdentifierMap;
use crate::refpath::ReferencePathIndex;
use crate::store::HandleGraphStore;

/// Build the reverse of `M`: original id -> every handle id in `unfolded` that realizes it,
/// duplicates and (if still present) the original itself (section 4.7).
pub fn build_reverse_mapping(mapping: &IdentifierMap, unfolded: &HandleGraphStore) -> FxHashMap<u64, Vec<u64>> {
    let mut rev: FxHashMap<u64, Vec<u64>> = FxHashMap::default();
    for dup in mapping.first_node()..mapping.next_node() {
        rev.entry(mapping.resolve(dup)).or_default().push(dup);
    }
    for id in unfolded.node_ids() {
        if id < mapping.first_node() {
            rev.entry(id).or_default().push(id);
        }
    }
    rev
}

fn candidates_for(h: Handle, reverse_mapping: &FxHashMap<u64, Vec<u64>>) -> Vec<Handle> {
    match reverse_mapping.get(&h.id()) {
        Some(ids) => ids.iter().map(|&id| Handle::pack(id, h.is_reverse())).collect(),
        None => Vec::new(),
    }
}

/// Check that `walk` can still be realized in `unfolded` by some sequence of duplicate/original
/// handles (section 4.7). Tracks the full frontier of candidate handles consistent with the walk
/// so far; when a position's candidate list collapses to a single handle (regardless of which
/// original source, this is forced project-wide, not merely for the branch being explored), every
/// other branch is dropped in favor of it, which is what keeps this close to linear in `|walk|`
/// for the common case where interior duplicates are not shared across unrelated walks.
pub fn verify_walk(walk: &[Handle], reverse_mapping: &FxHashMap<u64, Vec<u64>>, unfolded: &HandleGraphStore) -> bool {
    if walk.len() < 2 {
        return true;
    }
    let mut frontier = candidates_for(walk[0], reverse_mapping);
    if frontier.is_empty() {
        return false;
    }

    for &next in &walk[1..] {
        let next_candidates = candidates_for(next, reverse_mapping);
        if next_candidates.is_empty() {
            return false;
        }
        if next_candidates.len() == 1 {
            let only = next_candidates[0];
            if !frontier.iter().any(|&cur| unfolded.has_edge(Edge(cur, only))) {
                return false;
            }
            frontier = vec![only];
            continue;
        }

        let mut next_frontier = Vec::new();
        for &cur in &frontier {
            for &cand in &next_candidates {
                if unfolded.has_edge(Edge(cur, cand)) {
                    next_frontier.push(cand);
                }
            }
        }
        next_frontier.sort_unstable_by_key(Handle::as_integer);
        next_frontier.dedup();
        if next_frontier.is_empty() {
            return false;
        }
        frontier = next_frontier;
    }
    true
}

/// Verify every reference path in `x` and every haplotype thread in `h` against `unfolded`,
/// checked concurrently across a rayon pool (section 4.7/5). Returns the number of walks that
/// could not be realized.
pub fn verify(unfolded: &HandleGraphStore, mapping: &IdentifierMap, x: &ReferencePathIndex, h: &ThreadIndex) -> usize {
    let reverse_mapping = build_reverse_mapping(mapping, unfolded);
    let failures = AtomicUsize::new(0);

    let x_walks: Vec<&[Handle]> = (0..x.path_count()).map(|i| x.path_handles(i)).collect();
    x_walks.par_iter().for_each(|w| {
        if !verify_walk(w, &reverse_mapping, unfolded) {
            log::warn!("reference walk of length {} failed verification", w.len());
            failures.fetch_add(1, Ordering::Relaxed);
        }
    });

    h.threads().par_iter().for_each(|w| {
        if !verify_walk(w, &reverse_mapping, unfolded) {
            log::warn!("haplotype thread of length {} failed verification", w.len());
            failures.fetch_add(1, Ordering::Relaxed);
        }
    });

    failures.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_walk_realizable_through_a_single_duplicate_verifies() {
        let mut mapping = IdentifierMap::new(100);
        let dup = mapping.insert(2).unwrap();

        let mut unfolded = HandleGraphStore::new();
        unfolded.add_node(1, b"A");
        unfolded.add_node(dup, b"C");
        unfolded.add_node(3, b"G");
        unfolded.add_edge(Edge(Handle::pack(1, false), Handle::pack(dup, false)));
        unfolded.add_edge(Edge(Handle::pack(dup, false), Handle::pack(3, false)));

        let rev = build_reverse_mapping(&mapping, &unfolded);
        let walk = vec![Handle::pack(1, false), Handle::pack(2, false), Handle::pack(3, false)];
        assert!(verify_walk(&walk, &rev, &unfolded));
    }

    #[test]
    fn a_missing_edge_fails_verification() {
        let mapping = IdentifierMap::new(100);
        let mut unfolded = HandleGraphStore::new();
        unfolded.add_node(1, b"A");
        unfolded.add_node(3, b"G");
        // no edge between 1 and 3

        let rev = build_reverse_mapping(&mapping, &unfolded);
        let walk = vec![Handle::pack(1, false), Handle::pack(3, false)];
        assert!(!verify_walk(&walk, &rev, &unfolded));
    }
}
