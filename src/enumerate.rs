/* crate use */
use rustc_hash::FxHashSet;

/* private use */
use crate::handle::{Edge, Handle};
use crate::haplotype::HaplotypeIndex;
use crate::refpath::ReferencePathIndex;
use crate::store::HandleGraphStore;

/// Enumerate border-to-border walks through `component` that are witnessed by a reference path
/// occurrence of `from_id` (section 4.2). Runs once per occurrence, in both path directions,
/// stopping as soon as an edge required by the walk is absent from `component` or the walk has
/// reached another border node.
pub fn enumerate_reference_walks(
    component: &HandleGraphStore,
    from_id: u64,
    border: &FxHashSet<u64>,
    x: &ReferencePathIndex,
) -> Vec<Vec<Handle>> {
    let mut walks = Vec::new();
    for &(path_index, rank) in x.occurrences(from_id) {
        let handles = x.path_handles(path_index);

        let mut forward = vec![handles[rank]];
        let mut i = rank;
        while i + 1 < handles.len() {
            let next = handles[i + 1];
            if !component.has_edge(Edge(forward[forward.len() - 1], next)) {
                break;
            }
            forward.push(next);
            i += 1;
            if border.contains(&next.id()) {
                break;
            }
        }
        if forward.len() >= 2 {
            walks.push(forward);
        }

        let mut backward = vec![handles[rank].flip()];
        let mut i = rank;
        while i > 0 {
            let next = handles[i - 1].flip();
            if !component.has_edge(Edge(backward[backward.len() - 1], next)) {
                break;
            }
            backward.push(next);
            i -= 1;
            if border.contains(&next.id()) {
                break;
            }
        }
        if backward.len() >= 2 {
            walks.push(backward);
        }
    }
    walks
}

/// Enumerate border-to-border walks through `component` that are witnessed by a haplotype
/// thread starting (in either orientation) at `from_id` (section 4.3). An explicit stack holds
/// `(search state, walk so far)`; a walk is emitted either when it reaches a border node of
/// length ≥ 2, or — per section 4.3's "emit the current walk as a maximal walk" — when no
/// extension keeps any thread alive and the walk has already reached length ≥ 2.
pub fn enumerate_haplotype_walks<H: HaplotypeIndex>(
    component: &HandleGraphStore,
    from_id: u64,
    border: &FxHashSet<u64>,
    h: &H,
) -> Vec<Vec<Handle>> {
    let mut walks = Vec::new();
    let mut stack: Vec<(H::State, Vec<Handle>)> = Vec::new();

    for reverse in [false, true] {
        let start = Handle::pack(from_id, reverse);
        let state = h.find(start);
        if !h.is_empty(&state) {
            stack.push((state, vec![start]));
        }
    }

    while let Some((state, walk)) = stack.pop() {
        let head = *walk.last().unwrap();
        if walk.len() >= 2 && border.contains(&head.id()) {
            walks.push(walk);
            continue;
        }

        let mut extended = false;
        for next in component.successors(head) {
            let next_state = h.extend(&state, next);
            if !h.is_empty(&next_state) {
                let mut extended_walk = walk.clone();
                extended_walk.push(next);
                stack.push((next_state, extended_walk));
                extended = true;
            }
        }
        if !extended && walk.len() >= 2 {
            walks.push(walk);
        }
    }
    walks
}
