/* crate use */
use rustc_hash::{FxHashMap, FxHashSet};

/* private use */
use crate::error::Result;
use crate::handle::{canonical_orientation, Edge, Handle};
use crate::mapping::IdentifierMap;

/// Prefix trie P, suffix trie S, and crossing-edge set C (section 4.4).
///
/// A walk is canonicalized, split at its midpoint, and folded into whichever of P or S already
/// has a matching prefix/suffix: two walks sharing a run of leading (or trailing) handles end up
/// sharing the same duplicate ids for that run, merging at the point they diverge.
pub struct TrieDuplicator<'m> {
    mapping: &'m mut IdentifierMap,
    prefix: FxHashMap<(Handle, Handle), Handle>,
    suffix: FxHashMap<(Handle, Handle), Handle>,
    crossing: FxHashSet<(Handle, Handle)>,
}

impl<'m> TrieDuplicator<'m> {
    pub fn new(mapping: &'m mut IdentifierMap) -> TrieDuplicator<'m> {
        TrieDuplicator {
            mapping,
            prefix: FxHashMap::default(),
            suffix: FxHashMap::default(),
            crossing: FxHashSet::default(),
        }
    }

    /// Fold `walk` into the tries (section 4.4). No-op for walks shorter than a border-to-border
    /// crossing (length < 2).
    pub fn insert_walk(&mut self, walk: Vec<Handle>) -> Result<()> {
        if walk.len() < 2 {
            return Ok(());
        }
        let walk = canonical_orientation(walk);
        let len = walk.len();
        let mid = (len + 1) / 2;

        let mut from = walk[0];
        for i in 1..mid {
            let key = (from, walk[i]);
            from = match self.prefix.get(&key) {
                Some(&dup) => dup,
                None => {
                    let dup_id = self.mapping.insert(walk[i].id())?;
                    let dup = Handle::pack(dup_id, walk[i].is_reverse());
                    self.prefix.insert(key, dup);
                    dup
                }
            };
        }
        let prefix_tail = from;

        let mut to = walk[len - 1];
        for i in (mid..=len.saturating_sub(2)).rev() {
            let key = (walk[i], to);
            to = match self.suffix.get(&key) {
                Some(&dup) => dup,
                None => {
                    let dup_id = self.mapping.insert(walk[i].id())?;
                    let dup = Handle::pack(dup_id, walk[i].is_reverse());
                    self.suffix.insert(key, dup);
                    dup
                }
            };
        }
        let suffix_head = to;

        self.crossing.insert((prefix_tail, suffix_head));
        Ok(())
    }

    /// Every edge synthesized across the prefix trie, the suffix trie, and the crossing set
    /// (section 4.5's "Assembler"): `from -> duplicate_of(walk[i])` for prefix entries,
    /// `duplicate_of(walk[i]) -> to` for suffix entries, and `prefix_tail -> suffix_head` for
    /// crossings.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.prefix.len() + self.suffix.len() + self.crossing.len());
        for (&(from, _orig), &dup) in self.prefix.iter() {
            edges.push(Edge(from, dup));
        }
        for (&(_orig, to), &dup) in self.suffix.iter() {
            edges.push(Edge(dup, to));
        }
        for &(prefix_tail, suffix_head) in self.crossing.iter() {
            edges.push(Edge(prefix_tail, suffix_head));
        }
        edges
    }

    /// Every duplicate handle created so far, paired with the original sequence id it stands in
    /// for (needed by the Assembler to fetch sequence data for new nodes).
    pub fn duplicate_origins(&self) -> Vec<(Handle, u64)> {
        let mut out = Vec::new();
        for (&(_from, orig), &dup) in self.prefix.iter() {
            out.push((dup, orig.id()));
        }
        for (&(orig, _to), &dup) in self.suffix.iter() {
            out.push((dup, orig.id()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_two_walk_needs_no_duplicates() {
        let mut m = IdentifierMap::new(100);
        let mut t = TrieDuplicator::new(&mut m);
        t.insert_walk(vec![Handle::pack(1, false), Handle::pack(2, false)])
            .unwrap();
        assert!(m.is_empty());
        assert_eq!(t.edges(), vec![Edge(Handle::pack(1, false), Handle::pack(2, false))]);
    }

    #[test]
    fn length_three_walk_allocates_one_interior_duplicate() {
        let mut m = IdentifierMap::new(100);
        let mut t = TrieDuplicator::new(&mut m);
        t.insert_walk(vec![
            Handle::pack(1, false),
            Handle::pack(2, false),
            Handle::pack(3, false),
        ])
        .unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.resolve(100), 2);
        let edges = t.edges();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&Edge(Handle::pack(1, false), Handle::pack(100, false))));
        assert!(edges.contains(&Edge(Handle::pack(100, false), Handle::pack(3, false))));
    }

    #[test]
    fn shared_prefix_reuses_duplicate_ids() {
        let mut m = IdentifierMap::new(100);
        let mut t = TrieDuplicator::new(&mut m);
        t.insert_walk(vec![
            Handle::pack(1, false),
            Handle::pack(2, false),
            Handle::pack(3, false),
            Handle::pack(4, false),
        ])
        .unwrap();
        let before = m.len();
        t.insert_walk(vec![
            Handle::pack(1, false),
            Handle::pack(2, false),
            Handle::pack(5, false),
            Handle::pack(6, false),
        ])
        .unwrap();
        // both walks share the prefix edge (1 -> dup(2)); only the divergent tail allocates more.
        assert!(m.len() > before);
    }

    #[test]
    fn identical_walk_inserted_twice_allocates_once() {
        let mut m = IdentifierMap::new(100);
        let mut t = TrieDuplicator::new(&mut m);
        let w = vec![Handle::pack(1, false), Handle::pack(2, false), Handle::pack(3, false)];
        t.insert_walk(w.clone()).unwrap();
        let count = m.len();
        t.insert_walk(w).unwrap();
        assert_eq!(m.len(), count);
    }
}
