/* standard use */
use std::fs;

/* crate use */
use rustc_hash::FxHashSet;

/* private use */
use crate::error::{Error, Result};
use crate::handle::{Edge, Handle};

/// Node id reserved as the haplotype thread end-marker (section 3/4.8). Never allocated to a
/// real segment, never emitted as a handle: a thread walk simply ends where the marker would
/// have been.
const END_MARKER: u64 = 0;

/// Abstract haplotype-thread collaborator (H, section 1), modeled on a GBWT-style search state:
/// `find` seeds a search at a starting handle, `extend` narrows it by one more step, and
/// `is_empty` reports when no thread matches the walk built so far. Kept generic so the
/// border-to-border enumerator (section 4.3) can run the same traversal against a stub in tests.
pub trait HaplotypeIndex {
    type State: Clone;

    fn find(&self, h: Handle) -> Self::State;
    fn extend(&self, state: &Self::State, next: Handle) -> Self::State;
    fn is_empty(&self, state: &Self::State) -> bool;
}

/// Concrete haplotype-thread index: a flat list of threads, each a walk of oriented handles,
/// searched by simultaneously tracking every `(thread, position)` pair consistent with the
/// handles consumed so far. The thread *file* format reuses the teacher's walk-string notation
/// (`>1>2<3...`), one thread per line, name and walk separated by a tab.
pub struct ThreadIndex {
    threads: Vec<Vec<Handle>>,
}

#[derive(Clone, Debug, Default)]
pub struct ThreadState {
    candidates: Vec<(usize, usize)>,
}

impl ThreadIndex {
    pub fn load(path: &str) -> Result<ThreadIndex> {
        let text = fs::read_to_string(path)?;
        let mut threads = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            threads.push(parse_thread_line(line)?);
        }
        log::info!("loaded haplotype index {} ({} threads)", path, threads.len());
        Ok(ThreadIndex { threads })
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    pub fn threads(&self) -> &[Vec<Handle>] {
        &self.threads
    }

    #[cfg(test)]
    pub(crate) fn load_for_test(threads: Vec<Vec<Handle>>) -> ThreadIndex {
        ThreadIndex { threads }
    }

    /// Every consecutive `(u, v)` pair across all threads (section 4.1's complement-component
    /// scan: "for every outgoing edge of every oriented handle enumerated by H").
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for t in &self.threads {
            for w in t.windows(2) {
                let e = Edge(w[0], w[1]);
                if seen.insert((e.0.as_integer(), e.1.as_integer())) {
                    out.push(e);
                }
            }
        }
        out
    }
}

impl HaplotypeIndex for ThreadIndex {
    type State = ThreadState;

    /// Every position, in any thread, where `h` occurs — not just thread starts. A border node
    /// can sit in the interior of a haplotype thread, and a search must be able to resume there
    /// (this is the reason a full-text, suffix-style index is used rather than a simple prefix
    /// lookup keyed on thread starts).
    fn find(&self, h: Handle) -> ThreadState {
        let mut candidates = Vec::new();
        for (i, t) in self.threads.iter().enumerate() {
            for (pos, &handle) in t.iter().enumerate() {
                if handle == h {
                    candidates.push((i, pos));
                }
            }
        }
        ThreadState { candidates }
    }

    fn extend(&self, state: &ThreadState, next: Handle) -> ThreadState {
        let candidates = state
            .candidates
            .iter()
            .filter_map(|&(i, pos)| {
                let t = &self.threads[i];
                let np = pos + 1;
                if t.get(np) == Some(&next) {
                    Some((i, np))
                } else {
                    None
                }
            })
            .collect();
        ThreadState { candidates }
    }

    fn is_empty(&self, state: &ThreadState) -> bool {
        state.candidates.is_empty()
    }
}

fn parse_thread_line(line: &str) -> Result<Vec<Handle>> {
    let body = match line.find('\t') {
        Some(i) => &line[i + 1..],
        None => line,
    };
    let mut handles = Vec::new();
    let mut token = String::new();
    for c in body.chars() {
        if (c == '>' || c == '<') && !token.is_empty() {
            push_token(&mut handles, &token)?;
            token.clear();
        }
        token.push(c);
    }
    if !token.is_empty() {
        push_token(&mut handles, &token)?;
    }
    Ok(handles)
}

fn push_token(handles: &mut Vec<Handle>, token: &str) -> Result<()> {
    let reverse = match token.chars().next() {
        Some('>') => false,
        Some('<') => true,
        _ => return Err(Error::Gfa(format!("malformed walk token: {}", token))),
    };
    let id: u64 = token[1..]
        .parse()
        .map_err(|_| Error::Gfa(format!("malformed walk token: {}", token)))?;
    if id != END_MARKER {
        handles.push(Handle::pack(id, reverse));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_walk_notation_and_strips_end_marker() {
        let w = parse_thread_line("t0\t>1>2<3>0").unwrap();
        assert_eq!(
            w,
            vec![
                Handle::pack(1, false),
                Handle::pack(2, false),
                Handle::pack(3, true),
            ]
        );
    }

    #[test]
    fn find_and_extend_narrow_candidates() {
        let idx = ThreadIndex {
            threads: vec![
                vec![Handle::pack(1, false), Handle::pack(2, false), Handle::pack(3, false)],
                vec![Handle::pack(1, false), Handle::pack(4, false)],
            ],
        };
        let s0 = idx.find(Handle::pack(1, false));
        assert!(!idx.is_empty(&s0));
        let s1 = idx.extend(&s0, Handle::pack(2, false));
        assert_eq!(s1.candidates, vec![(0, 1)]);
        let s2 = idx.extend(&s1, Handle::pack(9, false));
        assert!(idx.is_empty(&s2));
    }

    #[test]
    fn edges_deduplicates_across_threads() {
        let idx = ThreadIndex {
            threads: vec![
                vec![Handle::pack(1, false), Handle::pack(2, false)],
                vec![Handle::pack(1, false), Handle::pack(2, false)],
            ],
        };
        assert_eq!(idx.edges().len(), 1);
    }
}
