/* standard use */
use std::fmt;

/// An oriented node handle, packed as `2*id + reverse` (section 3).
///
/// The packing makes reverse-complement a single bit flip: `h.flip().as_integer() ==
/// h.as_integer() ^ 1`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Handle(u64);

impl Handle {
    pub fn pack(id: u64, reverse: bool) -> Handle {
        Handle((id << 1) | (reverse as u64))
    }

    pub fn from_integer(packed: u64) -> Handle {
        Handle(packed)
    }

    pub fn as_integer(&self) -> u64 {
        self.0
    }

    pub fn id(&self) -> u64 {
        self.0 >> 1
    }

    pub fn is_reverse(&self) -> bool {
        self.0 & 1 == 1
    }

    /// The reverse complement: same id, flipped orientation.
    pub fn flip(&self) -> Handle {
        Handle(self.0 ^ 1)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&format!(
            "{}{}",
            if self.is_reverse() { '<' } else { '>' },
            self.id()
        ))
    }
}

/// An ordered pair of oriented handles. Membership in a `GraphStore` is bidirectional under
/// canonical flipping, by convention of the graph store (section 3).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Edge(pub Handle, pub Handle);

impl Edge {
    /// The edge as it would be recorded when traversed in the opposite direction.
    pub fn flip(&self) -> Edge {
        Edge(self.1.flip(), self.0.flip())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_fmt(format_args!("{}{}", self.0, self.1))
    }
}

/// Reverse-complement a walk: reverse the handle sequence and flip every handle's orientation.
pub fn reverse_complement(walk: &[Handle]) -> Vec<Handle> {
    walk.iter().rev().map(Handle::flip).collect()
}

/// The lexicographically smaller of `walk` and its reverse complement (section 3/4.4).
pub fn canonical_orientation(walk: Vec<Handle>) -> Vec<Handle> {
    let rc = reverse_complement(&walk);
    if rc < walk {
        rc
    } else {
        walk
    }
}
