/* standard use */
use std::io::{self, Read, Write};

/// Persistent duplicate → original identifier map (M, section 3/6).
///
/// `M` is a plain owned value with explicit load/save, not a process-wide singleton (section 9):
/// callers thread one `IdentifierMap` through a sequence of `unfold` invocations and persist it
/// between runs if they want duplicate ids to remain stable.
#[derive(Clone, Debug)]
pub struct IdentifierMap {
    first_node: u64,
    next_node: u64,
    mapping: Vec<u64>,
}

impl IdentifierMap {
    /// A fresh, empty map. Duplicate ids start at `first_node`, which callers should set above
    /// the highest node id already present in G.
    pub fn new(first_node: u64) -> IdentifierMap {
        IdentifierMap {
            first_node,
            next_node: first_node,
            mapping: Vec::new(),
        }
    }

    pub fn first_node(&self) -> u64 {
        self.first_node
    }

    pub fn next_node(&self) -> u64 {
        self.next_node
    }

    /// Number of duplicate ids allocated so far.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Allocate a fresh duplicate id that de-aliases `original_id`. Returns the new id.
    ///
    /// Fatal (section 7): `next_node` overflowing `u64` is a programmer error, not something a
    /// real input can trigger, so it is reported rather than silently wrapping.
    pub fn insert(&mut self, original_id: u64) -> crate::error::Result<u64> {
        let dup = self.next_node;
        self.next_node = self
            .next_node
            .checked_add(1)
            .ok_or(crate::error::Error::Overflow)?;
        self.mapping.push(original_id);
        Ok(dup)
    }

    /// `M(x)`: identity below `first_node`, otherwise the recorded original id.
    pub fn resolve(&self, id: u64) -> u64 {
        if id < self.first_node {
            id
        } else {
            self.mapping[(id - self.first_node) as usize]
        }
    }

    /// Binary serialization per section 6: `{first_node, next_node, mapping_size}` header
    /// followed by `mapping_size` little-endian `u64` entries.
    pub fn save<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.first_node.to_le_bytes())?;
        out.write_all(&self.next_node.to_le_bytes())?;
        out.write_all(&(self.mapping.len() as u64).to_le_bytes())?;
        for &original_id in &self.mapping {
            out.write_all(&original_id.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn load<R: Read>(input: &mut R) -> io::Result<IdentifierMap> {
        let mut buf = [0u8; 8];
        input.read_exact(&mut buf)?;
        let first_node = u64::from_le_bytes(buf);
        input.read_exact(&mut buf)?;
        let next_node = u64::from_le_bytes(buf);
        input.read_exact(&mut buf)?;
        let mapping_size = u64::from_le_bytes(buf) as usize;

        let mut mapping = Vec::with_capacity(mapping_size);
        for _ in 0..mapping_size {
            input.read_exact(&mut buf)?;
            mapping.push(u64::from_le_bytes(buf));
        }
        Ok(IdentifierMap {
            first_node,
            next_node,
            mapping,
        })
    }
}

/// Load `M` from `path`, logging and falling back to a fresh map rooted at `first_node` on any
/// I/O error (section 7: M load/save errors are logged, non-fatal, caller continues).
pub fn load_or_new(path: &str, first_node: u64) -> IdentifierMap {
    match std::fs::File::open(path) {
        Ok(mut f) => match IdentifierMap::load(&mut f) {
            Ok(m) => {
                log::info!("loaded identifier map {} ({} duplicates)", path, m.len());
                m
            }
            Err(e) => {
                log::error!("failed to parse identifier map {}: {}", path, e);
                IdentifierMap::new(first_node)
            }
        },
        Err(e) => {
            log::error!("failed to open identifier map {}: {}", path, e);
            IdentifierMap::new(first_node)
        }
    }
}

/// Save `M` to `path`, logging (not failing) on any I/O error.
pub fn save_or_log(m: &IdentifierMap, path: &str) {
    match std::fs::File::create(path) {
        Ok(mut f) => {
            if let Err(e) = m.save(&mut f) {
                log::error!("failed to write identifier map {}: {}", path, e);
            }
        }
        Err(e) => log::error!("failed to create identifier map {}: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_allocates_monotonically() {
        let mut m = IdentifierMap::new(100);
        let d0 = m.insert(3).unwrap();
        let d1 = m.insert(7).unwrap();
        assert_eq!(d0, 100);
        assert_eq!(d1, 101);
        assert_eq!(m.next_node(), 102);
        assert_eq!(m.resolve(d0), 3);
        assert_eq!(m.resolve(d1), 7);
    }

    #[test]
    fn resolve_is_identity_below_first_node() {
        let m = IdentifierMap::new(50);
        assert_eq!(m.resolve(0), 0);
        assert_eq!(m.resolve(49), 49);
    }

    #[test]
    fn save_load_roundtrip() {
        let mut m = IdentifierMap::new(10);
        m.insert(1).unwrap();
        m.insert(2).unwrap();
        m.insert(1).unwrap();

        let mut buf = Vec::new();
        m.save(&mut buf).unwrap();

        let mut cursor = io::Cursor::new(buf);
        let loaded = IdentifierMap::load(&mut cursor).unwrap();
        assert_eq!(loaded.first_node(), m.first_node());
        assert_eq!(loaded.next_node(), m.next_node());
        assert_eq!(loaded.len(), m.len());
        for d in m.first_node()..m.next_node() {
            assert_eq!(loaded.resolve(d), m.resolve(d));
        }
    }
}
