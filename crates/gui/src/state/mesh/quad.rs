//! Quad face type

use std::ops::Index;

/// A quad face: four distinct vertex indices.
///
/// Winding determines the normal direction, `(v1 - v0) x (v2 - v1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad([usize; 4]);

impl Quad {
    /// Create a quad. Panics if an index repeats; a malformed face is a
    /// programming error, not a runtime condition.
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        match Self::try_new([a, b, c, d]) {
            Some(quad) => quad,
            None => panic!("degenerate quad: repeated vertex index in [{a}, {b}, {c}, {d}]"),
        }
    }

    /// Checked constructor; `None` if any index repeats
    pub fn try_new(indices: [usize; 4]) -> Option<Self> {
        for i in 0..4 {
            if indices[i + 1..].contains(&indices[i]) {
                return None;
            }
        }
        Some(Self(indices))
    }

    pub fn indices(&self) -> [usize; 4] {
        self.0
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.0.contains(&vertex)
    }

    /// Directed edges in winding order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..4).map(move |i| (self.0[i], self.0[(i + 1) % 4]))
    }

    pub fn max_index(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl Index<usize> for Quad {
    type Output = usize;

    fn index(&self, corner: usize) -> &usize {
        &self.0[corner]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_repeats() {
        assert!(Quad::try_new([0, 1, 2, 3]).is_some());
        assert!(Quad::try_new([0, 1, 2, 0]).is_none());
        assert!(Quad::try_new([4, 4, 5, 6]).is_none());
    }

    #[test]
    #[should_panic(expected = "degenerate quad")]
    fn test_new_panics_on_repeat() {
        Quad::new(1, 2, 2, 3);
    }

    #[test]
    fn test_edges_wrap_around() {
        let quad = Quad::new(4, 5, 7, 6);
        let edges: Vec<_> = quad.edges().collect();
        assert_eq!(edges, vec![(4, 5), (5, 7), (7, 6), (6, 4)]);
        assert_eq!(quad[2], 7);
        assert_eq!(quad.max_index(), 7);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let quad = Quad::new(0, 1, 2, 3);
        let _ = quad[4];
    }
}
