//! Composite keys referencing points by index.
//!
//! Lines and angles are canonicalised on construction, so two equivalent
//! constructions always produce equal keys. Circles are directional.

/// Unordered point pair; the smaller index is stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    a: usize,
    b: usize,
}

impl LineKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a < b { Self { a, b } } else { Self { a: b, b: a } }
    }

    pub fn first(&self) -> usize {
        self.a
    }

    pub fn second(&self) -> usize {
        self.b
    }

    pub fn contains(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// The endpoint opposite to `index`, if `index` is an endpoint.
    pub fn other(&self, index: usize) -> Option<usize> {
        if self.a == index {
            Some(self.b)
        } else if self.b == index {
            Some(self.a)
        } else {
            None
        }
    }

    /// Substitutes `new` for `old`, re-canonicalising.
    pub fn renamed(&self, old: usize, new: usize) -> Self {
        match self.other(old) {
            Some(other) => Self::new(new, other),
            None => *self,
        }
    }
}

/// Angle ∠A-B-C with the vertex in the middle; the smaller endpoint comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AngleKey {
    first: usize,
    vertex: usize,
    last: usize,
}

impl AngleKey {
    pub fn new(a: usize, vertex: usize, c: usize) -> Self {
        if a < c {
            Self { first: a, vertex, last: c }
        } else {
            Self { first: c, vertex, last: a }
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn vertex(&self) -> usize {
        self.vertex
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn contains(&self, index: usize) -> bool {
        self.first == index || self.vertex == index || self.last == index
    }

    /// The two segments the angle is built on.
    pub fn arms(&self) -> (LineKey, LineKey) {
        (
            LineKey::new(self.first, self.vertex),
            LineKey::new(self.vertex, self.last),
        )
    }

    pub fn renamed(&self, old: usize, new: usize) -> Self {
        if self.vertex == old {
            Self::new(self.first, new, self.last)
        } else if self.first == old {
            Self::new(new, self.vertex, self.last)
        } else if self.last == old {
            Self::new(self.first, self.vertex, new)
        } else {
            *self
        }
    }
}

/// Circle around `center` passing through `rim`. Order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircleKey {
    pub center: usize,
    pub rim: usize,
}

impl CircleKey {
    pub fn new(center: usize, rim: usize) -> Self {
        Self { center, rim }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.center == index || self.rim == index
    }

    pub fn renamed(&self, old: usize, new: usize) -> Self {
        Self {
            center: if self.center == old { new } else { self.center },
            rim: if self.rim == old { new } else { self.rim },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_key_is_order_independent() {
        for (a, b) in [(1, 2), (7, 3), (10, 11), (0, 42)] {
            assert_eq!(LineKey::new(a, b), LineKey::new(b, a));
            let key = LineKey::new(a, b);
            assert!(key.first() < key.second());
        }
    }

    #[test]
    fn angle_key_keeps_vertex_in_the_middle() {
        for (a, b, c) in [(2, 1, 3), (9, 4, 5), (1, 7, 8)] {
            let forward = AngleKey::new(a, b, c);
            let backward = AngleKey::new(c, b, a);
            assert_eq!(forward, backward);
            assert_eq!(forward.vertex(), b);
            assert!(forward.first() < forward.last());
        }
    }

    #[test]
    fn renaming_recanonicalises() {
        let line = LineKey::new(3, 5);
        assert_eq!(line.renamed(3, 9), LineKey::new(5, 9));
        assert_eq!(line.renamed(4, 9), line);

        let angle = AngleKey::new(2, 3, 4);
        assert_eq!(angle.renamed(2, 8), AngleKey::new(4, 3, 8));
        assert_eq!(angle.renamed(2, 8).first(), 4);
        assert_eq!(angle.renamed(3, 8).vertex(), 8);

        let circle = CircleKey::new(3, 4);
        assert_eq!(circle.renamed(4, 1), CircleKey::new(3, 1));
        assert_eq!(circle.renamed(3, 1), CircleKey::new(1, 4));
    }

    #[test]
    fn angle_arms() {
        let (left, right) = AngleKey::new(3, 1, 2).arms();
        assert_eq!(left, LineKey::new(1, 2));
        assert_eq!(right, LineKey::new(1, 3));
    }
}
