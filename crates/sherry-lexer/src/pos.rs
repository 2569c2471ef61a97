use std::fmt;
use std::ops::Add;

/// A byte offset into the lexer input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(usize);

impl Pos {
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    pub const fn offset(self) -> usize {
        self.0
    }
}

impl Add<usize> for Pos {
    type Output = Pos;

    fn add(self, len: usize) -> Pos {
        Pos(self.0 + len)
    }
}

impl From<Pos> for usize {
    fn from(pos: Pos) -> usize {
        pos.0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_advances_offset() {
        assert_eq!(Pos::new(3) + 4, Pos::new(7));
        assert_eq!(usize::from(Pos::new(9)), 9);
    }

    #[test]
    fn displays_bare_offset() {
        assert_eq!(Pos::new(42).to_string(), "42");
    }
}
