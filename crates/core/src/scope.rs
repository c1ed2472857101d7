//! Lexical scope paths.
//!
//! A path always starts at [`Segment::Global`]. `if` and `while` blocks get a
//! segment numbered by a file-wide counter, so no two blocks share a path;
//! method bodies get a segment named after the method. Visibility is a
//! segment-wise prefix test, so `global.if1` is not a prefix of `global.if10`.

use serde::{Serialize, Serializer};
use std::fmt;

pub const GLOBAL: &str = "global";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Global,
    If(u32),
    While(u32),
    Method(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Global => f.write_str(GLOBAL),
            Segment::If(n) => write!(f, "if{}", n),
            Segment::While(n) => write!(f, "while{}", n),
            Segment::Method(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopePath {
    segments: Vec<Segment>,
}

impl Default for ScopePath {
    fn default() -> Self {
        ScopePath::global()
    }
}

impl ScopePath {
    pub fn global() -> Self {
        ScopePath {
            segments: vec![Segment::Global],
        }
    }

    pub fn is_global(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A new path one level deeper.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        ScopePath { segments }
    }

    /// Drop the innermost segment. Returns `None` at global scope.
    pub fn pop(&mut self) -> Option<Segment> {
        if self.is_global() {
            return None;
        }
        self.segments.pop()
    }

    /// True iff `self` encloses `other` or is `other`.
    pub fn is_prefix_of(&self, other: &ScopePath) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl Serialize for ScopePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_dotted_path() {
        let p = ScopePath::global()
            .child(Segment::Method("foo".into()))
            .child(Segment::If(3));
        assert_eq!(p.to_string(), "global.foo.if3");
        assert_eq!(p.depth(), 2);
    }

    #[test]
    fn prefix_is_segment_wise() {
        let if1 = ScopePath::global().child(Segment::If(1));
        let if10 = ScopePath::global().child(Segment::If(10));
        assert!(!if1.is_prefix_of(&if10));
        assert!(ScopePath::global().is_prefix_of(&if10));
        assert!(if1.is_prefix_of(&if1));
        assert!(!if10.is_prefix_of(&ScopePath::global()));
    }

    #[test]
    fn pop_stops_at_global() {
        let mut p = ScopePath::global().child(Segment::While(1));
        assert_eq!(p.pop(), Some(Segment::While(1)));
        assert!(p.is_global());
        assert_eq!(p.pop(), None);
    }

    #[test]
    fn serializes_as_text() {
        let p = ScopePath::global().child(Segment::While(2));
        assert_eq!(serde_json::to_value(&p).unwrap(), "global.while2");
    }
}
