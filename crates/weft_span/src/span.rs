use std::{fmt, ops::Range};

/// A half-open byte range into a source file. The file itself is identified
/// separately (diagnostics pair a span with a file id).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Span {
        assert!(end >= start, "end ({}) must be greater than or equal to start ({})", end, start);

        Span { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        use std::cmp::{max, min};

        Span::new(min(self.start, other.start), max(self.end, other.end))
    }

    pub fn start(self) -> u32 {
        self.start
    }

    pub fn end(self) -> u32 {
        self.end
    }

    pub fn range(self) -> Range<usize> {
        self.into()
    }

    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    pub fn length(self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_dummy(self) -> bool {
        self == Span::DUMMY
    }
}

impl Default for Span {
    fn default() -> Span {
        Span::DUMMY
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{start}, {end})", start = self.start, end = self.end)
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Span {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start as usize..span.end as usize
    }
}
