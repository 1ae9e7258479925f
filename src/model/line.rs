//! Line items: the domain value backing one row of the document.

/// A row value that round-trips to and from a raw string.
///
/// The store owns items exclusively; the presentation layer only ever gets
/// read access or performs a full replacement through the edit engine.
/// `from_raw` may reject a raw value (e.g. a statement type that refuses
/// malformed input) by returning `None`; rejected values degrade to no-ops
/// in the edit engine.
pub trait LineItem: Clone {
    fn from_raw(raw: &str) -> Option<Self>;
    fn raw_value(&self) -> String;
}

/// The trivial line item: any string is accepted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainLine(pub String);

impl LineItem for PlainLine {
    fn from_raw(raw: &str) -> Option<Self> {
        Some(Self(raw.to_string()))
    }

    fn raw_value(&self) -> String {
        self.0.clone()
    }
}

impl From<&str> for PlainLine {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_round_trip() {
        let line = PlainLine::from_raw("participant p1").expect("accepts any string");
        assert_eq!(line.raw_value(), "participant p1");
    }
}
