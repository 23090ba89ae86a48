//! Quote balance scanning for free-text tag values.

/// Quote character kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl QuoteKind {
    fn of(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Counted quote characters in a value.
///
/// Quotes preceded by `\` are not counted. While inside a span opened by
/// one kind, quotes of the other kind are literal text and not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteBalance {
    /// Number of counted `'`.
    pub single: usize,
    /// Number of counted `"`.
    pub double: usize,
}

impl QuoteBalance {
    /// Scans `value` character by character.
    #[must_use]
    pub fn scan(value: &str) -> Self {
        let mut balance = Self::default();
        let mut inside: Option<QuoteKind> = None;
        let mut escaped = false;

        for c in value.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            if c == '\\' {
                escaped = true;
                continue;
            }
            let Some(kind) = QuoteKind::of(c) else {
                continue;
            };
            match inside {
                None => {
                    inside = Some(kind);
                    balance.bump(kind);
                }
                Some(open) if open == kind => {
                    inside = None;
                    balance.bump(kind);
                }
                Some(_) => {}
            }
        }

        balance
    }

    fn bump(&mut self, kind: QuoteKind) {
        match kind {
            QuoteKind::Single => self.single += 1,
            QuoteKind::Double => self.double += 1,
        }
    }

    /// Both counts are even.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.single % 2 == 0 && self.double % 2 == 0
    }

    /// Kinds with an odd count, with the count found.
    #[must_use]
    pub fn unbalanced(&self) -> Vec<(QuoteKind, usize)> {
        [
            (QuoteKind::Single, self.single),
            (QuoteKind::Double, self.double),
        ]
        .into_iter()
        .filter(|(_, count)| count % 2 != 0)
        .collect()
    }

    /// Both quote kinds are used.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.single > 0 && self.double > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_apostrophe_is_unbalanced() {
        let b = QuoteBalance::scan("it's");
        assert!(!b.is_balanced());
        assert_eq!(b.unbalanced(), vec![(QuoteKind::Single, 1)]);
    }

    #[test]
    fn escaped_quote_is_ignored() {
        let b = QuoteBalance::scan(r"a\'b");
        assert!(b.is_balanced());
        assert_eq!(b, QuoteBalance::default());
    }

    #[test]
    fn both_kinds_balanced_is_mixed() {
        let b = QuoteBalance::scan(r#"'a' and "b""#);
        assert!(b.is_balanced());
        assert!(b.is_mixed());
    }

    #[test]
    fn other_kind_inside_span_is_literal() {
        let b = QuoteBalance::scan(r#""it's fine""#);
        assert_eq!(b, QuoteBalance { single: 0, double: 2 });
        assert!(b.is_balanced());
        assert!(!b.is_mixed());
    }

    #[test]
    fn reports_both_kinds_when_both_odd() {
        let b = QuoteBalance::scan(r#"'a "b"#);
        assert_eq!(b.unbalanced(), vec![(QuoteKind::Single, 1)]);
        let b = QuoteBalance::scan(r#"'a' "b 'c'"#);
        assert_eq!(b.single, 2);
        assert_eq!(b.unbalanced(), vec![(QuoteKind::Double, 1)]);
    }
}
