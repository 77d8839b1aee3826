//! Success/failure values flowing through every continuation.

/// Description of what a failed parse wanted to see.
///
/// Alternatives collected by a choice stay unresolved as a [`Expectation::OneOf`]
/// set until an error is rendered; only then are they flattened and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// No description at all (`zero`).
    Nothing,
    /// A plain message, reported at the cursor's final position.
    Message(String),
    /// A message reported at a specific absolute offset.
    At { message: String, offset: usize },
    /// Something was found that does not belong at `offset`.
    Unexpected { found: String, offset: usize },
    /// The alternatives of a choice that all failed.
    OneOf(Vec<Expectation>),
}

impl Expectation {
    pub fn message(message: impl Into<String>) -> Self {
        Expectation::Message(message.into())
    }

    pub fn at(message: impl Into<String>, offset: usize) -> Self {
        Expectation::At {
            message: message.into(),
            offset,
        }
    }

    pub fn unexpected(found: impl Into<String>, offset: usize) -> Self {
        Expectation::Unexpected {
            found: found.into(),
            offset,
        }
    }

    /// Combine two expectations into one set, splicing in the members of
    /// either side that is already a set.
    pub fn merge(self, other: Expectation) -> Expectation {
        let mut members = Vec::new();
        self.splice_into(&mut members);
        other.splice_into(&mut members);
        Expectation::OneOf(members)
    }

    fn splice_into(self, members: &mut Vec<Expectation>) {
        match self {
            Expectation::OneOf(inner) => members.extend(inner),
            other => members.push(other),
        }
    }

    /// All non-set expectations, depth first, in the order they were recorded.
    pub fn leaves(&self) -> Vec<&Expectation> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];
        while let Some(next) = pending.pop() {
            match next {
                Expectation::OneOf(members) => pending.extend(members.iter().rev()),
                leaf => leaves.push(leaf),
            }
        }
        leaves
    }

    /// The absolute offset this expectation should be reported at, if it
    /// carries one. For sets, the furthest positioned member wins.
    pub fn offset(&self) -> Option<usize> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| match leaf {
                Expectation::At { offset, .. } | Expectation::Unexpected { offset, .. } => {
                    Some(*offset)
                }
                _ => None,
            })
            .max()
    }

    /// The part of this expectation that is reported: positioned leaves at
    /// the furthest offset, plus every leaf without a position.
    pub fn furthest(&self) -> Expectation {
        let Some(furthest) = self.offset() else {
            return self.clone();
        };
        let members = self
            .leaves()
            .into_iter()
            .filter(|leaf| match leaf {
                Expectation::At { offset, .. } | Expectation::Unexpected { offset, .. } => {
                    *offset == furthest
                }
                _ => true,
            })
            .cloned()
            .collect();
        Expectation::OneOf(members)
    }

    /// Expected messages, deduplicated, with empty labels dropped.
    pub fn expected(&self) -> Vec<String> {
        let mut expected: Vec<String> = Vec::new();
        for leaf in self.leaves() {
            let message = match leaf {
                Expectation::Message(message) | Expectation::At { message, .. } => message,
                _ => continue,
            };
            if !message.is_empty() && !expected.contains(message) {
                expected.push(message.clone());
            }
        }
        expected
    }

    /// The first non-empty "unexpected" description, if any.
    pub fn found(&self) -> Option<&str> {
        self.leaves().into_iter().find_map(|leaf| match leaf {
            Expectation::Unexpected { found, .. } if !found.is_empty() => Some(found.as_str()),
            _ => None,
        })
    }
}

/// A failed attempt.
///
/// `consumed` records whether the attempt advanced the cursor before it
/// failed; choice only tries its next alternative when it is `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub expected: Expectation,
    pub consumed: bool,
}

impl Failure {
    pub fn new(expected: Expectation, consumed: bool) -> Self {
        Failure { expected, consumed }
    }
}

/// Result of running a parser once.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    /// A failure that consumed nothing.
    pub fn fail(expected: Expectation) -> Self {
        Outcome::Failure(Failure::new(expected, false))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }

    /// Flag a failure as consuming when the enclosing attempt moved the cursor.
    pub(crate) fn consumed_if(self, moved: bool) -> Self {
        match self {
            Outcome::Failure(failure) if moved && !failure.consumed => {
                Outcome::Failure(Failure::new(failure.expected, true))
            }
            other => other,
        }
    }
}
