use crate::outcome::Outcome;
use crate::parser::{Parser, Step};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Opaque identity of a memo-capable parser.
///
/// Minted when the parser is built and compared by address. The cache holds a
/// clone of every key it stores, so an identity cannot be reused while the
/// cursor that remembers it is alive.
#[derive(Clone)]
pub struct MemoKey(Rc<()>);

impl MemoKey {
    pub fn fresh() -> Self {
        MemoKey(Rc::new(()))
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for MemoKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoKey {}

impl Hash for MemoKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoKey({:#x})", self.addr())
    }
}

/// Packrat wrapper: reuse the outcome `parser` produced at the same absolute
/// position when the cursor has memoization enabled.
///
/// With memoization disabled this behaves exactly like `parser`.
pub fn memo<T: Clone + 'static>(parser: Parser<T>) -> Parser<T> {
    let key = MemoKey::fresh();
    Parser::new(move |cursor, k| {
        if !cursor.memoize() {
            return parser.suspend(k);
        }

        let start = cursor.position();
        if let Some(outcome) = cursor.get_cached::<T>(&key) {
            return Step::resume(k, outcome);
        }

        let key = key.clone();
        parser.suspend(Box::new(move |cursor, outcome: Outcome<T>| {
            cursor.put_cached(&key, start, &outcome);
            Step::resume(k, outcome)
        }))
    })
}

/// Extension trait to add .memo() method support for parsers
pub trait MemoExt<T> {
    fn memo(self) -> Parser<T>;
}

impl<T: Clone + 'static> MemoExt<T> for Parser<T> {
    fn memo(self) -> Parser<T> {
        memo(self)
    }
}
