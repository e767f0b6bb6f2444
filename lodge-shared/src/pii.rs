use serde::{Serialize, Serializer};
use std::fmt;

/// Wraps a sensitive identifier (national ID, email) so that log macros only ever
/// see its last two characters.
///
/// Serialization passes the real value through; masking applies to `Debug` and `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Masked<T>(pub T);

const VISIBLE_TAIL: usize = 2;

impl<T: AsRef<str>> Masked<T> {
    fn write_masked(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.as_ref();
        let len = value.chars().count();
        if len <= VISIBLE_TAIL {
            return f.write_str(&"*".repeat(len));
        }
        let tail: String = value.chars().skip(len - VISIBLE_TAIL).collect();
        write!(f, "{}{}", "*".repeat(len - VISIBLE_TAIL), tail)
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
