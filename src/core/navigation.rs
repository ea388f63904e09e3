use serde::{Deserialize, Serialize};

/// Result of a navigation request together with whether it moved anything.
///
/// Rewind, forward and go-realtime never fail. Hitting a boundary is
/// reported through `changed == false` so callers can show a notice or skip
/// restarting realtime polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub struct NavigationOutcome<T> {
    value: T,
    changed: bool,
}

impl<T> NavigationOutcome<T> {
    pub const fn new(value: T, changed: bool) -> Self {
        Self { value, changed }
    }

    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, bool) {
        (self.value, self.changed)
    }

    pub fn map<U, F>(self, f: F) -> NavigationOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        NavigationOutcome {
            value: f(self.value),
            changed: self.changed,
        }
    }
}
