//! Ownership of a single piece of table state.
//!
//! Each user-adjustable property (filter text, sort) is either owned by the
//! table or driven by the caller. The source decides whether a user action
//! updates the stored value; listeners fire either way.

/// Where a property's current value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateSource<V> {
    /// The table owns the value and updates it on user actions
    Owned(V),
    /// The caller owns the value; user actions only notify the caller,
    /// who pushes the new value back with [`StateSource::sync`]
    External(V),
}

impl<V> StateSource<V> {
    /// The current value.
    pub fn get(&self) -> &V {
        match self {
            StateSource::Owned(v) | StateSource::External(v) => v,
        }
    }

    /// Check if the caller drives this value
    pub fn is_external(&self) -> bool {
        matches!(self, StateSource::External(_))
    }

    /// Apply a user-driven change.
    ///
    /// Returns `true` when the stored value changed, which only happens for
    /// owned sources.
    pub fn apply(&mut self, value: V) -> bool {
        match self {
            StateSource::Owned(v) => {
                *v = value;
                true
            }
            StateSource::External(_) => false,
        }
    }

    /// Caller-side update: the value becomes (or stays) externally driven.
    pub fn sync(&mut self, value: V) {
        *self = StateSource::External(value);
    }
}

impl<V: Default> Default for StateSource<V> {
    fn default() -> Self {
        StateSource::Owned(V::default())
    }
}
