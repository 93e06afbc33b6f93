//! Integer state identifiers and the reserved sentinels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier a state is registered under in a [`StateMachine`](crate::StateMachine).
///
/// Two values are reserved and can never be used for ordinary states:
/// [`StateId::INVALID`] means "no state" and [`StateId::FINAL`] is the key of the
/// privileged final state.
///
/// # Example
///
/// ```rust
/// use tickmind::StateId;
///
/// let patrol = StateId::new(1);
/// assert!(!patrol.is_reserved());
/// assert!(StateId::FINAL.is_reserved());
/// assert_eq!(patrol.to_string(), "1");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(i32);

impl StateId {
    /// Sentinel for "no state" / "nothing pending".
    pub const INVALID: StateId = StateId(-1);

    /// Key of the final state. Never reachable through `switch_state`.
    pub const FINAL: StateId = StateId(1010);

    pub const fn new(raw: i32) -> Self {
        StateId(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    /// True for either sentinel.
    pub const fn is_reserved(self) -> bool {
        self.0 == Self::INVALID.0 || self.0 == Self::FINAL.0
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<i32> for StateId {
    fn from(raw: i32) -> Self {
        StateId(raw)
    }
}

impl From<StateId> for i32 {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INVALID => f.write_str("INVALID"),
            Self::FINAL => f.write_str("FINAL"),
            StateId(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_reserved() {
        assert!(StateId::INVALID.is_reserved());
        assert!(StateId::FINAL.is_reserved());
        assert!(!StateId::new(0).is_reserved());
        assert!(!StateId::new(1009).is_reserved());
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(StateId::default(), StateId::INVALID);
        assert!(!StateId::default().is_valid());
    }

    #[test]
    fn display_names_sentinels() {
        assert_eq!(StateId::INVALID.to_string(), "INVALID");
        assert_eq!(StateId::FINAL.to_string(), "FINAL");
        assert_eq!(StateId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&StateId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StateId::new(7));
    }
}
