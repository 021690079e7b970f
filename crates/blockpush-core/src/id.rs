//! Strongly-typed identifiers for blocks and movement groups.

use std::fmt;

use crate::error::GroupError;

/// Stable identity of a block within one world.
///
/// Allocated sequentially by the owning world (or by the caller when
/// reconstructing a saved level). Identity never changes while the
/// block is alive, even as it moves between cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a movement group.
///
/// Groups are created implicitly when their first block is assigned and
/// deleted when their last block leaves, so a `GroupId` only refers to a
/// live group while it has members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Convert the signed group number used by level files and scripts.
    ///
    /// Negative numbers mean "no group" and map to `None`. Non-negative
    /// numbers too large for a `GroupId` fail with
    /// [`GroupError::InvalidGroup`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blockpush_core::{GroupError, GroupId};
    ///
    /// assert_eq!(GroupId::from_raw(3), Ok(Some(GroupId(3))));
    /// assert_eq!(GroupId::from_raw(-1), Ok(None));
    /// assert_eq!(
    ///     GroupId::from_raw(5_000_000_000),
    ///     Err(GroupError::InvalidGroup { raw: 5_000_000_000 })
    /// );
    /// ```
    pub fn from_raw(raw: i64) -> Result<Option<Self>, GroupError> {
        if raw < 0 {
            return Ok(None);
        }
        u32::try_from(raw)
            .map(|g| Some(Self(g)))
            .map_err(|_| GroupError::InvalidGroup { raw })
    }

    /// The signed representation of an optional group, `-1` for none.
    pub fn to_raw(group: Option<Self>) -> i64 {
        group.map_or(-1, |g| i64::from(g.0))
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GroupId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_group_numbers_round_trip() {
        assert_eq!(GroupId::from_raw(0), Ok(Some(GroupId(0))));
        assert_eq!(GroupId::from_raw(-7), Ok(None));
        assert_eq!(GroupId::from_raw(i64::MIN), Ok(None));
        assert_eq!(
            GroupId::from_raw(i64::from(u32::MAX)),
            Ok(Some(GroupId(u32::MAX)))
        );
        assert_eq!(GroupId::to_raw(Some(GroupId(12))), 12);
        assert_eq!(GroupId::to_raw(None), -1);
    }

    #[test]
    fn oversized_raw_group_is_rejected() {
        let raw = i64::from(u32::MAX) + 1;
        match GroupId::from_raw(raw) {
            Err(GroupError::InvalidGroup { raw: r }) => assert_eq!(r, raw),
            other => panic!("expected InvalidGroup, got {other:?}"),
        }
    }

    #[test]
    fn ids_display_as_bare_numbers() {
        assert_eq!(BlockId(42).to_string(), "42");
        assert_eq!(GroupId(7).to_string(), "7");
    }
}
