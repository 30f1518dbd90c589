//! Read-only identity groupings.

use std::fmt;

/// Maximum allowed length for a group name.
pub const GROUP_NAME_MAX: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    #[error("group id must be a positive integer")]
    InvalidId,
    #[error("group name must not be empty")]
    EmptyName,
    #[error("group name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Positive integer group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(i64);

impl GroupId {
    pub fn new(raw: i64) -> Result<Self, GroupValidationError> {
        if raw < 1 {
            return Err(GroupValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group of users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    name: String,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>) -> Result<Self, GroupValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GroupValidationError::EmptyName);
        }
        if name.chars().count() > GROUP_NAME_MAX {
            return Err(GroupValidationError::NameTooLong {
                max: GROUP_NAME_MAX,
            });
        }
        Ok(Self { id, name })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn group_id_must_be_positive(#[case] raw: i64) {
        assert_eq!(GroupId::new(raw), Err(GroupValidationError::InvalidId));
    }

    #[rstest]
    fn group_name_is_validated() {
        let id = GroupId::new(1).expect("valid id");
        assert_eq!(Group::new(id, "  "), Err(GroupValidationError::EmptyName));
        assert_eq!(
            Group::new(id, "g".repeat(GROUP_NAME_MAX + 1)),
            Err(GroupValidationError::NameTooLong {
                max: GROUP_NAME_MAX
            })
        );
        let group = Group::new(id, "staff").expect("valid group");
        assert_eq!(group.name(), "staff");
        assert_eq!(group.id().get(), 1);
    }
}
