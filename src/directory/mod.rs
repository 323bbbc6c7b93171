//! Read-only team member directory.
//!
//! The directory is fixed configuration data loaded at process start: an
//! ordered sequence of team members with no mutation operations. Absence is
//! always represented by `None`, never an error. Services receive the
//! directory as an injected value so tests can substitute a fixture roster.

use serde::{Deserialize, Serialize};

/// A single entry in the team directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Short handle used in `@`-mentions (e.g. `huzaifa`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Notification email address.
    pub email: String,
    /// Avatar initials.
    pub initials: String,
}

impl TeamMember {
    /// Creates a directory entry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        initials: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            initials: initials.into(),
        }
    }
}

/// Fixed, ordered roster of team members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamDirectory {
    members: Vec<TeamMember>,
}

impl TeamDirectory {
    /// Creates a directory from an ordered sequence of members.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = TeamMember>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Returns the built-in production roster.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            TeamMember::new("huzaifa", "Huzaifa", "huzaifa@nyrix.co", "H"),
            TeamMember::new("sarim", "Sarim", "sarim@nyrix.co", "S"),
            TeamMember::new("talha", "Talha", "talhaone1234@gmail.com", "T"),
            TeamMember::new(
                "hashir",
                "Hashir",
                "muhammadhashirsiddiqui2@gmail.com",
                "H",
            ),
        ])
    }

    /// Returns all members in roster order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Finds a member by handle, case-insensitively.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&TeamMember> {
        let needle = id.to_lowercase();
        self.members.iter().find(|m| m.id.to_lowercase() == needle)
    }

    /// Finds a member by display name, case-insensitively.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&TeamMember> {
        let needle = name.to_lowercase();
        self.members
            .iter()
            .find(|m| m.name.to_lowercase() == needle)
    }

    /// Finds a member by exact email address.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.email == email)
    }
}
