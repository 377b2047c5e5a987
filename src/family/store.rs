//! List-backed family store.

use tracing::{debug, info};

use super::types::{Member, NewMember};

/// In-memory collection of family members.
///
/// Members are kept in insertion order. Ids start at 1 and are never
/// reused, even after the member holding one is deleted.
#[derive(Debug, Clone)]
pub struct FamilyStore {
    last_name: String,
    next_id: u64,
    members: Vec<Member>,
}

impl FamilyStore {
    /// Create an empty family.
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            next_id: 1,
            members: Vec::new(),
        }
    }

    /// Create a family pre-populated with the default members.
    pub fn with_seed_members(last_name: impl Into<String>) -> Self {
        let mut store = Self::new(last_name);
        for (first_name, age, lucky_numbers) in [
            ("John", 33, vec![7, 13, 22]),
            ("Jane", 35, vec![10, 14, 3]),
            ("Jimmy", 5, vec![1]),
        ] {
            store.add_member(NewMember {
                first_name: first_name.to_string(),
                age,
                lucky_numbers,
            });
        }
        store
    }

    /// Family last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Add a member, assigning the next id.
    pub fn add_member(&mut self, member: NewMember) -> Member {
        let member = member.with_id(self.next_id);
        self.next_id += 1;
        info!(
            id = member.id,
            first_name = %member.first_name,
            family = %self.last_name,
            "Member added"
        );
        self.members.push(member.clone());
        member
    }

    /// Look up a member by id.
    pub fn get_member(&self, id: u64) -> Option<&Member> {
        let member = self.members.iter().find(|m| m.id == id);
        if member.is_none() {
            debug!(id, "Member not found");
        }
        member
    }

    /// All members in insertion order.
    pub fn get_all_members(&self) -> &[Member] {
        &self.members
    }

    /// Remove a member, returning it if it existed.
    pub fn delete_member(&mut self, id: u64) -> Option<Member> {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            debug!(id, "Delete of unknown member");
            return None;
        };
        let member = self.members.remove(index);
        info!(id, first_name = %member.first_name, "Member deleted");
        Some(member)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the family has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
