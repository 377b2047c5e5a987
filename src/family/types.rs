//! Member types for the family store.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A family member as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier, assigned sequentially by the store.
    pub id: u64,
    /// First name (trimmed, never empty).
    pub first_name: String,
    /// Age in years (always > 0).
    pub age: u32,
    /// Lucky numbers, in the order they were submitted.
    pub lucky_numbers: Vec<i64>,
}

/// A validated member that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// First name (trimmed, never empty).
    pub first_name: String,
    /// Age in years (always > 0).
    pub age: u32,
    /// Lucky numbers.
    pub lucky_numbers: Vec<i64>,
}

impl NewMember {
    /// Attach an id, producing a stored member.
    pub fn with_id(self, id: u64) -> Member {
        Member {
            id,
            first_name: self.first_name,
            age: self.age,
            lucky_numbers: self.lucky_numbers,
        }
    }
}

/// Fields of the create payload, used for error messages and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MemberField {
    /// The whole request body.
    Body,
    FirstName,
    Age,
    LuckyNumbers,
}
