//! The current user's own profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Gender as stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Label for display
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Own profile as returned by the server.
///
/// `id` and `email` are server-owned; [`ProfileUpdate`] has no way to touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl UserProfile {
    /// Age in whole years on `today`, if a birth date is set
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birth_date = self.birth_date?.date_naive();
        today.years_since(birth_date)
    }

    /// Age in whole years as of now
    pub fn age(&self) -> Option<u32> {
        self.age_on(Utc::now().date_naive())
    }
}

/// Partial profile update; unset fields are omitted from the body, not nulled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}
