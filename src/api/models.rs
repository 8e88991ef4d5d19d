use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::RatingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campsite {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Image path relative to the backend root, e.g. `images/react-lake.jpg`.
    pub image: String,
    #[serde(default)]
    pub elevation: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub campsite_id: u32,
    pub rating: Rating,
    pub author: String,
    pub text: String,
    /// ISO-8601 timestamp as stored by the backend.
    pub date: String,
}

/// A request to create a comment. The store assigns `id` and `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub campsite_id: u32,
    pub rating: Rating,
    pub author: String,
    pub text: String,
}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    /// Next rating, wrapping from 5 back to 1.
    pub fn next(self) -> Self {
        if self.0 >= Self::MAX {
            Rating(Self::MIN)
        } else {
            Rating(self.0 + 1)
        }
    }

    /// Previous rating, wrapping from 1 to 5.
    pub fn prev(self) -> Self {
        if self.0 <= Self::MIN {
            Rating(Self::MAX)
        } else {
            Rating(self.0 - 1)
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(Self::MIN)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(RatingError(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
