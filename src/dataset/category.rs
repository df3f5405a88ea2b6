//! Illusion category classification.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Perceptual mechanism an optical illusion exploits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllusionCategory {
    /// Surround colors pulled toward neighboring regions.
    Assimilation,
    /// Surround colors pushed away from neighboring regions.
    Contrast,
    /// Perceived properties held stable under changing conditions.
    Constancy,
    /// Depth cues distorting perceived size or position.
    Perspective,
    /// Judgments shifted by surrounding reference objects.
    Relativity,
}

impl IllusionCategory {
    /// Get all category variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Assimilation,
            Self::Contrast,
            Self::Constancy,
            Self::Perspective,
            Self::Relativity,
        ]
    }

    /// Category for an illusion index, if the index is in the table.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 | 2 | 7 | 8 | 14 => Some(Self::Assimilation),
            3..=5 => Some(Self::Contrast),
            6 => Some(Self::Constancy),
            9 | 13 => Some(Self::Perspective),
            10..=12 => Some(Self::Relativity),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllusionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assimilation => write!(f, "assimilation"),
            Self::Contrast => write!(f, "contrast"),
            Self::Constancy => write!(f, "constancy"),
            Self::Perspective => write!(f, "perspective"),
            Self::Relativity => write!(f, "relativity"),
        }
    }
}

impl std::str::FromStr for IllusionCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assimilation" => Ok(Self::Assimilation),
            "contrast" => Ok(Self::Contrast),
            "constancy" => Ok(Self::Constancy),
            "perspective" => Ok(Self::Perspective),
            "relativity" => Ok(Self::Relativity),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}

/// Look up the illusion category for a data ID.
///
/// Data IDs encode the illusion index as an integer prefix (`"3_circles"`
/// belongs to illusion 3).
///
/// # Errors
///
/// Fails if the prefix is not an integer or the index is outside the
/// category table.
pub fn category_for_id(id: &str) -> Result<IllusionCategory> {
    let prefix = id.split_once('_').map_or(id, |(head, _)| head);
    let index: u32 = prefix
        .parse()
        .map_err(|_| Error::MalformedId { id: id.to_string() })?;
    IllusionCategory::from_index(index).ok_or_else(|| Error::UnknownCategory {
        id: id.to_string(),
        index,
    })
}
