//! Resource records — articles, documentaries, and other library entries.
//!
//! The store owns these rows; clients hold a read-mostly mirror that
//! converges to store truth after any change notification.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The editorial category of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
  Research,
  Conservation,
  Discovery,
  Documentary,
  Education,
}

impl ResourceCategory {
  /// Text form used in storage columns.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Research => "Research",
      Self::Conservation => "Conservation",
      Self::Discovery => "Discovery",
      Self::Documentary => "Documentary",
      Self::Education => "Education",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "Research" => Ok(Self::Research),
      "Conservation" => Ok(Self::Conservation),
      "Discovery" => Ok(Self::Discovery),
      "Documentary" => Ok(Self::Documentary),
      "Education" => Ok(Self::Education),
      other => Err(Error::UnknownCategory(other.to_string())),
    }
  }
}

/// One entry in the resource library.
///
/// Storage columns are `snake_case` (`image_url`, `read_time`); the serde
/// representation is the display naming (`imageUrl`, `readTime`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
  pub id:        String,
  pub title:     String,
  pub category:  ResourceCategory,
  pub excerpt:   String,
  pub author:    String,
  pub image_url: String,
  pub read_time: String,
  pub date:      String,
  pub featured:  bool,
}
