//! Complaint domain types

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::ValidationError;

/// A persisted complaint row.
///
/// `status` always holds a value; new rows start as `"pending"`.
/// `response` is the staff reply and stays `None` until one is attached.
#[derive(Debug, Clone, FromRow)]
pub struct Complaint {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub status: String,
    pub photo: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated draft for a new complaint.
///
/// # Rules
/// - `title`, `description`, and `kind` are trimmed and must be non-empty
/// - `photo` is stored as given (empty string when the caller sent none)
///
/// # Example
/// ```
/// use redress_server::models::NewComplaint;
///
/// let draft = NewComplaint::new("  Pothole  ", "Large hole on Main St", "road", String::new())
///     .expect("valid draft");
/// assert_eq!(draft.title(), "Pothole");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    title: String,
    description: String,
    kind: String,
    photo: String,
}

impl NewComplaint {
    pub fn new(
        title: &str,
        description: &str,
        kind: &str,
        photo: String,
    ) -> Result<Self, ValidationError> {
        let title = required(title, "title")?;
        let description = required(description, "description")?;
        // "type" is the wire name; errors use it so callers recognize
        // the field they sent.
        let kind = required(kind, "type")?;

        Ok(Self {
            title,
            description,
            kind,
            photo,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn photo(&self) -> &str {
        &self.photo
    }
}

/// A sparse patch for the mutable complaint fields.
///
/// `response` carries three states: `None` leaves the column untouched,
/// `Some(None)` sets it to SQL NULL, `Some(Some(v))` stores `v`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintPatch {
    pub status: Option<String>,
    pub response: Option<Option<String>>,
}

impl ComplaintPatch {
    /// True when no field is supplied. The update still runs and
    /// refreshes `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.response.is_none()
    }
}

/// Trim a required field, rejecting empty input.
fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
