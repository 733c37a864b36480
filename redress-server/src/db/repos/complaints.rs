//! Complaint repository

use sqlx::PgPool;

use crate::models::{Complaint, ComplaintPatch, NewComplaint};

/// Database operation errors
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Row not found
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    /// Underlying sqlx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Typed access to the complaints table.
pub struct ComplaintRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ComplaintRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All complaints, most recent first.
    pub async fn list(&self) -> Result<Vec<Complaint>, DbError> {
        let complaints: Vec<Complaint> = sqlx::query_as(
            r#"
            SELECT id, title, description, type, status, photo, response,
                   created_at, updated_at
            FROM complaints
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(complaints)
    }

    /// Insert a validated draft.
    ///
    /// Status is forced to 'pending' here; callers cannot choose it.
    /// The database assigns the id and both timestamps.
    pub async fn create(&self, draft: NewComplaint) -> Result<Complaint, DbError> {
        let complaint: Complaint = sqlx::query_as(
            r#"
            INSERT INTO complaints (title, description, type, photo, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING id, title, description, type, status, photo, response,
                      created_at, updated_at
            "#,
        )
        .bind(draft.title())
        .bind(draft.description())
        .bind(draft.kind())
        .bind(draft.photo())
        .fetch_one(self.pool)
        .await?;

        Ok(complaint)
    }

    /// Apply a sparse patch to one complaint.
    ///
    /// Returns `DbError::NotFound` when no row has the given id.
    pub async fn update(&self, id: i32, patch: ComplaintPatch) -> Result<Complaint, DbError> {
        if patch.is_empty() {
            tracing::debug!("Empty patch for complaint {id}; only updated_at changes");
        }

        let sql = update_sql(&patch);
        let mut query = sqlx::query_as::<_, Complaint>(&sql);

        if let Some(status) = &patch.status {
            query = query.bind(status);
        }
        if let Some(response) = &patch.response {
            // None binds as SQL NULL, clearing the column.
            query = query.bind(response.as_deref());
        }

        let updated = query
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "complaint",
                id: id.to_string(),
            })?;

        Ok(updated)
    }
}

/// Build the UPDATE statement for a patch.
///
/// Placeholders are numbered in bind order: status, response, id.
/// `updated_at` is always refreshed, even for an empty patch.
fn update_sql(patch: &ComplaintPatch) -> String {
    let mut assignments = Vec::new();
    let mut next = 1;

    if patch.status.is_some() {
        assignments.push(format!("status = ${next}"));
        next += 1;
    }
    if patch.response.is_some() {
        assignments.push(format!("response = ${next}"));
        next += 1;
    }
    assignments.push("updated_at = NOW()".to_owned());

    format!(
        "UPDATE complaints SET {} WHERE id = ${} \
         RETURNING id, title, description, type, status, photo, response, \
         created_at, updated_at",
        assignments.join(", "),
        next
    )
}
