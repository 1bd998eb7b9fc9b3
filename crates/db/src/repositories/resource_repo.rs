//! Generic repository over any [`Resource`] table.

use std::marker::PhantomData;

use dunno_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::resource::{Resource, ResourceFields};

/// Provides CRUD operations for the table behind `R`.
pub struct ResourceRepo<R>(PhantomData<R>);

impl<R: Resource> ResourceRepo<R> {
    /// Insert a new record, returning the created row with its assigned id.
    ///
    /// The id on `entity` is ignored.
    pub async fn create(pool: &SqlitePool, entity: &R) -> Result<R, sqlx::Error> {
        let scalars = scalar_columns::<R>();
        let placeholders = vec!["?"; scalars.len() + 1].join(", ");
        let query = format!(
            "INSERT INTO {} ({}, image) VALUES ({placeholders}) RETURNING {}",
            R::TABLE,
            scalars.join(", "),
            select_columns::<R>(),
        );

        let mut insert = sqlx::query_as::<_, R>(&query);
        for value in scalar_values(entity) {
            insert = insert.bind(value);
        }
        insert.bind(entity.image()).fetch_one(pool).await
    }

    /// List every record, oldest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<R>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} ORDER BY id", select_columns::<R>(), R::TABLE);
        sqlx::query_as::<_, R>(&query).fetch_all(pool).await
    }

    /// List records whose searchable fields contain `term`.
    ///
    /// Matching is a case-sensitive substring test; an empty term matches
    /// every record.
    pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<R>, sqlx::Error> {
        let searchable: Vec<&str> = <R::Fields as ResourceFields>::FIELDS
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.column)
            .collect();
        if searchable.is_empty() {
            return Self::list(pool).await;
        }

        let predicate = searchable
            .iter()
            .map(|column| format!("instr({column}, ?) > 0"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let query = format!(
            "SELECT {} FROM {} WHERE {predicate} ORDER BY id",
            select_columns::<R>(),
            R::TABLE,
        );

        let mut select = sqlx::query_as::<_, R>(&query);
        for _ in &searchable {
            select = select.bind(term);
        }
        select.fetch_all(pool).await
    }

    /// Find a record by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<R>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = ?",
            select_columns::<R>(),
            R::TABLE
        );
        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a record with `id` exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", R::TABLE);
        let found: i64 = sqlx::query_scalar(&query).bind(id).fetch_one(pool).await?;
        Ok(found != 0)
    }

    /// Read the stored image of a record without loading the rest of it.
    ///
    /// Outer `None`: no such record. Inner `None`: record has no image.
    pub async fn find_image(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
        let query = format!("SELECT image FROM {} WHERE id = ?", R::TABLE);
        sqlx::query_scalar::<_, Option<Vec<u8>>>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Overwrite every column of the record identified by `entity.id()`.
    ///
    /// Returns `false` when no row matched, i.e. the record was removed
    /// between being read and being written.
    pub async fn update(conn: &mut SqliteConnection, entity: &R) -> Result<bool, sqlx::Error> {
        let assignments = scalar_columns::<R>()
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "UPDATE {} SET {assignments}, image = ? WHERE id = ?",
            R::TABLE
        );

        let mut update = sqlx::query(&query);
        for value in scalar_values(entity) {
            update = update.bind(value);
        }
        let result = update
            .bind(entity.image())
            .bind(entity.id())
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(entity = R::ENTITY, id = entity.id(), "Update matched no rows");
            return Ok(false);
        }
        Ok(true)
    }

    /// Permanently delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn scalar_columns<R: Resource>() -> Vec<&'static str> {
    <R::Fields as ResourceFields>::FIELDS
        .iter()
        .map(|f| f.column)
        .collect()
}

/// `id, <scalars>, image`
fn select_columns<R: Resource>() -> String {
    let mut columns = vec!["id"];
    columns.extend(scalar_columns::<R>());
    columns.push("image");
    columns.join(", ")
}

fn scalar_values<R: Resource>(entity: &R) -> Vec<&str> {
    let fields = entity.fields();
    <R::Fields as ResourceFields>::FIELDS
        .iter()
        .map(|f| fields.value(f.column).unwrap_or_default())
        .collect()
}
