//! PostgreSQL adapter for CurseRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::entities::{Curse, CurseChanges, CurseFilter, CurseId, NewCurse};
use crate::domain::ports::CurseRepository;
use crate::entity::curses;
use crate::error::DomainError;

/// PostgreSQL implementation of CurseRepository
pub struct PostgresCurseRepository {
    db: DatabaseConnection,
}

impl PostgresCurseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Base select with the listing filter applied.
///
/// Shared by `find_all` and `count` so page metadata always matches the rows.
fn filtered(filter: &CurseFilter) -> Select<curses::Entity> {
    let query = curses::Entity::find();

    match filter.name_needle() {
        Some(needle) => query.filter(
            Expr::expr(Func::lower(Expr::col(curses::Column::Name)))
                .like(format!("%{}%", needle)),
        ),
        None => query,
    }
}

#[async_trait]
impl CurseRepository for PostgresCurseRepository {
    async fn create(&self, curse: &NewCurse) -> Result<Curse, DomainError> {
        let id = CurseId::new();
        let now = Utc::now().fixed_offset();

        let model = curses::ActiveModel {
            id: Set(id.0),
            name: Set(curse.name.clone()),
            start_date: Set(curse.start_date),
            end_date: Set(curse.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::info!(curse_id = %id, "Curse created");

        Ok(result.into())
    }

    async fn find_all(
        &self,
        filter: &CurseFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Curse>, DomainError> {
        // Postgres LIMIT/OFFSET are signed 64-bit
        let offset = offset.min(i64::MAX as u64);
        let limit = limit.min(i64::MAX as u64);

        let results = filtered(filter)
            .order_by_desc(curses::Column::CreatedAt)
            .order_by_desc(curses::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: &CurseId) -> Result<Curse, DomainError> {
        let result = curses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match result {
            Some(model) => Ok(model.into()),
            None => {
                tracing::debug!(curse_id = %id, "Curse not found");
                Err(DomainError::NotFound(id.to_string()))
            }
        }
    }

    async fn update(&self, id: &CurseId, changes: &CurseChanges) -> Result<(), DomainError> {
        let mut update = curses::Entity::update_many().filter(curses::Column::Id.eq(id.0));

        if let Some(name) = &changes.name {
            update = update.col_expr(curses::Column::Name, Expr::value(name.clone()));
        }
        if let Some(start_date) = changes.start_date {
            update = update.col_expr(curses::Column::StartDate, Expr::value(start_date));
        }
        if let Some(end_date) = changes.end_date {
            update = update.col_expr(curses::Column::EndDate, Expr::value(end_date));
        }

        let result = update
            .col_expr(
                curses::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            tracing::debug!(curse_id = %id, "Curse doesn't exist, nothing updated");
            return Err(DomainError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &CurseId) -> Result<(), DomainError> {
        let result = curses::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            tracing::debug!(curse_id = %id, "Curse doesn't exist, nothing deleted");
            return Err(DomainError::NotFound(id.to_string()));
        }

        tracing::info!(curse_id = %id, "Curse deleted");

        Ok(())
    }

    async fn count(&self, filter: &CurseFilter) -> Result<u64, DomainError> {
        filtered(filter)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<curses::Model> for Curse {
    fn from(model: curses::Model) -> Self {
        Curse {
            id: CurseId(model.id),
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
