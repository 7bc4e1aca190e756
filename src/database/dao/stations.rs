use crate::database::entities::{StationRecord, station};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Station DAO for read-only queries
pub struct StationsDao {
    db: DatabaseConnection,
}

impl StationsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All station identifiers in table order
    pub async fn station_ids(&self) -> DatabaseResult<Vec<String>> {
        station::Entity::find()
            .select_only()
            .column(station::Column::StationId)
            .order_by_asc(station::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_station_id(&self, station_id: &str) -> DatabaseResult<Option<StationRecord>> {
        station::Entity::find()
            .filter(station::Column::StationId.eq(station_id))
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        station::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
