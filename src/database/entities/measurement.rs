use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One daily reading reported by a station
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "station")]
    pub station_id: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`), compared lexically
    pub date: String,
    #[sea_orm(column_name = "prcp")]
    pub precipitation: Option<f64>,
    #[sea_orm(column_name = "tobs")]
    pub temperature_observation: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::station::Entity",
        from = "Column::StationId",
        to = "super::station::Column::StationId"
    )]
    Station,
}

impl Related<super::station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Station.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
