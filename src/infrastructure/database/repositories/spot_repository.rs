//! SeaORM implementation of SpotRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::{AppResult, InfraError, ParkingSpot, SpotRepository, VehicleClass};
use crate::infrastructure::database::entities::parking_spot;

pub struct SeaOrmSpotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: parking_spot::Model) -> AppResult<ParkingSpot> {
    Ok(ParkingSpot {
        id: m.id,
        class: m.vehicle_class.parse::<VehicleClass>()?,
        available: m.available,
    })
}

// ── SpotRepository impl ─────────────────────────────────────────

#[async_trait]
impl SpotRepository for SeaOrmSpotRepository {
    async fn find_available(&self, class: VehicleClass) -> AppResult<Option<ParkingSpot>> {
        let model = parking_spot::Entity::find()
            .filter(parking_spot::Column::VehicleClass.eq(class.as_str()))
            .filter(parking_spot::Column::Available.eq(true))
            .order_by_asc(parking_spot::Column::Id)
            .one(&self.db)
            .await?;
        model.map(model_to_domain).transpose()
    }

    async fn set_availability(&self, spot_id: i32, available: bool) -> AppResult<()> {
        debug!(spot_id, available, "Updating parking spot availability");

        let result = parking_spot::Entity::update_many()
            .col_expr(parking_spot::Column::Available, Expr::value(available))
            .filter(parking_spot::Column::Id.eq(spot_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(InfraError::WriteRejected {
                entity: "ParkingSpot",
                id: spot_id,
            }
            .into());
        }
        Ok(())
    }

    async fn find_by_id(&self, spot_id: i32) -> AppResult<Option<ParkingSpot>> {
        let model = parking_spot::Entity::find_by_id(spot_id)
            .one(&self.db)
            .await?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<ParkingSpot>> {
        parking_spot::Entity::find()
            .order_by_asc(parking_spot::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn insert(&self, spot: ParkingSpot) -> AppResult<()> {
        debug!(spot_id = spot.id, class = %spot.class, "Inserting parking spot");

        let model = parking_spot::ActiveModel {
            id: Set(spot.id),
            vehicle_class: Set(spot.class.as_str().to_string()),
            available: Set(spot.available),
        };
        parking_spot::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(parking_spot::Entity::find().count(&self.db).await?)
    }
}
