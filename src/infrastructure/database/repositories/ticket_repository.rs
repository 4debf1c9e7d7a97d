//! SeaORM implementation of TicketRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::spot_repository;
use crate::domain::{
    round_to_cents, AppResult, InfraError, NewTicket, Ticket, TicketRepository,
};
use crate::infrastructure::database::entities::{parking_spot, ticket};

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn price_to_cents(price: Decimal) -> i64 {
    round_to_cents(price).mantissa() as i64
}

fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn model_to_domain(
    (t, spot): (ticket::Model, Option<parking_spot::Model>),
) -> AppResult<Ticket> {
    let spot = spot.ok_or_else(|| {
        InfraError::Database(DbErr::RecordNotFound(format!(
            "parking spot {} of ticket {}",
            t.spot_id, t.id
        )))
    })?;

    Ok(Ticket {
        id: t.id,
        spot: spot_repository::model_to_domain(spot)?,
        registration: t.registration,
        price: cents_to_price(t.price_cents),
        entry_time: t.entry_time,
        exit_time: t.exit_time,
    })
}

// ── TicketRepository impl ───────────────────────────────────────

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn save(&self, new: NewTicket) -> AppResult<Ticket> {
        debug!(spot_id = new.spot.id, registration = %new.registration, "Saving ticket");

        let model = ticket::ActiveModel {
            id: NotSet,
            spot_id: Set(new.spot.id),
            registration: Set(new.registration.clone()),
            price_cents: Set(0),
            entry_time: Set(new.entry_time),
            exit_time: Set(None),
        };
        let inserted = model.insert(&self.db).await?;
        Ok(Ticket::opened(inserted.id, new))
    }

    async fn find_open_by_registration(&self, registration: &str) -> AppResult<Option<Ticket>> {
        let row = ticket::Entity::find()
            .find_also_related(parking_spot::Entity)
            .filter(ticket::Column::Registration.eq(registration))
            .filter(ticket::Column::ExitTime.is_null())
            .order_by_desc(ticket::Column::EntryTime)
            .order_by_desc(ticket::Column::Id)
            .one(&self.db)
            .await?;
        row.map(model_to_domain).transpose()
    }

    async fn close(&self, t: &Ticket) -> AppResult<()> {
        debug!(ticket_id = t.id, price = %t.price, "Closing ticket");

        let result = ticket::Entity::update_many()
            .col_expr(ticket::Column::PriceCents, Expr::value(price_to_cents(t.price)))
            .col_expr(ticket::Column::ExitTime, Expr::value(t.exit_time))
            .filter(ticket::Column::Id.eq(t.id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(InfraError::WriteRejected {
                entity: "Ticket",
                id: t.id,
            }
            .into());
        }
        Ok(())
    }

    async fn has_prior_ticket(&self, registration: &str) -> AppResult<bool> {
        let closed = ticket::Entity::find()
            .filter(ticket::Column::Registration.eq(registration))
            .filter(ticket::Column::ExitTime.is_not_null())
            .count(&self.db)
            .await?;
        Ok(closed > 0)
    }

    async fn find_by_registration(&self, registration: &str) -> AppResult<Vec<Ticket>> {
        ticket::Entity::find()
            .find_also_related(parking_spot::Entity)
            .filter(ticket::Column::Registration.eq(registration))
            .order_by_asc(ticket::Column::EntryTime)
            .order_by_asc(ticket::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::domain::{ParkingSpot, SpotRepository, VehicleClass};
    use crate::infrastructure::database::repositories::SeaOrmSpotRepository;
    use crate::infrastructure::database::test_connection;

    fn entry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    async fn repos() -> (SeaOrmTicketRepository, SeaOrmSpotRepository) {
        let db = test_connection().await;
        let spots = SeaOrmSpotRepository::new(db.clone());
        for spot in ParkingSpot::layout(3, 2) {
            spots.insert(spot).await.unwrap();
        }
        (SeaOrmTicketRepository::new(db), spots)
    }

    #[test]
    fn cents_conversion() {
        assert_eq!(price_to_cents(dec!(1.43)), 143);
        assert_eq!(price_to_cents(dec!(38.25)), 3825);
        assert_eq!(price_to_cents(dec!(1.5)), 150);
        assert_eq!(price_to_cents(Decimal::ZERO), 0);
        assert_eq!(cents_to_price(113), dec!(1.13));
    }

    #[tokio::test]
    async fn saved_ticket_is_found_open_with_its_spot() {
        let (tickets, spots) = repos().await;
        spots.set_availability(2, false).await.unwrap();
        let spot = spots.find_by_id(2).await.unwrap().unwrap();

        let saved = tickets
            .save(NewTicket::new(spot, "ABCDEF", entry()))
            .await
            .unwrap();
        assert!(saved.is_open());

        let found = tickets
            .find_open_by_registration("ABCDEF")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.spot.id, 2);
        assert_eq!(found.spot.class, VehicleClass::Car);
        assert!(!found.spot.available);
        assert_eq!(found.entry_time, entry());
        assert_eq!(found.price, Decimal::ZERO);
        assert!(found.exit_time.is_none());
    }

    #[tokio::test]
    async fn closing_records_price_and_exit_time() {
        let (tickets, spots) = repos().await;
        let spot = spots.find_by_id(4).await.unwrap().unwrap();
        let ticket = tickets
            .save(NewTicket::new(spot, "BIKE-1", entry()))
            .await
            .unwrap();

        let closed = ticket.closed(dec!(24.17), entry() + Duration::minutes(1450));
        tickets.close(&closed).await.unwrap();
        // A second identical write changes nothing.
        tickets.close(&closed).await.unwrap();

        assert!(tickets
            .find_open_by_registration("BIKE-1")
            .await
            .unwrap()
            .is_none());
        let history = tickets.find_by_registration("BIKE-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price, dec!(24.17));
        assert_eq!(history[0].exit_time, closed.exit_time);
    }

    #[tokio::test]
    async fn closing_unknown_ticket_is_rejected() {
        let (tickets, spots) = repos().await;
        let spot = spots.find_by_id(1).await.unwrap().unwrap();
        let ghost = Ticket::opened(99, NewTicket::new(spot, "GHOST", entry()))
            .closed(dec!(1.50), entry() + Duration::hours(1));

        let err = tickets.close(&ghost).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[tokio::test]
    async fn prior_ticket_counts_only_closed_sessions() {
        let (tickets, spots) = repos().await;
        assert!(!tickets.has_prior_ticket("ABCDEF").await.unwrap());

        let spot = spots.find_by_id(1).await.unwrap().unwrap();
        let ticket = tickets
            .save(NewTicket::new(spot, "ABCDEF", entry()))
            .await
            .unwrap();
        assert!(!tickets.has_prior_ticket("ABCDEF").await.unwrap());

        tickets
            .close(&ticket.closed(dec!(1.50), entry() + Duration::hours(1)))
            .await
            .unwrap();
        assert!(tickets.has_prior_ticket("ABCDEF").await.unwrap());
        assert!(!tickets.has_prior_ticket("ZZZ").await.unwrap());
    }
}
