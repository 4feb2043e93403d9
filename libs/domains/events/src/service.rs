//! Event service layer
//!
//! Owns the create-validation sequence and the ownership scoping contract.
//! Handlers stay thin; everything here is expressed against the repository
//! traits so it is testable without a running database.

use crate::error::{EventError, Result};
use crate::models::{CreateEventRequest, Event, HealthTag, PopulatedEvent};
use crate::repository::EventRepository;
use domain_drinks::{DrinkRepository, DrinkSpec, DrinkType};
use mongodb::bson::oid::ObjectId;
use std::str::FromStr;
use tracing::{info, instrument};

/// Event service coordinating the event store and the drink resolver
pub struct EventService<R: EventRepository, D: DrinkRepository> {
    events: R,
    drinks: D,
}

impl<R: EventRepository, D: DrinkRepository> EventService<R, D> {
    pub fn new(events: R, drinks: D) -> Self {
        Self { events, drinks }
    }

    /// All events owned by the user, drink populated, most recent first.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str) -> Result<Vec<PopulatedEvent>> {
        let user = ObjectId::parse_str(user_id)?;
        self.events.list_for_user(&user).await
    }

    /// One event matching both id and owner.
    ///
    /// A wrong id and another user's id produce the same `InvalidData`, so
    /// responses never leak whether the event exists.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str, event_id: &str) -> Result<PopulatedEvent> {
        let user = ObjectId::parse_str(user_id)?;
        let id = ObjectId::parse_str(event_id)?;

        self.events
            .find_for_user(&id, &user)
            .await?
            .ok_or(EventError::InvalidData)
    }

    /// Validate and persist a new event.
    ///
    /// Fail-fast, in order: the drink triple, drink resolution, volume,
    /// cost, health, date. The owner is always the session user. Note the
    /// accepted inconsistency: resolution may create a drink even when a
    /// later step fails the request.
    #[instrument(skip(self, request))]
    pub async fn create(&self, user_id: &str, request: CreateEventRequest) -> Result<Event> {
        let user = ObjectId::parse_str(user_id)?;

        // All three drink properties must arrive before resolution is attempted
        let drink_type = request
            .drink_type
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| DrinkType::from_str(s).map_err(|_| EventError::InvalidData))
            .transpose()?
            .ok_or(EventError::InvalidData)?;

        let drink_name = request
            .drink_name
            .filter(|s| !s.trim().is_empty())
            .ok_or(EventError::InvalidData)?;

        let percentage = request.percentage.ok_or(EventError::InvalidData)?;

        let drink = self
            .drinks
            .resolve(&DrinkSpec::new(drink_type, drink_name, percentage))
            .await?;

        // Volume is mandatory on the schema
        let volume = request.volume.ok_or(EventError::InvalidData)?;

        // Health is optional but closed; random strings never reach storage
        let health = request
            .health
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| HealthTag::from_str(s).map_err(|_| EventError::InvalidData))
            .transpose()?;

        // Accepted as-is, but the list ordering needs it present
        let date = request.date.ok_or(EventError::InvalidData)?;

        let event = Event {
            id: ObjectId::new(),
            user,
            drink,
            date,
            cost: request.cost,
            volume,
            health,
        };

        let event = self.events.create(event).await?;
        info!(event_id = %event.id, "Event stored");
        Ok(event)
    }

    /// Atomically find-and-delete the event matching both id and owner.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, event_id: &str) -> Result<Event> {
        let user = ObjectId::parse_str(user_id)?;
        let id = ObjectId::parse_str(event_id)?;

        self.events
            .delete_for_user(&id, &user)
            .await?
            .ok_or(EventError::InvalidData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockEventRepository;
    use async_trait::async_trait;
    use chrono::Utc;
    use domain_drinks::Drink;
    use mockall::predicate::eq;
    use mockall::mock;

    mock! {
        Drinks {}

        #[async_trait]
        impl DrinkRepository for Drinks {
            async fn resolve(&self, spec: &DrinkSpec) -> domain_drinks::Result<ObjectId>;
            async fn get_by_id(&self, id: &ObjectId) -> domain_drinks::Result<Option<Drink>>;
        }
    }

    fn full_request() -> CreateEventRequest {
        CreateEventRequest {
            drink_type: Some("beer".to_string()),
            drink_name: Some("IPA".to_string()),
            percentage: Some(6.0),
            date: Some(Utc::now()),
            cost: None,
            volume: Some(330),
            health: None,
        }
    }

    fn stored_event(user: ObjectId) -> Event {
        Event {
            id: ObjectId::new(),
            user,
            drink: ObjectId::new(),
            date: Utc::now(),
            cost: None,
            volume: 330,
            health: None,
        }
    }

    #[tokio::test]
    async fn create_forces_session_user_and_resolved_drink() {
        let user = ObjectId::new();
        let drink_id = ObjectId::new();

        let mut drinks = MockDrinks::new();
        drinks
            .expect_resolve()
            .with(eq(DrinkSpec::new(DrinkType::Beer, "IPA", 6.0)))
            .times(1)
            .returning(move |_| Ok(drink_id));

        let mut events = MockEventRepository::new();
        events
            .expect_create()
            .withf(move |event| {
                event.user == user
                    && event.drink == drink_id
                    && event.volume == 330
                    && event.cost.is_none()
                    && event.health.is_none()
            })
            .times(1)
            .returning(Ok);

        let service = EventService::new(events, drinks);
        let event = service.create(&user.to_hex(), full_request()).await.unwrap();
        assert_eq!(event.user, user);
    }

    #[tokio::test]
    async fn create_missing_drink_fields_fails_before_resolution() {
        let mut drinks = MockDrinks::new();
        drinks.expect_resolve().times(0);

        let mut events = MockEventRepository::new();
        events.expect_create().times(0);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            drink_name: None,
            ..full_request()
        };

        let err = service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn create_unknown_drink_type_fails_before_resolution() {
        let mut drinks = MockDrinks::new();
        drinks.expect_resolve().times(0);

        let mut events = MockEventRepository::new();
        events.expect_create().times(0);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            drink_type: Some("antifreeze".to_string()),
            ..full_request()
        };

        let err = service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn create_missing_volume_fails_after_resolution_without_persisting() {
        let mut drinks = MockDrinks::new();
        drinks
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(ObjectId::new()));

        let mut events = MockEventRepository::new();
        events.expect_create().times(0);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            volume: None,
            ..full_request()
        };

        let err = service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn create_invalid_health_fails_even_after_resolution() {
        let mut drinks = MockDrinks::new();
        drinks
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(ObjectId::new()));

        let mut events = MockEventRepository::new();
        events.expect_create().times(0);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            health: Some("bad-tag".to_string()),
            ..full_request()
        };

        let err = service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn create_empty_health_string_is_treated_as_absent() {
        let mut drinks = MockDrinks::new();
        drinks
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(ObjectId::new()));

        let mut events = MockEventRepository::new();
        events
            .expect_create()
            .withf(|event| event.health.is_none())
            .times(1)
            .returning(Ok);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            health: Some(String::new()),
            ..full_request()
        };

        assert!(service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn create_missing_date_is_invalid() {
        let mut drinks = MockDrinks::new();
        drinks
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(ObjectId::new()));

        let mut events = MockEventRepository::new();
        events.expect_create().times(0);

        let service = EventService::new(events, drinks);
        let request = CreateEventRequest {
            date: None,
            ..full_request()
        };

        let err = service
            .create(&ObjectId::new().to_hex(), request)
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_session_user() {
        let user = ObjectId::new();

        let mut events = MockEventRepository::new();
        events
            .expect_list_for_user()
            .with(eq(user))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = EventService::new(events, MockDrinks::new());
        let listed = service.list(&user.to_hex()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn get_miss_is_invalid_data_regardless_of_reason() {
        // A nonexistent id and another user's id both come back as None from
        // the repository; the caller sees one indistinguishable error.
        let mut events = MockEventRepository::new();
        events
            .expect_find_for_user()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = EventService::new(events, MockDrinks::new());
        let err = service
            .get(&ObjectId::new().to_hex(), &ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }

    #[tokio::test]
    async fn get_malformed_id_is_a_store_error() {
        let mut events = MockEventRepository::new();
        events.expect_find_for_user().times(0);

        let service = EventService::new(events, MockDrinks::new());
        let err = service
            .get(&ObjectId::new().to_hex(), "not-an-object-id")
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Database { .. }));
    }

    #[tokio::test]
    async fn delete_twice_hits_invalid_data_the_second_time() {
        let user = ObjectId::new();
        let event = stored_event(user);
        let event_id = event.id;

        let mut events = MockEventRepository::new();
        let first = event.clone();
        events
            .expect_delete_for_user()
            .with(eq(event_id), eq(user))
            .times(1)
            .returning(move |_, _| Ok(Some(first.clone())));
        events
            .expect_delete_for_user()
            .with(eq(event_id), eq(user))
            .times(1)
            .returning(|_, _| Ok(None));

        let service = EventService::new(events, MockDrinks::new());

        let deleted = service
            .delete(&user.to_hex(), &event_id.to_hex())
            .await
            .unwrap();
        assert_eq!(deleted.id, event_id);

        let err = service
            .delete(&user.to_hex(), &event_id.to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::InvalidData));
    }
}
