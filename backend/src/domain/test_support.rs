//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{DisplayName, Location, LocationId, UnitSystem, User, UserId};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn fixture_user(id: &str, units: UnitSystem) -> User {
    let id = UserId::new(id).expect("valid user id");
    User {
        display_name: DisplayName::or_user_id(None, &id),
        id,
        default_units: units,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn fixture_location(owner: &User, nickname: &str) -> Location {
    Location {
        id: LocationId::generate(),
        user_id: owner.id.clone(),
        city: "Paris".to_owned(),
        country_code: "FR".to_owned(),
        nickname: nickname.to_owned(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}
