use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::locations::find_location;
use super::store::ProfileStore;
use super::types::{NewRoute, ProfileUpdate, Route, RouteUpdate, UserProfile, default_profile};
use crate::outcome::FallbackReason;

/// PM2.5 assumed for locations missing from the reference catalog.
const UNKNOWN_LOCATION_PM25: f64 = 50.0;

const HOME_VISITS_PER_WEEK: u32 = 7;
const WORK_VISITS_PER_WEEK: u32 = 5;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("route `{0}` not found")]
    RouteNotFound(String),
    #[error("failed to persist profile: {0:#}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationVisits {
    pub location: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationExposure {
    pub name: String,
    pub value: f64,
}

/// Holds the current profile and writes every change through its store.
///
/// A change is persisted before it becomes visible, so a failed save leaves
/// the session unchanged.
pub struct ProfileSession<S: ProfileStore> {
    store: S,
    profile: UserProfile,
    fallback: Option<FallbackReason>,
}

impl<S: ProfileStore> ProfileSession<S> {
    /// Loads the stored profile, substituting the default profile when the
    /// entry is missing or corrupt.
    pub fn open(store: S) -> Self {
        let (profile, fallback) = match store.load() {
            Ok(Some(profile)) => (profile, None),
            Ok(None) => {
                info!("No stored profile, using default");
                (default_profile(), Some(FallbackReason::Missing))
            }
            Err(e) => {
                warn!(error = %e, "Stored profile is unreadable, using default");
                (default_profile(), Some(FallbackReason::Corrupt(format!("{e:#}"))))
            }
        };

        Self {
            store,
            profile,
            fallback,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Why the default profile is in use, if it is.
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        self.fallback.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn commit(&mut self, next: UserProfile) -> Result<(), ProfileError> {
        self.store.save(&next)?;
        self.profile = next;
        self.fallback = None;
        Ok(())
    }

    fn generate_id(&self) -> String {
        loop {
            let id = format!(
                "{}{}",
                to_base36(Utc::now().timestamp_millis().max(0) as u64),
                to_base36(rand::random::<u64>())
            );
            if !self.profile.routes.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    /// Adds a route with a fresh ID. New routes always start active.
    pub fn add_route(&mut self, route: NewRoute) -> Result<&Route, ProfileError> {
        let id = self.generate_id();
        let mut next = self.profile.clone();
        next.routes.push(route.into_route(id.clone()));
        let idx = next.routes.len() - 1;
        self.commit(next)?;

        info!(route_id = %id, routes = self.profile.routes.len(), "Route added");
        Ok(&self.profile.routes[idx])
    }

    pub fn update_route(&mut self, id: &str, update: RouteUpdate) -> Result<&Route, ProfileError> {
        let mut next = self.profile.clone();
        let idx = next
            .routes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ProfileError::RouteNotFound(id.to_string()))?;
        update.apply(&mut next.routes[idx]);
        self.commit(next)?;

        info!(route_id = id, "Route updated");
        Ok(&self.profile.routes[idx])
    }

    pub fn delete_route(&mut self, id: &str) -> Result<Route, ProfileError> {
        let mut next = self.profile.clone();
        let idx = next
            .routes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ProfileError::RouteNotFound(id.to_string()))?;
        let removed = next.routes.remove(idx);
        self.commit(next)?;

        info!(route_id = id, "Route deleted");
        Ok(removed)
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&UserProfile, ProfileError> {
        let mut next = self.profile.clone();
        update.apply(&mut next);
        self.commit(next)?;
        Ok(&self.profile)
    }

    /// Weekly visit counts per location, most visited first.
    ///
    /// Home counts 7 visits and work 5; every active route adds its weekly
    /// frequency to its start, end and via points. Ties keep first-seen order.
    pub fn most_visited_locations(&self) -> Vec<LocationVisits> {
        let mut visits: Vec<LocationVisits> = Vec::new();

        fn set(visits: &mut Vec<LocationVisits>, location: &str, frequency: u32) {
            match visits.iter_mut().find(|v| v.location == location) {
                Some(v) => v.frequency = frequency,
                None => visits.push(LocationVisits {
                    location: location.to_string(),
                    frequency,
                }),
            }
        }

        fn add(visits: &mut Vec<LocationVisits>, location: &str, frequency: u32) {
            match visits.iter_mut().find(|v| v.location == location) {
                Some(v) => v.frequency += frequency,
                None => visits.push(LocationVisits {
                    location: location.to_string(),
                    frequency,
                }),
            }
        }

        set(&mut visits, &self.profile.home_location.location, HOME_VISITS_PER_WEEK);
        if let Some(work) = &self.profile.work_location {
            set(&mut visits, &work.location, WORK_VISITS_PER_WEEK);
        }

        for route in self.profile.routes.iter().filter(|r| r.active) {
            let weekly = route.frequency.visits_per_week();
            add(&mut visits, &route.start.location, weekly);
            add(&mut visits, &route.end.location, weekly);
            for via in &route.via {
                add(&mut visits, &via.location, weekly);
            }
        }

        visits.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        visits
    }

    /// Average PM2.5 at the `limit` most visited locations.
    ///
    /// Empty until the profile has at least one route.
    pub fn personalized_location_exposure(&self, limit: usize) -> Vec<LocationExposure> {
        if self.profile.routes.is_empty() {
            return Vec::new();
        }

        self.most_visited_locations()
            .into_iter()
            .take(limit)
            .map(|v| LocationExposure {
                value: find_location(&v.location)
                    .map(|l| l.pm25_avg)
                    .unwrap_or(UNKNOWN_LOCATION_PM25),
                name: v.location,
            })
            .collect()
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
