use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A named place with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCoordinates {
    pub location: String,
    pub coordinates: Coordinates,
}

impl LocationCoordinates {
    pub fn new(location: &str, lat: f64, lng: f64) -> Self {
        Self {
            location: location.to_string(),
            coordinates: Coordinates { lat, lng },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
    Cycling,
    Car,
    #[value(name = "public_transport")]
    PublicTransport,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekends,
    Occasionally,
}

impl Frequency {
    /// Visits per week implied by the frequency.
    pub fn visits_per_week(&self) -> u32 {
        match self {
            Frequency::Daily => 7,
            Frequency::Weekdays => 5,
            Frequency::Weekends => 2,
            Frequency::Occasionally => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthSensitivity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    pub start: LocationCoordinates,
    pub end: LocationCoordinates,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub via: Vec<LocationCoordinates>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,
    pub transport_mode: TransportMode,
    pub active: bool,
}

/// A route as submitted by the user, before it has an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoute {
    pub name: String,
    pub start: LocationCoordinates,
    pub end: LocationCoordinates,
    pub via: Vec<LocationCoordinates>,
    pub frequency: Frequency,
    pub departure_time: Option<String>,
    pub return_time: Option<String>,
    pub transport_mode: TransportMode,
}

impl NewRoute {
    pub(crate) fn into_route(self, id: String) -> Route {
        Route {
            id,
            name: self.name,
            start: self.start,
            end: self.end,
            via: self.via,
            frequency: self.frequency,
            departure_time: self.departure_time,
            return_time: self.return_time,
            transport_mode: self.transport_mode,
            active: true,
        }
    }
}

/// Partial route update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteUpdate {
    pub name: Option<String>,
    pub start: Option<LocationCoordinates>,
    pub end: Option<LocationCoordinates>,
    pub via: Option<Vec<LocationCoordinates>>,
    pub frequency: Option<Frequency>,
    pub departure_time: Option<String>,
    pub return_time: Option<String>,
    pub transport_mode: Option<TransportMode>,
    pub active: Option<bool>,
}

impl RouteUpdate {
    pub(crate) fn apply(self, route: &mut Route) {
        if let Some(name) = self.name {
            route.name = name;
        }
        if let Some(start) = self.start {
            route.start = start;
        }
        if let Some(end) = self.end {
            route.end = end;
        }
        if let Some(via) = self.via {
            route.via = via;
        }
        if let Some(frequency) = self.frequency {
            route.frequency = frequency;
        }
        if let Some(time) = self.departure_time {
            route.departure_time = Some(time);
        }
        if let Some(time) = self.return_time {
            route.return_time = Some(time);
        }
        if let Some(mode) = self.transport_mode {
            route.transport_mode = mode;
        }
        if let Some(active) = self.active {
            route.active = active;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    #[serde(rename = "thresholdAQI")]
    pub threshold_aqi: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub home_location: LocationCoordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<LocationCoordinates>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_sensitivity: Option<HealthSensitivity>,
    pub notification_preferences: NotificationPreferences,
}

impl Default for UserProfile {
    fn default() -> Self {
        default_profile()
    }
}

/// Partial profile update; routes are managed through the route operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub home_location: Option<LocationCoordinates>,
    pub work_location: Option<LocationCoordinates>,
    pub health_sensitivity: Option<HealthSensitivity>,
    pub notification_preferences: Option<NotificationPreferences>,
}

impl ProfileUpdate {
    pub(crate) fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = Some(email);
        }
        if let Some(home) = self.home_location {
            profile.home_location = home;
        }
        if let Some(work) = self.work_location {
            profile.work_location = Some(work);
        }
        if let Some(sensitivity) = self.health_sensitivity {
            profile.health_sensitivity = Some(sensitivity);
        }
        if let Some(prefs) = self.notification_preferences {
            profile.notification_preferences = prefs;
        }
    }
}

/// Profile used when nothing usable is stored.
pub fn default_profile() -> UserProfile {
    UserProfile {
        name: "Guest User".to_string(),
        email: None,
        home_location: LocationCoordinates::new("Thamel", 27.7172, 85.3082),
        work_location: None,
        routes: Vec::new(),
        health_sensitivity: Some(HealthSensitivity::Medium),
        notification_preferences: NotificationPreferences {
            email: false,
            push: true,
            threshold_aqi: 100,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_layout() {
        let json = serde_json::to_value(default_profile()).unwrap();

        assert_eq!(json["name"], "Guest User");
        assert_eq!(json["homeLocation"]["location"], "Thamel");
        assert_eq!(json["healthSensitivity"], "medium");
        assert_eq!(json["notificationPreferences"]["thresholdAQI"], 100);
        assert!(json.get("workLocation").is_none());
    }

    #[test]
    fn test_route_enums_use_wire_names() {
        let route = NewRoute {
            name: "Commute".into(),
            start: LocationCoordinates::new("Thamel", 27.7172, 85.3082),
            end: LocationCoordinates::new("Patan", 27.6742, 85.3240),
            via: vec![],
            frequency: Frequency::Weekdays,
            departure_time: Some("08:00".into()),
            return_time: None,
            transport_mode: TransportMode::PublicTransport,
        }
        .into_route("abc".into());

        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["transportMode"], "public_transport");
        assert_eq!(json["frequency"], "weekdays");
        assert_eq!(json["departureTime"], "08:00");
        assert_eq!(json["active"], true);
    }

    #[test]
    fn test_route_update_only_touches_given_fields() {
        let mut route = NewRoute {
            name: "Commute".into(),
            start: LocationCoordinates::new("Thamel", 27.7172, 85.3082),
            end: LocationCoordinates::new("Patan", 27.6742, 85.3240),
            via: vec![],
            frequency: Frequency::Daily,
            departure_time: None,
            return_time: None,
            transport_mode: TransportMode::Walking,
        }
        .into_route("abc".into());

        RouteUpdate {
            active: Some(false),
            frequency: Some(Frequency::Weekends),
            ..Default::default()
        }
        .apply(&mut route);

        assert!(!route.active);
        assert_eq!(route.frequency, Frequency::Weekends);
        assert_eq!(route.name, "Commute");
        assert_eq!(route.transport_mode, TransportMode::Walking);
    }
}
