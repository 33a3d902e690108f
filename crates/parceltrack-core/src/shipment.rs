use crate::{CoreError, GeoPoint, PackageStatus, RouteSnapshot, TimestampUtc};

/// Row of the `tracking_events` table: a status change observed at a place.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingEvent {
    pub status: PackageStatus,
    pub location: GeoPoint,
    pub occurred_at: TimestampUtc,
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: Option<String>,
}

impl TrackingEvent {
    #[must_use]
    pub fn new(status: PackageStatus, location: GeoPoint, occurred_at: TimestampUtc) -> Self {
        Self {
            status,
            location,
            occurred_at,
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A package with its route endpoints and tracking history.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    tracking_number: String,
    pub status: PackageStatus,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: Vec<TrackingEvent>,
}

impl Shipment {
    pub fn new(
        tracking_number: impl Into<String>,
        status: PackageStatus,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Self, CoreError> {
        let tracking_number = tracking_number.into();
        if tracking_number.trim().is_empty() {
            return Err(CoreError::EmptyTrackingNumber);
        }

        Ok(Self {
            tracking_number,
            status,
            origin,
            destination,
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn tracking_number(&self) -> &str {
        &self.tracking_number
    }

    pub fn record(&mut self, event: TrackingEvent) {
        self.events.push(event);
    }

    /// Checks the tracking number and every coordinate carried by the shipment.
    ///
    /// Deserialized shipments bypass `new`, so loaders call this before use.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tracking_number.trim().is_empty() {
            return Err(CoreError::EmptyTrackingNumber);
        }
        self.origin.validate()?;
        self.destination.validate()?;
        for event in &self.events {
            event.location.validate()?;
        }
        Ok(())
    }

    /// Most recent event by `occurred_at`; the later entry wins ties.
    #[must_use]
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.events
            .iter()
            .fold(None, |latest: Option<&TrackingEvent>, event| match latest {
                Some(current) if current.occurred_at > event.occurred_at => Some(current),
                _ => Some(event),
            })
    }

    #[must_use]
    pub fn current_location(&self) -> &GeoPoint {
        self.latest_event()
            .map_or(&self.origin, |event| &event.location)
    }

    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        RouteSnapshot::new(
            self.origin.clone(),
            self.destination.clone(),
            self.current_location().clone(),
            self.status.is_delivered(),
        )
    }
}
