use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    app::{
        history::{HistoryEntry, SearchHistoryStore},
        settings::Services,
    },
    data::{forecast::ForecastClient, geocode::GeocodeClient, geoip::GeoIpClient},
    domain::{
        clock::Clock,
        pagination::HourlyPager,
        query::is_valid_input,
        weather::{CitySearchResult, GeocodeResolution, HourlyForecastEntry, Units, WeatherSnapshot},
    },
    error::FetchError,
};

const EVENT_CAPACITY: usize = 32;

/// Monotonic request token. A result whose token no longer matches the
/// session's latest one for that request kind is dropped on arrival.
pub type Generation = u64;

#[derive(Debug)]
pub enum SessionEvent {
    SearchFinished {
        generation: Generation,
        query: String,
        outcome: Result<GeocodeResolution, FetchError>,
    },
    ForecastFinished {
        generation: Generation,
        outcome: Result<WeatherSnapshot, FetchError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    Locating,
    Searching,
    SelectingLocation,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidInput,
    NotFound(String),
    Fetch(FetchError),
}

impl SessionError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            SessionError::InvalidInput => "Invalid characters.",
            SessionError::NotFound(_) => "City not found",
            SessionError::Fetch(err) => err.user_message(),
        }
    }
}

/// Coordinates plus the labels shown for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTarget {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl From<&CitySearchResult> for ForecastTarget {
    fn from(city: &CitySearchResult) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            city: city.name.clone(),
            country: city.country.clone(),
        }
    }
}

impl From<&HistoryEntry> for ForecastTarget {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            latitude: entry.latitude,
            longitude: entry.longitude,
            city: entry.city_name().to_string(),
            country: entry.country.clone(),
        }
    }
}

/// One dashboard's worth of state. Network work runs on spawned tasks that
/// report back through the channel returned by [`Session::new`]; feed each
/// event to [`Session::apply`].
#[derive(Debug)]
pub struct Session {
    geocoder: GeocodeClient,
    forecaster: ForecastClient,
    geoip: GeoIpClient,
    history: Arc<SearchHistoryStore>,
    clock: Arc<dyn Clock>,
    tx: mpsc::Sender<SessionEvent>,
    search_generation: Generation,
    forecast_generation: Generation,
    pub mode: SessionMode,
    pub units: Units,
    pub snapshot: Option<WeatherSnapshot>,
    pub candidates: Vec<CitySearchResult>,
    pub pager: HourlyPager,
    pub last_error: Option<SessionError>,
    pub target: Option<ForecastTarget>,
}

impl Session {
    #[must_use]
    pub fn new(services: Services, units: Units) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CAPACITY);
        let session = Self {
            geocoder: services.geocoder,
            forecaster: services.forecaster,
            geoip: services.geoip,
            history: services.history,
            clock: services.clock,
            tx,
            search_generation: 0,
            forecast_generation: 0,
            mode: SessionMode::Idle,
            units,
            snapshot: None,
            candidates: Vec::new(),
            pager: HourlyPager::default(),
            last_error: None,
            target: None,
        };
        (session, rx)
    }

    #[must_use]
    pub fn search_generation(&self) -> Generation {
        self.search_generation
    }

    #[must_use]
    pub fn forecast_generation(&self) -> Generation {
        self.forecast_generation
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self.mode,
            SessionMode::Locating | SessionMode::Searching | SessionMode::Loading
        )
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.last_error.as_ref().map(SessionError::message)
    }

    #[must_use]
    pub fn history(&self) -> &SearchHistoryStore {
        &self.history
    }

    /// Free-text search. Input that fails validation is rejected here and
    /// never reaches the network.
    pub fn submit_query(&mut self, text: &str) {
        if !is_valid_input(text) {
            self.fail(SessionError::InvalidInput);
            return;
        }
        let generation = self.begin_search(SessionMode::Searching);
        let geocoder = self.geocoder.clone();
        let tx = self.tx.clone();
        let query = text.trim().to_string();
        tokio::spawn(async move {
            let outcome = geocoder.resolve(&query).await;
            let _ = tx
                .send(SessionEvent::SearchFinished {
                    generation,
                    query,
                    outcome,
                })
                .await;
        });
    }

    /// Looks up the caller's city by IP, then resolves it like a typed query.
    pub fn auto_locate(&mut self) {
        let generation = self.begin_search(SessionMode::Locating);
        let geoip = self.geoip.clone();
        let geocoder = self.geocoder.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let query = geoip.detect_city().await;
            tracing::info!(city = %query, "located by IP");
            let outcome = geocoder.resolve(&query).await;
            let _ = tx
                .send(SessionEvent::SearchFinished {
                    generation,
                    query,
                    outcome,
                })
                .await;
        });
    }

    /// Picks one of the candidates offered after an ambiguous search.
    pub fn choose_candidate(&mut self, index: usize) -> bool {
        let Some(city) = self.candidates.get(index).cloned() else {
            return false;
        };
        self.candidates.clear();
        self.record_history(&city);
        self.fetch_target(ForecastTarget::from(&city));
        true
    }

    /// Re-fetches a stored recent search. Does not reorder the history.
    pub fn choose_history(&mut self, index: usize) -> anyhow::Result<bool> {
        let entries = self.history.list()?;
        let Some(entry) = entries.get(index) else {
            return Ok(false);
        };
        self.fetch_target(ForecastTarget::from(entry));
        Ok(true)
    }

    /// Forecast for coordinates that need no geocoding.
    pub fn fetch_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.fetch_target(ForecastTarget {
            latitude,
            longitude,
            city: format!("{latitude:.4}, {longitude:.4}"),
            country: String::new(),
        });
    }

    /// Re-fetches the current location, if there is one.
    pub fn refresh(&mut self) -> bool {
        match self.target.clone() {
            Some(target) => {
                self.fetch_target(target);
                true
            }
            None => false,
        }
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
    }

    #[must_use]
    pub fn hourly_page(&self) -> &[HourlyForecastEntry] {
        self.snapshot
            .as_ref()
            .map(|snapshot| self.pager.slice(&snapshot.hourly))
            .unwrap_or_default()
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SearchFinished {
                generation,
                query,
                outcome,
            } => {
                if generation != self.search_generation {
                    tracing::debug!(generation, query = %query, "dropping superseded search result");
                    return;
                }
                self.handle_search(outcome);
            }
            SessionEvent::ForecastFinished {
                generation,
                outcome,
            } => {
                if generation != self.forecast_generation {
                    tracing::debug!(generation, "dropping superseded forecast");
                    return;
                }
                self.handle_forecast(outcome);
            }
        }
    }

    fn handle_search(&mut self, outcome: Result<GeocodeResolution, FetchError>) {
        match outcome {
            Ok(GeocodeResolution::Selected(city)) => {
                tracing::info!(city = %city.display_name(), "city resolved");
                self.record_history(&city);
                self.fetch_target(ForecastTarget::from(&city));
            }
            Ok(GeocodeResolution::NeedsDisambiguation(candidates)) => {
                self.candidates = candidates;
                self.mode = SessionMode::SelectingLocation;
            }
            Ok(GeocodeResolution::NotFound(query)) => self.fail(SessionError::NotFound(query)),
            Ok(GeocodeResolution::Invalid(_)) => self.fail(SessionError::InvalidInput),
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), error = %err, "city search failed");
                self.fail(SessionError::Fetch(err));
            }
        }
    }

    fn handle_forecast(&mut self, outcome: Result<WeatherSnapshot, FetchError>) {
        match outcome {
            Ok(snapshot) => {
                tracing::info!(location = %snapshot.location_label(), "forecast updated");
                self.pager = HourlyPager::new(snapshot.hourly.len());
                self.snapshot = Some(snapshot);
                self.last_error = None;
                self.mode = SessionMode::Ready;
            }
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), error = %err, "forecast fetch failed");
                self.fail(SessionError::Fetch(err));
            }
        }
    }

    /// A new search also retires any forecast still in flight for the old location.
    fn begin_search(&mut self, mode: SessionMode) -> Generation {
        self.search_generation += 1;
        self.forecast_generation += 1;
        self.candidates.clear();
        self.last_error = None;
        self.mode = mode;
        self.search_generation
    }

    fn fetch_target(&mut self, target: ForecastTarget) {
        self.forecast_generation += 1;
        let generation = self.forecast_generation;
        self.last_error = None;
        self.mode = SessionMode::Loading;
        self.target = Some(target.clone());

        let forecaster = self.forecaster.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = forecaster
                .fetch(
                    target.latitude,
                    target.longitude,
                    &target.city,
                    &target.country,
                )
                .await;
            let _ = tx
                .send(SessionEvent::ForecastFinished {
                    generation,
                    outcome,
                })
                .await;
        });
    }

    fn record_history(&self, city: &CitySearchResult) {
        let now = self.clock.now_utc().timestamp_millis();
        if let Err(err) = self.history.add_city(city, now) {
            tracing::warn!(error = %err, "failed to save search history");
        }
    }

    fn fail(&mut self, error: SessionError) {
        self.last_error = Some(error);
        self.mode = SessionMode::Error;
    }
}
