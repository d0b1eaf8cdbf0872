//! Watchface controller
//!
//! The controller is the single owner of the watchface state. It:
//! - Holds the settings store, weather schedule and link counters
//! - Applies decoded companion messages and persists the result
//! - Requests weather on schedule and when poked
//! - Pushes derived display state to the display collaborator
//!
//! Each event is processed to completion before the next one. Display and
//! storage failures never stop processing; the first one is returned for
//! the caller to log.

use ascent_protocol::{LabelId, LayerId};

use crate::config::{FaceConfig, LoadStatus, SaveError, Settings, SettingsStore};
use crate::display::clock::LocalTime;
use crate::display::{DisplayState, Projector};
use crate::power::BatteryState;
use crate::scheduler::WeatherSchedule;
use crate::state::{Event, LinkStats};
use crate::traits::{
    CompanionLink, DisplayError, SendError, SettingsStorage, WallClock, WatchfaceDisplay,
};
use crate::weather::{InboundBatch, InboundMessage, OutboundMessage};

/// Non-fatal failures surfaced by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchfaceError {
    /// A draw command was not delivered; the display may be stale
    Display(DisplayError),
    /// Settings were applied but not persisted
    Save(SaveError),
}

impl From<DisplayError> for WatchfaceError {
    fn from(e: DisplayError) -> Self {
        WatchfaceError::Display(e)
    }
}

impl From<SaveError> for WatchfaceError {
    fn from(e: SaveError) -> Self {
        WatchfaceError::Save(e)
    }
}

/// Keeps the first error seen while carrying on
fn first_error(
    acc: Result<(), WatchfaceError>,
    next: Result<(), WatchfaceError>,
) -> Result<(), WatchfaceError> {
    acc.and(next)
}

/// The watchface
pub struct Watchface<D, L, S, C> {
    display: D,
    link: L,
    storage: S,
    clock: C,
    store: SettingsStore,
    projector: Projector,
    schedule: WeatherSchedule,
    battery: BatteryState,
    connected: bool,
    weather_loaded: bool,
    stats: LinkStats,
}

impl<D, L, S, C> Watchface<D, L, S, C>
where
    D: WatchfaceDisplay,
    L: CompanionLink,
    S: SettingsStorage,
    C: WallClock,
{
    /// Create the watchface, loading settings from storage
    ///
    /// The returned status tells how the settings were obtained.
    pub fn new(
        config: &FaceConfig,
        display: D,
        link: L,
        mut storage: S,
        clock: C,
    ) -> (Self, LoadStatus) {
        let (store, status) = SettingsStore::load(&mut storage);
        let face = Self {
            display,
            link,
            storage,
            clock,
            store,
            projector: Projector::new(config),
            schedule: WeatherSchedule::new(config.weather.check_rate_min),
            battery: BatteryState::default(),
            connected: false,
            weather_loaded: false,
            stats: LinkStats::default(),
        };
        (face, status)
    }

    /// Draw the whole face once
    pub fn start(&mut self) -> Result<(), WatchfaceError> {
        let mut result = Ok(());
        if let Some(now) = self.clock.now() {
            result = first_error(result, self.draw_time(&now));
            result = first_error(result, self.draw_date(&now));
        }
        result = first_error(result, self.draw_battery());
        result = first_error(result, self.draw_bluetooth());
        result = first_error(result, self.draw_weather());
        result
    }

    /// Process one event to completion
    pub fn handle(&mut self, event: Event) -> Result<(), WatchfaceError> {
        match event {
            Event::Tick(now) => self.on_tick(&now),
            Event::Message(batch) => self.on_message(batch),
            Event::Battery(state) => {
                self.battery = state;
                self.draw_battery()
            }
            Event::Bluetooth(connected) => {
                self.connected = connected;
                self.draw_bluetooth()
            }
            Event::OutboxSent => {
                self.stats.record_sent();
                Ok(())
            }
            Event::OutboxFailed(failure) => {
                self.stats.record_failed(failure);
                Ok(())
            }
            Event::InboxDropped(failure) => {
                self.stats.record_inbound_dropped(failure);
                Ok(())
            }
        }
    }

    fn on_tick(&mut self, now: &LocalTime) -> Result<(), WatchfaceError> {
        let result = first_error(self.draw_time(now), self.draw_date(now));

        if self.schedule.tick() {
            self.request_weather();
        }

        result
    }

    fn on_message(&mut self, batch: InboundBatch) -> Result<(), WatchfaceError> {
        for message in batch {
            match message {
                InboundMessage::ApiKeyUpdate(key) => {
                    self.store.settings_mut().api_key = key;
                }
                InboundMessage::WeatherUpdate {
                    temperature,
                    conditions,
                } => {
                    let settings = self.store.settings_mut();
                    settings.temperature = temperature;
                    settings.conditions = conditions;
                    self.weather_loaded = true;
                }
                InboundMessage::SettingsPoke => {
                    self.request_weather();
                }
                InboundMessage::DateFormatUpdate(format) => {
                    self.store.settings_mut().date_format = format;
                }
            }
        }
        self.stats.record_applied();

        self.save()
    }

    /// Persist the settings, then redraw what depends on them
    ///
    /// The redraw happens even when the write fails.
    pub fn save(&mut self) -> Result<(), WatchfaceError> {
        let saved = self.store.save(&mut self.storage).map_err(WatchfaceError::from);

        let mut result = first_error(saved, self.draw_weather());
        if let Some(now) = self.clock.now() {
            result = first_error(result, self.draw_date(&now));
        }
        result
    }

    /// Queue a weather request if the outbox is free
    ///
    /// A busy outbox drops the request; the next tick period or poke will
    /// try again. Returns whether the request was queued.
    pub fn request_weather(&mut self) -> bool {
        let message = OutboundMessage::weather_request(&self.store.settings().api_key);
        match self.link.try_send(message) {
            Ok(()) => true,
            Err(SendError::Busy) => {
                self.stats.record_request_dropped();
                false
            }
        }
    }

    fn draw_time(&mut self, now: &LocalTime) -> Result<(), WatchfaceError> {
        let text = self.projector.time_text(now);
        self.display.set_text(LabelId::Time, &text)?;
        Ok(())
    }

    fn draw_date(&mut self, now: &LocalTime) -> Result<(), WatchfaceError> {
        let text = self.projector.date_text(now, self.store.settings());
        self.display.set_text(LabelId::Date, &text)?;
        Ok(())
    }

    /// Gauge needle and weather icon
    fn draw_weather(&mut self) -> Result<(), WatchfaceError> {
        let settings = self.store.settings();
        let needle = self.projector.needle(settings.temperature);
        let icon = self.projector.weather_bitmap(settings.conditions);

        let moved = self.display.move_layer(LayerId::Needle, needle);
        let swapped = self.display.set_bitmap(LayerId::Weather, icon);
        moved.and(swapped)?;
        Ok(())
    }

    fn draw_battery(&mut self) -> Result<(), WatchfaceError> {
        let (width, bitmap) = self.projector.battery(self.battery);
        self.display.set_bitmap(LayerId::Battery, bitmap)?;
        self.display.set_width(LayerId::Battery, width)?;
        Ok(())
    }

    fn draw_bluetooth(&mut self) -> Result<(), WatchfaceError> {
        let visible = self.projector.bluetooth_visible(self.connected);
        self.display.set_visible(LayerId::Entity, visible)?;
        Ok(())
    }

    /// Everything the face currently shows, if the clock is set
    pub fn display_state(&mut self) -> Option<DisplayState> {
        let now = self.clock.now()?;
        Some(self.projector.project(
            self.store.settings(),
            &now,
            self.battery,
            self.connected,
        ))
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    pub fn weather_loaded(&self) -> bool {
        self.weather_loaded
    }

    pub fn battery(&self) -> BatteryState {
        self.battery
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Minutes since the last weather request
    pub fn minutes_since_request(&self) -> u16 {
        self.schedule.elapsed()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::api_key_from_str;
    use crate::config::store::tests::MemoryStorage;
    use crate::config::{Conditions, DateFormat};
    use crate::display::clock::Weekday;
    use crate::geometry::Point;
    use crate::state::LinkFailure;
    use ascent_protocol::{BitmapId, NackReason};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Drawn {
        Text(LabelId, String),
        Bitmap(LayerId, BitmapId),
        Move(LayerId, Point),
        Visible(LayerId, bool),
        Width(LayerId, u8),
    }

    #[derive(Default)]
    struct MockDisplay {
        drawn: Vec<Drawn>,
        fail: bool,
    }

    impl MockDisplay {
        fn push(&mut self, d: Drawn) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::QueueFull);
            }
            self.drawn.push(d);
            Ok(())
        }
    }

    impl WatchfaceDisplay for MockDisplay {
        fn set_text(&mut self, label: LabelId, text: &str) -> Result<(), DisplayError> {
            self.push(Drawn::Text(label, text.to_string()))
        }
        fn set_bitmap(&mut self, layer: LayerId, bitmap: BitmapId) -> Result<(), DisplayError> {
            self.push(Drawn::Bitmap(layer, bitmap))
        }
        fn move_layer(&mut self, layer: LayerId, origin: Point) -> Result<(), DisplayError> {
            self.push(Drawn::Move(layer, origin))
        }
        fn set_visible(&mut self, layer: LayerId, visible: bool) -> Result<(), DisplayError> {
            self.push(Drawn::Visible(layer, visible))
        }
        fn set_width(&mut self, layer: LayerId, width: u8) -> Result<(), DisplayError> {
            self.push(Drawn::Width(layer, width))
        }
    }

    #[derive(Default)]
    struct MockLink {
        sent: Vec<OutboundMessage>,
        busy: bool,
    }

    impl CompanionLink for MockLink {
        fn try_send(&mut self, message: OutboundMessage) -> Result<(), SendError> {
            if self.busy {
                return Err(SendError::Busy);
            }
            self.sent.push(message);
            Ok(())
        }
    }

    struct MockClock(Option<LocalTime>);

    impl WallClock for MockClock {
        fn now(&mut self) -> Option<LocalTime> {
            self.0
        }
    }

    fn noon() -> LocalTime {
        LocalTime {
            year: 2018,
            month: 5,
            day: 30,
            weekday: Weekday::Wednesday,
            hour: 12,
            minute: 0,
            second: 0,
        }
    }

    type Face = Watchface<MockDisplay, MockLink, MemoryStorage, MockClock>;

    fn face_with(storage: MemoryStorage) -> (Face, LoadStatus) {
        Watchface::new(
            &FaceConfig::default(),
            MockDisplay::default(),
            MockLink::default(),
            storage,
            MockClock(Some(noon())),
        )
    }

    fn face() -> Face {
        face_with(MemoryStorage::default()).0
    }

    fn batch(messages: &[InboundMessage]) -> InboundBatch {
        InboundBatch::from_slice(messages).unwrap()
    }

    fn drawn_texts(face: &Face, label: LabelId) -> Vec<String> {
        face.display()
            .drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Text(l, t) if *l == label => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_draws_everything() {
        let (mut face, status) = face_with(MemoryStorage::default());
        assert_eq!(status, LoadStatus::Absent);
        face.start().unwrap();

        let drawn = &face.display().drawn;
        assert!(drawn.contains(&Drawn::Text(LabelId::Time, "12:00".into())));
        assert!(drawn.contains(&Drawn::Text(LabelId::Date, "Wed May 30".into())));
        assert!(drawn.contains(&Drawn::Bitmap(LayerId::Battery, BitmapId::BatteryMeter)));
        assert!(drawn.contains(&Drawn::Width(LayerId::Battery, 100)));
        assert!(drawn.contains(&Drawn::Visible(LayerId::Entity, false)));
        assert!(drawn.contains(&Drawn::Move(LayerId::Needle, Point::new(85, 112))));
        assert!(drawn.contains(&Drawn::Bitmap(LayerId::Weather, BitmapId::Sunny)));
    }

    #[test]
    fn test_start_without_clock_skips_text() {
        let (mut face, _) = Watchface::new(
            &FaceConfig::default(),
            MockDisplay::default(),
            MockLink::default(),
            MemoryStorage::default(),
            MockClock(None),
        );
        face.start().unwrap();
        assert!(!face
            .display()
            .drawn
            .iter()
            .any(|d| matches!(d, Drawn::Text(..))));
    }

    #[test]
    fn test_restores_saved_settings() {
        let mut storage = MemoryStorage::default();
        let mut store = SettingsStore::new();
        store.settings_mut().temperature = 90;
        store.settings_mut().conditions = Conditions::Rainy;
        store.save(&mut storage).unwrap();

        let (face, status) = face_with(storage);
        assert_eq!(status, LoadStatus::Restored);
        assert_eq!(face.settings().temperature, 90);
        assert_eq!(face.settings().conditions, Conditions::Rainy);
    }

    #[test]
    fn test_weather_update_saves_and_redraws() {
        let mut face = face();
        face.handle(Event::Message(batch(&[InboundMessage::WeatherUpdate {
            temperature: 100,
            conditions: Conditions::Snowy,
        }])))
        .unwrap();

        assert!(face.weather_loaded());
        assert_eq!(face.settings().temperature, 100);
        assert_eq!(face.storage().writes, 1);
        assert!(face.link().sent.is_empty());

        let drawn = &face.display().drawn;
        assert!(drawn.contains(&Drawn::Move(LayerId::Needle, Point::new(131, 118))));
        assert!(drawn.contains(&Drawn::Bitmap(LayerId::Weather, BitmapId::Snowy)));
        assert_eq!(drawn_texts(&face, LabelId::Date), vec!["Wed May 30"]);
    }

    #[test]
    fn test_ninety_stormy_report_moves_needle() {
        let mut face = face();
        face.handle(Event::Message(batch(&[InboundMessage::WeatherUpdate {
            temperature: 90,
            conditions: Conditions::Stormy,
        }])))
        .unwrap();

        assert_eq!(face.storage().writes, 1);
        let drawn = &face.display().drawn;
        assert!(drawn.contains(&Drawn::Move(LayerId::Needle, Point::new(117, 116))));
        assert!(drawn.contains(&Drawn::Bitmap(LayerId::Weather, BitmapId::Stormy)));
    }

    #[test]
    fn test_poke_requests_weather_once_and_saves() {
        let mut face = face();
        face.handle(Event::Message(batch(&[
            InboundMessage::ApiKeyUpdate(api_key_from_str("k3y").unwrap()),
            InboundMessage::SettingsPoke,
            InboundMessage::DateFormatUpdate(DateFormat::International),
        ])))
        .unwrap();

        // Request carries the key applied earlier in the same batch
        assert_eq!(
            face.link().sent,
            vec![OutboundMessage::WeatherRequest {
                api_key: api_key_from_str("k3y").unwrap()
            }]
        );
        assert!(!face.weather_loaded());
        assert_eq!(face.storage().writes, 1);
        assert_eq!(face.settings().date_format, DateFormat::International);
        assert_eq!(drawn_texts(&face, LabelId::Date), vec!["Wed 30 May"]);
    }

    #[test]
    fn test_empty_poke_still_persists() {
        let mut face = face();
        face.handle(Event::Message(batch(&[InboundMessage::SettingsPoke])))
            .unwrap();
        assert_eq!(face.storage().writes, 1);
        assert_eq!(face.link().sent.len(), 1);
    }

    #[test]
    fn test_tick_refreshes_text_and_polls_weather() {
        let mut face = face();
        let mut now = noon();

        for minute in 1..=15u8 {
            now.minute = minute;
            face.handle(Event::Tick(now)).unwrap();
            if minute < 15 {
                assert!(face.link().sent.is_empty());
            }
        }

        assert_eq!(face.link().sent.len(), 1);
        assert_eq!(face.minutes_since_request(), 0);
        assert_eq!(drawn_texts(&face, LabelId::Time).last().unwrap(), "12:15");
        assert_eq!(drawn_texts(&face, LabelId::Date).len(), 15);
    }

    #[test]
    fn test_busy_outbox_drops_request() {
        let mut face = face();
        face.link.busy = true;

        assert!(!face.request_weather());
        assert_eq!(face.stats().requests_dropped, 1);
        assert!(face.link().sent.is_empty());
    }

    #[test]
    fn test_battery_event() {
        let mut face = face();
        face.handle(Event::Battery(BatteryState::new(42, true)))
            .unwrap();

        let drawn = &face.display().drawn;
        assert_eq!(
            drawn.as_slice(),
            &[
                Drawn::Bitmap(LayerId::Battery, BitmapId::ChargingMeter),
                Drawn::Width(LayerId::Battery, 42),
            ]
        );
        assert_eq!(face.battery().percent, 42);
    }

    #[test]
    fn test_bluetooth_event() {
        let mut face = face();
        face.handle(Event::Bluetooth(true)).unwrap();
        face.handle(Event::Bluetooth(false)).unwrap();

        assert_eq!(
            face.display().drawn,
            vec![
                Drawn::Visible(LayerId::Entity, true),
                Drawn::Visible(LayerId::Entity, false),
            ]
        );
        assert!(!face.connected());
    }

    #[test]
    fn test_display_state_follows_events() {
        let mut face = face();
        face.handle(Event::Bluetooth(true)).unwrap();
        face.handle(Event::Battery(BatteryState::new(55, false)))
            .unwrap();

        let state = face.display_state().unwrap();
        assert!(state.bluetooth_visible);
        assert_eq!(state.battery_width, 55);
        assert_eq!(state.time_text.as_str(), "12:00");
        assert_eq!(state.needle, Point::new(85, 112));
    }

    #[test]
    fn test_link_outcomes_are_counted() {
        let mut face = face();
        face.handle(Event::OutboxSent).unwrap();
        face.handle(Event::OutboxFailed(LinkFailure::Nack(NackReason::Busy)))
            .unwrap();
        face.handle(Event::InboxDropped(LinkFailure::Overflow))
            .unwrap();

        let stats = face.stats();
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.inbound_dropped, 1);
        assert!(face.display().drawn.is_empty());
    }

    #[test]
    fn test_storage_failure_still_redraws() {
        let storage = MemoryStorage {
            fail_writes: true,
            ..Default::default()
        };
        let (mut face, _) = face_with(storage);

        let result = face.handle(Event::Message(batch(&[InboundMessage::WeatherUpdate {
            temperature: 30,
            conditions: Conditions::Cloudy,
        }])));

        assert!(matches!(result, Err(WatchfaceError::Save(_))));
        assert_eq!(face.settings().conditions, Conditions::Cloudy);
        assert!(face
            .display()
            .drawn
            .contains(&Drawn::Bitmap(LayerId::Weather, BitmapId::Cloudy)));
    }

    #[test]
    fn test_display_failure_does_not_stop_polling() {
        let mut face = face();
        face.display.fail = true;

        let mut last = Ok(());
        for _ in 0..15 {
            last = face.handle(Event::Tick(noon()));
        }
        assert_eq!(last, Err(WatchfaceError::Display(DisplayError::QueueFull)));
        assert_eq!(face.link().sent.len(), 1);
    }
}
