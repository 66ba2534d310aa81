use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::Mutex;
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

use routebind::{
    LocationCodec, LocationSink, NavigationTarget, Navigator, ParamBinding, ScalarCodec,
};

/// Sink that records every location the navigator dispatches.
pub struct RecordingSink {
    log: Arc<Mutex<Vec<String>>>,
}

impl LocationSink for RecordingSink {
    fn open_location(&mut self, location: &str) {
        self.log.lock().push(location.to_string());
    }
}

/// A minimal host: one navigator wired to a recording sink.
pub struct ScenarioHost {
    pub navigator: Navigator<RecordingSink>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScenarioHost {
    pub fn new() -> Self {
        Self::with_codecs(ScalarCodec::core_seed(), LocationCodec::default())
    }

    /// Host with percent-encoding turned off.
    pub fn raw_mode() -> Self {
        Self::with_codecs(ScalarCodec::core_seed(), LocationCodec::new(false))
    }

    pub fn with_codecs(scalars: ScalarCodec, location: LocationCodec) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink { log: log.clone() };
        Self {
            navigator: Navigator::with_codecs(scalars, location, sink),
            log,
        }
    }

    /// Locations dispatched so far, oldest first.
    pub fn opened(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

/// Inventory listing: plain required id, defaulted page, repeatable tag.
#[derive(Debug, Default, PartialEq)]
pub struct InventoryView {
    pub id: i32,
    pub page: u32,
    pub tags: Vec<String>,
}

impl NavigationTarget for InventoryView {
    fn route() -> &'static str {
        "inventory"
    }

    fn bindings() -> Vec<ParamBinding<Self>> {
        vec![
            ParamBinding::scalar("id", |v: &mut Self, id: i32| v.id = id).required(),
            ParamBinding::scalar("page", |v: &mut Self, page: u32| v.page = page)
                .with_default("1"),
            ParamBinding::list("tag", |v: &mut Self, tags| v.tags = tags),
        ]
    }
}

/// Schedule view: temporal scalars in every flavour.
#[derive(Debug, PartialEq)]
pub struct ScheduleView {
    pub day: Option<Date>,
    pub slot: Time,
    pub until: Option<OffsetDateTime>,
    pub rooms: IndexSet<String>,
    pub days_off: IndexSet<Date>,
}

impl Default for ScheduleView {
    fn default() -> Self {
        Self {
            day: None,
            slot: Time::MIDNIGHT,
            until: None,
            rooms: IndexSet::new(),
            days_off: IndexSet::new(),
        }
    }
}

impl NavigationTarget for ScheduleView {
    fn route() -> &'static str {
        "schedule"
    }

    fn bindings() -> Vec<ParamBinding<Self>> {
        vec![
            ParamBinding::optional("day", |v: &mut Self, day| v.day = day),
            ParamBinding::scalar("slot", |v: &mut Self, slot: Time| v.slot = slot)
                .with_default("09:00"),
            ParamBinding::optional("until", |v: &mut Self, until| v.until = until),
            ParamBinding::set("room", |v: &mut Self, rooms| v.rooms = rooms),
            ParamBinding::set("day_off", |v: &mut Self, days| v.days_off = days),
        ]
    }
}

/// Document view: uuid identity plus an optional revision.
#[derive(Debug, Default, PartialEq)]
pub struct DocumentView {
    pub id: Option<Uuid>,
    pub revision: Option<u64>,
    pub exact: Option<bool>,
}

impl NavigationTarget for DocumentView {
    fn route() -> &'static str {
        "doc"
    }

    fn bindings() -> Vec<ParamBinding<Self>> {
        vec![
            ParamBinding::optional("id", |v: &mut Self, id| v.id = id),
            ParamBinding::optional("rev", |v: &mut Self, rev| v.revision = rev),
            ParamBinding::optional("exact", |v: &mut Self, exact| v.exact = exact),
        ]
    }
}
