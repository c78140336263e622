use std::sync::{Arc, RwLock};

use anyhow::Result;
use tokio::sync::Mutex;

use crate::ai::agents::CalendarAssistant;
use crate::calendar::EventStore;
use crate::core::AppConfig;

pub type SharedState = Arc<RwLock<AppState>>;

pub struct AppState {
    pub store: EventStore,
    // Async mutex so only one chat turn is in flight at a time
    pub assistant: Arc<Mutex<CalendarAssistant>>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: EventStore) -> Result<Self> {
        let assistant = CalendarAssistant::new(config, store.clone())?;
        Ok(Self {
            store,
            assistant: Arc::new(Mutex::new(assistant)),
        })
    }
}
