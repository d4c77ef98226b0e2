//! Named recurring timers on tokio.
//!
//! Mirrors the extension alarms API: one timer per name, first fire one period
//! after creation, fires delivered as [`HostEvent::TimerFired`] on the event
//! channel.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::platform::host::HostEvent;

struct Alarm {
    period_minutes: u64,
    handle: JoinHandle<()>,
}

pub struct AlarmService {
    alarms: Mutex<HashMap<String, Alarm>>,
    events: UnboundedSender<HostEvent>,
}

impl AlarmService {
    pub fn new(events: UnboundedSender<HostEvent>) -> Self {
        Self {
            alarms: Mutex::new(HashMap::new()),
            events,
        }
    }

    /// Installs `name`, replacing any timer already registered under it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create(&self, name: &str, period_minutes: u64) {
        let minutes = period_minutes.clamp(1, u64::from(u32::MAX));
        let period = Duration::from_secs(minutes * 60);
        let events = self.events.clone();
        let alarm_name = name.to_string();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!(alarm = %alarm_name, "alarm fired");
                if events.send(HostEvent::TimerFired(alarm_name.clone())).is_err() {
                    break;
                }
            }
        });

        let mut alarms = self.lock();
        if let Some(previous) = alarms.insert(
            name.to_string(),
            Alarm {
                period_minutes,
                handle,
            },
        ) {
            previous.handle.abort();
        }
    }

    /// Removes `name`; returns whether a timer existed.
    pub fn clear(&self, name: &str) -> bool {
        match self.lock().remove(name) {
            Some(alarm) => {
                alarm.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn period_of(&self, name: &str) -> Option<u64> {
        self.lock().get(name).map(|a| a.period_minutes)
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_all(&self) {
        for (_, alarm) in self.lock().drain() {
            alarm.handle.abort();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Alarm>> {
        // A panic while holding the lock leaves the map itself intact.
        self.alarms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for AlarmService {
    fn drop(&mut self) {
        self.clear_all();
    }
}
