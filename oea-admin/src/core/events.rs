//! Commit events
//!
//! The submission orchestrator announces every successful mutation
//! here instead of reaching into any read-side cache itself. Whoever
//! owns cached views subscribes and invalidates on its own terms.

use std::sync::Arc;

/// Receives commit announcements
pub trait CommitListener: Send + Sync {
    /// A product mutation was persisted. `product_id` is `None` when
    /// the affected record has no stable identity (bulk operations).
    fn on_committed(&self, product_id: Option<&str>);
}

/// Fan-out of commit events to registered listeners
#[derive(Default)]
pub struct CommitHub {
    listeners: Vec<Arc<dyn CommitListener>>,
}

impl CommitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn CommitListener>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, product_id: Option<&str>) {
        tracing::debug!(product_id = product_id.unwrap_or("-"), "commit event");
        for listener in &self.listeners {
            listener.on_committed(product_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<Option<String>>>);

    impl CommitListener for Recorder {
        fn on_committed(&self, product_id: Option<&str>) {
            self.0
                .lock()
                .unwrap()
                .push(product_id.map(str::to_string));
        }
    }

    #[test]
    fn test_emit_reaches_every_listener() {
        let first = Arc::new(Recorder(Mutex::new(Vec::new())));
        let second = Arc::new(Recorder(Mutex::new(Vec::new())));

        let mut hub = CommitHub::new();
        hub.subscribe(first.clone());
        hub.subscribe(second.clone());

        hub.emit(Some("p-1"));
        hub.emit(None);

        let seen = first.0.lock().unwrap().clone();
        assert_eq!(seen, vec![Some("p-1".to_string()), None]);
        assert_eq!(second.0.lock().unwrap().len(), 2);
    }
}
