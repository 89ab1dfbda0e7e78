use crossbeam_channel::{Receiver, Sender};

/// Bytes received so far for one in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    /// URL being loaded.
    pub url: String,
    /// Bytes received so far.
    pub loaded: u64,
    /// Total size, when the source reports one.
    pub total: Option<u64>,
}

/// Fan-out of [`LoadProgress`] events to any number of subscribers.
///
/// Loaders clone the hub into each load future; subscribe before loads
/// start. Emitting with no subscribers, or to a dropped receiver, is a
/// no-op.
#[derive(Debug, Clone, Default)]
pub struct ProgressHub {
    subscribers: Vec<Sender<LoadProgress>>,
}

impl ProgressHub {
    /// New unbounded progress stream.
    pub fn subscribe(&mut self) -> Receiver<LoadProgress> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Whether anyone is listening.
    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Publish one event to every subscriber.
    pub fn emit(&self, progress: &LoadProgress) {
        for tx in &self.subscribers {
            let _ = tx.send(progress.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_event() {
        let mut hub = ProgressHub::default();
        assert!(!hub.has_subscribers());
        let a = hub.subscribe();
        let b = hub.subscribe();
        let event = LoadProgress {
            url: "f/0001.png".into(),
            loaded: 10,
            total: Some(20),
        };
        hub.emit(&event);
        assert_eq!(a.try_recv().unwrap(), event);
        assert_eq!(b.try_recv().unwrap(), event);
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let mut hub = ProgressHub::default();
        drop(hub.subscribe());
        let kept = hub.subscribe();
        hub.emit(&LoadProgress {
            url: "x".into(),
            loaded: 1,
            total: None,
        });
        assert_eq!(kept.len(), 1);
    }
}
