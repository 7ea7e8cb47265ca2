use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use log::{trace, warn};

use super::EventHandler;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

/// Sending half of a [`Channel`].
pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Subscribing half of a [`Channel`].
pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Single-threaded, synchronous fan-out. Listeners run in subscription
/// order before `emit` returns.
pub struct Channel<T: std::fmt::Debug> {
    listeners: Rc<RefCell<BTreeMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: std::fmt::Debug + 'static> Channel<T> {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_id: Rc::new(Cell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // listeners may (un)subscribe while handling an event
        let listeners: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T: std::fmt::Debug + 'static> EventEmitter<T> {
    pub fn emit(&self, data: T) {
        self.channel.emit(&data);
    }

    pub fn listener_count(&self) -> usize {
        self.channel.listener_count()
    }
}

impl<T: std::fmt::Debug + 'static> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Routes every event to `handler`. An event that arrives while the
    /// handler is already borrowed is dropped with a warning.
    pub fn subscribe_handler<H>(&self, handler: Rc<RefCell<H>>) -> SubscriptionId
    where
        H: EventHandler<T> + 'static,
    {
        self.subscribe(move |event| match handler.try_borrow_mut() {
            Ok(mut handler) => handler.handle_event(event),
            Err(_) => warn!(target: "events", "Handler busy; dropped event {:?}", event),
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Hint(u32),
        Reset,
    }

    #[test]
    fn test_event_subscription_and_emission() {
        let (emitter, observer) = Channel::<Ping>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        observer.subscribe(move |_event: &Ping| {
            counter_clone.set(counter_clone.get() + 1);
        });

        emitter.emit(Ping::Reset);
        assert_eq!(counter.get(), 1);
        assert_eq!(emitter.listener_count(), 1);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let (emitter, observer) = Channel::<Ping>::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..4 {
            let order = order.clone();
            observer.subscribe(move |_event: &Ping| order.borrow_mut().push(tag));
        }

        emitter.emit(Ping::Hint(1));
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe() {
        let (emitter, observer) = Channel::<Ping>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let sub_id = observer.subscribe(move |_event: &Ping| {
            counter_clone.set(counter_clone.get() + 1);
        });

        emitter.emit(Ping::Reset);
        assert!(observer.unsubscribe(sub_id));
        emitter.emit(Ping::Reset);
        assert_eq!(counter.get(), 1);
        assert!(!observer.unsubscribe(sub_id));
    }

    #[test]
    fn test_subscribe_during_emit() {
        let (emitter, observer) = Channel::<Ping>::new();
        let nested_observer = observer.clone();
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        observer.subscribe(move |_event: &Ping| {
            let hits = hits_clone.clone();
            nested_observer.subscribe(move |_event: &Ping| hits.set(hits.get() + 1));
        });

        emitter.emit(Ping::Reset);
        assert_eq!(hits.get(), 0);
        emitter.emit(Ping::Reset);
        assert_eq!(hits.get(), 1);
    }

    struct Recorder {
        seen: Vec<Ping>,
    }

    impl EventHandler<Ping> for Recorder {
        fn handle_event(&mut self, event: &Ping) {
            self.seen.push(event.clone());
        }
    }

    #[test]
    fn test_subscribe_handler() {
        let (emitter, observer) = Channel::<Ping>::new();
        let recorder = Rc::new(RefCell::new(Recorder { seen: vec![] }));
        observer.subscribe_handler(recorder.clone());

        emitter.emit(Ping::Hint(3));
        emitter.emit(Ping::Reset);
        assert_eq!(recorder.borrow().seen, vec![Ping::Hint(3), Ping::Reset]);
    }
}
