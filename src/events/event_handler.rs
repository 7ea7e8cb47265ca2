/// Receives events routed by [`EventObserver::subscribe_handler`](super::EventObserver::subscribe_handler).
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
