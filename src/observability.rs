use biometrics::{Collector, Counter, Moments};

pub(crate) static LOGIN_REQUESTS: Counter = Counter::new("chatpane.client.login_requests");
pub(crate) static CHAT_REQUESTS: Counter = Counter::new("chatpane.client.chat_requests");
pub(crate) static REQUEST_ERRORS: Counter = Counter::new("chatpane.client.request_errors");
pub(crate) static TRANSPORT_ERRORS: Counter = Counter::new("chatpane.client.transport_errors");
pub(crate) static REQUEST_DURATION: Moments =
    Moments::new("chatpane.client.request_duration_seconds");

pub(crate) static LOGIN_SUCCESSES: Counter = Counter::new("chatpane.session.login_successes");
pub(crate) static LOGIN_FAILURES: Counter = Counter::new("chatpane.session.login_failures");
pub(crate) static SEND_REJECTED_UNAUTHENTICATED: Counter =
    Counter::new("chatpane.session.send_rejected_unauthenticated");

pub(crate) static TRANSCRIPT_ENTRIES: Counter = Counter::new("chatpane.view.transcript_entries");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&LOGIN_REQUESTS);
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&REQUEST_ERRORS);
    collector.register_counter(&TRANSPORT_ERRORS);
    collector.register_moments(&REQUEST_DURATION);

    collector.register_counter(&LOGIN_SUCCESSES);
    collector.register_counter(&LOGIN_FAILURES);
    collector.register_counter(&SEND_REJECTED_UNAUTHENTICATED);

    collector.register_counter(&TRANSCRIPT_ENTRIES);
}
