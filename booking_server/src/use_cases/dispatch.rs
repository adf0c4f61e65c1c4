use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use url::Url;

use crate::domain::intent::BookingIntent;
use crate::domain::ports::{Dispatch, SearchHandler};

const ISO_DATE: &str = "%Y-%m-%d";

// Rejected reservation base addresses.
#[derive(Debug, PartialEq, Eq)]
pub enum BaseUrlError {
    UnsupportedScheme(String),
    NotHierarchical,
}

impl fmt::Display for BaseUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseUrlError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported reservation url scheme `{scheme}`")
            }
            BaseUrlError::NotHierarchical => f.write_str("reservation url cannot carry a query"),
        }
    }
}

impl std::error::Error for BaseUrlError {}

// Default strategy: hand the intent to the external reservation system.
#[derive(Clone, Debug)]
pub struct ExternalRedirect {
    base_url: Url,
}

impl ExternalRedirect {
    pub fn new(base_url: Url) -> Result<Self, BaseUrlError> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BaseUrlError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        if base_url.cannot_be_a_base() {
            return Err(BaseUrlError::NotHierarchical);
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Query pairs already on the base address are kept ahead of the intent.
    pub fn search_url(&self, intent: &BookingIntent) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("dest", intent.destination.slug())
                .append_pair("checkin", &intent.check_in.format(ISO_DATE).to_string())
                .append_pair("checkout", &intent.check_out.format(ISO_DATE).to_string())
                .append_pair("guests", &intent.guest_count.to_string());
            if let Some(room) = intent.room_type {
                pairs.append_pair("room", room.slug);
            }
        }
        url
    }
}

impl SearchHandler for ExternalRedirect {
    fn handle(&self, intent: &BookingIntent) -> Dispatch {
        Dispatch::Navigate(self.search_url(intent))
    }
}

// Caller-supplied hook that pre-empts the external redirect.
pub struct CallbackHandler<F> {
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(&BookingIntent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> SearchHandler for CallbackHandler<F>
where
    F: Fn(&BookingIntent) + Send + Sync,
{
    fn handle(&self, intent: &BookingIntent) -> Dispatch {
        (self.callback)(intent);
        Dispatch::Handled
    }
}

// In-page handler: publishes intents for overlay subscribers instead of leaving the site.
#[derive(Clone)]
pub struct OverlayFeed {
    tx: broadcast::Sender<BookingIntent>,
    closed: Arc<watch::Sender<bool>>,
}

impl OverlayFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        let (closed, _closed_rx) = watch::channel(false);
        Self {
            tx,
            closed: Arc::new(closed),
        }
    }

    pub fn subscribe(&self) -> OverlaySubscription {
        OverlaySubscription {
            intents: self.tx.subscribe(),
            closed: self.closed.subscribe(),
        }
    }

    // Ends every open subscription, including ones created afterwards.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }
}

impl SearchHandler for OverlayFeed {
    fn handle(&self, intent: &BookingIntent) -> Dispatch {
        // No subscriber is fine; the overlay simply isn't open.
        let receivers = self.tx.send(intent.clone()).unwrap_or(0);
        tracing::debug!(receivers, "booking intent published to overlay");
        Dispatch::Handled
    }
}

pub struct OverlaySubscription {
    intents: broadcast::Receiver<BookingIntent>,
    closed: watch::Receiver<bool>,
}

impl OverlaySubscription {
    // Next published intent, or None once the feed is closed.
    pub async fn next(&mut self) -> Option<BookingIntent> {
        if *self.closed.borrow() {
            return None;
        }
        loop {
            tokio::select! {
                received = self.intents.recv() => match received {
                    Ok(intent) => return Some(intent),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "overlay subscriber lagged");
                    }
                    Err(RecvError::Closed) => return None,
                },
                // The flag only ever flips to closed.
                _ = self.closed.changed() => return None,
            }
        }
    }
}

// Routes every validated intent to the configured strategy, or to the
// external redirect when the embedding page supplied none.
#[derive(Clone)]
pub struct IntentDispatcher {
    handler: Arc<dyn SearchHandler>,
}

impl IntentDispatcher {
    pub fn new(handler: Option<Arc<dyn SearchHandler>>, fallback: ExternalRedirect) -> Self {
        let handler = handler.unwrap_or_else(|| Arc::new(fallback) as Arc<dyn SearchHandler>);
        Self { handler }
    }

    // One dispatch per call; identical intents are not coalesced.
    pub fn dispatch(&self, intent: &BookingIntent) -> Dispatch {
        let outcome = self.handler.handle(intent);
        match &outcome {
            Dispatch::Navigate(url) => {
                tracing::info!(destination = %intent.destination, nights = intent.nights(), %url, "booking search redirected")
            }
            Dispatch::Handled => {
                tracing::info!(destination = %intent.destination, nights = intent.nights(), "booking search handled in page")
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::destination::Destination;
    use crate::use_cases::test_support::{RecordingHandler, date};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "https://booking.auralta.com/search";

    fn redirect() -> ExternalRedirect {
        ExternalRedirect::new(Url::parse(BASE).expect("base url")).expect("redirect")
    }

    fn intent() -> BookingIntent {
        BookingIntent {
            destination: Destination::Patagonia,
            check_in: date("2026-06-01"),
            check_out: date("2026-06-05"),
            guest_count: 2,
            room_type: None,
        }
    }

    fn query(url: &Url) -> BTreeMap<String, String> {
        url.query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    #[test]
    fn when_no_handler_is_supplied_then_intent_redirects_to_reservation_host() {
        let dispatcher = IntentDispatcher::new(None, redirect());

        let Dispatch::Navigate(url) = dispatcher.dispatch(&intent()) else {
            panic!("expected navigation");
        };

        assert_eq!(url.host_str(), Some("booking.auralta.com"));
        assert_eq!(url.path(), "/search");
        let expected: BTreeMap<String, String> = [
            ("dest", "patagonia"),
            ("checkin", "2026-06-01"),
            ("checkout", "2026-06-05"),
            ("guests", "2"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        assert_eq!(query(&url), expected);
    }

    #[test]
    fn when_room_type_is_present_then_room_parameter_is_added() {
        let mut intent = intent();
        intent.destination = Destination::RioCeleste;
        intent.room_type = Destination::RioCeleste.room("bungalow-termal");

        let url = redirect().search_url(&intent);

        let pairs = query(&url);
        assert_eq!(pairs.get("room").map(String::as_str), Some("bungalow-termal"));
        assert_eq!(pairs.get("dest").map(String::as_str), Some("rio-celeste"));
    }

    #[test]
    fn when_base_url_has_query_then_it_is_preserved_and_values_are_encoded() {
        let base = Url::parse("https://booking.auralta.com/search?lang=es&ref=a b").expect("url");
        let url = ExternalRedirect::new(base).expect("redirect").search_url(&intent());

        assert!(url.as_str().starts_with("https://booking.auralta.com/search?lang=es&ref=a%20b&dest="));
        assert_eq!(query(&url).get("ref").map(String::as_str), Some("a b"));
    }

    #[test]
    fn when_same_intent_is_dispatched_twice_then_urls_match() {
        let dispatcher = IntentDispatcher::new(None, redirect());
        assert_eq!(dispatcher.dispatch(&intent()), dispatcher.dispatch(&intent()));
    }

    #[test]
    fn when_callback_is_supplied_then_it_preempts_redirect_on_every_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handler = CallbackHandler::new(move |intent: &BookingIntent| {
            assert_eq!(intent.guest_count, 2);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let dispatcher = IntentDispatcher::new(Some(Arc::new(handler)), redirect());

        assert_eq!(dispatcher.dispatch(&intent()), Dispatch::Handled);
        assert_eq!(dispatcher.dispatch(&intent()), Dispatch::Handled);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn when_custom_handler_is_supplied_then_it_receives_the_intent() {
        let recorder = RecordingHandler::default();
        let dispatcher = IntentDispatcher::new(Some(Arc::new(recorder.clone())), redirect());

        dispatcher.dispatch(&intent());

        assert_eq!(recorder.seen(), vec![intent()]);
    }

    #[tokio::test]
    async fn when_overlay_has_subscriber_then_intent_is_published() {
        let feed = OverlayFeed::new(8);
        let mut subscription = feed.subscribe();

        assert_eq!(feed.handle(&intent()), Dispatch::Handled);

        let received = subscription.next().await.expect("expected published intent");
        assert_eq!(received, intent());
    }

    #[tokio::test]
    async fn when_overlay_is_closed_then_subscriptions_end() {
        let feed = OverlayFeed::new(8);
        let mut open = feed.subscribe();

        feed.close();

        assert_eq!(open.next().await, None);
        assert_eq!(feed.subscribe().next().await, None);
    }

    #[tokio::test]
    async fn when_subscriber_lags_then_it_skips_to_retained_intents() {
        let feed = OverlayFeed::new(1);
        let mut subscription = feed.subscribe();
        let mut later = intent();
        later.guest_count = 5;

        feed.handle(&intent());
        feed.handle(&later);

        assert_eq!(subscription.next().await, Some(later));
    }

    #[test]
    fn when_overlay_has_no_subscriber_then_dispatch_still_succeeds() {
        let feed = OverlayFeed::new(8);
        assert_eq!(feed.handle(&intent()), Dispatch::Handled);
    }

    #[test]
    fn when_base_url_is_not_http_then_redirect_is_rejected() {
        let ftp = Url::parse("ftp://booking.auralta.com/search").expect("url");
        assert_eq!(
            ExternalRedirect::new(ftp).err(),
            Some(BaseUrlError::UnsupportedScheme("ftp".to_string()))
        );
    }
}
