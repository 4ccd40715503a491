use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::models::message::{PlaceSelection, SearchResultView};
use crate::models::place::PlaceRecord;
use crate::models::search_intent::SearchIntent;

const SELECTION_CHANNEL_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result-set state for one client. Searches may resolve out of order; a
/// result is only displayed if no later-issued search has been displayed.
pub struct SearchSession {
    issued: AtomicU64,
    /// Highest sequence ever displayed; survives `clear`.
    newest_displayed: AtomicU64,
    displayed: RwLock<Option<SearchResultView>>,
    selections: broadcast::Sender<PlaceSelection>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        let (selections, _) = broadcast::channel(SELECTION_CHANNEL_CAPACITY);
        Self {
            issued: AtomicU64::new(0),
            newest_displayed: AtomicU64::new(0),
            displayed: RwLock::new(None),
            selections,
        }
    }

    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `false` when the result is stale and was discarded.
    pub async fn complete(
        &self,
        ticket: SearchTicket,
        intent: SearchIntent,
        places: Vec<PlaceRecord>,
    ) -> bool {
        let mut displayed = self.displayed.write().await;
        let newest = self.newest_displayed.load(Ordering::SeqCst);
        if newest > ticket.sequence() {
            debug!(
                "Discarding search #{} behind displayed #{}",
                ticket.sequence(),
                newest
            );
            return false;
        }
        self.newest_displayed.store(ticket.sequence(), Ordering::SeqCst);

        *displayed = Some(SearchResultView {
            sequence: ticket.sequence(),
            intent,
            places,
            selected_place_id: None,
        });
        true
    }

    pub async fn current(&self) -> Option<SearchResultView> {
        self.displayed.read().await.clone()
    }

    /// Records the selection and forwards it to subscribers; returns how many received it.
    pub async fn select_place(&self, place_id: &str) -> usize {
        if let Some(view) = self.displayed.write().await.as_mut() {
            view.selected_place_id = Some(place_id.to_string());
        }
        // send only fails when nobody is subscribed
        self.selections
            .send(PlaceSelection::new(place_id))
            .unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaceSelection> {
        self.selections.subscribe()
    }

    /// Drops the displayed view. Tickets issued before the clear stay stale.
    pub async fn clear(&self) {
        self.displayed.write().await.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classifier::classify;

    #[tokio::test]
    async fn tickets_increase_monotonically() {
        let session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(second > first);
        assert_eq!(first.sequence(), 1);
    }

    #[tokio::test]
    async fn stale_result_is_discarded() {
        let session = SearchSession::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(session.complete(newer, classify("parks"), Vec::new()).await);
        assert!(!session.complete(older, classify("cafes"), Vec::new()).await);

        let view = session.current().await.unwrap();
        assert_eq!(view.sequence, newer.sequence());
        assert_eq!(view.intent.original_query, "parks");
    }

    #[tokio::test]
    async fn in_order_results_replace_each_other() {
        let session = SearchSession::new();
        let first = session.begin();
        assert!(session.complete(first, classify("parks"), Vec::new()).await);
        let second = session.begin();
        assert!(session.complete(second, classify("banks"), Vec::new()).await);

        assert_eq!(session.current().await.unwrap().sequence, second.sequence());
    }

    #[tokio::test]
    async fn selection_reaches_subscribers_and_view() {
        let session = SearchSession::new();
        let mut rx = session.subscribe();
        let ticket = session.begin();
        session.complete(ticket, classify("cafes"), Vec::new()).await;

        assert_eq!(session.select_place("cafe-2").await, 1);
        assert_eq!(rx.recv().await.unwrap(), PlaceSelection::new("cafe-2"));
        assert_eq!(
            session.current().await.unwrap().selected_place_id.as_deref(),
            Some("cafe-2")
        );
    }

    #[tokio::test]
    async fn clear_releases_the_view() {
        let session = SearchSession::new();
        let ticket = session.begin();
        session.complete(ticket, classify("cafes"), Vec::new()).await;
        session.clear().await;

        assert!(session.current().await.is_none());
        assert_eq!(session.select_place("nobody-listening").await, 0);
    }

    #[tokio::test]
    async fn older_result_stays_stale_after_clear() {
        let session = SearchSession::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(session.complete(newer, classify("parks"), Vec::new()).await);
        session.clear().await;

        assert!(!session.complete(older, classify("cafes"), Vec::new()).await);
        assert!(session.current().await.is_none());

        let next = session.begin();
        assert!(session.complete(next, classify("banks"), Vec::new()).await);
        assert_eq!(session.current().await.unwrap().sequence, next.sequence());
    }
}
