//! Impure shell glue: executes session commands against a [`CardApi`].
//!
//! The session returns [`Command`]s and never awaits. The [`Dispatcher`]
//! spawns one task per command and delivers each outcome as an
//! [`ApiEvent`] on an unbounded channel. The event loop applies events to the
//! session in arrival order, which may differ from issue order; epochs inside
//! the events make that safe.

use crate::api::CardApi;
use crate::state::{ApiEvent, Command};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Run one command to completion and describe its outcome.
pub async fn execute(api: &dyn CardApi, command: Command) -> ApiEvent {
    match command {
        Command::LoadGames => ApiEvent::GamesLoaded(api.games().await),
        Command::Suggest(request) => ApiEvent::SuggestionsReceived {
            epoch: request.epoch,
            outcome: api
                .autocomplete(&request.query, request.limit, request.game.as_ref())
                .await,
        },
        Command::Search(request) => ApiEvent::SearchCompleted {
            epoch: request.epoch,
            outcome: api
                .search(&request.query, request.limit, request.game.as_ref())
                .await,
        },
    }
}

/// Spawns command tasks and funnels their outcomes into one channel.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn CardApi>,
    tx: mpsc::UnboundedSender<ApiEvent>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiving end of its event channel.
    pub fn new(api: Arc<dyn CardApi>) -> (Self, mpsc::UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, tx }, rx)
    }

    /// Execute `command` on a new task. Must be called within a tokio runtime.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        debug!(command = command.name(), "Dispatching command");

        tokio::spawn(async move {
            let name = command.name();
            let event = execute(api.as_ref(), command).await;
            if tx.send(event).is_err() {
                warn!(command = name, "Event channel closed; dropping response");
            }
        })
    }

    /// Dispatch every command in order of issue.
    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Dispatch `command` if there is one.
    pub fn dispatch_opt(&self, command: Option<Command>) {
        if let Some(command) = command {
            self.dispatch(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, CardId, ClientError, GameId};
    use crate::state::{ApplyOutcome, SearchPayload, SearchPhase, Session};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    // ===== Test Helpers =====

    /// In-memory API. Queries listed in `gates` block until released.
    #[derive(Default)]
    struct FakeApi {
        suggestions: HashMap<String, Vec<String>>,
        cards: HashMap<String, Vec<Card>>,
        gates: HashMap<String, Arc<Notify>>,
    }

    impl FakeApi {
        fn gate(&mut self, query: &str) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.gates.insert(query.to_string(), Arc::clone(&notify));
            notify
        }

        async fn wait_gate(&self, query: &str) {
            if let Some(gate) = self.gates.get(query) {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl CardApi for FakeApi {
        async fn games(&self) -> Result<Vec<GameId>, ClientError> {
            Ok(vec![GameId::new("pokemon").unwrap()])
        }

        async fn autocomplete(
            &self,
            query: &str,
            _limit: usize,
            _game: Option<&GameId>,
        ) -> Result<Vec<String>, ClientError> {
            self.wait_gate(query).await;
            Ok(self.suggestions.get(query).cloned().unwrap_or_default())
        }

        async fn search(
            &self,
            query: &str,
            _limit: usize,
            _game: Option<&GameId>,
        ) -> Result<SearchPayload, ClientError> {
            self.wait_gate(query).await;
            match self.cards.get(query) {
                Some(cards) => Ok(SearchPayload::new(cards.clone())),
                None => Err(ClientError::Status {
                    url: format!("fake://search?q={query}"),
                    status: 500,
                }),
            }
        }
    }

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id).unwrap(),
            id,
            GameId::new("pokemon").unwrap(),
            "",
        )
    }

    // ===== execute =====

    #[tokio::test]
    async fn execute_load_games_reports_catalog() {
        let api = FakeApi::default();

        let event = execute(&api, Command::LoadGames).await;

        assert_eq!(
            event,
            ApiEvent::GamesLoaded(Ok(vec![GameId::new("pokemon").unwrap()]))
        );
    }

    #[tokio::test]
    async fn execute_search_carries_request_epoch() {
        let mut api = FakeApi::default();
        api.cards.insert("pikachu".into(), vec![card("A")]);
        let mut session = Session::default();
        let Some(Command::Search(request)) = session.submit(Some("pikachu")) else {
            panic!("expected search command");
        };
        let epoch = request.epoch;

        let event = execute(&api, Command::Search(request)).await;

        match event {
            ApiEvent::SearchCompleted { epoch: got, outcome } => {
                assert_eq!(got, epoch);
                assert_eq!(outcome.unwrap().cards, vec![card("A")]);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // ===== Dispatcher =====

    #[tokio::test]
    async fn late_suggestion_response_is_fenced() {
        let mut api = FakeApi::default();
        api.suggestions.insert("char".into(), vec!["charm".into()]);
        api.suggestions.insert(
            "charizard".into(),
            vec!["charizard ex".into(), "charizard vmax".into()],
        );
        let char_gate = api.gate("char");
        let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
        let mut session = Session::default();

        dispatcher.dispatch_opt(session.on_query_changed("char"));
        dispatcher.dispatch_opt(session.on_query_changed("charizard"));

        let first = rx.recv().await.unwrap();
        assert_eq!(session.apply(first), ApplyOutcome::Accepted);

        char_gate.notify_one();
        let second = rx.recv().await.unwrap();
        assert_eq!(session.apply(second), ApplyOutcome::Stale);

        assert_eq!(
            session.suggestions().visible_items(),
            &["charizard ex".to_string(), "charizard vmax".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_search_leaves_session_usable() {
        let (dispatcher, mut rx) = Dispatcher::new(Arc::new(FakeApi::default()));
        let mut session = Session::default();

        dispatcher.dispatch_opt(session.submit(Some("missing")));
        let event = rx.recv().await.unwrap();

        assert_eq!(session.apply(event), ApplyOutcome::Failed);
        assert_eq!(session.phase(), SearchPhase::ResultsEmpty);
        assert!(session.last_search_error().is_some());
    }

    #[tokio::test]
    async fn dispatch_all_delivers_every_event() {
        let mut api = FakeApi::default();
        api.cards.insert("pikachu".into(), vec![card("A")]);
        let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
        let mut session = Session::default();
        let mut commands = session.start();
        commands.extend(session.submit(Some("pikachu")));

        dispatcher.dispatch_all(commands);
        for _ in 0..2 {
            let event = rx.recv().await.unwrap();
            session.apply(event);
        }

        assert_eq!(session.games().games().len(), 1);
        assert_eq!(
            session.selected_card().map(|c| c.card_id().as_str()),
            Some("A")
        );
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic_task() {
        let (dispatcher, rx) = Dispatcher::new(Arc::new(FakeApi::default()));
        drop(rx);

        let handle = dispatcher.dispatch(Command::LoadGames);

        assert!(handle.await.is_ok());
    }
}
