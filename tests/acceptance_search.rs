//! Acceptance tests: end-to-end search flows through the dispatcher.
//!
//! A scripted in-memory `CardApi` stands in for the service. Gated queries
//! block until the test releases them, so responses can be made to arrive
//! in any order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tcgs::api::CardApi;
use tcgs::integration::Dispatcher;
use tcgs::model::{Card, CardId, ClientError, GameId};
use tcgs::state::{ApiEvent, ApplyOutcome, SearchPayload, SearchPhase, Session};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

// ===== Test Fixtures =====

type SearchKey = (String, Option<String>);

#[derive(Default)]
struct ScriptedApi {
    games: Vec<GameId>,
    suggestions: HashMap<String, Vec<String>>,
    searches: HashMap<SearchKey, Vec<Card>>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn suggest(mut self, query: &str, items: &[&str]) -> Self {
        self.suggestions.insert(
            query.to_string(),
            items.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn search(mut self, query: &str, game: Option<&str>, cards: Vec<Card>) -> Self {
        self.searches
            .insert((query.to_string(), game.map(str::to_string)), cards);
        self
    }

    fn gate(&mut self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.insert(query.to_string(), Arc::clone(&gate));
        gate
    }

    async fn pass_gate(&self, query: &str) {
        if let Some(gate) = self.gates.get(query) {
            gate.notified().await;
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CardApi for ScriptedApi {
    async fn games(&self) -> Result<Vec<GameId>, ClientError> {
        self.record("games".to_string());
        Ok(self.games.clone())
    }

    async fn autocomplete(
        &self,
        query: &str,
        _limit: usize,
        _game: Option<&GameId>,
    ) -> Result<Vec<String>, ClientError> {
        self.record(format!("autocomplete:{query}"));
        self.pass_gate(query).await;
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }

    async fn search(
        &self,
        query: &str,
        _limit: usize,
        game: Option<&GameId>,
    ) -> Result<SearchPayload, ClientError> {
        self.record(format!("search:{query}"));
        self.pass_gate(query).await;
        let key = (query.to_string(), game.map(|g| g.as_str().to_string()));
        match self.searches.get(&key) {
            Some(cards) => Ok(SearchPayload::new(cards.clone())),
            None => Err(ClientError::Transport {
                url: format!("scripted://search?q={query}"),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

fn card(id: &str, game: &str) -> Card {
    Card::new(
        CardId::new(id).unwrap(),
        format!("Card {id}"),
        GameId::new(game).unwrap(),
        format!("https://img.example.com/{id}.png"),
    )
}

fn selected_id(session: &Session) -> Option<&str> {
    session.selected_card().map(|c| c.card_id().as_str())
}

async fn apply_next(session: &mut Session, rx: &mut UnboundedReceiver<ApiEvent>) -> ApplyOutcome {
    let event = rx.recv().await.expect("event channel closed");
    session.apply(event)
}

// ===== Suggestions race =====

#[tokio::test]
async fn late_autocomplete_response_never_replaces_newer_suggestions() {
    // GIVEN: "char" is slow to answer
    let mut api = ScriptedApi::default()
        .suggest("char", &["charm"])
        .suggest("charizard", &["charizard ex", "charizard vmax"]);
    let char_gate = api.gate("char");
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();

    // WHEN: the query grows to "charizard" before "char" answers
    dispatcher.dispatch_opt(session.on_query_changed("char"));
    dispatcher.dispatch_opt(session.on_query_changed("charizard"));
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Accepted);
    char_gate.notify_one();
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Stale);

    // THEN: the newer suggestions stay visible
    assert_eq!(
        session.suggestions().visible_items(),
        &["charizard ex".to_string(), "charizard vmax".to_string()]
    );
}

#[tokio::test]
async fn clearing_query_discards_in_flight_suggestions() {
    let mut api = ScriptedApi::default().suggest("pika", &["pikachu"]);
    let gate = api.gate("pika");
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();

    dispatcher.dispatch_opt(session.on_query_changed("pika"));
    assert_eq!(session.on_query_changed(""), None);
    assert!(session.suggestions().visible_items().is_empty());

    gate.notify_one();
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Stale);
    assert!(session.suggestions().visible_items().is_empty());
}

#[tokio::test]
async fn submitting_fences_pending_suggestions() {
    let api = ScriptedApi::default()
        .suggest("pika", &["pikachu"])
        .search("pika", None, vec![card("A", "pokemon")]);
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();

    dispatcher.dispatch_opt(session.on_query_changed("pika"));
    dispatcher.dispatch_opt(session.submit(None));

    let mut outcomes = vec![
        apply_next(&mut session, &mut rx).await,
        apply_next(&mut session, &mut rx).await,
    ];
    outcomes.sort_by_key(|o| format!("{o:?}"));

    assert_eq!(outcomes, vec![ApplyOutcome::Accepted, ApplyOutcome::Stale]);
    assert!(!session.suggestions().is_visible());
    assert_eq!(selected_id(&session), Some("A"));
}

// ===== Search and selection =====

#[tokio::test]
async fn new_search_resets_selection_until_response() {
    let api = ScriptedApi {
        games: vec![GameId::new("pokemon").unwrap()],
        ..ScriptedApi::default()
    }
    .search("pikachu", None, vec![card("A", "pokemon"), card("B", "pokemon")])
    .search("pikachu", Some("pokemon"), vec![card("C", "pokemon")]);
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();

    // Searching "pikachu" selects the first card
    dispatcher.dispatch_opt(session.search_for("pikachu"));
    apply_next(&mut session, &mut rx).await;
    assert_eq!(selected_id(&session), Some("A"));

    // select(cardB) moves the selection
    let card_b = session.results().cards()[1].clone();
    assert!(session.select(&card_b));
    assert_eq!(selected_id(&session), Some("B"));

    // Filtering by game resubmits; selection is cleared immediately
    dispatcher.dispatch_opt(session.set_game_filter(Some(GameId::new("pokemon").unwrap())));
    assert_eq!(session.phase(), SearchPhase::Searching);
    assert_eq!(selected_id(&session), None);

    apply_next(&mut session, &mut rx).await;
    assert_eq!(selected_id(&session), Some("C"));
}

#[tokio::test]
async fn empty_result_is_distinct_from_idle() {
    let api = ScriptedApi::default().search("zzzznotfound", None, vec![]);
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();
    assert_eq!(session.phase(), SearchPhase::Idle);

    dispatcher.dispatch_opt(session.submit(Some("zzzznotfound")));
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Accepted);

    assert_eq!(session.phase(), SearchPhase::ResultsEmpty);
    assert!(session.results().is_empty());
    assert_eq!(selected_id(&session), None);
    assert!(session.last_search_error().is_none());
}

#[tokio::test]
async fn slow_older_search_is_discarded() {
    let mut api = ScriptedApi::default()
        .search("dragon", None, vec![card("OLD", "magic")])
        .search("dragonite", None, vec![card("NEW", "pokemon")]);
    let gate = api.gate("dragon");
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(api));
    let mut session = Session::default();

    dispatcher.dispatch_opt(session.submit(Some("dragon")));
    dispatcher.dispatch_opt(session.submit(Some("dragonite")));
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Accepted);
    gate.notify_one();
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Stale);

    assert_eq!(selected_id(&session), Some("NEW"));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn transport_failure_degrades_to_empty_results() {
    let (dispatcher, mut rx) = Dispatcher::new(Arc::new(ScriptedApi::default()));
    let mut session = Session::default();

    dispatcher.dispatch_opt(session.submit(Some("offline")));
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Failed);

    assert_eq!(session.phase(), SearchPhase::ResultsEmpty);
    assert!(!session.is_loading());
    assert!(session
        .last_search_error()
        .is_some_and(ClientError::is_transport));
}

// ===== Startup =====

#[tokio::test]
async fn startup_loads_games_before_any_search() {
    let api = Arc::new(ScriptedApi {
        games: vec![
            GameId::new("magic").unwrap(),
            GameId::new("pokemon").unwrap(),
        ],
        ..ScriptedApi::default()
    });
    let (dispatcher, mut rx) = Dispatcher::new(Arc::clone(&api) as Arc<dyn CardApi>);
    let mut session = Session::default();

    dispatcher.dispatch_all(session.start());
    assert_eq!(apply_next(&mut session, &mut rx).await, ApplyOutcome::Accepted);

    assert_eq!(session.games().games().len(), 2);
    assert_eq!(*api.calls.lock().unwrap(), vec!["games".to_string()]);
}
