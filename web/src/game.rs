use crate::settings;
use crate::timer::TimeoutScheduler;
use crate::utils::*;
use chrono::prelude::*;
use clap::Args;
use pairup_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

/// Cards per row on the board.
const COLUMNS: usize = 3;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Ready,
    Playing,
    Checking,
    Won,
}

/// Play statistics kept alongside the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlayStats {
    pub attempts: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl PlayStats {
    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_reveal(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    fn on_resolve(&mut self, outcome: game::ResolveOutcome, now: DateTime<Utc>) {
        self.attempts = self.attempts.saturating_add(1);
        if outcome == game::ResolveOutcome::Won && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

/// What gets persisted between page loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavedGame {
    pub engine: game::PlayEngine,
    pub stats: PlayStats,
}

impl StorageKey for SavedGame {
    const KEY: &'static str = "pairup:game:v1";
}

#[derive(Debug)]
pub(crate) struct GameSession<S> {
    game: game::MemoryGame<S>,
    stats: PlayStats,
}

impl<S: game::ResolveScheduler> GameSession<S> {
    fn new(config: game::GameConfig, seed: u64, scheduler: S) -> Self {
        Self {
            game: game::MemoryGame::new(config, seed, scheduler),
            stats: PlayStats::default(),
        }
    }

    /// Caller must have checked `saved.engine.validate()`.
    fn restore(config: game::GameConfig, saved: SavedGame, scheduler: S) -> Self {
        Self {
            game: game::MemoryGame::restore(config, saved.engine, scheduler),
            stats: saved.stats,
        }
    }

    fn to_saved(&self) -> SavedGame {
        SavedGame {
            engine: self.game.engine().clone(),
            stats: self.stats.clone(),
        }
    }

    fn new_game(&mut self, config: game::GameConfig, seed: u64) {
        self.game.set_symbol_pick(config.symbol_pick);
        self.game.new_game(config.pair_count, seed);
        self.stats = PlayStats::default();
    }

    fn reveal(&mut self, id: game::CardId, now: DateTime<Utc>) -> bool {
        let updated = self.game.reveal(id).has_update();
        if updated {
            self.stats.on_reveal(now);
        }
        updated
    }

    fn fire(&mut self, ticket: game::ResolveTicket, now: DateTime<Utc>) -> bool {
        let outcome = self.game.fire(ticket);
        if outcome.has_update() {
            self.stats.on_resolve(outcome, now);
        }
        outcome.has_update()
    }

    fn view_state(&self) -> ViewGameState {
        let engine = self.game.engine();
        if engine.is_game_complete() {
            ViewGameState::Won
        } else if engine.state().is_locked() {
            ViewGameState::Checking
        } else if self.stats.started_at.is_none() {
            ViewGameState::Ready
        } else {
            ViewGameState::Playing
        }
    }

    fn can_reveal(&self, id: game::CardId) -> bool {
        self.game.engine().can_reveal(id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::CardId),
    Resolve(game::ResolveTicket),
    UpdateTime,
    NewGame,
    ChooseSize(game::PairCount),
    ToggleSymbolPick,
    ToggleSizeMenu,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    id: game::CardId,
    face: game::CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::CardFace::*;

    let CardProps {
        id,
        face,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match face {
            FaceDown => classes!(),
            FaceUp(_) => classes!("open"),
            Matched(_) => classes!("open", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }
    let label = face.symbol().map_or("hidden card", game::Symbol::name);

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked ({:?})", id, face);
        if !locked {
            callback.emit(id);
        }
    });

    html! {
        <td {class} {onclick} aria-label={label}>
            { face.symbol().map_or("", game::Symbol::glyph) }
        </td>
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first deal instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of pairs to start with (3, 6 or 12)
    #[arg(short, long)]
    pub pairs: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    session: GameSession<TimeoutScheduler>,
    forced_seed: Option<u64>,
    prev_time: u32,
    size_menu_open: bool,
    _timer_interval: gloo::timers::callback::Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> gloo::timers::callback::Interval {
        let link = ctx.link().clone();
        gloo::timers::callback::Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn next_seed(&mut self) -> u64 {
        self.forced_seed.take().unwrap_or_else(js_random_seed)
    }

    fn get_time(&self) -> u32 {
        self.session.stats.elapsed_secs(utc_now())
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.session.view_state() {
            ViewGameState::Ready => "not-started",
            ViewGameState::Playing => "in-progress",
            ViewGameState::Checking => "checking",
            ViewGameState::Won => "win",
        })
    }

    fn start_new_game(&mut self) {
        let seed = self.next_seed();
        log::debug!("new game: {} pairs, seed {}", self.settings.pair_count, seed);
        self.session.new_game(self.settings.game_config(), seed);
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut settings: settings::Settings = LocalOrDefault::local_or_default();
        if let Some(pairs) = props.pairs {
            match game::PairCount::try_from(pairs) {
                Ok(pair_count) => settings.pair_count = pair_count,
                Err(err) => log::warn!("ignoring --pairs: {}", err),
            }
        }

        let scheduler = TimeoutScheduler::new(ctx.link().callback(Msg::Resolve));
        let config = settings.game_config();
        let saved = SavedGame::local_load().filter(|saved| {
            props.seed.is_none()
                && props.pairs.is_none_or(|_| saved.engine.pair_count() == settings.pair_count)
                && match saved.engine.validate() {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("discarding saved game: {}", err);
                        false
                    }
                }
        });

        let mut forced_seed = props.seed;
        let session = match saved {
            Some(saved) => {
                log::debug!("restoring saved game");
                settings.pair_count = saved.engine.pair_count();
                GameSession::restore(config, saved, scheduler)
            }
            None => {
                let seed = forced_seed.take().unwrap_or_else(js_random_seed);
                log::debug!("seed: {}", seed);
                GameSession::new(config, seed, scheduler)
            }
        };

        Self {
            settings,
            session,
            forced_seed,
            prev_time: 0,
            size_menu_open: false,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Reveal(id) => {
                log::debug!("reveal card: {}", id);
                self.session.reveal(id, utc_now())
            }
            Resolve(ticket) => {
                log::debug!("resolve: {:?}", ticket);
                self.session.fire(ticket, utc_now())
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.start_new_game();
                self.size_menu_open = false;
                true
            }
            ChooseSize(pair_count) => {
                self.settings.pair_count = pair_count;
                self.settings.local_save();
                self.start_new_game();
                self.size_menu_open = false;
                true
            }
            ToggleSymbolPick => {
                self.settings.symbol_pick = match self.settings.symbol_pick {
                    game::SymbolPick::Leading => game::SymbolPick::Random,
                    game::SymbolPick::Random => game::SymbolPick::Leading,
                };
                self.settings.local_save();
                true
            }
            ToggleSizeMenu => {
                self.size_menu_open = !self.size_menu_open;
                true
            }
        };

        if updated {
            self.session.to_saved().local_save();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SizeMenu;
        use Msg::*;

        let observation = self.session.game.observe();
        let game_state_class = self.get_game_state_class();
        let attempts = format_for_counter(self.session.stats.attempts);
        let elapsed_time = format_for_counter(self.get_time());

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_size_menu = ctx.link().callback(|_: MouseEvent| ToggleSizeMenu);
        let cb_choose_size = ctx.link().callback(ChooseSize);
        let cb_toggle_pick = ctx.link().callback(|_: ()| ToggleSymbolPick);
        let cb_reveal = ctx.link().callback(Reveal);

        let congratulations = if observation.complete {
            html! { <p class="congratulations">{"Congratulations! You finished the game!"}</p> }
        } else {
            html! {}
        };

        html! {
            <div class="pairup">
                <h1>{"Memory Game"}</h1>
                <nav>
                    <span>
                        <button onclick={cb_size_menu}>{"Choose Size"}</button>
                        <SizeMenu
                            open={self.size_menu_open}
                            selected={self.settings}
                            onselect={cb_choose_size}
                            ontogglepick={cb_toggle_pick}
                        />
                    </span>
                    <aside>{attempts}</aside>
                    <button class={game_state_class} onclick={cb_new_game}>{"Reset"}</button>
                    <aside>{elapsed_time}</aside>
                </nav>
                {congratulations}
                <table class={observation.state.is_locked().then_some("locked")}>
                    {
                        for observation.faces.chunks(COLUMNS).enumerate().map(|(row, faces)| html! {
                            <tr>
                                {
                                    for faces.iter().enumerate().map(|(col, &face)| {
                                        let id = (row * COLUMNS + col) as game::CardId;
                                        let locked = !self.session.can_reveal(id);
                                        let callback = cb_reveal.clone();
                                        html! {
                                            <CardView {id} {face} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use pairup_core::{Deck, GameConfig, ManualScheduler, PairCount, Symbol};

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(secs * 1000).unwrap()
    }

    /// Cards 0/1, 2/3, 4/5 are pairs.
    fn session() -> GameSession<ManualScheduler> {
        let symbols: Vec<_> = [0, 0, 1, 1, 2, 2]
            .into_iter()
            .map(|i| Symbol::new(i).unwrap())
            .collect();
        GameSession {
            game: game::MemoryGame::with_deck(
                GameConfig::default(),
                Deck::from_symbols(&symbols).unwrap(),
                ManualScheduler::new(),
            ),
            stats: PlayStats::default(),
        }
    }

    fn fire_due(session: &mut GameSession<ManualScheduler>, now: DateTime<Utc>) -> bool {
        let due = session
            .game
            .scheduler_mut()
            .advance(GameConfig::DEFAULT_RESOLVE_DELAY);
        due.into_iter()
            .fold(false, |updated, ticket| session.fire(ticket, now) | updated)
    }

    #[test]
    fn view_state_follows_selection_cycle() {
        let mut session = session();
        assert_eq!(session.view_state(), ViewGameState::Ready);

        assert!(session.reveal(0, t(1)));
        assert_eq!(session.view_state(), ViewGameState::Playing);

        assert!(session.reveal(2, t(2)));
        assert_eq!(session.view_state(), ViewGameState::Checking);
        assert!(!session.can_reveal(4));
        assert!(!session.reveal(4, t(2)));

        assert!(fire_due(&mut session, t(3)));
        assert_eq!(session.view_state(), ViewGameState::Playing);
        assert_eq!(session.stats.attempts, 1);
    }

    #[test]
    fn winning_stops_the_clock() {
        let mut session = session();
        for (a, b) in [(0, 1), (2, 3), (4, 5)] {
            session.reveal(a, t(10));
            session.reveal(b, t(10));
            fire_due(&mut session, t(20));
        }

        assert_eq!(session.view_state(), ViewGameState::Won);
        assert_eq!(session.stats.attempts, 3);
        assert_eq!(session.stats.elapsed_secs(t(500)), 10);
    }

    #[test]
    fn new_game_resets_stats_and_ignores_pending_pair() {
        let mut session = session();
        session.reveal(0, t(1));
        session.reveal(3, t(1));
        session.new_game(GameConfig::new(PairCount::Six), 11);

        assert!(!fire_due(&mut session, t(2)));
        assert_eq!(session.stats, PlayStats::default());
        assert_eq!(session.game.engine().cards().len(), 12);
        assert_eq!(session.view_state(), ViewGameState::Ready);
    }

    #[test]
    fn saved_game_restores_pending_pair() {
        let mut session = session();
        session.reveal(4, t(1));
        session.reveal(5, t(1));

        let json = serde_json::to_string(&session.to_saved()).unwrap();
        let saved: SavedGame = serde_json::from_str(&json).unwrap();
        assert_eq!(saved.engine.validate(), Ok(()));

        let mut restored = GameSession::restore(GameConfig::default(), saved, ManualScheduler::new());
        assert_eq!(restored.view_state(), ViewGameState::Checking);
        assert!(fire_due(&mut restored, t(2)));
        assert!(restored.game.engine().card(4).unwrap().is_resolved());
        assert_eq!(restored.game.scheduler().now(), Duration::from_secs(1));
    }

    #[test]
    fn storage_key_uses_versioned_namespace() {
        assert_eq!(<SavedGame as StorageKey>::KEY, "pairup:game:v1");
    }
}
