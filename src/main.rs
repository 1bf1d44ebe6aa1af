mod ui;

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex_explorer::action::Action;
use pokedex_explorer::api::HttpPokedexApi;
use pokedex_explorer::config::{ConfigArgs, ExplorerConfig};
use pokedex_explorer::effect::Effect;
use pokedex_explorer::reducer::reducer;
use pokedex_explorer::state::{AppState, FocusArea};
use pokedex_explorer::task::{task_key, EffectRunner};

/// Browse, search and type-filter the PokeAPI catalog
#[derive(Parser, Debug)]
#[command(name = "pokedex-explorer")]
#[command(about = "Paginated PokeAPI explorer with type filters")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokeComponentId {
    FilterBar,
    DexList,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokeContext {
    FilterBar,
    DexList,
    Detail,
    Search,
}

impl EventRoutingState<PokeComponentId, PokeContext> for AppState {
    fn focused(&self) -> Option<PokeComponentId> {
        if self.search.active {
            return Some(PokeComponentId::Search);
        }
        match self.focus {
            FocusArea::FilterBar => Some(PokeComponentId::FilterBar),
            FocusArea::DexList => Some(PokeComponentId::DexList),
            FocusArea::Detail => Some(PokeComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokeComponentId> {
        if self.search.active {
            Some(PokeComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokeComponentId) -> PokeContext {
        match id {
            PokeComponentId::FilterBar => PokeContext::FilterBar,
            PokeComponentId::DexList => PokeContext::DexList,
            PokeComponentId::Detail => PokeContext::Detail,
            PokeComponentId::Search => PokeContext::Search,
        }
    }

    fn default_context(&self) -> PokeContext {
        PokeContext::DexList
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        config: config_args,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = config_args.log_file.as_deref() {
        init_logging(path)?;
    }
    let config = config_args
        .to_config()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    tracing::info!(api_base = %config.api_base, page_size = config.page_size, "starting");

    let debug = DebugSession::new(debug_args);
    let initial_config = config.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(initial_config))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, config).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

/// Sends tracing output to `path`; the terminal itself is owned by the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| io::Error::other(format!("logging setup failed: {err}")))
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    config: ExplorerConfig,
) -> io::Result<DebugRunOutput<AppState>> {
    let runner = EffectRunner::new(
        Arc::new(HttpPokedexApi::new(config.clone())),
        config.detail_concurrency,
    );
    let ui = Rc::new(RefCell::new(ui::PokeUi::new()));
    let mut bus: EventBus<AppState, Action, PokeComponentId, PokeContext> = EventBus::new();
    let keybindings: Keybindings<PokeContext> = Keybindings::new();

    let ui_filter = Rc::clone(&ui);
    bus.register(PokeComponentId::FilterBar, move |event, state| {
        ui_filter
            .borrow_mut()
            .handle_filter_event(&event.kind, state)
    });

    let ui_list = Rc::clone(&ui);
    bus.register(PokeComponentId::DexList, move |event, state| {
        ui_list
            .borrow_mut()
            .handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokeComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PokeComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if !state.search.active => match key.code {
            crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            crossterm::event::KeyCode::Tab => HandlerResponse::action(Action::FocusNext),
            crossterm::event::KeyCode::BackTab => HandlerResponse::action(Action::FocusPrev),
            crossterm::event::KeyCode::Char('/') => HandlerResponse::action(Action::SearchStart),
            crossterm::event::KeyCode::Char('c') => HandlerResponse::action(Action::FilterReset),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &runner),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, runner: &EffectRunner) {
    let key = task_key(&effect);
    let runner = runner.clone();
    ctx.tasks()
        .spawn(TaskKey::new(key), async move { runner.run(effect).await });
}
