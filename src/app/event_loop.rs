use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::api::CampsiteClient;
use crate::api::models::{Campsite, Comment};
use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::form::FormFocus;
use crate::app::state::AppState;
use crate::app::update::{initial_effects, update};
use crate::app::view;
use crate::cache::{CacheKey, CacheStore};
use crate::util::config::AppConfig;

pub async fn run(
    config: AppConfig,
    client: CampsiteClient,
    campsite_id: u32,
    cache_store: Option<CacheStore>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, config, client, campsite_id, cache_store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    client: CampsiteClient,
    campsite_id: u32,
    cache_store: Option<CacheStore>,
) -> Result<()> {
    let mut state = AppState::new(campsite_id);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let runner = EffectRunner {
        client,
        cache: cache_store,
        tx: action_tx,
    };

    runner.run_all(initial_effects(&state));

    let mut event_stream = crossterm::event::EventStream::new();

    // A zero interval disables auto-refresh; the timer then never fires
    let refresh_secs = config.view.refresh_interval_secs;
    let mut refresh_timer = tokio::time::interval(tokio::time::Duration::from_secs(
        refresh_secs.max(1),
    ));
    // First tick fires immediately and the initial fetch already covers it
    refresh_timer.tick().await;

    loop {
        terminal.draw(|f| view::render(f, &state, &config.view))?;

        if state.should_quit {
            break;
        }

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event
                    && let Some(action) = map_event_to_action(&event, &state) {
                        runner.run_all(update(&mut state, action));
                    }
            }
            Some(action) = action_rx.recv() => {
                runner.run_all(update(&mut state, action));
            }
            _ = refresh_timer.tick(), if refresh_secs > 0 => {
                runner.run_all(update(&mut state, Action::RefreshComments));
            }
        }
    }

    Ok(())
}

pub fn map_event_to_action(event: &Event, state: &AppState) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    if modifiers.contains(KeyModifiers::CONTROL) && *code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Error popup swallows everything but Esc
    if state.error_popup.is_some() {
        return match code {
            KeyCode::Esc => Some(Action::DismissError),
            _ => None,
        };
    }

    if state.comment_form.is_open() {
        let focus = state.comment_form.focus();
        return match code {
            KeyCode::Esc => Some(Action::ToggleCommentForm),
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::FormSubmit)
            }
            KeyCode::Tab | KeyCode::Down => Some(Action::FormFocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FormFocusPrev),
            KeyCode::Left if focus == FormFocus::Rating => Some(Action::FormRatingPrev),
            KeyCode::Right if focus == FormFocus::Rating => Some(Action::FormRatingNext),
            KeyCode::Enter if focus == FormFocus::Text => Some(Action::FormNewline),
            KeyCode::Enter => Some(Action::FormSubmit),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(c) => Some(Action::FormInput(*c)),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('c') => Some(Action::ToggleCommentForm),
        KeyCode::Char('i') => Some(Action::OpenImage),
        KeyCode::Char('r') => Some(Action::Refresh),
        _ => None,
    }
}

/// Executes side effects off the UI task and reports back through `tx`.
struct EffectRunner {
    client: CampsiteClient,
    cache: Option<CacheStore>,
    tx: mpsc::UnboundedSender<Action>,
}

impl EffectRunner {
    fn run_all(&self, effects: Vec<SideEffect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: SideEffect) {
        match effect {
            SideEffect::FetchCampsite { id, use_cache } => {
                let client = self.client.clone();
                let cache = self.cache.clone();
                let tx = self.tx.clone();

                tokio::spawn(async move {
                    debug!(id, use_cache, "Fetching campsite");
                    let key = CacheKey::Campsite(id);

                    if use_cache
                        && let Some(ref cache) = cache
                        && let Some(campsite) = cache.get::<Campsite>(key)
                    {
                        let _ = tx.send(Action::DataLoaded(DataPayload::Campsite(campsite)));
                        return;
                    }

                    match client.fetch_campsite(id).await {
                        Ok(campsite) => {
                            if let Some(ref cache) = cache
                                && let Err(e) = cache.set(key, &campsite)
                            {
                                error!(error = %e, "Failed to cache campsite");
                            }
                            let _ = tx.send(Action::DataLoaded(DataPayload::Campsite(campsite)));
                        }
                        Err(e) => {
                            error!(id, error = %e, "Failed to fetch campsite");
                            let _ = tx.send(Action::CampsiteLoadFailed(e.to_string()));
                        }
                    }
                });
            }
            SideEffect::FetchComments {
                campsite_id,
                use_cache,
            } => {
                let client = self.client.clone();
                let cache = self.cache.clone();
                let tx = self.tx.clone();

                tokio::spawn(async move {
                    debug!(campsite_id, use_cache, "Fetching comments");
                    let key = CacheKey::Comments(campsite_id);

                    if use_cache
                        && let Some(ref cache) = cache
                        && let Some(comments) = cache.get::<Vec<Comment>>(key)
                    {
                        let _ = tx.send(Action::DataLoaded(DataPayload::Comments(comments)));
                        return;
                    }

                    match client.fetch_comments(campsite_id).await {
                        Ok(comments) => {
                            if let Some(ref cache) = cache
                                && let Err(e) = cache.set(key, &comments)
                            {
                                error!(error = %e, "Failed to cache comments");
                            }
                            let _ = tx.send(Action::DataLoaded(DataPayload::Comments(comments)));
                        }
                        Err(e) => {
                            error!(campsite_id, error = %e, "Failed to fetch comments");
                            let _ = tx.send(Action::CommentsLoadFailed(e.to_string()));
                        }
                    }
                });
            }
            SideEffect::AddComment(request) => {
                let client = self.client.clone();
                let cache = self.cache.clone();
                let tx = self.tx.clone();

                tokio::spawn(async move {
                    match client.post_comment(&request).await {
                        Ok(created) => {
                            if let Some(ref cache) = cache
                                && let Err(e) =
                                    cache.invalidate(CacheKey::Comments(request.campsite_id))
                            {
                                warn!(error = %e, "Failed to invalidate comment cache");
                            }
                            let _ = tx.send(Action::CommentPosted(created));
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to post comment");
                            let _ = tx.send(Action::CommentPostFailed(e.to_string()));
                        }
                    }
                });
            }
            SideEffect::OpenImage(image) => {
                let url = match self.client.image_url(&image) {
                    Ok(url) => url,
                    Err(e) => {
                        error!(image = %image, error = %e, "Cannot resolve image URL");
                        return;
                    }
                };
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = crate::util::browser::open_image(&url) {
                        error!(error = %e, "Failed to open image");
                    }
                });
            }
        }
    }
}
