use tracing::{debug, info, warn};

use crate::app::actions::{Action, DataPayload, SideEffect};
use crate::app::form::SubmitRejected;
use crate::app::state::{AppState, DisplayMode};

fn fetch_all(state: &AppState, use_cache: bool) -> Vec<SideEffect> {
    vec![
        SideEffect::FetchCampsite {
            id: state.campsite_id,
            use_cache,
        },
        SideEffect::FetchComments {
            campsite_id: state.campsite_id,
            use_cache,
        },
    ]
}

/// Effects to run before the first frame.
pub fn initial_effects(state: &AppState) -> Vec<SideEffect> {
    fetch_all(state, true)
}

pub fn update(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::ScrollUp => {
            state.comment_scroll = state.comment_scroll.saturating_sub(1);
            vec![]
        }
        Action::ScrollDown => {
            if state.comment_scroll + 1 < state.comment_count() {
                state.comment_scroll += 1;
            }
            vec![]
        }
        Action::ToggleCommentForm => {
            // The submit control only exists on a populated page
            if state.comment_form.is_open() || state.display_mode() == DisplayMode::Populated {
                state.comment_form.toggle();
            }
            vec![]
        }
        Action::FormFocusNext => {
            state.comment_form.focus_next();
            vec![]
        }
        Action::FormFocusPrev => {
            state.comment_form.focus_prev();
            vec![]
        }
        Action::FormInput(ch) => {
            state.comment_form.insert_char(ch);
            vec![]
        }
        Action::FormNewline => {
            state.comment_form.insert_newline();
            vec![]
        }
        Action::FormBackspace => {
            state.comment_form.delete_char();
            vec![]
        }
        Action::FormRatingNext => {
            state.comment_form.next_rating();
            vec![]
        }
        Action::FormRatingPrev => {
            state.comment_form.prev_rating();
            vec![]
        }
        Action::FormSubmit => match state.comment_form.submit() {
            Ok(request) => {
                info!(
                    campsite_id = request.campsite_id,
                    rating = %request.rating,
                    author = %request.author,
                    "Submitting comment"
                );
                vec![SideEffect::AddComment(request)]
            }
            Err(rejected) => {
                debug!(reason = %rejected, "Comment submission rejected");
                if rejected == SubmitRejected::InFlight {
                    state.notice = Some("Still posting your previous comment".to_string());
                }
                vec![]
            }
        },
        Action::OpenImage => match &state.campsite {
            Some(campsite) if state.display_mode() == DisplayMode::Populated => {
                vec![SideEffect::OpenImage(campsite.image.clone())]
            }
            _ => vec![],
        },
        Action::Refresh => {
            state.is_loading = true;
            state.err_mess = None;
            state.notice = None;
            fetch_all(state, false)
        }
        Action::RefreshComments => {
            if state.is_loading
                || state.comment_form.is_open()
                || state.comment_form.is_submitting()
            {
                return vec![];
            }
            vec![SideEffect::FetchComments {
                campsite_id: state.campsite_id,
                use_cache: false,
            }]
        }
        Action::DataLoaded(payload) => {
            match payload {
                DataPayload::Campsite(campsite) => {
                    state.is_loading = false;
                    state.err_mess = None;
                    state.campsite = Some(campsite);
                    state.last_refresh = Some(chrono::Local::now());
                }
                DataPayload::Comments(comments) => {
                    state.comments = Some(comments);
                    state.clamp_scroll();
                }
            }
            vec![]
        }
        Action::CampsiteLoadFailed(msg) => {
            state.is_loading = false;
            state.err_mess = Some(msg);
            vec![]
        }
        Action::CommentsLoadFailed(msg) => {
            warn!(error = %msg, "Comments unavailable");
            state.notice = Some(format!("Comments unavailable: {msg}"));
            vec![]
        }
        Action::CommentPosted(comment) => {
            state.comment_form.finish_submission();
            state.notice = Some("Comment posted".to_string());
            if comment.campsite_id != state.campsite_id {
                return vec![];
            }
            match state.comments.as_mut() {
                Some(comments) => {
                    if !comments.iter().any(|c| c.id == comment.id) {
                        comments.push(comment);
                    }
                    vec![]
                }
                // Earlier comments never loaded; fetch the full list instead
                None => vec![SideEffect::FetchComments {
                    campsite_id: state.campsite_id,
                    use_cache: false,
                }],
            }
        }
        Action::CommentPostFailed(msg) => {
            state.comment_form.finish_submission();
            state.error_popup = Some(format!("Your comment could not be posted: {msg}"));
            vec![]
        }
        Action::DismissError => {
            state.error_popup = None;
            vec![]
        }
    }
}
