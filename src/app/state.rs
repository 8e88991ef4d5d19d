use chrono::{DateTime, Local};

use crate::api::models::{Campsite, Comment};
use crate::app::form::CommentForm;

/// The four mutually exclusive ways the detail page can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Loading,
    Error,
    Populated,
    Empty,
}

/// Everything the detail view needs to pick and draw a display mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailProps<'a> {
    pub is_loading: bool,
    pub err_mess: Option<&'a str>,
    pub campsite: Option<&'a Campsite>,
    pub comments: Option<&'a [Comment]>,
}

impl DetailProps<'_> {
    /// First match wins: loading, then error, then campsite, then empty.
    pub fn display_mode(&self) -> DisplayMode {
        if self.is_loading {
            DisplayMode::Loading
        } else if self.err_mess.is_some() {
            DisplayMode::Error
        } else if self.campsite.is_some() {
            DisplayMode::Populated
        } else {
            DisplayMode::Empty
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    // Store data
    pub campsite_id: u32,
    pub is_loading: bool,
    pub err_mess: Option<String>,
    pub campsite: Option<Campsite>,
    pub comments: Option<Vec<Comment>>,
    pub last_refresh: Option<DateTime<Local>>,

    // View
    pub comment_form: CommentForm,
    pub comment_scroll: usize,

    // UI flags
    pub error_popup: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(campsite_id: u32) -> Self {
        Self {
            campsite_id,
            is_loading: true,
            err_mess: None,
            campsite: None,
            comments: None,
            last_refresh: None,
            comment_form: CommentForm::new(campsite_id),
            comment_scroll: 0,
            error_popup: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn props(&self) -> DetailProps<'_> {
        DetailProps {
            is_loading: self.is_loading,
            err_mess: self.err_mess.as_deref(),
            campsite: self.campsite.as_ref(),
            comments: self.comments.as_deref(),
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.props().display_mode()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.as_ref().map_or(0, Vec::len)
    }

    pub fn clamp_scroll(&mut self) {
        let max = self.comment_count().saturating_sub(1);
        if self.comment_scroll > max {
            self.comment_scroll = max;
        }
    }
}
