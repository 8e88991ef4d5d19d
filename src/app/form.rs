//! Comment form: a modal dialog holding a draft comment and its validation state.
//!
//! Visibility changes only through [`CommentForm::open`], [`CommentForm::close`]
//! and [`CommentForm::toggle`]. A successful [`CommentForm::submit`] closes the
//! dialog before handing back the request, and no further submit is accepted
//! until the store answers via [`CommentForm::finish_submission`].

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::api::models::{NewComment, Rating};

pub const AUTHOR_MIN_LEN: usize = 2;
pub const AUTHOR_MAX_LEN: usize = 15;
pub const TEXT_PLACEHOLDER: &str = "add comments here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Rating,
    Author,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
}

/// Message shown under a touched field that breaks `rule`.
pub fn message(field: Field, rule: Rule) -> Option<String> {
    match (field, rule) {
        (Field::Author, Rule::Required) => Some("Name is required".to_string()),
        (Field::Author, Rule::MinLength(n)) => {
            Some(format!("Name must be at least {n} characters long"))
        }
        (Field::Author, Rule::MaxLength(n)) => {
            Some(format!("Name must be less than {n} characters"))
        }
        _ => None,
    }
}

/// Rules broken by a draft, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    by_field: BTreeMap<Field, BTreeSet<Rule>>,
}

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(BTreeSet::is_empty)
    }

    pub fn rules(&self, field: Field) -> impl Iterator<Item = Rule> + '_ {
        self.by_field.get(&field).into_iter().flatten().copied()
    }

    pub fn breaks(&self, field: Field, rule: Rule) -> bool {
        self.by_field
            .get(&field)
            .is_some_and(|rules| rules.contains(&rule))
    }

    fn insert(&mut self, field: Field, rules: BTreeSet<Rule>) {
        if !rules.is_empty() {
            self.by_field.insert(field, rules);
        }
    }
}

fn check_author(author: &str) -> BTreeSet<Rule> {
    let len = author.chars().count();
    let mut broken = BTreeSet::new();
    if len == 0 {
        broken.insert(Rule::Required);
    }
    if len < AUTHOR_MIN_LEN {
        broken.insert(Rule::MinLength(AUTHOR_MIN_LEN));
    }
    if len > AUTHOR_MAX_LEN {
        broken.insert(Rule::MaxLength(AUTHOR_MAX_LEN));
    }
    broken
}

/// Checks every configured rule. Rating and text carry no rules.
pub fn validate(draft: &FormDraft) -> Violations {
    let mut violations = Violations::default();
    violations.insert(Field::Author, check_author(&draft.author));
    violations
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Explicit choice; `None` means the first option is shown as selected.
    pub rating: Option<Rating>,
    pub author: String,
    pub text: String,
    touched: BTreeSet<Field>,
}

impl FormDraft {
    pub fn new(
        rating: Option<Rating>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            rating,
            author: author.into(),
            text: text.into(),
            touched: BTreeSet::new(),
        }
    }

    pub fn effective_rating(&self) -> Rating {
        self.rating.unwrap_or_default()
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.touched.extend([Field::Rating, Field::Author, Field::Text]);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Messages to display for `field`; empty until the field is touched.
    pub fn visible_messages(&self, field: Field) -> Vec<String> {
        if !self.is_touched(field) {
            return Vec::new();
        }
        validate(self)
            .rules(field)
            .filter_map(|rule| message(field, rule))
            .collect()
    }

    pub fn into_request(self, campsite_id: u32) -> NewComment {
        NewComment {
            campsite_id,
            rating: self.effective_rating(),
            author: self.author,
            text: self.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// Keyboard focus inside the dialog, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Rating,
    Author,
    Text,
    Submit,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Rating => Self::Author,
            Self::Author => Self::Text,
            Self::Text => Self::Submit,
            Self::Submit => Self::Rating,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Rating => Self::Submit,
            Self::Author => Self::Rating,
            Self::Text => Self::Author,
            Self::Submit => Self::Text,
        }
    }

    pub fn field(self) -> Option<Field> {
        match self {
            Self::Rating => Some(Field::Rating),
            Self::Author => Some(Field::Author),
            Self::Text => Some(Field::Text),
            Self::Submit => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("comment form is not open")]
    NotOpen,
    #[error("a previous comment is still being posted")]
    InFlight,
    #[error("comment form has invalid fields")]
    Invalid(Violations),
}

#[derive(Debug, Clone)]
pub struct CommentForm {
    campsite_id: u32,
    dialog: DialogState,
    draft: FormDraft,
    focus: FormFocus,
    in_flight: bool,
}

impl CommentForm {
    pub fn new(campsite_id: u32) -> Self {
        Self {
            campsite_id,
            dialog: DialogState::Closed,
            draft: FormDraft::default(),
            focus: FormFocus::default(),
            in_flight: false,
        }
    }

    pub fn campsite_id(&self) -> u32 {
        self.campsite_id
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn is_open(&self) -> bool {
        self.dialog == DialogState::Open
    }

    /// True while a submitted comment awaits the store's answer.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    /// Opens with a fresh draft. No-op when already open.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.dialog = DialogState::Open;
        self.draft = FormDraft::default();
        self.focus = FormFocus::default();
    }

    /// Closes and discards the draft.
    pub fn close(&mut self) {
        self.dialog = DialogState::Closed;
        self.draft = FormDraft::default();
        self.focus = FormFocus::default();
    }

    pub fn toggle(&mut self) {
        match self.dialog {
            DialogState::Closed => self.open(),
            DialogState::Open => self.close(),
        }
    }

    /// Moves focus forward, marking the field being left as touched.
    pub fn focus_next(&mut self) {
        self.leave_focus();
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.leave_focus();
        self.focus = self.focus.prev();
    }

    fn leave_focus(&mut self) {
        if let Some(field) = self.focus.field() {
            self.draft.touch(field);
        }
    }

    pub fn select_rating(&mut self, rating: Rating) {
        self.draft.rating = Some(rating);
    }

    pub fn next_rating(&mut self) {
        let next = self.draft.effective_rating().next();
        self.select_rating(next);
    }

    pub fn prev_rating(&mut self) {
        let prev = self.draft.effective_rating().prev();
        self.select_rating(prev);
    }

    /// Types into the focused field. On the rating selector, digits pick a rating.
    pub fn insert_char(&mut self, ch: char) {
        if !self.is_open() {
            return;
        }
        match self.focus {
            FormFocus::Rating => {
                if let Some(rating) = ch
                    .to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(|d| Rating::try_from(d).ok())
                {
                    self.select_rating(rating);
                }
            }
            FormFocus::Author => self.draft.author.push(ch),
            FormFocus::Text => self.draft.text.push(ch),
            FormFocus::Submit => {}
        }
    }

    pub fn insert_newline(&mut self) {
        if self.is_open() && self.focus == FormFocus::Text {
            self.draft.text.push('\n');
        }
    }

    pub fn delete_char(&mut self) {
        if !self.is_open() {
            return;
        }
        match self.focus {
            FormFocus::Author => {
                self.draft.author.pop();
            }
            FormFocus::Text => {
                self.draft.text.pop();
            }
            FormFocus::Rating | FormFocus::Submit => {}
        }
    }

    /// Validates the draft. On success the dialog closes and the creation
    /// request is returned; on failure every field is marked touched.
    pub fn submit(&mut self) -> Result<NewComment, SubmitRejected> {
        if !self.is_open() {
            return Err(SubmitRejected::NotOpen);
        }
        if self.in_flight {
            return Err(SubmitRejected::InFlight);
        }

        let violations = validate(&self.draft);
        if !violations.is_empty() {
            self.draft.touch_all();
            return Err(SubmitRejected::Invalid(violations));
        }

        let draft = std::mem::take(&mut self.draft);
        self.close();
        self.in_flight = true;
        Ok(draft.into_request(self.campsite_id))
    }

    /// Re-enables submission once the store has answered.
    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }
}
