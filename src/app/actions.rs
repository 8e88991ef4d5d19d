use crate::api::models::{Campsite, Comment, NewComment};

#[derive(Debug)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    ToggleCommentForm,
    FormFocusNext,
    FormFocusPrev,
    FormInput(char),
    FormNewline,
    FormBackspace,
    FormRatingNext,
    FormRatingPrev,
    FormSubmit,
    OpenImage,
    Refresh,
    RefreshComments,
    DataLoaded(DataPayload),
    CampsiteLoadFailed(String),
    CommentsLoadFailed(String),
    CommentPosted(Comment),
    CommentPostFailed(String),
    DismissError,
    Quit,
}

#[derive(Debug)]
pub enum DataPayload {
    Campsite(Campsite),
    Comments(Vec<Comment>),
}

#[derive(Debug, PartialEq)]
pub enum SideEffect {
    FetchCampsite { id: u32, use_cache: bool },
    FetchComments { campsite_id: u32, use_cache: bool },
    AddComment(NewComment),
    OpenImage(String),
}
