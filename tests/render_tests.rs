use campsite_info::api::models::{Campsite, Comment, Rating};
use campsite_info::app::actions::{Action, DataPayload};
use campsite_info::app::state::{AppState, DetailProps};
use campsite_info::app::update::update;
use campsite_info::app::view;
use campsite_info::ui::widgets;
use campsite_info::util::config::ViewConfig;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

fn buffer_to_string(buf: &Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push_str(buf[(x, y)].symbol());
        }
        s.push('\n');
    }
    s
}

fn render_props(props: &DetailProps, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| widgets::render_detail(f, f.area(), props, 0, 45))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn render_app(state: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| view::render(f, state, &ViewConfig::default()))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn make_campsite() -> Campsite {
    Campsite {
        id: 0,
        name: "React Lake Campground".into(),
        description: "Nestled in the foothills.".into(),
        image: "images/react-lake.jpg".into(),
        elevation: None,
        featured: true,
    }
}

fn make_comment(id: u32, author: &str, text: &str, date: &str) -> Comment {
    Comment {
        id,
        campsite_id: 0,
        rating: Rating::try_from(4).unwrap(),
        author: author.into(),
        text: text.into(),
        date: date.into(),
    }
}

#[test]
fn test_loading_mode_shows_only_indicator() {
    let campsite = make_campsite();
    let props = DetailProps {
        is_loading: true,
        err_mess: Some("ignored"),
        campsite: Some(&campsite),
        comments: None,
    };
    let out = render_props(&props, 80, 20);
    assert!(out.contains("Loading..."));
    assert!(!out.contains("ignored"));
    assert!(!out.contains("React Lake"));
}

#[test]
fn test_error_mode_shows_message_verbatim() {
    let campsite = make_campsite();
    let props = DetailProps {
        is_loading: false,
        err_mess: Some("Error 404: Not Found"),
        campsite: Some(&campsite),
        comments: None,
    };
    let out = render_props(&props, 80, 20);
    assert!(out.contains("Error 404: Not Found"));
    assert!(!out.contains("React Lake"));
}

#[test]
fn test_populated_mode_layout() {
    let campsite = make_campsite();
    let comments = vec![make_comment(0, "Kent", "Great place", "2018-10-25T12:00Z")];
    let props = DetailProps {
        is_loading: false,
        err_mess: None,
        campsite: Some(&campsite),
        comments: Some(&comments),
    };
    let out = render_props(&props, 100, 24);
    assert!(out.contains("Directory / React Lake Campground"));
    assert!(out.contains("Nestled in the foothills."));
    assert!(out.contains("images/react-lake.jpg"));
    assert!(out.contains("Comments (1)"));
    assert!(out.contains("Great place"));
    assert!(out.contains("-- Kent, Oct 25, 2018"));
    assert!(out.contains("[c] Submit Comment"));
}

#[test]
fn test_comments_render_in_input_order() {
    let campsite = make_campsite();
    let comments = vec![
        make_comment(0, "Charlie", "third-alpha", "2020-01-01"),
        make_comment(1, "Alice", "first-bravo", "2019-01-01"),
        make_comment(2, "Bob", "second-charlie", "2021-01-01"),
    ];
    let props = DetailProps {
        is_loading: false,
        err_mess: None,
        campsite: Some(&campsite),
        comments: Some(&comments),
    };
    let out = render_props(&props, 100, 30);

    let positions: Vec<usize> = ["third-alpha", "first-bravo", "second-charlie"]
        .iter()
        .map(|needle| out.find(needle).expect("comment rendered"))
        .collect();
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn test_absent_comments_render_placeholder() {
    let campsite = make_campsite();
    let props = DetailProps {
        is_loading: false,
        err_mess: None,
        campsite: Some(&campsite),
        comments: None,
    };
    let out = render_props(&props, 100, 24);
    assert!(out.contains("React Lake Campground"));
    assert!(!out.contains("Comments"));
    assert!(!out.contains("Error"));
    assert!(out.contains("[c] Submit Comment"));
}

#[test]
fn test_empty_mode_renders_nothing_but_frame() {
    let props = DetailProps::default();
    let out = render_props(&props, 40, 10);
    assert!(!out.contains("Loading"));
    assert!(!out.contains("Directory"));
}

#[test]
fn test_comment_form_modal_shows_touched_errors() {
    let mut state = AppState::new(0);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Campsite(make_campsite())),
    );
    update(&mut state, Action::ToggleCommentForm);

    let out = render_app(&state, 100, 30);
    assert!(out.contains("Submit Comment"));
    assert!(out.contains("Rating"));
    assert!(out.contains("add comments here"));
    assert!(!out.contains("Name must be"));

    update(&mut state, Action::FormFocusNext);
    update(&mut state, Action::FormInput('A'));
    update(&mut state, Action::FormFocusNext);

    let out = render_app(&state, 100, 30);
    assert!(out.contains("Name must be at least 2 characters long"));
}

#[test]
fn test_error_popup_rendered() {
    let mut state = AppState::new(0);
    update(
        &mut state,
        Action::DataLoaded(DataPayload::Campsite(make_campsite())),
    );
    update(&mut state, Action::CommentPostFailed("Error 500".into()));
    let out = render_app(&state, 100, 30);
    assert!(out.contains("Press Esc to dismiss"));
}
