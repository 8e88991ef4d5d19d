use std::time::Duration;

use campsite_info::api::client::retain_for_campsite;
use campsite_info::api::models::{Campsite, Comment, NewComment, Rating};
use campsite_info::api::{ApiError, CampsiteClient};

fn client(base: &str) -> CampsiteClient {
    CampsiteClient::new(base, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_parse_campsite_from_backend_json() {
    let json = r#"{
        "id": 0,
        "name": "React Lake Campground",
        "image": "images/react-lake.jpg",
        "elevation": 1233,
        "featured": false,
        "description": "Nestled in the foothills of the Chrome Mountains."
    }"#;
    let campsite: Campsite = serde_json::from_str(json).unwrap();
    assert_eq!(campsite.id, 0);
    assert_eq!(campsite.name, "React Lake Campground");
    assert_eq!(campsite.elevation, Some(1233));
    assert!(!campsite.featured);
}

#[test]
fn test_parse_campsite_without_optional_fields() {
    let json = r#"{"id": 3, "name": "Redux Woods", "image": "images/redux-woods.jpg", "description": "Quiet."}"#;
    let campsite: Campsite = serde_json::from_str(json).unwrap();
    assert_eq!(campsite.elevation, None);
    assert!(!campsite.featured);
}

#[test]
fn test_parse_comment_list() {
    let json = r#"[
        {"id": 0, "campsiteId": 0, "rating": 5, "text": "What a magnificent view!", "author": "Tinus Lorvaldes", "date": "2018-10-25T16:30Z"},
        {"id": 1, "campsiteId": 0, "rating": 5, "text": "Best camping ever.", "author": "Brennan Eich", "date": "2018-11-25T16:30Z"}
    ]"#;
    let comments: Vec<Comment> = serde_json::from_str(json).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].author, "Tinus Lorvaldes");
    assert_eq!(comments[1].rating.get(), 5);
}

#[test]
fn test_comment_with_out_of_range_rating_is_rejected() {
    let json = r#"{"id": 0, "campsiteId": 0, "rating": 9, "text": "", "author": "x", "date": ""}"#;
    assert!(serde_json::from_str::<Comment>(json).is_err());
}

#[test]
fn test_new_comment_serializes_camel_case() {
    let comment = NewComment {
        campsite_id: 5,
        rating: Rating::try_from(3).unwrap(),
        author: "Al".into(),
        text: "Nice".into(),
    };
    let value = serde_json::to_value(&comment).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"campsiteId": 5, "rating": 3, "author": "Al", "text": "Nice"})
    );
}

#[test]
fn test_retain_for_campsite_keeps_order() {
    let make = |id, campsite_id| Comment {
        id,
        campsite_id,
        rating: Rating::default(),
        author: "a".into(),
        text: String::new(),
        date: String::new(),
    };
    let kept = retain_for_campsite(vec![make(3, 1), make(4, 2), make(1, 1)], 1);
    let ids: Vec<u32> = kept.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

// --- URL building ---

#[test]
fn test_endpoint_urls() {
    let client = client("http://localhost:3001");
    assert_eq!(
        client.campsite_url(2).unwrap().as_str(),
        "http://localhost:3001/campsites/2"
    );
    assert_eq!(
        client.comments_url(2).unwrap().as_str(),
        "http://localhost:3001/comments?campsiteId=2"
    );
    assert_eq!(
        client.image_url("images/react-lake.jpg").unwrap().as_str(),
        "http://localhost:3001/images/react-lake.jpg"
    );
}

#[test]
fn test_base_url_with_path_keeps_prefix() {
    let client = client("https://example.com/api");
    assert_eq!(client.base_url().as_str(), "https://example.com/api/");
    assert_eq!(
        client.campsite_url(1).unwrap().as_str(),
        "https://example.com/api/campsites/1"
    );
}

#[test]
fn test_absolute_image_reference_passes_through() {
    let client = client("http://localhost:3001/");
    assert_eq!(
        client.image_url("https://cdn.example.com/a.jpg").unwrap().as_str(),
        "https://cdn.example.com/a.jpg"
    );
}

#[test]
fn test_invalid_base_urls_rejected() {
    for base in ["not a url", "ftp://example.com/"] {
        let err = CampsiteClient::new(base, Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "{base}");
    }
}

#[test]
fn test_status_error_message_format() {
    let err = ApiError::Status {
        status: 404,
        reason: "Not Found".into(),
    };
    assert_eq!(err.to_string(), "Error 404: Not Found");
}
