mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{error_message, spawn_app};

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = spawn_app().await;
    let uri = format!("/api/users/{}", uuid::Uuid::new_v4());

    let (status, body) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "No Token inserted");

    let (status, body) = app.send(Method::GET, &uri, Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid Token");
}

#[tokio::test]
async fn test_signup_login_and_profile() {
    let app = spawn_app().await;
    let (user_id, token) = app.register("jane").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({
                "email": "jane@example.com",
                "username": "jane",
                "password": "Secret12!",
                "firstName": "Jane",
                "lastName": "Doe",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!error_message(&body).is_empty());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "username": "nobody", "password": "Secret12!" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Email is required");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "jane", "password": "Wrong123!" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid Password");

    let (status, body) = app
        .send(Method::GET, &format!("/api/users/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "jane");
    assert_eq!(body["firstName"], "Test");
    assert!(body.get("password").is_none());
    assert!(body.get("email").is_none());

    let (status, body) = app
        .send(Method::GET, "/api/users/not-a-uuid", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid user Id format");
}

#[tokio::test]
async fn test_favourite_genres() {
    let app = spawn_app().await;
    let (user_id, token) = app.register("listener").await;

    let (status, _) = app
        .send(Method::POST, "/api/users/genre/rock", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(Method::POST, "/api/users/genre/rock", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Genre already among your favourites");

    let (status, body) = app
        .send(Method::DELETE, "/api/users/genre/jazz", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Genre not found among your favourites");

    let (_, body) = app
        .send(Method::GET, &format!("/api/users/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(body["preferences"]["genres"], json!(["rock"]));
}

#[tokio::test]
async fn test_playlist_ownership_and_songs() {
    let app = spawn_app().await;
    let (_, owner) = app.register("owner").await;
    let (_, other) = app.register("other").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&owner),
            Some(json!({ "title": "Night drive", "tags": ["rock"], "public": false })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let playlist_id = body["playlistId"].as_str().unwrap().to_string();
    let uri = format!("/api/playlists/{playlist_id}");

    let (status, body) = app.send(Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "The playlist isn't public");

    let (status, body) = app.send(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Night drive");
    assert_eq!(body["public"], false);

    let song_uri = format!("{uri}/songs/track-1");
    let (status, _) = app.send(Method::POST, &song_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.send(Method::POST, &song_uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Song is already in this playlist");

    let (status, body) = app
        .send(Method::POST, &format!("{uri}/songs/track-2"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Only the owner of the playlist can update it");

    let (status, _) = app
        .send(Method::POST, &format!("{uri}/songs/unknown"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No body toggles the visibility.
    let (status, _) = app
        .send(Method::PATCH, &format!("{uri}/visibility"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.send(Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["songs"], json!(["track-1"]));

    let (status, body) = app.send(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(&body),
        "You do not have permission to delete this playlist"
    );

    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_info_returns_playlist() {
    let app = spawn_app().await;
    let (_, owner) = app.register("owner").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&owner),
            Some(json!({ "title": "Draft" })),
        )
        .await;
    let uri = format!("/api/playlists/{}/info", body["playlistId"].as_str().unwrap());

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&owner),
            Some(json!({ "title": "Final" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Title and description are required");

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&owner),
            Some(json!({ "title": "Final", "description": "Done", "tags": ["jazz"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Final");
    assert_eq!(body["tags"], json!(["jazz"]));
}

#[tokio::test]
async fn test_search() {
    let app = spawn_app().await;
    let (_, token) = app.register("searcher").await;

    let (status, body) = app
        .send(Method::GET, "/api/search/zzzz", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "No items found");

    let (status, body) = app
        .send(Method::GET, "/api/search/SEARCH?types=user", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"][0]["username"], "searcher");
    assert_eq!(body["pagination"]["users"]["totalResults"], 1);

    let (status, body) = app
        .send(Method::GET, "/api/search/spotify/abba", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Missing types");

    let (status, body) = app
        .send(
            Method::GET,
            "/api/search/spotify/abba?types=track,album&page=1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["offset"], 10);

    let (status, body) = app
        .send(Method::GET, "/api/search/spotify/genres", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some_and(|genres| !genres.is_empty()));
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let app = spawn_app().await;
    let (user_id, token) = app.register("leaving").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&token),
            Some(json!({ "title": "Goodbye" })),
        )
        .await;
    let playlist_id = body["playlistId"].as_str().unwrap().to_string();

    let (status, _) = app.send(Method::DELETE, "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, other) = app.register("staying").await;
    let (status, _) = app
        .send(Method::GET, &format!("/api/users/{user_id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(Method::GET, &format!("/api/playlists/{playlist_id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The old token still verifies but its user is gone.
    let (status, body) = app
        .send(Method::GET, &format!("/api/users/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "User not found");
}

#[tokio::test]
async fn test_avatar_falls_back_to_default() {
    let app = spawn_app().await;
    let dir = app
        .avatars
        .dir(mixtape_api::services::avatar_service::AvatarKind::Users);
    tokio::fs::write(dir.join("0.jpg"), b"default").await.unwrap();

    let request = axum::http::Request::builder()
        .uri("/uploads/avatars/users/missing.jpg")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"default");
}

#[tokio::test]
async fn test_playlist_avatar_stays_in_its_directory() {
    let app = spawn_app().await;
    let (_, owner) = app.register("painter").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/playlists",
            Some(&owner),
            Some(json!({ "title": "Covers" })),
        )
        .await;
    let playlist_id = body["playlistId"].as_str().unwrap().to_string();

    let uri = format!("/api/playlists/..%2F..%2F..%2Fescaped:{playlist_id}/avatar");
    let (status, body) = app.upload_avatar(&uri, &owner).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Playlist must be a valid playlist id");

    let uri = format!("/api/playlists/playlist:{playlist_id}/avatar");
    let (status, _) = app.upload_avatar(&uri, &owner).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let parent = app.uploads_dir().parent().unwrap();
    assert!(!parent.join(format!("escaped:{playlist_id}.jpg")).exists());
    assert!(!app
        .uploads_dir()
        .join(format!("escaped:{playlist_id}.jpg"))
        .exists());

    let (status, _) = app
        .upload_avatar(&format!("/api/playlists/{playlist_id}/avatar"), &owner)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let saved = app
        .avatars
        .dir(mixtape_api::services::avatar_service::AvatarKind::Playlists)
        .join(format!("{playlist_id}.jpg"));
    assert!(saved.exists());

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/playlists/{playlist_id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!saved.exists());
}

#[tokio::test]
async fn test_follow_and_unfollow_use_the_same_id() {
    let app = spawn_app().await;
    let (_, fan) = app.register("fan").await;
    let (idol_id, _) = app.register("idol").await;
    let uri = format!("/api/users/following/{idol_id}");

    let (status, body) = app
        .send(Method::POST, &format!("/api/users/following/user:{idol_id}"), Some(&fan), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid user Id format");

    let (status, _) = app.send(Method::POST, &uri, Some(&fan), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&fan), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&fan), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_rejects_out_of_range_paging() {
    let app = spawn_app().await;
    let (_, token) = app.register("seeker").await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/search/sea?limit=-9223372036854775808",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid page value");

    let (status, _) = app
        .send(
            Method::GET,
            "/api/search/sea?page=9223372036854775807&limit=2",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
