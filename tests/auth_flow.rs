mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn register_then_login() {
    let app = test_app();
    register(&app, "alice", "secret1").await;

    let denied = post_form(&app, "/login", "username=alice&password=wrong", None).await;
    assert_eq!(denied.status(), StatusCode::SEE_OTHER);
    assert!(location(&denied).starts_with("/login?error="));
    assert!(session_cookie(&denied).is_none());

    let cookie = login(&app, "alice", "secret1").await;
    let index = get(&app, "/index/", Some(&cookie)).await;
    assert_eq!(index.status(), StatusCode::OK);
    assert!(body_text(index).await.contains("Welcome alice"));
}

#[tokio::test]
async fn session_cookie_attributes() {
    let app = test_app();
    register(&app, "alice", "secret1").await;
    let response = post_form(&app, "/login", "username=alice&password=secret1", None).await;
    assert_eq!(location(&response), "/index/");

    let header = set_cookie_headers(&response)
        .into_iter()
        .find(|h| h.starts_with("session="))
        .unwrap();
    assert!(header.contains("Path=/"));
    assert!(header.contains("Max-Age=3600"));
    assert!(header.contains("HttpOnly"));
    assert!(!header.contains("alice"));
}

#[tokio::test]
async fn failure_message_does_not_reveal_which_part_was_wrong() {
    let app = test_app();
    register(&app, "alice", "secret1").await;

    let wrong_password = post_form(&app, "/login", "username=alice&password=nope", None).await;
    let unknown_user = post_form(&app, "/login", "username=nobody&password=nope", None).await;
    assert_eq!(location(&wrong_password), location(&unknown_user));
}

#[tokio::test]
async fn anonymous_index_and_hello() {
    let app = test_app();
    let index = get(&app, "/", None).await;
    assert_eq!(index.status(), StatusCode::OK);
    assert!(body_text(index).await.contains("Please log in or register"));

    let hello = get(&app, "/hello", None).await;
    assert_eq!(body_text(hello).await, "hello\n");
}

#[tokio::test]
async fn tampered_or_foreign_cookie_is_anonymous() {
    let app = test_app();
    register(&app, "alice", "secret1").await;
    let cookie = login(&app, "alice", "secret1").await;

    let mut tampered = cookie.clone();
    let mid = "session=".len() + (tampered.len() - "session=".len()) / 2;
    let replacement = if &tampered[mid..mid + 1] == "x" { "y" } else { "x" };
    tampered.replace_range(mid..mid + 1, replacement);

    let index = get(&app, "/index/", Some(&tampered)).await;
    let body = body_text(index).await;
    assert!(body.contains("Please log in or register"));
    assert!(!body.contains("Welcome"));

    let redirected = get(&app, "/sheets/new", Some("session=not-a-token")).await;
    assert_eq!(redirected.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&redirected), "/login");
}

#[tokio::test]
async fn logout_expires_and_revokes_the_cookie() {
    let app = test_app();
    register(&app, "alice", "secret1").await;
    let cookie = login(&app, "alice", "secret1").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let removal = set_cookie_headers(&response)
        .into_iter()
        .find(|h| h.starts_with("session="))
        .expect("logout should expire the cookie");
    assert!(removal.contains("Max-Age=0"));
    assert!(removal.contains("Path=/"));

    // The old value is no longer accepted even though it has not expired.
    let index = get(&app, "/index/", Some(&cookie)).await;
    assert!(body_text(index).await.contains("Please log in or register"));
}

#[tokio::test]
async fn registration_validation() {
    let app = test_app();

    let mismatch = post_form(
        &app,
        "/register",
        "username=alice&password=a&confirm_password=b",
        None,
    )
    .await;
    assert!(location(&mismatch).starts_with("/register?error="));

    let blank = post_form(&app, "/register", "username=&password=&confirm_password=", None).await;
    assert!(location(&blank).starts_with("/register?error="));

    register(&app, "alice", "secret1").await;
    let taken = post_form(
        &app,
        "/register",
        "username=alice&password=other&confirm_password=other",
        None,
    )
    .await;
    assert_eq!(location(&taken), "/register?error=Username%20already%20taken");

    // The original password still works.
    login(&app, "alice", "secret1").await;
}

#[tokio::test]
async fn login_page_shows_escaped_notice() {
    let app = test_app();
    let page = get(&app, "/login?error=%3Cb%3Ebad%3C%2Fb%3E", None).await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = body_text(page).await;
    assert!(body.contains("&lt;b&gt;bad&lt;/b&gt;"));
}

#[tokio::test]
async fn passwords_longer_than_bcrypt_reads_are_refused() {
    let app = test_app();
    let longest = "p".repeat(72);

    let too_long = format!("{}A", longest);
    let body = format!(
        "username=alice&password={}&confirm_password={}",
        too_long, too_long
    );
    let refused = post_form(&app, "/register", &body, None).await;
    assert_eq!(refused.status(), StatusCode::SEE_OTHER);
    assert!(location(&refused).starts_with("/register?error="));

    // A password sharing the first 72 bytes of a real one must not log in.
    register(&app, "alice", &longest).await;
    let body = format!("username=alice&password={}B", longest);
    let denied = post_form(&app, "/login", &body, None).await;
    assert!(location(&denied).starts_with("/login?error="));
    assert!(session_cookie(&denied).is_none());

    let cookie = login(&app, "alice", &longest).await;
    assert!(cookie.starts_with("session="));
}
