//! End-to-end scenarios for the quiz pages over the in-memory store.
//!
//! Each test drives a full Actix app (trace middleware, cookie sessions, and
//! every quiz route) and carries the session cookie between requests the way
//! a browser would, so flash messages survive redirects.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::Value;

use quiz_backend::Trace;
use quiz_backend::domain::{QuizService, TRACE_ID_HEADER};
use quiz_backend::inbound::http::quiz;
use quiz_backend::inbound::http::state::HttpState;
use quiz_backend::outbound::memory::InMemoryQuizRepository;

const SESSION_COOKIE: &str = "session";

macro_rules! quiz_app {
    () => {{
        let service = QuizService::new(Arc::new(InMemoryQuizRepository::new()));
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from_service(Arc::new(service))))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_name(SESSION_COOKIE.to_owned())
                        .cookie_secure(false)
                        .build(),
                )
                .wrap(Trace)
                .configure(quiz::configure),
        )
        .await
    }};
}

/// Send `$req`, attaching and then refreshing the cookie held in `$jar`.
macro_rules! send {
    ($app:expr, $jar:expr, $req:expr) => {{
        let mut req = $req;
        if let Some(cookie) = $jar.clone() {
            req = req.cookie(cookie);
        }
        let res = test::call_service(&$app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            $jar = Some(cookie.into_owned());
        }
        res
    }};
}

macro_rules! send_json {
    ($app:expr, $jar:expr, $req:expr) => {{
        let res = send!($app, $jar, $req);
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("location header")
}

fn form(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn crud_lifecycle_with_flash_messages() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    let (status, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["noListMsg"], "No quizzes are registered.");

    let res = send!(
        app,
        jar,
        test::TestRequest::post().uri("/quiz/insert").set_form(form(&[
            ("id", ""),
            ("question", "Q1"),
            ("answer", "true"),
            ("author", "A"),
        ]))
    );
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/quiz");

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(page["complete"], "Registration completed.");
    let list = page["list"].as_array().expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["question"], "Q1");
    assert_eq!(list[0]["answer"], true);
    let id = list[0]["id"].as_i64().expect("assigned id");

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert!(page.get("complete").is_none(), "flash is shown once");

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri(&format!("/quiz/{id}")));
    assert_eq!(page["title"], "Update form");
    assert_eq!(page["quizForm"]["question"], "Q1");

    let id_field = id.to_string();
    let res = send!(
        app,
        jar,
        test::TestRequest::post().uri("/quiz/update").set_form(form(&[
            ("id", &id_field),
            ("question", "Q1v2"),
            ("answer", "false"),
            ("author", "A2"),
        ]))
    );
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/quiz/{id}"));

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri(&format!("/quiz/{id}")));
    assert_eq!(page["complete"], "Update completed.");
    assert_eq!(page["quizForm"]["question"], "Q1v2");
    assert_eq!(page["quizForm"]["answer"], false);
    assert_eq!(page["quizForm"]["author"], "A2");

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(page["list"].as_array().map(Vec::len), Some(1));

    for _ in 0..2 {
        let res = send!(
            app,
            jar,
            test::TestRequest::post()
                .uri("/quiz/delete")
                .set_form(form(&[("id", &id_field)]))
        );
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/quiz");
    }

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(page["delcomplete"], "Deletion completed.");
    assert_eq!(page["noListMsg"], "No quizzes are registered.");
}

#[rstest]
#[actix_web::test]
async fn play_and_check_answers() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    let (status, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz/play"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["msg"], "No quiz available...");

    send!(
        app,
        jar,
        test::TestRequest::post().uri("/quiz/insert").set_form(form(&[
            ("question", "Is the sky blue?"),
            ("answer", "true"),
            ("author", "A"),
        ]))
    );

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz/play"));
    assert!(page.get("msg").is_none());
    assert_eq!(page["quizForm"]["question"], "Is the sky blue?");
    let id = page["quizForm"]["id"].as_i64().expect("id").to_string();

    for (answer, expected) in [("true", "Correct!!!"), ("false", "Sorry! Incorrect!!!")] {
        let (status, page) = send_json!(
            app,
            jar,
            test::TestRequest::post()
                .uri("/quiz/check")
                .set_form(form(&[("id", &id), ("answer", answer)]))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["view"], "answer");
        assert_eq!(page["msg"], expected);
    }

    let (_, page) = send_json!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/quiz/check")
            .set_form(form(&[("id", "999"), ("answer", "true")]))
    );
    assert_eq!(page["msg"], "Sorry! Incorrect!!!");
}

#[rstest]
#[actix_web::test]
async fn random_play_only_serves_stored_quizzes() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    for question in ["Q1", "Q2", "Q3"] {
        send!(
            app,
            jar,
            test::TestRequest::post().uri("/quiz/insert").set_form(form(&[
                ("question", question),
                ("answer", "true"),
                ("author", "A"),
            ]))
        );
    }

    for _ in 0..15 {
        let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz/play"));
        let question = page["quizForm"]["question"].as_str().expect("question");
        assert!(["Q1", "Q2", "Q3"].contains(&question));
    }
}

#[rstest]
#[actix_web::test]
async fn invalid_insert_rerenders_without_storing() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    let (status, page) = send_json!(
        app,
        jar,
        test::TestRequest::post().uri("/quiz/insert").set_form(form(&[
            ("question", "  "),
            ("answer", "true"),
            ("author", ""),
        ]))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(page["view"], "crud");
    let fields: Vec<&str> = page["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert_eq!(fields, ["question", "author"]);

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(page["list"].as_array().map(Vec::len), Some(0));
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_id_inserts_fresh_record() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    let res = send!(
        app,
        jar,
        test::TestRequest::post().uri("/quiz/update").set_form(form(&[
            ("id", "41"),
            ("question", "Q"),
            ("answer", "true"),
            ("author", "A"),
        ]))
    );
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/quiz/1");

    let (_, page) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    assert_eq!(page["list"][0]["id"], 1);
}

#[rstest]
#[actix_web::test]
async fn malformed_requests_carry_trace_ids() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    let res = send!(app, jar, test::TestRequest::get().uri("/quiz/not-a-number"));
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"], header.as_str());
}

#[rstest]
#[actix_web::test]
async fn delete_leaves_other_quizzes_untouched() {
    let app = quiz_app!();
    let mut jar: Option<Cookie<'static>> = None;

    for (question, answer, author) in [("Q1", "true", "A"), ("Q2", "false", "B"), ("Q3", "true", "C")] {
        send!(
            app,
            jar,
            test::TestRequest::post().uri("/quiz/insert").set_form(form(&[
                ("question", question),
                ("answer", answer),
                ("author", author),
            ]))
        );
    }
    let (_, before) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    let before = before["list"].as_array().cloned().expect("list");
    assert_eq!(before.len(), 3);
    let target = before[1]["id"].as_i64().expect("id").to_string();

    for id in [target.as_str(), target.as_str(), "999"] {
        let res = send!(
            app,
            jar,
            test::TestRequest::post()
                .uri("/quiz/delete")
                .set_form(form(&[("id", id)]))
        );
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    let (_, after) = send_json!(app, jar, test::TestRequest::get().uri("/quiz"));
    let after = after["list"].as_array().cloned().expect("list");
    assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
}
