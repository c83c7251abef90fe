//! Behavior shared by every endpoint, driven through a recording executor.

mod support;

use std::thread;
use std::time::{Duration, Instant};

use artifactory_core::{
    ui, v1, v2, ApiError, Artifactory, Context, HttpExecutor, HttpMethod, HttpRequest,
    HttpResponse, TransportError,
};

use support::{artifactory, connection_refused, BASE_URL};

type Outcome = Result<(), ApiError>;
type Endpoint = (&'static str, Box<dyn Fn(&Artifactory, &Context) -> Outcome>);

fn endpoint<F>(name: &'static str, call: F) -> Endpoint
where
    F: Fn(&Artifactory, &Context) -> Outcome + 'static,
{
    (name, Box::new(call))
}

/// Every endpoint, each discarding its successful value.
fn every_endpoint() -> Vec<Endpoint> {
    vec![
        endpoint("ui.list_users", |rt, ctx| rt.ui.security.list_users(ctx).map(drop)),
        endpoint("ui.get_user", |rt, ctx| rt.ui.security.get_user(ctx, "a").map(drop)),
        endpoint("ui.create_user", |rt, ctx| {
            rt.ui.security.create_user(ctx, &ui::NewUser::default()).map(drop)
        }),
        endpoint("ui.update_user", |rt, ctx| {
            rt.ui.security.update_user(ctx, "a", &ui::User::default()).map(drop)
        }),
        endpoint("ui.delete_user", |rt, ctx| rt.ui.security.delete_user(ctx, "a").map(drop)),
        endpoint("ui.get_group", |rt, ctx| rt.ui.security.get_group(ctx, "g").map(drop)),
        endpoint("ui.create_or_replace_group", |rt, ctx| {
            rt.ui
                .security
                .create_or_replace_group(ctx, "g", &ui::Group::default())
                .map(drop)
        }),
        endpoint("ui.update_group", |rt, ctx| {
            rt.ui.security.update_group(ctx, "g", &ui::Group::default()).map(drop)
        }),
        endpoint("ui.delete_group", |rt, ctx| rt.ui.security.delete_group(ctx, "g").map(drop)),
        endpoint("ui.list_permission_targets", |rt, ctx| {
            rt.ui.security.list_permission_targets(ctx).map(drop)
        }),
        endpoint("ui.get_permission_target", |rt, ctx| {
            rt.ui.security.get_permission_target(ctx, "p").map(drop)
        }),
        endpoint("ui.create_or_replace_permission_target", |rt, ctx| {
            rt.ui
                .security
                .create_or_replace_permission_target(ctx, "p", &ui::PermissionTarget::default())
                .map(drop)
        }),
        endpoint("ui.delete_permission_target", |rt, ctx| {
            rt.ui.security.delete_permission_target(ctx, "p").map(drop)
        }),
        endpoint("ui.list_repositories", |rt, ctx| {
            rt.ui.repositories.list_repositories(ctx).map(drop)
        }),
        endpoint("v1.list_users", |rt, ctx| rt.v1.security.list_users(ctx).map(drop)),
        endpoint("v1.get_user", |rt, ctx| rt.v1.security.get_user(ctx, "a").map(drop)),
        endpoint("v1.create_or_replace_user", |rt, ctx| {
            rt.v1
                .security
                .create_or_replace_user(ctx, "a", &v1::User::default())
                .map(drop)
        }),
        endpoint("v1.update_user", |rt, ctx| {
            rt.v1.security.update_user(ctx, "a", &v1::User::default()).map(drop)
        }),
        endpoint("v1.delete_user", |rt, ctx| rt.v1.security.delete_user(ctx, "a").map(drop)),
        endpoint("v1.get_encrypted_password", |rt, ctx| {
            rt.v1.security.get_encrypted_password(ctx).map(drop)
        }),
        endpoint("v1.list_groups", |rt, ctx| rt.v1.security.list_groups(ctx).map(drop)),
        endpoint("v1.get_group", |rt, ctx| rt.v1.security.get_group(ctx, "g").map(drop)),
        endpoint("v1.create_or_replace_group", |rt, ctx| {
            rt.v1
                .security
                .create_or_replace_group(ctx, "g", &v1::Group::default())
                .map(drop)
        }),
        endpoint("v1.update_group", |rt, ctx| {
            rt.v1.security.update_group(ctx, "g", &v1::Group::default()).map(drop)
        }),
        endpoint("v1.delete_group", |rt, ctx| rt.v1.security.delete_group(ctx, "g").map(drop)),
        endpoint("v1.list_permission_targets", |rt, ctx| {
            rt.v1.security.list_permission_targets(ctx).map(drop)
        }),
        endpoint("v1.get_permission_target", |rt, ctx| {
            rt.v1.security.get_permission_target(ctx, "p").map(drop)
        }),
        endpoint("v1.create_or_replace_permission_target", |rt, ctx| {
            rt.v1
                .security
                .create_or_replace_permission_target(ctx, "p", &v1::PermissionTarget::default())
                .map(drop)
        }),
        endpoint("v1.delete_permission_target", |rt, ctx| {
            rt.v1.security.delete_permission_target(ctx, "p").map(drop)
        }),
        endpoint("v1.list_repositories", |rt, ctx| {
            rt.v1.repositories.list_repositories(ctx, None).map(drop)
        }),
        endpoint("v1.delete_repository", |rt, ctx| {
            rt.v1.repositories.delete_repository(ctx, "r").map(drop)
        }),
        endpoint("v1.ping", |rt, ctx| rt.v1.system.ping(ctx).map(drop)),
        endpoint("v1.get_version", |rt, ctx| rt.v1.system.get_version(ctx).map(drop)),
        endpoint("v2.list_permission_targets", |rt, ctx| {
            rt.v2.security.list_permission_targets(ctx).map(drop)
        }),
        endpoint("v2.get_permission_target", |rt, ctx| {
            rt.v2.security.get_permission_target(ctx, "p").map(drop)
        }),
        endpoint("v2.permission_target_exists", |rt, ctx| {
            rt.v2.security.permission_target_exists(ctx, "p").map(drop)
        }),
        endpoint("v2.create_permission_target", |rt, ctx| {
            rt.v2
                .security
                .create_permission_target(ctx, "p", &v2::PermissionTarget::default())
                .map(drop)
        }),
        endpoint("v2.replace_permission_target", |rt, ctx| {
            rt.v2
                .security
                .replace_permission_target(ctx, "p", &v2::PermissionTarget::default())
                .map(drop)
        }),
        endpoint("v2.delete_permission_target", |rt, ctx| {
            rt.v2.security.delete_permission_target(ctx, "p").map(drop)
        }),
    ]
}

#[test]
fn every_endpoint_propagates_transport_failures() {
    for (name, call) in every_endpoint() {
        let (rt, executor) = artifactory();
        executor.fail(connection_refused);

        let err = call(&rt, &Context::background()).expect_err(name);
        assert!(
            matches!(err, ApiError::Transport(TransportError::Network(_))),
            "{name}: {err:?}"
        );
        assert_eq!(executor.requests().len(), 1, "{name}: one round-trip");
    }
}

#[test]
fn every_endpoint_refuses_a_cancelled_context() {
    for (name, call) in every_endpoint() {
        let (rt, executor) = artifactory();
        let (ctx, cancel) = Context::background().with_cancel();
        cancel.cancel();

        let err = call(&rt, &ctx).expect_err(name);
        assert!(
            matches!(err, ApiError::Transport(TransportError::Cancelled)),
            "{name}: {err:?}"
        );
        assert!(executor.requests().is_empty(), "{name}: nothing sent");
    }
}

#[test]
fn every_endpoint_accepts_any_status_without_error() {
    let (rt, executor) = artifactory();
    let ctx = Context::background();

    executor.respond(500, "");
    let response = rt.ui.security.create_user(&ctx, &ui::NewUser::default()).unwrap();
    assert_eq!(response.status, 500);

    executor.respond(404, "missing");
    let deleted = rt.v1.security.delete_user(&ctx, "ghost").unwrap();
    assert_eq!(deleted.status(), 404);
    assert_eq!(deleted.value, "missing");

    executor.respond(403, "");
    let exists = rt.v2.security.permission_target_exists(&ctx, "p").unwrap();
    assert!(!exists.value);
    assert_eq!(exists.status(), 403);
}

#[test]
fn expired_deadline_fails_before_sending() {
    let (rt, executor) = artifactory();
    let ctx = Context::background().with_timeout(Duration::ZERO);

    let err = rt.v1.system.ping(&ctx).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::DeadlineExceeded)
    ));
    assert!(executor.requests().is_empty());
}

#[test]
fn executor_deadline_error_is_propagated() {
    let (rt, executor) = artifactory();
    executor.fail(|| TransportError::DeadlineExceeded);

    let ctx = Context::background().with_timeout(Duration::from_secs(30));
    let err = rt.ui.security.list_users(&ctx).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::DeadlineExceeded)
    ));
}

/// Answers `200 OK` after a fixed delay, ignoring the context.
struct Slow(Duration);

impl HttpExecutor for Slow {
    fn execute(&self, _request: &HttpRequest, _ctx: &Context) -> Result<HttpResponse, TransportError> {
        thread::sleep(self.0);
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "OK".to_string(),
        })
    }
}

/// Waits for the context to be cancelled, giving up after a fixed delay.
struct Interruptible(Duration);

impl HttpExecutor for Interruptible {
    fn execute(&self, _request: &HttpRequest, ctx: &Context) -> Result<HttpResponse, TransportError> {
        let started = Instant::now();
        while started.elapsed() < self.0 {
            if ctx.is_cancelled() {
                return Err(TransportError::Cancelled);
            }
            thread::sleep(Duration::from_millis(5));
        }
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "OK".to_string(),
        })
    }
}

#[test]
fn cancel_while_in_flight_discards_a_late_response() {
    let rt = Artifactory::new(BASE_URL, Slow(Duration::from_millis(500))).unwrap();
    let (ctx, cancel) = Context::background().with_cancel();

    let err = thread::scope(|scope| {
        scope.spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cancel.cancel();
        });
        rt.v1.system.ping(&ctx).unwrap_err()
    });
    assert!(
        matches!(err, ApiError::Transport(TransportError::Cancelled)),
        "{err:?}"
    );
}

#[test]
fn executor_sees_cancellation_while_in_flight() {
    let rt = Artifactory::new(BASE_URL, Interruptible(Duration::from_secs(5))).unwrap();
    let (ctx, cancel) = Context::background().with_cancel();

    let started = Instant::now();
    let err = thread::scope(|scope| {
        scope.spawn(move || {
            thread::sleep(Duration::from_millis(50));
            cancel.cancel();
        });
        rt.ui.security.list_users(&ctx).unwrap_err()
    });
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::Cancelled)
    ));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn uncancelled_slow_call_still_succeeds() {
    let rt = Artifactory::new(BASE_URL, Slow(Duration::from_millis(20))).unwrap();
    let (ctx, _cancel) = Context::background().with_cancel();

    let ping = rt.v1.system.ping(&ctx).unwrap();
    assert_eq!(ping.value, "OK");
}

#[test]
fn permission_target_exists_on_any_success_status() {
    let (rt, executor) = artifactory();
    let ctx = Context::background();

    for status in [200, 204] {
        executor.respond(status, "");
        let exists = rt.v2.security.permission_target_exists(&ctx, "p").unwrap();
        assert!(exists.value, "{status}");
        assert_eq!(exists.status(), status);
    }
    executor.respond(404, "");
    assert!(!rt.v2.security.permission_target_exists(&ctx, "p").unwrap().value);
}

#[test]
fn list_users_returns_every_entry_in_order() {
    let (rt, executor) = artifactory();
    executor.respond(
        200,
        r#"[{"name":"admin","realm":"internal"},{"name":"jane"},{"name":"bob","uri":"ui/users/bob"}]"#,
    );

    let users = rt.ui.security.list_users(&Context::background()).unwrap();
    assert_eq!(users.status(), 200);
    let names: Vec<_> = users
        .value
        .iter()
        .map(|user| user.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["admin", "jane", "bob"]);
    assert_eq!(users.value[0].realm.as_deref(), Some("internal"));
    assert_eq!(users.value[1].uri, None);
}

#[test]
fn non_json_body_is_a_decode_error_with_the_response() {
    let (rt, executor) = artifactory();
    executor.respond(200, "<html>login</html>");

    let err = rt.ui.security.get_group(&Context::background(), "g").unwrap_err();
    let response = err.response().expect("raw response kept");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "<html>login</html>");
    assert!(err.to_string().starts_with("decode failed (HTTP 200)"));
}

#[test]
fn delete_returns_json_looking_bodies_as_text() {
    let (rt, executor) = artifactory();
    let body = r#"{"errors":[{"status":404,"message":"Not Found"}]}"#;
    executor.respond(404, body);

    let deleted = rt
        .ui
        .security
        .delete_permission_target(&Context::background(), "p")
        .unwrap();
    assert_eq!(deleted.value, body);
    assert_eq!(deleted.into_value(), body);
}

#[test]
fn response_headers_are_passed_through() {
    let (rt, executor) = artifactory();
    executor.respond_with(HttpResponse {
        status: 201,
        headers: vec![("Location".to_string(), "ui/users/jane".to_string())],
        body: String::new(),
    });

    let response = rt
        .ui
        .security
        .create_user(&Context::background(), &ui::NewUser::default())
        .unwrap();
    assert_eq!(response.header("location"), Some("ui/users/jane"));
}

#[test]
fn dot_segments_in_identifiers_are_rejected_before_sending() {
    let (rt, executor) = artifactory();
    let ctx = Context::background();

    for name in ["..", ".", "%2e%2e", "..\\admin"] {
        let err = rt.v1.security.get_user(&ctx, name).unwrap_err();
        assert!(matches!(err, ApiError::Path { .. }), "{name}: {err:?}");
    }
    let err = rt.v1.repositories.delete_repository(&ctx, "..").unwrap_err();
    assert!(matches!(err, ApiError::Path { .. }));
    assert!(executor.requests().is_empty());
}

#[test]
fn clients_are_shared_across_threads() {
    let (rt, executor) = artifactory();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let rt = rt.clone();
            scope.spawn(move || {
                rt.v1.system.ping(&Context::background()).unwrap();
            });
        }
    });

    let requests = executor.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|req| req.method == HttpMethod::Get
        && req.url == format!("{BASE_URL}api/system/ping")));
}

#[test]
fn rejects_base_url_without_trailing_slash() {
    let err = Artifactory::new(
        "http://localhost:8081/artifactory",
        support::MockExecutor::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Config { .. }));
}
