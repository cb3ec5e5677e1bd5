//! End-to-end routing through the request pipeline, against a scripted
//! transport.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::StatusCode;
use riptide::{
    any_content_type, on, Bindings, Error, HttpResponse, Json, RequestArguments, RequestFactory,
    ResponseFuture, Rest, Route,
};

struct MockFactory {
    results: Mutex<VecDeque<Result<HttpResponse, Error>>>,
    calls: AtomicUsize,
}

impl MockFactory {
    fn new(results: Vec<Result<HttpResponse, Error>>) -> Arc<Self> {
        Arc::new(MockFactory {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn returning(response: HttpResponse) -> Arc<Self> {
        MockFactory::new(vec![Ok(response)])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RequestFactory for MockFactory {
    fn execute(&self, _: RequestArguments) -> ResponseFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");
        Box::pin(async move { next })
    }
}

fn rest(factory: &Arc<MockFactory>) -> Rest {
    Rest::builder()
        .base_url("http://localhost/")
        .request_factory(Arc::clone(factory))
        .build()
        .unwrap()
}

fn text_response(body: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::OK)
        .with_header("Content-Type", "text/plain")
        .with_body(body.to_owned())
}

fn json_response(body: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::OK)
        .with_header("Content-Type", "application/json")
        .with_body(body.to_owned())
}

#[tokio::test]
async fn routes_on_content_type() {
    let factory = MockFactory::returning(text_response("It works!"));
    let captured = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&captured);

    rest(&factory)
        .get("/path.txt")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::text_plain()).consume::<String, _>(move |body| {
                    *slot.lock().unwrap() = Some(body);
                }),
                on(riptide::MediaType::application_json())
                    .call(Route::call(|_| Err("didn't expect json".into()))),
            ],
        )
        .await
        .unwrap();

    assert_eq!(captured.lock().unwrap().as_deref(), Some("It works!"));
}

#[tokio::test]
async fn maps_the_decoded_body() {
    let factory = MockFactory::returning(text_response("It works!"));

    let body = rest(&factory)
        .get("/path.txt")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::text_plain()).map::<String, _, _>(|body| body),
                on(riptide::MediaType::application_json()).map::<String, _, _>(|body| body),
            ],
        )
        .await
        .unwrap();

    assert_eq!(body, "It works!");
}

#[tokio::test]
async fn maps_json_values() {
    let factory = MockFactory::returning(json_response(r#"{"value": 123}"#));

    let value = rest(&factory)
        .get("/path.json")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::text_plain())
                    .map::<Json<HashMap<String, i64>>, _, _>(|_| 0),
                on(riptide::MediaType::application_json())
                    .map::<Json<HashMap<String, i64>>, _, _>(|Json(values)| values["value"]),
            ],
        )
        .await
        .unwrap();

    assert_eq!(value, 123);
}

#[tokio::test]
async fn routes_on_status_code() {
    let factory = MockFactory::returning(
        HttpResponse::new(StatusCode::NOT_FOUND).with_body("Not found"),
    );
    let captured = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&captured);

    rest(&factory)
        .get("/path")
        .dispatch(
            riptide::status_code(),
            [
                on(200u16).call(Route::call(|_| Err("didn't expect 200".into()))),
                on(404u16).consume::<String, _>(move |body| {
                    *slot.lock().unwrap() = Some(body);
                }),
            ],
        )
        .await
        .unwrap();

    assert_eq!(captured.lock().unwrap().as_deref(), Some("Not found"));
}

#[tokio::test]
async fn routes_on_status() {
    let factory = MockFactory::returning(HttpResponse::new(StatusCode::CREATED));

    let response = rest(&factory)
        .post("/things")
        .body(r#"{"name": "thing"}"#)
        .dispatch(
            riptide::navigators::status(),
            [Bindings::on(StatusCode::CREATED).call(Route::capture())],
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn maps_json_into_derived_types() {
    #[derive(serde::Deserialize)]
    struct Widget {
        name: String,
        quantity: u32,
    }

    let factory = MockFactory::returning(json_response(r#"{"name": "bolt", "quantity": 7}"#));

    let widget = rest(&factory)
        .get("/widgets/{id}")
        .path_var("id", 1)
        .dispatch(
            riptide::navigators::content_type(),
            [on(riptide::MediaType::application_json())
                .map::<Json<Widget>, _, _>(|Json(widget)| widget)],
        )
        .await
        .unwrap();

    assert_eq!(widget.name, "bolt");
    assert_eq!(widget.quantity, 7);
}

#[tokio::test]
async fn fails_when_nothing_matches_and_no_wildcard() {
    let factory = MockFactory::returning(json_response("{}"));

    let error = rest(&factory)
        .get("/path.json")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::text_plain()).call(Route::pass()),
                on(riptide::MediaType::application_xml()).call(Route::pass()),
            ],
        )
        .await
        .unwrap_err();

    assert!(matches!(error, Error::NoRouteMatched(_)));
}

#[tokio::test]
async fn falls_back_to_the_wildcard() {
    let factory = MockFactory::returning(json_response("{}"));

    rest(&factory)
        .get("/path.json")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::text_plain())
                    .call(Route::call(|_| Err("didn't expect text".into()))),
                any_content_type().call(Route::pass()),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_bindings_fail_before_anything_is_sent() {
    let factory = MockFactory::new(Vec::new());

    let error = rest(&factory)
        .get("/path")
        .dispatch(
            riptide::content_type(),
            [
                on(riptide::MediaType::application_json()).call(Route::pass()),
                on(riptide::MediaType::application_json()).call(Route::pass()),
                on(riptide::MediaType::application_xml()).call(Route::pass()),
                on(riptide::MediaType::application_xml()).call(Route::pass()),
                on(riptide::MediaType::text_plain()).call(Route::pass()),
            ],
        )
        .await
        .unwrap_err();

    match error {
        Error::DuplicateAttributeValue(keys) => {
            assert!(keys.contains("application/json"));
            assert!(keys.contains("application/xml"));
        }
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(factory.calls(), 0);
}

#[tokio::test]
async fn transport_is_invoked_lazily() {
    let factory = MockFactory::returning(text_response("later"));

    let future = rest(&factory).get("/path").dispatch(
        riptide::content_type(),
        [any_content_type().call(Route::pass())],
    );

    assert_eq!(factory.calls(), 0);
    future.await.unwrap();
    assert_eq!(factory.calls(), 1);
}

#[tokio::test]
async fn builder_expands_template_variables() {
    let factory = MockFactory::returning(HttpResponse::new(StatusCode::OK));
    let seen = Arc::new(Mutex::new(None));

    struct Capture {
        inner: Arc<MockFactory>,
        seen: Arc<Mutex<Option<String>>>,
    }

    impl RequestFactory for Capture {
        fn execute(&self, arguments: RequestArguments) -> ResponseFuture {
            *self.seen.lock().unwrap() = Some(arguments.url().to_string());
            self.inner.execute(arguments)
        }
    }

    let rest = Rest::builder()
        .base_url("http://localhost/")
        .request_factory(Capture {
            inner: Arc::clone(&factory),
            seen: Arc::clone(&seen),
        })
        .build()
        .unwrap();

    rest.get("/users/{id}")
        .path_var("id", 17)
        .query("full", "true")
        .dispatch(riptide::status_code(), [on(200u16).call(Route::pass())])
        .await
        .unwrap();

    assert_eq!(
        seen.lock().unwrap().as_deref(),
        Some("http://localhost/users/17?full=true")
    );
}
