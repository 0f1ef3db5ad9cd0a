//! Walkthrough of the binding and resolution surface, one stop per
//! tutorial handler: manual parameter reading, schema-driven binding,
//! defaults, the raw multi-map, typed struct binding, JSON bodies, and
//! the three view-producing variants.
//!
//! Run with: `cargo run --example tutorial`

use bytes::Bytes;
use http::{Method, Response, StatusCode, Uri};
use ligature::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct HelloData {
    username: String,
    age: i64,
}

fn hello_schema() -> BindingSchema {
    BindingSchema::builder()
        .required("username", FieldType::Str)
        .required("age", FieldType::Int)
        .build()
}

fn get(uri: &'static str) -> BindingContext {
    BindingContextBuilder::new()
        .method(Method::GET)
        .uri(Uri::from_static(uri))
        .build()
}

fn post_json(uri: &'static str, body: &'static str) -> BindingContext {
    BindingContextBuilder::new()
        .method(Method::POST)
        .uri(Uri::from_static(uri))
        .header("content-type", "application/json")
        .body(body.as_bytes())
        .build()
}

/// Pre-binding style: read raw values and parse by hand.
fn request_param_v1(ctx: &BindingContext) -> BindResult<()> {
    let raw = RawParams::parse(ctx.query_string().unwrap_or(""))?;
    let username = raw
        .first("username")
        .ok_or_else(|| BindError::missing(ValueSource::Query, "username"))?;
    let age: i64 = raw
        .first("age")
        .ok_or_else(|| BindError::missing(ValueSource::Query, "age"))?
        .parse()
        .map_err(|_| {
            BindError::coercion(
                ValueSource::Query,
                "age",
                FieldType::Int,
                raw.first("age").unwrap_or(""),
            )
        })?;

    tracing::info!(username, age, "request-param-v1");
    Ok(())
}

/// Schema-driven binding: the rule is a value, the record comes out typed.
fn request_param_bound(ctx: &BindingContext) -> BindResult<RequestRecord> {
    let record = bind_query(ctx, &hello_schema())?;
    tracing::info!(
        username = record.get_str("username"),
        age = record.get_int("age"),
        "request-param-bound"
    );
    Ok(record)
}

/// Absent parameters fall back to their declared defaults.
fn request_param_default(ctx: &BindingContext) -> BindResult<RequestRecord> {
    let schema = BindingSchema::builder()
        .with_default("username", FieldType::Str, "guest")
        .with_default("age", FieldType::Int, "-1")
        .build();
    let record = bind_query(ctx, &schema)?;
    tracing::info!(
        username = record.get_str("username"),
        age = record.get_int("age"),
        "request-param-default"
    );
    Ok(record)
}

/// Raw pass-through mode: every value under every key, uncoerced.
fn request_param_map(ctx: &BindingContext) -> BindResult<()> {
    let raw = RawParams::parse(ctx.query_string().unwrap_or(""))?;
    tracing::info!(
        username = ?raw.get_all("username"),
        age = ?raw.get_all("age"),
        "request-param-map"
    );
    Ok(())
}

/// Typed struct binding from query parameters.
fn model_attribute(ctx: &BindingContext) -> BindResult<()> {
    let Query(data) = Query::<HelloData>::from_request(ctx)?;
    tracing::info!(username = %data.username, age = data.age, "model-attribute");
    tracing::info!(?data, "model-attribute record");
    Ok(())
}

/// Pre-binding style for bodies: read the text, parse by hand.
fn request_body_json_v1(ctx: &BindingContext) -> BindResult<()> {
    let BodyString(message_body) = BodyString::from_request(ctx)?;
    tracing::info!(%message_body, "request-body-json-v1");

    let record = decode_json(message_body.as_bytes(), &hello_schema())?;
    tracing::info!(
        username = record.get_str("username"),
        age = record.get_int("age"),
        "request-body-json-v1 decoded"
    );
    Ok(())
}

/// Body-producing echo: the bound record goes straight back out as JSON.
fn request_body_json_echo(ctx: &BindingContext) -> BindResult<Response<Bytes>> {
    let record = decode_json(ctx.body(), &hello_schema())?;
    tracing::info!(
        username = record.get_str("username"),
        age = record.get_int("age"),
        "request-body-json-echo"
    );

    let resolved = resolve(
        HandlerIntent::BodyProducing,
        HandlerOutput::Record(record),
        Attributes::new(),
        ctx.path(),
    )?;
    resolved
        .into_response(&NullRenderer)
        .map_err(|e| BindError::parse(e.to_string()))
}

/// Toy renderer standing in for the external templating collaborator.
struct NullRenderer;

impl ViewRenderer for NullRenderer {
    fn render(&self, view: &ViewReference) -> Result<Response<Bytes>, RenderError> {
        let attrs = serde_json::to_string(view.attributes())
            .map_err(|e| RenderError::new(view.name(), e.to_string()))?;
        Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Bytes::from(format!("<{}> model={}", view.name(), attrs)))
            .expect("failed to build response"))
    }
}

/// View-producing: a prebuilt view-plus-attributes bundle.
fn response_view_v1() -> BindResult<ResponseValue> {
    let mav = ViewReference::new("response/hello").with_attribute("data", "hello!");
    resolve(
        HandlerIntent::ViewProducing,
        HandlerOutput::View(mav),
        Attributes::new(),
        "/response-view-v1",
    )
}

/// View-producing: return the logical view name, attributes ride along.
fn response_view_v2() -> BindResult<ResponseValue> {
    let mut model = Attributes::new();
    model.add("data", "hello!");
    resolve(
        HandlerIntent::ViewProducing,
        HandlerOutput::Text("response/hello".into()),
        model,
        "/response-view-v2",
    )
}

/// View-producing with no return value: the request path names the view.
fn response_view_v3(ctx: &BindingContext) -> BindResult<ResponseValue> {
    let mut model = Attributes::new();
    model.add("data", "hello!");
    resolve(HandlerIntent::ViewProducing, HandlerOutput::Empty, model, ctx.path())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params = get("/request-param-v1?username=amy&age=20");
    request_param_v1(&params)?;
    request_param_bound(&params)?;
    request_param_default(&get("/request-param-default"))?;
    request_param_map(&get("/request-param-map?username=amy&age=20&age=21"))?;
    model_attribute(&get("/model-attribute-v1?username=amy&age=20"))?;

    request_body_json_v1(&post_json(
        "/request-body-json-v1",
        r#"{"username":"amy","age":20}"#,
    ))?;

    let echoed = request_body_json_echo(&post_json(
        "/request-body-json-v4",
        r#"{"username":"amy","age":20}"#,
    ))?;
    tracing::info!(body = %String::from_utf8_lossy(echoed.body()), "echoed");

    let views = [
        response_view_v1()?,
        response_view_v2()?,
        response_view_v3(&get("/response/hello"))?,
    ];
    for resolved in views {
        let response = resolved.into_response(&NullRenderer)?;
        tracing::info!(body = %String::from_utf8_lossy(response.body()), "rendered");
    }

    // Binding failures surface as client-facing envelopes.
    let err = request_param_bound(&get("/request-param-v2?username=amy")).unwrap_err();
    let response = error_response(&err);
    tracing::warn!(
        status = %response.status(),
        body = %String::from_utf8_lossy(response.body()),
        "binding failed"
    );

    Ok(())
}
