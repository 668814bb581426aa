//! Post handlers.

use std::collections::HashMap;

use actix_web::{Either, HttpResponse, web};
use postbox_core::domain::Post;
use postbox_shared::ApiResponse;
use postbox_shared::dto::PostResponse;
use serde_json::{Map, Value};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const WORKING_MESSAGE: &str = "Post API Working";
const CREATED_MESSAGE: &str = "Post Created Successfully";

/// A post submission body, either JSON or an urlencoded form.
type Submission = Either<web::Json<Value>, web::Form<HashMap<String, String>>>;

/// Flattens a submission into the raw field mapping the validator reads.
///
/// Form values arrive as strings. Query-string fields fill in keys the body
/// does not set.
fn submitted_fields(body: Submission, query: HashMap<String, String>) -> Map<String, Value> {
    let mut fields = match body {
        Either::Left(json) => match json.into_inner() {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        Either::Right(form) => form
            .into_inner()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    };

    for (key, value) in query {
        fields.entry(key).or_insert(Value::String(value));
    }
    fields
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        price: post.price,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/posts - reports that the post resource is up.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message(WORKING_MESSAGE))
}

/// POST /api/posts
///
/// Accepts JSON or `application/x-www-form-urlencoded` bodies. A JSON body
/// that is not an object contributes no fields.
pub async fn store(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
    body: Submission,
) -> AppResult<HttpResponse> {
    let fields = submitted_fields(body, query.into_inner());

    let post = state.posts.create_from_fields(&fields).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        CREATED_MESSAGE,
    )))
}
