use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{CreateMentionPayload, Mention, NewMention, UpdateMentionChangeset, UpdateMentionPayload};
use crate::schema::mentions;
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct MentionQueryParams {
    pub message_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MentionIdPayload {
    pub id: i32,
}

#[get("")]
pub async fn get_mentions_handler(
    pool: web::Data<DbPool>,
    query: web::Query<MentionQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    let mention_list = if let Some(message_id) = &query.message_id {
        mentions::table
            .filter(mentions::message_id.eq(message_id))
            .select(Mention::as_select())
            .load::<Mention>(&mut conn)
            .await?
    } else {
        mentions::table
            .select(Mention::as_select())
            .load::<Mention>(&mut conn)
            .await?
    };

    Ok(HttpResponse::Ok().json(mention_list))
}

#[post("")]
pub async fn create_mention_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateMentionPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_mention = NewMention {
        message_id: payload.message_id,
        mention_text: payload.mention_text,
        user_id: payload.user_id,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(mentions::table)
        .values(&new_mention)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[put("")]
pub async fn update_mention_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateMentionPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let mention_changes = UpdateMentionChangeset {
        message_id: payload.message_id,
        mention_text: payload.mention_text,
        user_id: payload.user_id,
    };

    let mut conn = pool.get().await?;

    diesel::update(mentions::table.filter(mentions::id.eq(payload.id)))
        .set(&mention_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_mention_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<MentionIdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    diesel::delete(mentions::table.filter(mentions::id.eq(payload.id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
