use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{
    CreateMessagePayload, IdPayload, Mention, Message, MessageApiResponse, MessageAttachment,
    NewMention, NewMessage, NewMessageAttachment, PublicUser, UpdateMessageChangeset,
    UpdateMessagePayload,
};
use crate::schema::{mentions, message_attachments, messages, users};
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct MessageQueryParams {
    pub id: Option<String>,
    pub thread_id: Option<String>,
}

// Fan-out for one message: sender, then attachments, then mentions, issued
// sequentially on the request's connection.
async fn load_message_view(
    conn: &mut AsyncPgConnection,
    message: Message,
) -> Result<MessageApiResponse, ServiceError> {
    let sender = users::table
        .filter(users::id.eq(&message.sender_id))
        .select(PublicUser::as_select())
        .first::<PublicUser>(conn)
        .await
        .optional()?;

    let attachments = message_attachments::table
        .filter(message_attachments::message_id.eq(&message.id))
        .select(MessageAttachment::as_select())
        .load::<MessageAttachment>(conn)
        .await?;

    let mention_rows = mentions::table
        .filter(mentions::message_id.eq(&message.id))
        .select(Mention::as_select())
        .load::<Mention>(conn)
        .await?;

    let mut response = MessageApiResponse::from(message);
    response.sender = sender;
    response.attachments = attachments;
    response.mentions = mention_rows;
    Ok(response)
}

#[get("")]
pub async fn get_messages_handler(
    pool: web::Data<DbPool>,
    query: web::Query<MessageQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(message_id) = &query.id {
        let message_option = messages::table
            .filter(messages::id.eq(message_id))
            .select(Message::as_select())
            .first::<Message>(&mut conn)
            .await
            .optional()?;

        match message_option {
            Some(message) => {
                let response = load_message_view(&mut conn, message).await?;
                Ok(HttpResponse::Ok().json(response))
            }
            // Missing row is an empty value, not an error.
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else if let Some(thread_id) = &query.thread_id {
        let message_list = messages::table
            .filter(messages::thread_id.eq(thread_id))
            .order(messages::created_at.asc())
            .select(Message::as_select())
            .load::<Message>(&mut conn)
            .await?;

        let mut responses = Vec::with_capacity(message_list.len());
        for message in message_list {
            responses.push(load_message_view(&mut conn, message).await?);
        }

        Ok(HttpResponse::Ok().json(responses))
    } else {
        Ok(HttpResponse::Ok().json(json!([])))
    }
}

#[post("")]
pub async fn create_message_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateMessagePayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_message = NewMessage {
        id: payload.id.clone(),
        thread_id: payload.thread_id,
        sender_id: payload.sender.id,
        content: payload.content,
        kind: payload.kind,
        created_at: payload.created_at,
        updated_at: payload.updated_at,
        is_edited: payload.is_edited.unwrap_or(false),
        reply_to_message_id: payload.reply_to_message_id,
        is_unread: payload.is_unread.unwrap_or(true),
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(messages::table)
        .values(&new_message)
        .execute(&mut conn)
        .await?;

    // Child inserts are not transactional with the primary row: a failure
    // here leaves the message and any earlier children committed.
    for attachment in payload.attachments {
        let new_attachment = NewMessageAttachment {
            id: attachment.id,
            message_id: payload.id.clone(),
            file_name: attachment.file_name,
            file_size: attachment.file_size,
            file_type: attachment.file_type,
            url: attachment.url,
            thumbnail_url: attachment.thumbnail_url,
            mime_type: attachment.mime_type,
        };
        diesel::insert_into(message_attachments::table)
            .values(&new_attachment)
            .execute(&mut conn)
            .await?;
    }

    for mention in payload.mentions {
        let new_mention = NewMention {
            message_id: payload.id.clone(),
            mention_text: mention.mention_text,
            user_id: mention.user_id,
        };
        diesel::insert_into(mentions::table)
            .values(&new_mention)
            .execute(&mut conn)
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[put("")]
pub async fn update_message_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateMessagePayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let message_changes = UpdateMessageChangeset {
        content: payload.content,
        kind: payload.kind,
        updated_at: payload.updated_at,
        is_edited: payload.is_edited.unwrap_or(false),
        reply_to_message_id: payload.reply_to_message_id,
        is_unread: payload.is_unread.unwrap_or(true),
    };

    let mut conn = pool.get().await?;

    diesel::update(messages::table.filter(messages::id.eq(&payload.id)))
        .set(&message_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_message_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let message_id = &payload.id;
    let mut conn = pool.get().await?;

    // Children first, then the primary row.
    diesel::delete(message_attachments::table.filter(message_attachments::message_id.eq(message_id)))
        .execute(&mut conn)
        .await?;

    diesel::delete(mentions::table.filter(mentions::message_id.eq(message_id)))
        .execute(&mut conn)
        .await?;

    diesel::delete(messages::table.filter(messages::id.eq(message_id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
