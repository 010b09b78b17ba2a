use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{
    CreateThreadMemberPayload, NewThreadMember, PublicUser, ThreadMember, ThreadMemberKeyPayload,
    ThreadMemberView, UpdateThreadMemberChangeset, UpdateThreadMemberPayload,
};
use crate::schema::{thread_members, users};
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct ThreadMemberQueryParams {
    pub thread_id: Option<String>,
}

#[get("")]
pub async fn get_thread_members_handler(
    pool: web::Data<DbPool>,
    query: web::Query<ThreadMemberQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let thread_id = match &query.thread_id {
        Some(thread_id) => thread_id,
        None => return Ok(HttpResponse::Ok().json(json!([]))),
    };

    let mut conn = pool.get().await?;

    let member_rows = thread_members::table
        .inner_join(users::table.on(users::id.eq(thread_members::user_id)))
        .filter(thread_members::thread_id.eq(thread_id))
        .select((ThreadMember::as_select(), PublicUser::as_select()))
        .load::<(ThreadMember, PublicUser)>(&mut conn)
        .await?;

    let members: Vec<ThreadMemberView> = member_rows
        .into_iter()
        .map(|(member, user)| ThreadMemberView::from_join(member, user))
        .collect();

    Ok(HttpResponse::Ok().json(members))
}

#[post("")]
pub async fn create_thread_member_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateThreadMemberPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_member = NewThreadMember {
        thread_id: payload.thread_id,
        user_id: payload.user_id,
        role: payload.role.unwrap_or_else(|| "member".to_string()),
        custom_role: payload.custom_role,
        status: payload.status.unwrap_or_else(|| "offline".to_string()),
        last_active: payload.last_active,
        role_color: payload.role_color,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(thread_members::table)
        .values(&new_member)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[put("")]
pub async fn update_thread_member_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateThreadMemberPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let member_changes = UpdateThreadMemberChangeset {
        role: payload.role.unwrap_or_else(|| "member".to_string()),
        custom_role: payload.custom_role,
        status: payload.status.unwrap_or_else(|| "offline".to_string()),
        last_active: payload.last_active,
        role_color: payload.role_color,
    };

    let mut conn = pool.get().await?;

    // Membership is keyed on (thread_id, user_id).
    diesel::update(
        thread_members::table
            .filter(thread_members::thread_id.eq(&payload.thread_id))
            .filter(thread_members::user_id.eq(&payload.user_id)),
    )
    .set(&member_changes)
    .execute(&mut conn)
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_thread_member_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<ThreadMemberKeyPayload>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    diesel::delete(
        thread_members::table
            .filter(thread_members::thread_id.eq(&payload.thread_id))
            .filter(thread_members::user_id.eq(&payload.user_id)),
    )
    .execute(&mut conn)
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
