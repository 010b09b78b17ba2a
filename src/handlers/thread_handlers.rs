use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{
    CreateThreadPayload, IdPayload, NewThread, NewThreadMember, PublicUser, Thread,
    ThreadApiResponse, ThreadMember, ThreadMemberView, UpdateThreadChangeset, UpdateThreadPayload,
};
use crate::schema::{thread_members, threads, users};
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct ThreadQueryParams {
    pub id: Option<String>,
}

#[get("")]
pub async fn get_threads_handler(
    pool: web::Data<DbPool>,
    query: web::Query<ThreadQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(thread_id) = &query.id {
        let thread_option = threads::table
            .filter(threads::id.eq(thread_id))
            .select(Thread::as_select())
            .first::<Thread>(&mut conn)
            .await
            .optional()?;

        match thread_option {
            Some(thread) => {
                // Inner join: a member row without a matching user is dropped.
                let member_rows = thread_members::table
                    .inner_join(users::table.on(users::id.eq(thread_members::user_id)))
                    .filter(thread_members::thread_id.eq(&thread.id))
                    .select((ThreadMember::as_select(), PublicUser::as_select()))
                    .load::<(ThreadMember, PublicUser)>(&mut conn)
                    .await?;

                let mut response = ThreadApiResponse::from(thread);
                response.members = member_rows
                    .into_iter()
                    .map(|(member, user)| ThreadMemberView::from_join(member, user))
                    .collect();

                Ok(HttpResponse::Ok().json(response))
            }
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else {
        // List endpoint stays flat: no member fan-out per thread.
        let thread_list = threads::table
            .select(Thread::as_select())
            .load::<Thread>(&mut conn)
            .await?;

        Ok(HttpResponse::Ok().json(thread_list))
    }
}

#[post("")]
pub async fn create_thread_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateThreadPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_thread = NewThread {
        id: payload.id.clone(),
        name: payload.name,
        kind: payload.kind,
        parent_thread_id: payload.parent_thread_id,
        project_id: payload.project_id,
        description: payload.description,
        created_at: payload.created_at,
        updated_at: payload.updated_at,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(threads::table)
        .values(&new_thread)
        .execute(&mut conn)
        .await?;

    for member in payload.members {
        let new_member = NewThreadMember {
            thread_id: payload.id.clone(),
            user_id: member.user.id,
            role: member.role,
            custom_role: member.custom_role,
            status: member.status.unwrap_or_else(|| "offline".to_string()),
            last_active: member.last_active,
            role_color: member.role_color,
        };
        diesel::insert_into(thread_members::table)
            .values(&new_member)
            .execute(&mut conn)
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

// Updates the thread row only; members are managed through /thread-members.
#[put("")]
pub async fn update_thread_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateThreadPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let thread_changes = UpdateThreadChangeset {
        name: payload.name,
        kind: payload.kind,
        parent_thread_id: payload.parent_thread_id,
        project_id: payload.project_id,
        description: payload.description,
        updated_at: payload.updated_at,
    };

    let mut conn = pool.get().await?;

    diesel::update(threads::table.filter(threads::id.eq(&payload.id)))
        .set(&thread_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_thread_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let thread_id = &payload.id;
    let mut conn = pool.get().await?;

    diesel::delete(thread_members::table.filter(thread_members::thread_id.eq(thread_id)))
        .execute(&mut conn)
        .await?;

    diesel::delete(threads::table.filter(threads::id.eq(thread_id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
