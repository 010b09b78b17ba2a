use crate::auth::hash_password;
use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{CreateUserPayload, IdPayload, NewUser, PublicUser, UpdateUserChangeset, UpdateUserPayload};
use crate::schema::users;
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct UserQueryParams {
    pub id: Option<String>,
}

#[get("")]
pub async fn get_users_handler(
    pool: web::Data<DbPool>,
    query: web::Query<UserQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(user_id) = &query.id {
        let user_option = users::table
            .filter(users::id.eq(user_id))
            .select(PublicUser::as_select())
            .first::<PublicUser>(&mut conn)
            .await
            .optional()?;

        match user_option {
            Some(user) => Ok(HttpResponse::Ok().json(user)),
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else {
        let user_list = users::table
            .select(PublicUser::as_select())
            .load::<PublicUser>(&mut conn)
            .await?;

        Ok(HttpResponse::Ok().json(user_list))
    }
}

#[post("")]
pub async fn create_user_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateUserPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_user = NewUser {
        id: payload.id,
        name: payload.name,
        email: payload.email,
        password: hash_password(&payload.password)?,
        avatar_url: payload.avatar_url,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(users::table)
        .values(&new_user)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

// Overwrites profile fields; the password column is untouched here.
#[put("")]
pub async fn update_user_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateUserPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let user_changes = UpdateUserChangeset {
        name: payload.name,
        email: payload.email,
        avatar_url: payload.avatar_url,
    };

    let mut conn = pool.get().await?;

    diesel::update(users::table.filter(users::id.eq(&payload.id)))
        .set(&user_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_user_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    diesel::delete(users::table.filter(users::id.eq(&payload.id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
