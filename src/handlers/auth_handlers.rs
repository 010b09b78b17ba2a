use crate::auth::{hash_password, issue_token, verify_password};
use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{LoginPayload, NewUser, RegisterPayload, User};
use crate::schema::users;
use actix_web::{post, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::json;
use uuid::Uuid;

#[post("/register")]
pub async fn register_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<RegisterPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::Validation(
            "All fields are required".to_string(),
        ));
    }

    let mut conn = pool.get().await?;

    let existing = users::table
        .filter(users::email.eq(&payload.email))
        .select(users::id)
        .first::<String>(&mut conn)
        .await
        .optional()?;

    if existing.is_some() {
        return Err(ServiceError::Validation(
            "Email already registered".to_string(),
        ));
    }

    let user_id = format!("user_{}", Uuid::new_v4().simple());

    let new_user = NewUser {
        id: user_id.clone(),
        name: payload.name.clone(),
        email: payload.email.clone(),
        password: hash_password(&payload.password)?,
        avatar_url: None,
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .execute(&mut conn)
        .await?;

    log::info!("Registered new user {}", user_id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "id": user_id,
            "name": payload.name,
            "email": payload.email,
            "avatar_url": null
        },
        "token": issue_token(&user_id)
    })))
}

#[post("/login")]
pub async fn login_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let mut conn = pool.get().await?;

    let user_option = users::table
        .filter(users::email.eq(&payload.email))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
        .optional()?;

    let user = match user_option {
        Some(user) => user,
        None => return Err(ServiceError::Validation("Email not found".to_string())),
    };

    if !verify_password(&payload.password, &user.password)? {
        return Err(ServiceError::Validation("Invalid password".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "avatar_url": user.avatar_url
        },
        "token": issue_token(&user.id)
    })))
}
