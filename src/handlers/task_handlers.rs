use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{CreateTaskPayload, IdPayload, NewTask, Task, UpdateTaskChangeset, UpdateTaskPayload};
use crate::schema::tasks;
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct TaskQueryParams {
    pub id: Option<String>,
}

#[get("")]
pub async fn get_tasks_handler(
    pool: web::Data<DbPool>,
    query: web::Query<TaskQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(task_id) = &query.id {
        let task_option = tasks::table
            .filter(tasks::id.eq(task_id))
            .select(Task::as_select())
            .first::<Task>(&mut conn)
            .await
            .optional()?;

        match task_option {
            Some(task) => Ok(HttpResponse::Ok().json(task)),
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else {
        let task_list = tasks::table
            .select(Task::as_select())
            .load::<Task>(&mut conn)
            .await?;

        Ok(HttpResponse::Ok().json(task_list))
    }
}

#[post("")]
pub async fn create_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateTaskPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_task = NewTask {
        id: payload.id,
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        due_time: payload.due_time,
        is_completed: payload.is_completed.unwrap_or(false),
        kind: payload.kind,
        priority: payload.priority,
        streak: payload.streak.unwrap_or(0),
        last_completed: payload.last_completed,
        project_id: payload.project_id,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(tasks::table)
        .values(&new_task)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[put("")]
pub async fn update_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateTaskPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    // Full overwrite: an omitted priority resets the column to null, an
    // omitted streak resets it to zero.
    let task_changes = UpdateTaskChangeset {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        due_time: payload.due_time,
        is_completed: payload.is_completed.unwrap_or(false),
        kind: payload.kind,
        priority: payload.priority,
        streak: payload.streak.unwrap_or(0),
        last_completed: payload.last_completed,
        project_id: payload.project_id,
    };

    let mut conn = pool.get().await?;

    diesel::update(tasks::table.filter(tasks::id.eq(&payload.id)))
        .set(&task_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    diesel::delete(tasks::table.filter(tasks::id.eq(&payload.id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
