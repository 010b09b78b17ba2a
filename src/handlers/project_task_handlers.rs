use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{
    CreateProjectTaskPayload, IdPayload, NewProjectTask, NewProjectTaskAssignee, ProjectTask,
    ProjectTaskApiResponse, UpdateProjectTaskChangeset, UpdateProjectTaskPayload,
};
use crate::schema::{project_task_assignees, project_tasks};
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct ProjectTaskQueryParams {
    pub id: Option<String>,
    pub project_id: Option<String>,
}

async fn load_task_view(
    conn: &mut AsyncPgConnection,
    task: ProjectTask,
) -> Result<ProjectTaskApiResponse, ServiceError> {
    let assignee_ids = project_task_assignees::table
        .filter(project_task_assignees::task_id.eq(&task.id))
        .select(project_task_assignees::user_id)
        .load::<String>(conn)
        .await?;

    let mut response = ProjectTaskApiResponse::from(task);
    response.assignee_ids = assignee_ids;
    Ok(response)
}

#[get("")]
pub async fn get_project_tasks_handler(
    pool: web::Data<DbPool>,
    query: web::Query<ProjectTaskQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(task_id) = &query.id {
        let task_option = project_tasks::table
            .filter(project_tasks::id.eq(task_id))
            .select(ProjectTask::as_select())
            .first::<ProjectTask>(&mut conn)
            .await
            .optional()?;

        match task_option {
            Some(task) => {
                let response = load_task_view(&mut conn, task).await?;
                Ok(HttpResponse::Ok().json(response))
            }
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else {
        let task_list = if let Some(project_id) = &query.project_id {
            project_tasks::table
                .filter(project_tasks::project_id.eq(project_id))
                .select(ProjectTask::as_select())
                .load::<ProjectTask>(&mut conn)
                .await?
        } else {
            project_tasks::table
                .select(ProjectTask::as_select())
                .load::<ProjectTask>(&mut conn)
                .await?
        };

        let mut responses = Vec::with_capacity(task_list.len());
        for task in task_list {
            responses.push(load_task_view(&mut conn, task).await?);
        }

        Ok(HttpResponse::Ok().json(responses))
    }
}

#[post("")]
pub async fn create_project_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateProjectTaskPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_task = NewProjectTask {
        id: payload.id.clone(),
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        project_id: payload.project_id,
        is_completed: payload.is_completed.unwrap_or(false),
        assigner_id: payload.assigner_id,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(project_tasks::table)
        .values(&new_task)
        .execute(&mut conn)
        .await?;

    for user_id in payload.assignee_ids {
        let new_assignee = NewProjectTaskAssignee {
            task_id: payload.id.clone(),
            user_id,
        };
        diesel::insert_into(project_task_assignees::table)
            .values(&new_assignee)
            .execute(&mut conn)
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[put("")]
pub async fn update_project_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateProjectTaskPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let task_changes = UpdateProjectTaskChangeset {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        project_id: payload.project_id,
        is_completed: payload.is_completed.unwrap_or(false),
        assigner_id: payload.assigner_id,
    };

    let mut conn = pool.get().await?;

    diesel::update(project_tasks::table.filter(project_tasks::id.eq(&payload.id)))
        .set(&task_changes)
        .execute(&mut conn)
        .await?;

    // The assignee set is replaced wholesale: remove all, then re-insert the
    // payload's set. Not transactional.
    diesel::delete(
        project_task_assignees::table.filter(project_task_assignees::task_id.eq(&payload.id)),
    )
    .execute(&mut conn)
    .await?;

    for user_id in payload.assignee_ids {
        let new_assignee = NewProjectTaskAssignee {
            task_id: payload.id.clone(),
            user_id,
        };
        diesel::insert_into(project_task_assignees::table)
            .values(&new_assignee)
            .execute(&mut conn)
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_project_task_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let task_id = &payload.id;
    let mut conn = pool.get().await?;

    diesel::delete(
        project_task_assignees::table.filter(project_task_assignees::task_id.eq(task_id)),
    )
    .execute(&mut conn)
    .await?;

    diesel::delete(project_tasks::table.filter(project_tasks::id.eq(task_id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
