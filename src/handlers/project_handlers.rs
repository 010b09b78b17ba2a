use crate::db::DbPool;
use crate::error_handler::ServiceError;
use crate::models::{
    CreateProjectPayload, IdPayload, NewProject, NewProjectMember, Project, ProjectApiResponse,
    ProjectMember, ProjectMemberUser, ProjectMemberView, PublicUser, UpdateProjectChangeset,
    UpdateProjectPayload,
};
use crate::schema::{project_members, projects, users};
use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct ProjectQueryParams {
    pub id: Option<String>,
}

#[get("")]
pub async fn get_projects_handler(
    pool: web::Data<DbPool>,
    query: web::Query<ProjectQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let mut conn = pool.get().await?;

    if let Some(project_id) = &query.id {
        let project_option = projects::table
            .filter(projects::id.eq(project_id))
            .select(Project::as_select())
            .first::<Project>(&mut conn)
            .await
            .optional()?;

        match project_option {
            Some(project) => {
                let creator = users::table
                    .filter(users::id.eq(&project.creator_id))
                    .select(PublicUser::as_select())
                    .first::<PublicUser>(&mut conn)
                    .await
                    .optional()?;

                let member_rows = project_members::table
                    .inner_join(users::table.on(users::id.eq(project_members::user_id)))
                    .filter(project_members::project_id.eq(&project.id))
                    .select((ProjectMember::as_select(), PublicUser::as_select()))
                    .load::<(ProjectMember, PublicUser)>(&mut conn)
                    .await?;

                let mut response = ProjectApiResponse::from(project);
                response.creator = creator;
                response.members = member_rows
                    .into_iter()
                    .map(|(member, user)| ProjectMemberView {
                        user_id: member.user_id,
                        user: ProjectMemberUser {
                            id: user.id,
                            name: user.name,
                            email: user.email,
                        },
                        role: member.role,
                        joined_at: member.joined_at,
                    })
                    .collect();

                Ok(HttpResponse::Ok().json(response))
            }
            None => Ok(HttpResponse::Ok().json(json!([]))),
        }
    } else {
        let project_list = projects::table
            .select(Project::as_select())
            .load::<Project>(&mut conn)
            .await?;

        Ok(HttpResponse::Ok().json(project_list))
    }
}

#[post("")]
pub async fn create_project_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateProjectPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let new_project = NewProject {
        id: payload.id.clone(),
        name: payload.name,
        description: payload.description,
        creator_id: payload.creator_id,
        task_count: payload.task_count.unwrap_or(0),
        thread_count: payload.thread_count.unwrap_or(0),
        status: payload.status.unwrap_or_else(|| "active".to_string()),
        created_at: payload.created_at,
        updated_at: payload.updated_at,
        thread_id: payload.thread_id,
    };

    let mut conn = pool.get().await?;

    diesel::insert_into(projects::table)
        .values(&new_project)
        .execute(&mut conn)
        .await?;

    for member in payload.members {
        let new_member = NewProjectMember {
            project_id: payload.id.clone(),
            user_id: member.user_id,
            role: member.role,
            joined_at: member.joined_at,
        };
        diesel::insert_into(project_members::table)
            .values(&new_member)
            .execute(&mut conn)
            .await?;
    }

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

// Updates the project row only; the member set is written once at creation.
#[put("")]
pub async fn update_project_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<UpdateProjectPayload>,
) -> Result<HttpResponse, ServiceError> {
    let payload = payload.into_inner();

    let project_changes = UpdateProjectChangeset {
        name: payload.name,
        description: payload.description,
        task_count: payload.task_count.unwrap_or(0),
        thread_count: payload.thread_count.unwrap_or(0),
        status: payload.status.unwrap_or_else(|| "active".to_string()),
        updated_at: payload.updated_at,
        thread_id: payload.thread_id,
    };

    let mut conn = pool.get().await?;

    diesel::update(projects::table.filter(projects::id.eq(&payload.id)))
        .set(&project_changes)
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[delete("")]
pub async fn delete_project_handler(
    pool: web::Data<DbPool>,
    payload: web::Json<IdPayload>,
) -> Result<HttpResponse, ServiceError> {
    let project_id = &payload.id;
    let mut conn = pool.get().await?;

    diesel::delete(project_members::table.filter(project_members::project_id.eq(project_id)))
        .execute(&mut conn)
        .await?;

    diesel::delete(projects::table.filter(projects::id.eq(project_id)))
        .execute(&mut conn)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
