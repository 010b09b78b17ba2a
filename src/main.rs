mod auth;
mod db;
mod error_handler;
mod handlers;
mod models;
pub mod schema;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, HttpServer};
use db::DbPool;
use std::env;

async fn health_check_handler(
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, error_handler::ServiceError> {
    match pool.get().await {
        Ok(_conn) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "message": "Backend is running and DB pool accessible"
        }))),
        Err(e) => {
            log::error!("Failed to get connection from pool: {:?}", e);
            Err(error_handler::ServiceError::Internal(
                "Failed to check DB pool".to_string(),
            ))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    if cfg!(debug_assertions) {
        match dotenvy::dotenv() {
            Ok(path) => log::info!(".env file loaded from path: {}", path.display()),
            Err(e) => log::warn!(
                "Could not load .env file: {}, using environment variables.",
                e
            ),
        }
    }

    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment variables or .env file");

    let pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database connection pool.");

    log::info!("TaskVerse Backend Service starting...");

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid number");

    log::info!("Server will start at http://{}:{}", host, port);

    HttpServer::new(move || {
        // Any origin is accepted; OPTIONS preflights get an empty 200 from
        // the CORS layer.
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_header(header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(pool.clone()))
            .service(web::resource("/health").route(web::get().to(health_check_handler)))
            .service(handlers::auth_handlers::register_handler)
            .service(handlers::auth_handlers::login_handler)
            .service(
                web::scope("/users")
                    .service(handlers::user_handlers::get_users_handler)
                    .service(handlers::user_handlers::create_user_handler)
                    .service(handlers::user_handlers::update_user_handler)
                    .service(handlers::user_handlers::delete_user_handler),
            )
            .service(
                web::scope("/projects")
                    .service(handlers::project_handlers::get_projects_handler)
                    .service(handlers::project_handlers::create_project_handler)
                    .service(handlers::project_handlers::update_project_handler)
                    .service(handlers::project_handlers::delete_project_handler),
            )
            .service(
                web::scope("/project-tasks")
                    .service(handlers::project_task_handlers::get_project_tasks_handler)
                    .service(handlers::project_task_handlers::create_project_task_handler)
                    .service(handlers::project_task_handlers::update_project_task_handler)
                    .service(handlers::project_task_handlers::delete_project_task_handler),
            )
            .service(
                web::scope("/tasks")
                    .service(handlers::task_handlers::get_tasks_handler)
                    .service(handlers::task_handlers::create_task_handler)
                    .service(handlers::task_handlers::update_task_handler)
                    .service(handlers::task_handlers::delete_task_handler),
            )
            .service(
                web::scope("/threads")
                    .service(handlers::thread_handlers::get_threads_handler)
                    .service(handlers::thread_handlers::create_thread_handler)
                    .service(handlers::thread_handlers::update_thread_handler)
                    .service(handlers::thread_handlers::delete_thread_handler),
            )
            .service(
                web::scope("/thread-members")
                    .service(handlers::thread_member_handlers::get_thread_members_handler)
                    .service(handlers::thread_member_handlers::create_thread_member_handler)
                    .service(handlers::thread_member_handlers::update_thread_member_handler)
                    .service(handlers::thread_member_handlers::delete_thread_member_handler),
            )
            .service(
                web::scope("/messages")
                    .service(handlers::message_handlers::get_messages_handler)
                    .service(handlers::message_handlers::create_message_handler)
                    .service(handlers::message_handlers::update_message_handler)
                    .service(handlers::message_handlers::delete_message_handler),
            )
            .service(
                web::scope("/mentions")
                    .service(handlers::mention_handlers::get_mentions_handler)
                    .service(handlers::mention_handlers::create_mention_handler)
                    .service(handlers::mention_handlers::update_mention_handler)
                    .service(handlers::mention_handlers::delete_mention_handler),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
