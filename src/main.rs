use actix_cors::Cors;
use actix_web::{
    self, App, HttpResponse, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{RedisCache, connect_database},
    constants::AuthConfig,
    middlewares::authentication,
    modules::{
        comment::{repository_pg::CommentRepositoryPg, service::CommentService},
        friendship::{repository_pg::FriendshipRepositoryPg, service::FriendshipService},
        like::{repository_pg::LikeRepositoryPg, service::LikeService},
        post::{repository_pg::PostRepositoryPg, service::PostService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(db_pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().body("Server is running"),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().body("Database unavailable")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    LazyLock::force(&ENV);

    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friendship_repo = Arc::new(FriendshipRepositoryPg::new(db_pool.clone()));
    let post_repo = Arc::new(PostRepositoryPg::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepositoryPg::new(db_pool.clone()));
    let like_repo = Arc::new(LikeRepositoryPg::new(db_pool.clone()));

    let auth_config = Arc::new(AuthConfig::from(&*ENV));

    let user_service =
        UserService::with_dependencies(user_repo.clone(), Arc::new(redis_pool), auth_config.clone());
    let friendship_service = FriendshipService::with_dependencies(friendship_repo, user_repo);
    let post_service = PostService::with_dependencies(post_repo.clone());
    let comment_service = CommentService::with_dependencies(comment_repo, post_repo.clone());
    let like_service = LikeService::with_dependencies(like_repo, post_repo);

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .supports_credentials()
            .allow_any_method()
            .allow_any_header();

        // nested resources such as /posts/{id}/comments must be registered
        // ahead of the /posts and /users scopes that would otherwise claim them
        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friendship_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(like_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::from(auth_config.clone()))
            .service(health_check)
            .service(
                web::scope("/api").configure(modules::user::route::public_api_configure).service(
                    web::scope("")
                        .wrap(from_fn(authentication))
                        .configure(modules::comment::route::configure)
                        .configure(modules::like::route::configure)
                        .configure(modules::post::route::configure)
                        .configure(modules::user::route::configure)
                        .configure(modules::friendship::route::configure),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
