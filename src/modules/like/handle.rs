use actix_web::{delete, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        like::{model::LikeSummary, repository_pg::LikeRepositoryPg, service::LikeService},
        post::repository_pg::PostRepositoryPg,
    },
};

pub type LikeSvc = LikeService<LikeRepositoryPg, PostRepositoryPg>;

#[post("/posts/{post_id}/likes")]
pub async fn like_post(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeSummary>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let summary = like_service.like(user_id, *post_id).await?;
    Ok(success::Success::created(summary, format!("/api/posts/{}", post_id)).message("Post liked"))
}

#[delete("/posts/{post_id}/likes")]
pub async fn unlike_post(
    like_service: web::Data<LikeSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeSummary>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let summary = like_service.unlike(user_id, *post_id).await?;
    Ok(success::Success::ok(summary).message("Post unliked"))
}
