use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        comment::{
            model::{CommentResponse, CreateCommentModel},
            repository_pg::CommentRepositoryPg,
            schema::CommentEntity,
            service::CommentService,
        },
        post::repository_pg::PostRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type CommentSvc = CommentService<CommentRepositoryPg, PostRepositoryPg>;

#[post("/posts/{post_id}/comments")]
pub async fn create_comment(
    comment_service: web::Data<CommentSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<CreateCommentModel>,
    req: HttpRequest,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let comment = comment_service.create(user_id, *post_id, body.0).await?;
    Ok(success::Success::created(comment, format!("/api/posts/{}/comments", post_id))
        .message("Comment created successfully"))
}

#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    comment_service: web::Data<CommentSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<CommentResponse>>, error::Error> {
    let comments = comment_service.list(*post_id).await?;
    Ok(success::Success::ok(comments))
}

#[delete("/{comment_id}")]
pub async fn delete_comment(
    comment_service: web::Data<CommentSvc>,
    comment_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    comment_service.delete(user_id, *comment_id).await?;
    Ok(success::Success::no_content())
}
