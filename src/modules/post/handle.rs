use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::post::{
        model::{CreatePostModel, PostDetail, PostPage, PostQuery},
        repository_pg::PostRepositoryPg,
        schema::PostEntity,
        service::PostService,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type PostSvc = PostService<PostRepositoryPg>;

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    body: ValidatedJson<CreatePostModel>,
    req: HttpRequest,
) -> Result<success::Success<PostEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let post = post_service.create(user_id, body.0).await?;
    let location = format!("/api/posts/{}", post.id);
    Ok(success::Success::created(post, location).message("Post created successfully"))
}

#[get("/{post_id}")]
pub async fn get_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<PostDetail>, error::Error> {
    let post = post_service.get(*post_id).await?;
    Ok(success::Success::ok(post))
}

#[delete("/{post_id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.delete(user_id, *post_id).await?;
    Ok(success::Success::no_content())
}

#[get("/users/{user_id}/posts")]
pub async fn list_user_posts(
    post_service: web::Data<PostSvc>,
    user_id: web::Path<Uuid>,
    query: ValidatedQuery<PostQuery>,
) -> Result<success::Success<PostPage>, error::Error> {
    let page = post_service.list_by_user(*user_id, query.0).await?;
    Ok(success::Success::ok(page).message("Posts retrieved successfully"))
}
