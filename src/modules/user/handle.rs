use actix_web::{
    HttpRequest,
    cookie::{Cookie, time},
    delete, get, patch, post, web,
};
use uuid::Uuid;

use crate::modules::user::{
    model::{self, SignUpResponse},
    repository_pg::UserRepositoryPg,
    service::UserService,
};
use crate::{
    api::{error, success},
    configs::RedisCache,
    middlewares::get_claims,
    utils::ValidatedJson,
};

pub type UserSvc = UserService<UserRepositoryPg, RedisCache>;

fn refresh_cookie(value: String, max_age: i64) -> Cookie<'static> {
    Cookie::build("refresh_token", value)
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(max_age))
        .finish()
}

#[get("/profile")]
pub async fn get_profile(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.get_by_id(id).await?;
    Ok(success::Success::ok(user).message("Profile retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(user).message("User retrieved successfully"))
}

#[patch("/{id:[0-9a-fA-F-]{36}}")]
pub async fn update_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<Uuid>,
    user_data: ValidatedJson<model::UpdateUserModel>,
    req: HttpRequest,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    let user = user_service.update(actor_id, user_id.into_inner(), user_data.0).await?;
    Ok(success::Success::ok(user).message("User updated successfully"))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let actor_id = get_claims(&req)?.sub;
    user_service.delete(actor_id, user_id.into_inner()).await?;
    Ok(success::Success::no_content())
}

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<SignUpResponse>, error::Error> {
    let user_id = user_service.sign_up(user_data.0).await?;
    Ok(success::Success::created(SignUpResponse { id: user_id }, format!("/api/users/{user_id}"))
        .message("Signup successful"))
}

#[post("/signin")]
pub async fn sign_in(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<model::SignInResponse>, error::Error> {
    let tokens = user_service.sign_in(user_data.0).await?;
    let response = model::SignInResponse { access_token: tokens.access_token };
    let cookie = refresh_cookie(tokens.refresh_token, tokens.refresh_max_age as i64);

    Ok(success::Success::ok(response).message("Signin successful").cookie(cookie))
}

#[post("/signout")]
pub async fn sign_out(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let refresh_token = req.cookie("refresh_token").map(|c| c.value().to_string());
    user_service.sign_out(refresh_token).await?;
    let mut cookie = refresh_cookie(String::new(), 0);
    cookie.set_expires(time::OffsetDateTime::UNIX_EPOCH);

    Ok(success::Success::no_content().cookie(cookie))
}

#[post("/refresh")]
pub async fn refresh(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<model::SignInResponse>, error::Error> {
    let refresh_token = req.cookie("refresh_token").map(|c| c.value().to_string());
    let tokens = user_service.refresh(refresh_token).await?;
    let response = model::SignInResponse { access_token: tokens.access_token };
    let cookie = refresh_cookie(tokens.refresh_token, tokens.refresh_max_age as i64);

    Ok(success::Success::ok(response).message("Refresh successful").cookie(cookie))
}
