use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friendship::{
            model::{FriendRequestBody, FriendRequestResponse, FriendResponse, FriendshipStatus},
            repository_pg::FriendshipRepositoryPg,
            schema::FriendshipEntity,
            service::FriendshipService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type FriendshipSvc = FriendshipService<FriendshipRepositoryPg, UserRepositoryPg>;

#[post("/requests")]
pub async fn send_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    body: ValidatedJson<FriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipEntity>, error::Error> {
    let requester_id = get_claims(&req)?.sub;
    let request = friendship_service.send_request(requester_id, body.0.requested_id).await?;

    Ok(success::Success::created(request, "/api/friends/requests/outgoing")
        .message("Friend request sent successfully"))
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friend = friendship_service.accept_request(user_id, *request_id).await?;

    Ok(success::Success::ok(friend).message("Friend request accepted successfully"))
}

#[post("/requests/{request_id}/decline")]
pub async fn decline_friend_request(
    friendship_service: web::Data<FriendshipSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friendship_service.decline_request(user_id, *request_id).await?;
    Ok(success::Success::no_content())
}

#[get("")]
pub async fn list_friends(
    friendship_service: web::Data<FriendshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friendship_service.friends(user_id).await?;

    Ok(success::Success::ok(friends).message("Friends retrieved successfully"))
}

#[get("/requests")]
pub async fn list_incoming_requests(
    friendship_service: web::Data<FriendshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friendship_service.incoming_requests(user_id).await?;

    Ok(success::Success::ok(requests).message("Friend requests retrieved successfully"))
}

#[get("/requests/outgoing")]
pub async fn list_outgoing_requests(
    friendship_service: web::Data<FriendshipSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friendship_service.outgoing_requests(user_id).await?;

    Ok(success::Success::ok(requests).message("Sent friend requests retrieved successfully"))
}

#[get("/{user_id}/status")]
pub async fn friendship_status(
    friendship_service: web::Data<FriendshipSvc>,
    other_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendshipStatus>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let status = friendship_service.status(user_id, *other_id).await?;

    Ok(success::Success::ok(status))
}

#[delete("/{user_id}")]
pub async fn remove_friend(
    friendship_service: web::Data<FriendshipSvc>,
    friend_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friendship_service.unfriend(user_id, *friend_id).await?;
    Ok(success::Success::no_content())
}
