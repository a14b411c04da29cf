use crate::modules::friendship::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friends")
            .service(list_friends)
            .service(list_outgoing_requests)
            .service(list_incoming_requests)
            .service(send_friend_request)
            .service(accept_friend_request)
            .service(decline_friend_request)
            .service(friendship_status)
            .service(remove_friend),
    );
}
