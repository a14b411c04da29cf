use crate::modules::like::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(like_post).service(unlike_post);
}
