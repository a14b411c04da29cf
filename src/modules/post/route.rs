use crate::modules::post::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(list_user_posts)
        .service(scope("/posts").service(create_post).service(get_post).service(delete_post));
}
