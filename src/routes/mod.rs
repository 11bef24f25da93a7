use actix_web::web;

pub mod health;
pub mod pull_request;
pub mod stats;
pub mod team;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::healthz);
    cfg.service(
        web::scope("/team")
            .service(team::add::add_team)
            .service(team::get::get_team)
            .service(team::deactivate::deactivate_members),
    );
    cfg.service(
        web::scope("/users")
            .service(user::set_active::set_is_active)
            .service(user::reviews::get_review),
    );
    cfg.service(
        web::scope("/pullRequest")
            .service(pull_request::create::create_pull_request)
            .service(pull_request::merge::merge_pull_request)
            .service(pull_request::reassign::reassign_reviewer),
    );
    cfg.service(web::scope("/stats").service(stats::get_stats));
}
