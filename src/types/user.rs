use crate::types::pull_request::PullRequestShort;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct RSetIsActive {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserGetQuery {
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

impl From<entity::user::Model> for UserDto {
    fn from(m: entity::user::Model) -> Self {
        UserDto {
            user_id: m.user_id,
            username: m.username,
            team_name: m.team_name,
            is_active: m.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserRes {
    pub user: UserDto,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewedPrsRes {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}
