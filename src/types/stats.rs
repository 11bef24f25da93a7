use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct StatsQuery {
    #[serde(default)]
    pub by: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct UserAssignStat {
    pub user_id: String,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct PrAssignStat {
    pub pull_request_id: String,
    pub count: i64,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum StatsRes {
    ByUsers { by_users: Vec<UserAssignStat> },
    ByPrs { by_prs: Vec<PrAssignStat> },
}
