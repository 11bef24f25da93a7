use chrono::{DateTime, Utc};
use entity::pull_request::PrStatus;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrCreate {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrMerge {
    pub pull_request_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPrReassign {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub assigned_reviewers: Vec<String>,
}

impl PullRequestDto {
    pub fn from_model(m: entity::pull_request::Model, reviewers: Vec<String>) -> Self {
        PullRequestDto {
            pull_request_id: m.pull_request_id,
            pull_request_name: m.pull_request_name,
            author_id: m.author_id,
            status: m.status,
            created_at: m.created_at,
            merged_at: m.merged_at,
            assigned_reviewers: reviewers,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PrRes {
    pub pr: PullRequestDto,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PrReassignRes {
    pub pr: PullRequestDto,
    pub replaced_by: String,
}
