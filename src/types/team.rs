use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamAdd {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<RTeamMember>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamDeactivate {
    pub team_name: String,
    #[serde(default)]
    pub user_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamGetQuery {
    pub team_name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamWithMembers {
    pub team_name: String,
    pub members: Vec<TeamMemberDto>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamAddRes {
    pub team: TeamWithMembers,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SafeReassignCounts {
    pub reassigned: u32,
    pub removed: u32,
}

/// Result of a deactivation: who was switched off plus how the cascade
/// repaired each affected open PR.
#[derive(Serialize, Deserialize, Debug)]
pub struct DeactivationRes {
    pub team_name: String,
    pub deactivated: Vec<String>,
    pub safe_reassign: SafeReassignCounts,
}
