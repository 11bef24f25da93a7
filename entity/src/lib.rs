pub mod pr_reviewer;
pub mod pull_request;
pub mod review_assignment;
pub mod team;
pub mod user;

/*
 Teams own users by affiliation, not containment: a user row carries a
 nullable team_name and can be adopted into a new team by a later upsert
 (last writer wins). Pull requests reference an author and carry an ordered
 reviewer list in pr_reviewers; every assignment decision is mirrored into
 the append-only review_assignments log, which only the stats queries read.
 */
