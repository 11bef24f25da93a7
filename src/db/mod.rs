pub mod postgres_service;
pub mod pull_requests;
pub mod reviewers;
pub mod stats;
pub mod teams;
pub mod users;
