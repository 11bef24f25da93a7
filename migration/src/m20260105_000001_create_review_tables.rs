use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    TeamName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    UserId,
    Username,
    IsActive,
    TeamName,
}

#[derive(DeriveIden)]
enum PullRequest {
    #[sea_orm(iden = "pull_requests")]
    Table,
    PullRequestId,
    PullRequestName,
    AuthorId,
    Status,
    CreatedAt,
    MergedAt,
}

#[derive(DeriveIden)]
enum PrReviewer {
    #[sea_orm(iden = "pr_reviewers")]
    Table,
    PullRequestId,
    UserId,
    Position,
}

#[derive(DeriveIden)]
enum ReviewAssignment {
    #[sea_orm(iden = "review_assignments")]
    Table,
    Id,
    PullRequestId,
    AssignedUserId,
    Action,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Team::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Team::TeamName)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(Team::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(User::UserId)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(User::Username).string().not_null())
                .col(
                    ColumnDef::new(User::IsActive)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .col(ColumnDef::new(User::TeamName).string().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_team")
                        .from(User::Table, User::TeamName)
                        .to(Team::Table, Team::TeamName)
                        .on_update(ForeignKeyAction::Cascade)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .to_owned(),
        )
        .await?;

        // Candidate pools are always "active members of team X"
        m.create_index(
            Index::create()
                .name("idx_users_team_active")
                .table(User::Table)
                .col(User::TeamName)
                .col(User::IsActive)
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(PullRequest::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(PullRequest::PullRequestId)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(PullRequest::PullRequestName)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(PullRequest::AuthorId).string().not_null())
                .col(
                    ColumnDef::new(PullRequest::Status)
                        .string_len(16)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(PullRequest::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(PullRequest::MergedAt)
                        .timestamp_with_time_zone()
                        .null(),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pull_requests_author")
                        .from(PullRequest::Table, PullRequest::AuthorId)
                        .to(User::Table, User::UserId),
                )
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(PrReviewer::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(PrReviewer::PullRequestId)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(PrReviewer::UserId).string().not_null())
                .col(ColumnDef::new(PrReviewer::Position).integer().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_pr_reviewers")
                        .col(PrReviewer::PullRequestId)
                        .col(PrReviewer::UserId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewers_pr")
                        .from(PrReviewer::Table, PrReviewer::PullRequestId)
                        .to(PullRequest::Table, PullRequest::PullRequestId)
                        .on_update(ForeignKeyAction::Cascade)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pr_reviewers_user")
                        .from(PrReviewer::Table, PrReviewer::UserId)
                        .to(User::Table, User::UserId),
                )
                .to_owned(),
        )
        .await?;

        // Deactivation cascade scans by reviewer id
        m.create_index(
            Index::create()
                .name("idx_pr_reviewers_user")
                .table(PrReviewer::Table)
                .col(PrReviewer::UserId)
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(ReviewAssignment::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ReviewAssignment::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(ReviewAssignment::PullRequestId)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ReviewAssignment::AssignedUserId)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ReviewAssignment::Action)
                        .string_len(16)
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ReviewAssignment::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_review_assignments_pr")
                        .from(ReviewAssignment::Table, ReviewAssignment::PullRequestId)
                        .to(PullRequest::Table, PullRequest::PullRequestId)
                        .on_update(ForeignKeyAction::Cascade)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(ReviewAssignment::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(PrReviewer::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(PullRequest::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        m.drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;
        Ok(())
    }
}
