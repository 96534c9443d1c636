use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

use crate::m20260110_000001_init::{created_at, game_fk, uuid_pk};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    GameId,
    UserId,
    Username,
    Title,
    Content,
    ImageUrl,
    CreatedAt,
}

/// One table for every thread; `thread` is 'post' or 'team'.
#[derive(Iden)]
enum Comments {
    Table,
    Id,
    GameId,
    Thread,
    ThreadId,
    UserId,
    Username,
    Content,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid_pk(Posts::Id))
                    .col(ColumnDef::new(Posts::GameId).uuid().not_null())
                    .col(ColumnDef::new(Posts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Username).text().not_null())
                    .col(ColumnDef::new(Posts::Title).text().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::ImageUrl).text().null())
                    .col(created_at(Posts::CreatedAt))
                    .foreign_key(&mut game_fk(Posts::Table, Posts::GameId, "fk_posts_game"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(uuid_pk(Comments::Id))
                    .col(ColumnDef::new(Comments::GameId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Thread).text().not_null())
                    .col(ColumnDef::new(Comments::ThreadId).uuid().not_null())
                    .col(ColumnDef::new(Comments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Username).text().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(created_at(Comments::CreatedAt))
                    .foreign_key(&mut game_fk(
                        Comments::Table,
                        Comments::GameId,
                        "fk_comments_game",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_game_created")
                    .table(Posts::Table)
                    .col(Posts::GameId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_thread_created")
                    .table(Comments::Table)
                    .col(Comments::Thread)
                    .col(Comments::ThreadId)
                    .col(Comments::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
