use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    Slug,
    IconUrl,
    Status,
    Metadata,
    CreatedAt,
}

#[derive(Iden)]
enum Admins {
    Table,
    UserId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
enum Characters {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Pets {
    Table,
}

/// Columns shared by the character and pet tables.
#[derive(Iden)]
enum UnitCol {
    Id,
    GameId,
    Name,
    ImageUrl,
    Description,
    Role,
    Element,
    Rarity,
    CreatedAt,
}

#[derive(Iden)]
enum Equipment {
    Table,
    Id,
    GameId,
    Name,
    NameEn,
    ImageUrl,
    Description,
    Type,
    Rarity,
    Stats,
    SpecialEffect,
    HowToObtain,
    CreatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    GameId,
    UserId,
    Username,
    Name,
    Mode,
    Formation,
    PetId,
    PetImageUrl,
    CreatedAt,
}

pub(crate) fn uuid_pk<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .uuid()
        .not_null()
        .primary_key()
        .extra("DEFAULT gen_random_uuid()")
        .to_owned()
}

pub(crate) fn created_at<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

pub(crate) fn game_fk<T: IntoTableRef, C: IntoIden>(
    table: T,
    col: C,
    name: &str,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(Games::Table, Games::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

fn unit_table<T: Iden + Copy + 'static>(table: T, fk_name: &str) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(uuid_pk(UnitCol::Id))
        .col(ColumnDef::new(UnitCol::GameId).uuid().not_null())
        .col(ColumnDef::new(UnitCol::Name).text().not_null())
        .col(ColumnDef::new(UnitCol::ImageUrl).text().null())
        .col(ColumnDef::new(UnitCol::Description).text().null())
        .col(ColumnDef::new(UnitCol::Role).text().null())
        .col(ColumnDef::new(UnitCol::Element).text().null())
        .col(ColumnDef::new(UnitCol::Rarity).text().null())
        .col(created_at(UnitCol::CreatedAt))
        .foreign_key(&mut game_fk(table, UnitCol::GameId, fk_name))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(uuid_pk(Games::Id))
                    .col(ColumnDef::new(Games::Name).text().not_null())
                    .col(ColumnDef::new(Games::Slug).text().not_null().unique_key())
                    .col(ColumnDef::new(Games::IconUrl).text().null())
                    .col(ColumnDef::new(Games::Status).text().null())
                    .col(ColumnDef::new(Games::Metadata).json_binary().null())
                    .col(created_at(Games::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(created_at(Admins::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(unit_table(Characters::Table, "fk_characters_game"))
            .await?;
        manager
            .create_table(unit_table(Pets::Table, "fk_pets_game"))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(uuid_pk(Equipment::Id))
                    .col(ColumnDef::new(Equipment::GameId).uuid().not_null())
                    .col(ColumnDef::new(Equipment::Name).text().not_null())
                    .col(ColumnDef::new(Equipment::NameEn).text().null())
                    .col(ColumnDef::new(Equipment::ImageUrl).text().null())
                    .col(ColumnDef::new(Equipment::Description).text().null())
                    .col(ColumnDef::new(Equipment::Type).text().not_null())
                    .col(ColumnDef::new(Equipment::Rarity).text().not_null())
                    .col(ColumnDef::new(Equipment::Stats).json_binary().null())
                    .col(ColumnDef::new(Equipment::SpecialEffect).text().null())
                    .col(ColumnDef::new(Equipment::HowToObtain).text().null())
                    .col(created_at(Equipment::CreatedAt))
                    .foreign_key(&mut game_fk(
                        Equipment::Table,
                        Equipment::GameId,
                        "fk_equipment_game",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(uuid_pk(Teams::Id))
                    .col(ColumnDef::new(Teams::GameId).uuid().not_null())
                    .col(ColumnDef::new(Teams::UserId).uuid().not_null())
                    .col(ColumnDef::new(Teams::Username).text().not_null())
                    .col(ColumnDef::new(Teams::Name).text().not_null())
                    .col(ColumnDef::new(Teams::Mode).text().not_null())
                    .col(ColumnDef::new(Teams::Formation).json_binary().not_null())
                    .col(ColumnDef::new(Teams::PetId).uuid().null())
                    .col(ColumnDef::new(Teams::PetImageUrl).text().null())
                    .col(created_at(Teams::CreatedAt))
                    .foreign_key(&mut game_fk(Teams::Table, Teams::GameId, "fk_teams_game"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_characters_game")
                    .table(Characters::Table)
                    .col(UnitCol::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pets_game")
                    .table(Pets::Table)
                    .col(UnitCol::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_equipment_game")
                    .table(Equipment::Table)
                    .col(Equipment::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teams_game_created")
                    .table(Teams::Table)
                    .col(Teams::GameId)
                    .col(Teams::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Characters::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
