//! Process-local store implementing every repository trait.
//!
//! Backs `DbKind::Memory` and the test suites. Tables are keyed by the
//! routed table name so per-game routing behaves as it does in Postgres:
//! a name with no registered table reports the same corruption error a
//! missing relation would.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::discussion::{
    newest_first, oldest_first, Comment, NewComment, NewPost, Post, Thread,
};
use crate::domain::game::{Game, NewGame};
use crate::domain::schema_router::TableName;
use crate::domain::team::{NewTeam, Team};
use crate::domain::units::{Equipment, NewEquipment, NewUnit, Unit};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::{AdminRepo, CommentRepo, EquipmentRepo, GameRepo, PostRepo, TeamRepo, UnitRepo};

#[derive(Debug, Default)]
struct Tables {
    games: Vec<Game>,
    admins: HashSet<Uuid>,
    units: HashMap<String, Vec<Unit>>,
    equipment: HashMap<String, Vec<Equipment>>,
    teams: HashMap<String, Vec<Team>>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

fn missing_table(table: &TableName) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Game metadata points at a missing table: {table}"),
    )
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_game(&self, game: Game) {
        let mut t = self.inner.write();
        t.games.retain(|g| g.id != game.id);
        t.games.push(game);
    }

    pub fn add_admin(&self, user_id: Uuid) {
        self.inner.write().admins.insert(user_id);
    }

    /// Register an empty unit table (characters or pets).
    pub fn create_unit_table(&self, table: &str) {
        self.inner.write().units.entry(table.to_string()).or_default();
    }

    pub fn create_equipment_table(&self, table: &str) {
        self.inner
            .write()
            .equipment
            .entry(table.to_string())
            .or_default();
    }

    pub fn create_team_table(&self, table: &str) {
        self.inner.write().teams.entry(table.to_string()).or_default();
    }

    pub fn seed_unit(&self, table: &str, unit: Unit) {
        self.inner
            .write()
            .units
            .entry(table.to_string())
            .or_default()
            .push(unit);
    }

    pub fn seed_equipment(&self, table: &str, equipment: Equipment) {
        self.inner
            .write()
            .equipment
            .entry(table.to_string())
            .or_default()
            .push(equipment);
    }

    /// Store a fully formed team, e.g. one with a fixed `created_at`.
    pub fn seed_team(&self, table: &str, team: Team) {
        self.inner
            .write()
            .teams
            .entry(table.to_string())
            .or_default()
            .push(team);
    }

    pub fn team_count(&self, table: &str) -> usize {
        self.inner.read().teams.get(table).map_or(0, Vec::len)
    }
}

fn slug_taken(slug: &str) -> DomainError {
    DomainError::conflict(
        ConflictKind::SlugTaken,
        format!("Game slug already in use: {slug}"),
    )
}

fn sorted_by_name<T: Clone>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| name(a).cmp(name(b)));
    out
}

#[async_trait]
impl GameRepo for MemoryStore {
    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        Ok(sorted_by_name(&self.inner.read().games, |g| g.name.as_str()))
    }

    async fn find_game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self
            .inner
            .read()
            .games
            .iter()
            .find(|g| g.id == game_id)
            .cloned())
    }

    async fn find_game_by_slug(&self, slug: &str) -> Result<Option<Game>, DomainError> {
        Ok(self
            .inner
            .read()
            .games
            .iter()
            .find(|g| g.slug == slug)
            .cloned())
    }

    async fn insert_game(&self, game: &NewGame) -> Result<Uuid, DomainError> {
        let mut t = self.inner.write();
        if t.games.iter().any(|g| g.slug == game.slug) {
            return Err(slug_taken(&game.slug));
        }
        let id = Uuid::new_v4();
        t.games.push(Game {
            id,
            name: game.name.clone(),
            slug: game.slug.clone(),
            icon_url: game.icon_url.clone(),
            status: game.status,
            metadata: game.metadata.clone(),
        });
        Ok(id)
    }

    async fn update_game(&self, game_id: Uuid, game: &NewGame) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        if t.games.iter().any(|g| g.slug == game.slug && g.id != game_id) {
            return Err(slug_taken(&game.slug));
        }
        let Some(stored) = t.games.iter_mut().find(|g| g.id == game_id) else {
            return Ok(false);
        };
        stored.name = game.name.clone();
        stored.slug = game.slug.clone();
        stored.icon_url = game.icon_url.clone();
        stored.status = game.status;
        stored.metadata = game.metadata.clone();
        Ok(true)
    }
}

#[async_trait]
impl UnitRepo for MemoryStore {
    async fn list_units(&self, table: &TableName, game_id: Uuid) -> Result<Vec<Unit>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .units
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let of_game: Vec<Unit> = rows
            .iter()
            .filter(|u| u.game_id == game_id)
            .cloned()
            .collect();
        Ok(sorted_by_name(&of_game, |u| u.name.as_str()))
    }

    async fn find_unit(
        &self,
        table: &TableName,
        unit_id: Uuid,
    ) -> Result<Option<Unit>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .units
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        Ok(rows.iter().find(|u| u.id == unit_id).cloned())
    }

    async fn insert_unit(
        &self,
        table: &TableName,
        game_id: Uuid,
        unit: &NewUnit,
    ) -> Result<Uuid, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .units
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let id = Uuid::new_v4();
        rows.push(Unit {
            id,
            name: unit.name.clone(),
            game_id,
            image_url: unit.image_url.clone(),
            description: unit.description.clone(),
            role: unit.role.clone(),
            element: unit.element.clone(),
            rarity: unit.rarity.clone(),
        });
        Ok(id)
    }

    async fn update_unit(
        &self,
        table: &TableName,
        unit_id: Uuid,
        unit: &NewUnit,
    ) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .units
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let Some(stored) = rows.iter_mut().find(|u| u.id == unit_id) else {
            return Ok(false);
        };
        stored.name = unit.name.clone();
        stored.image_url = unit.image_url.clone();
        stored.description = unit.description.clone();
        stored.role = unit.role.clone();
        stored.element = unit.element.clone();
        stored.rarity = unit.rarity.clone();
        Ok(true)
    }

    async fn delete_unit(&self, table: &TableName, unit_id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .units
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let before = rows.len();
        rows.retain(|u| u.id != unit_id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl EquipmentRepo for MemoryStore {
    async fn list_equipment(
        &self,
        table: &TableName,
        game_id: Uuid,
    ) -> Result<Vec<Equipment>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .equipment
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let of_game: Vec<Equipment> = rows
            .iter()
            .filter(|e| e.game_id == game_id)
            .cloned()
            .collect();
        Ok(sorted_by_name(&of_game, |e| e.name.as_str()))
    }

    async fn find_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
    ) -> Result<Option<Equipment>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .equipment
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        Ok(rows.iter().find(|e| e.id == equipment_id).cloned())
    }

    async fn insert_equipment(
        &self,
        table: &TableName,
        game_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<Uuid, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .equipment
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let id = Uuid::new_v4();
        rows.push(Equipment {
            id,
            game_id,
            name: equipment.name.clone(),
            name_en: equipment.name_en.clone(),
            image_url: equipment.image_url.clone(),
            description: equipment.description.clone(),
            equip_type: equipment.equip_type.clone(),
            rarity: equipment.rarity.clone(),
            stats: equipment.stats.clone(),
            special_effect: equipment.special_effect.clone(),
            how_to_obtain: equipment.how_to_obtain.clone(),
        });
        Ok(id)
    }

    async fn update_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
        equipment: &NewEquipment,
    ) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .equipment
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let Some(stored) = rows.iter_mut().find(|e| e.id == equipment_id) else {
            return Ok(false);
        };
        stored.name = equipment.name.clone();
        stored.name_en = equipment.name_en.clone();
        stored.image_url = equipment.image_url.clone();
        stored.description = equipment.description.clone();
        stored.equip_type = equipment.equip_type.clone();
        stored.rarity = equipment.rarity.clone();
        stored.stats = equipment.stats.clone();
        stored.special_effect = equipment.special_effect.clone();
        stored.how_to_obtain = equipment.how_to_obtain.clone();
        Ok(true)
    }

    async fn delete_equipment(
        &self,
        table: &TableName,
        equipment_id: Uuid,
    ) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .equipment
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let before = rows.len();
        rows.retain(|e| e.id != equipment_id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl TeamRepo for MemoryStore {
    async fn list_teams(&self, table: &TableName, game_id: Uuid) -> Result<Vec<Team>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .teams
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let mut of_game: Vec<Team> = rows
            .iter()
            .filter(|x| x.game_id == game_id)
            .cloned()
            .collect();
        of_game.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(of_game)
    }

    async fn find_team(
        &self,
        table: &TableName,
        team_id: Uuid,
    ) -> Result<Option<Team>, DomainError> {
        let t = self.inner.read();
        let rows = t
            .teams
            .get(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        Ok(rows.iter().find(|x| x.id == team_id).cloned())
    }

    async fn insert_team(&self, table: &TableName, team: &NewTeam) -> Result<Uuid, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .teams
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let id = Uuid::new_v4();
        rows.push(Team {
            id,
            game_id: team.game_id,
            name: team.name.clone(),
            mode: team.mode,
            owner_id: team.owner_id,
            owner_name: team.owner_name.clone(),
            formation: team.formation.clone(),
            companion_id: team.companion_id,
            companion_image_url: team.companion_image_url.clone(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn update_team(
        &self,
        table: &TableName,
        team_id: Uuid,
        team: &NewTeam,
    ) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .teams
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let Some(stored) = rows.iter_mut().find(|x| x.id == team_id) else {
            return Ok(false);
        };
        stored.name = team.name.clone();
        stored.mode = team.mode;
        stored.formation = team.formation.clone();
        stored.companion_id = team.companion_id;
        stored.companion_image_url = team.companion_image_url.clone();
        Ok(true)
    }

    async fn delete_team(&self, table: &TableName, team_id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let rows = t
            .teams
            .get_mut(table.as_str())
            .ok_or_else(|| missing_table(table))?;
        let before = rows.len();
        rows.retain(|x| x.id != team_id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl AdminRepo for MemoryStore {
    async fn is_admin(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.read().admins.contains(&user_id))
    }
}

#[async_trait]
impl PostRepo for MemoryStore {
    async fn list_posts(&self, game_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let t = self.inner.read();
        let of_game = t
            .posts
            .iter()
            .filter(|p| p.game_id == game_id)
            .cloned()
            .collect();
        Ok(newest_first(of_game))
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self
            .inner
            .read()
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned())
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, DomainError> {
        let stored = Post {
            id: Uuid::new_v4(),
            game_id: post.game_id,
            author_id: post.author_id,
            author_name: post.author_name.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.write().posts.push(stored.clone());
        Ok(stored)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let before = t.posts.len();
        t.posts.retain(|p| p.id != post_id);
        Ok(t.posts.len() < before)
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn list_comments(&self, thread: Thread) -> Result<Vec<Comment>, DomainError> {
        let t = self.inner.read();
        let of_thread = t
            .comments
            .iter()
            .filter(|c| c.thread() == thread)
            .cloned()
            .collect();
        Ok(oldest_first(of_thread))
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .inner
            .read()
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .cloned())
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment, DomainError> {
        let stored = Comment {
            id: Uuid::new_v4(),
            game_id: comment.game_id,
            thread_kind: comment.thread.kind,
            thread_id: comment.thread.id,
            author_id: comment.author_id,
            author_name: comment.author_name.clone(),
            content: comment.content.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.write().comments.push(stored.clone());
        Ok(stored)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.inner.write();
        let before = t.comments.len();
        t.comments.retain(|c| c.id != comment_id);
        Ok(t.comments.len() < before)
    }

    async fn delete_thread(&self, thread: Thread) -> Result<u64, DomainError> {
        let mut t = self.inner.write();
        let before = t.comments.len();
        t.comments.retain(|c| c.thread() != thread);
        Ok((before - t.comments.len()) as u64)
    }
}
