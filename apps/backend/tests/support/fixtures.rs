//! Seeded in-memory games for service and HTTP tests.

use std::sync::Arc;
use std::time::SystemTime;

use backend_test_support::unique_helpers::{unique_str, unique_table};
use talker_backend::adapters::MemoryStore;
use talker_backend::domain::game::{Game, GameMetadata, GameStatus, TablesMetadata};
use talker_backend::domain::team::Owner;
use talker_backend::domain::units::{Equipment, Unit};
use talker_backend::infra::state::build_state;
use talker_backend::{mint_access_token, AppState, SecurityConfig};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// `Authorization` header value for a locally minted token.
pub fn bearer(user_id: Uuid, full_name: Option<&str>) -> String {
    let token = mint_access_token(user_id, None, full_name, SystemTime::now(), &security())
        .expect("mint token");
    format!("Bearer {token}")
}

pub fn owner(name: &str) -> Owner {
    Owner {
        user_id: Uuid::new_v4(),
        display_name: name.to_string(),
    }
}

pub fn unit(game_id: Uuid, name: &str, image_url: Option<&str>) -> Unit {
    Unit {
        id: Uuid::new_v4(),
        name: name.to_string(),
        game_id,
        image_url: image_url.map(str::to_string),
        description: None,
        role: None,
        element: None,
        rarity: None,
    }
}

pub fn equipment(game_id: Uuid, name: &str, name_en: Option<&str>, equip_type: &str) -> Equipment {
    Equipment {
        id: Uuid::new_v4(),
        game_id,
        name: name.to_string(),
        name_en: name_en.map(str::to_string),
        image_url: None,
        description: None,
        equip_type: equip_type.to_string(),
        rarity: "Legendary".to_string(),
        stats: None,
        special_effect: None,
        how_to_obtain: None,
    }
}

/// Register a game whose metadata carries `tables` verbatim. Backing tables
/// are not created.
pub fn seed_game(store: &MemoryStore, tables: Option<TablesMetadata>) -> Game {
    let game = Game {
        id: Uuid::new_v4(),
        name: "Seven Knights".to_string(),
        slug: unique_str("seven-knights"),
        icon_url: None,
        status: GameStatus::Active,
        metadata: GameMetadata { tables },
    };
    store.seed_game(game.clone());
    game
}

/// A game with all four tables, six characters and two pets.
pub struct GameFixture {
    pub store: Arc<MemoryStore>,
    pub game: Game,
    pub tables: TablesMetadata,
    pub characters: Vec<Unit>,
    pub pets: Vec<Unit>,
}

impl GameFixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let tables = TablesMetadata {
            characters: Some(unique_table("characters")),
            pets: Some(unique_table("pets")),
            equipment: Some(unique_table("equipment")),
            teams: Some(unique_table("teams")),
        };
        let game = seed_game(&store, Some(tables.clone()));

        let characters: Vec<Unit> = ["Rudy", "Eileene", "Rachel", "Spike", "Dellons", "Kris"]
            .iter()
            .map(|name| {
                let img = format!("https://cdn.example/{}.png", name.to_lowercase());
                unit(game.id, name, Some(&img))
            })
            .collect();
        let pets = vec![
            unit(
                game.id,
                "Rudy Jr.",
                Some("https://cdn.example/pet-rudy.png"),
            ),
            unit(game.id, "Eileene Jr.", None),
        ];

        let characters_table = tables.characters.as_deref().unwrap_or_default();
        let pets_table = tables.pets.as_deref().unwrap_or_default();
        store.create_unit_table(characters_table);
        store.create_unit_table(pets_table);
        store.create_equipment_table(tables.equipment.as_deref().unwrap_or_default());
        store.create_team_table(tables.teams.as_deref().unwrap_or_default());
        for c in &characters {
            store.seed_unit(characters_table, c.clone());
        }
        for p in &pets {
            store.seed_unit(pets_table, p.clone());
        }

        Self {
            store,
            game,
            tables,
            characters,
            pets,
        }
    }

    pub fn character_ids(&self, n: usize) -> Vec<Uuid> {
        self.characters.iter().take(n).map(|u| u.id).collect()
    }

    pub fn teams_table(&self) -> &str {
        self.tables.teams.as_deref().unwrap_or_default()
    }

    pub fn equipment_table(&self) -> &str {
        self.tables.equipment.as_deref().unwrap_or_default()
    }

    pub async fn state(&self) -> AppState {
        build_state()
            .with_memory_store(self.store.clone())
            .with_security(security())
            .build()
            .await
            .expect("build in-memory state")
    }
}
