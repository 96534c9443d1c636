//! HTTP contract of the game, unit, team and discussion routes.

mod common;
#[macro_use]
mod support;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};
use support::fixtures::{bearer, equipment, seed_game, GameFixture};
use talker_backend::domain::game::TablesMetadata;
use uuid::Uuid;

#[actix_web::test]
async fn health_reports_memory_store() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "memory");
}

#[actix_web::test]
async fn game_detail_exposes_features_in_navigation_order() {
    let fx = GameFixture::new();
    let partial = seed_game(
        &fx.store,
        Some(TablesMetadata {
            characters: Some("sk_characters".into()),
            pets: Some("".into()),
            ..Default::default()
        }),
    );
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", partial.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["features"],
        json!({ "characters": true, "pets": false, "equipment": false, "teams": false })
    );
    assert_eq!(body["navigation"], json!(["characters"]));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/by-slug/{}", fx.game.slug))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], json!(fx.game.id));
    assert_eq!(
        body["navigation"],
        json!(["characters", "pets", "equipment", "teams"])
    );
}

#[actix_web::test]
async fn malformed_and_unknown_game_ids() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::get()
        .uri("/api/games/not-a-uuid/characters")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "INVALID_ID", StatusCode::BAD_REQUEST, None)
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn disabled_kind_is_feature_disabled() {
    let fx = GameFixture::new();
    let bare = seed_game(&fx.store, None);
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/equipment", bare.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "FEATURE_DISABLED",
        StatusCode::NOT_FOUND,
        Some("equipment"),
    )
    .await;
}

#[actix_web::test]
async fn character_search_and_detail() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/characters?q=RUD", fx.game.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rudy"]);

    let rudy = fx.characters[0].id;
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}/pets/{rudy}", fx.game.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PET_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn equipment_filters_by_type_and_english_name() {
    let fx = GameFixture::new();
    fx.store.seed_equipment(
        fx.equipment_table(),
        equipment(fx.game.id, "ดาบรุ่งอรุณ", Some("Blade of Dawn"), "Weapon"),
    );
    fx.store.seed_equipment(
        fx.equipment_table(),
        equipment(fx.game.id, "เกราะ", Some("Dawn Plate"), "Armor"),
    );
    let app = test_app!(fx.state().await).await;
    let base = format!("/api/games/{}/equipment", fx.game.id);

    let req = test::TestRequest::get()
        .uri(&format!("{base}?q=dawn&type=Weapon"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name_en"], "Blade of Dawn");
    assert_eq!(items[0]["type"], "Weapon");

    let req = test::TestRequest::get()
        .uri(&format!("{base}?type=all"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn unit_deletion_is_admin_only() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let app = test_app!(fx.state().await).await;
    let rudy = fx.characters[0].id;
    let uri = format!("/api/games/{}/characters/{rudy}", fx.game.id);

    let req = test::TestRequest::get()
        .uri("/api/me/admin")
        .insert_header((header::AUTHORIZATION, bearer(admin, Some("Mod"))))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_admin"], true);
    assert_eq!(body["display_name"], "Mod");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ADMIN_REQUIRED",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn team_lifecycle_over_http() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;
    let teams_uri = format!("/api/games/{}/teams", fx.game.id);
    let owner_id = Uuid::new_v4();
    let ids = fx.character_ids(6);

    let payload = json!({
        "name": "Arena burst",
        "mode": "Arena",
        "front": [ids[0], ids[1], ids[2]],
        "back": [ids[3]],
        "pet_id": fx.pets[0].id,
    });

    // Anonymous save is refused once the draft itself is valid.
    let req = test::TestRequest::post()
        .uri(&teams_uri)
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&teams_uri)
        .insert_header((header::AUTHORIZATION, bearer(owner_id, Some("Kai"))))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let team_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["owner_name"], "Kai");
    assert_eq!(created["formation"]["back"], json!([ids[3]]));

    let req = test::TestRequest::get()
        .uri(&format!("{teams_uri}/{team_id}"))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["front"][0]["name"], "Rudy");
    assert_eq!(detail["companion"]["name"], "Rudy Jr.");

    let req = test::TestRequest::get()
        .uri(&format!("{teams_uri}?mode=GuildWar"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listed.as_array().unwrap().is_empty());

    let edit = json!({ "name": "Castle rush", "mode": "GuildWar", "front": [ids[4]] });
    let req = test::TestRequest::put()
        .uri(&format!("{teams_uri}/{team_id}"))
        .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), Some("Nok"))))
        .set_json(&edit)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NOT_OWNER", StatusCode::FORBIDDEN, None)
        .await;

    let req = test::TestRequest::put()
        .uri(&format!("{teams_uri}/{team_id}"))
        .insert_header((header::AUTHORIZATION, bearer(owner_id, Some("Kai"))))
        .set_json(&edit)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["mode"], "GuildWar");
    assert_eq!(updated["formation"]["front"], json!([ids[4]]));

    let req = test::TestRequest::delete()
        .uri(&format!("{teams_uri}/{team_id}"))
        .insert_header((header::AUTHORIZATION, bearer(owner_id, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(fx.store.team_count(fx.teams_table()), 0);
}

#[actix_web::test]
async fn formation_rule_violations_map_to_conflict_and_unprocessable() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;
    let teams_uri = format!("/api/games/{}/teams", fx.game.id);
    let user = Uuid::new_v4();
    let ids = fx.character_ids(6);

    let cases = [
        (
            json!({
                "name": "Too many",
                "mode": "GuildWar",
                "front": [ids[0], ids[1]],
                "back": [ids[2], ids[3]],
            }),
            "CAPACITY_EXCEEDED",
            StatusCode::CONFLICT,
        ),
        (
            json!({ "name": "Twice", "mode": "Arena", "front": [ids[0]], "back": [ids[0]] }),
            "DUPLICATE_UNIT",
            StatusCode::CONFLICT,
        ),
        (
            json!({ "name": " ", "mode": "Arena", "front": [ids[0]] }),
            "EMPTY_TEAM_NAME",
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({ "name": "Nobody", "mode": "Arena" }),
            "NO_UNITS_SELECTED",
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({ "name": "Ghost", "mode": "Arena", "front": [Uuid::new_v4()] }),
            "UNKNOWN_UNIT",
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            json!({ "name": "Raid", "mode": "Raid", "front": [ids[0]] }),
            "BAD_REQUEST",
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (payload, code, status) in cases {
        let req = test::TestRequest::post()
            .uri(&teams_uri)
            .insert_header((header::AUTHORIZATION, bearer(user, None)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(resp, code, status, None).await;
    }
    assert_eq!(fx.store.team_count(fx.teams_table()), 0);
}

#[actix_web::test]
async fn bad_tokens_are_rejected_even_where_auth_is_optional() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/teams", fx.game.id))
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .set_json(json!({ "name": "x", "mode": "Arena" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let req = test::TestRequest::get().uri("/api/me/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn admins_add_and_edit_catalog_entries() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let app = test_app!(fx.state().await).await;
    let game_uri = format!("/api/games/{}", fx.game.id);

    let cases = [
        ("characters", json!({ "name": " Karin ", "role": "Support" })),
        ("pets", json!({ "name": "Karin Jr.", "rarity": "" })),
        (
            "equipment",
            json!({
                "name": "โล่",
                "type": "Armor",
                "rarity": "Rare",
                "stats": { "def": 40 },
            }),
        ),
    ];

    for (kind, payload) in cases {
        let uri = format!("{game_uri}/{kind}");

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), None)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "ADMIN_REQUIRED",
            StatusCode::FORBIDDEN,
            None,
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header((header::AUTHORIZATION, bearer(admin, None)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "{kind}");
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["game_id"], json!(fx.game.id));

        let mut edited = payload.clone();
        edited["name"] = json!("Renamed");
        let req = test::TestRequest::put()
            .uri(&format!("{uri}/{id}"))
            .insert_header((header::AUTHORIZATION, bearer(admin, None)))
            .set_json(&edited)
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["id"], json!(id));
        assert_eq!(updated["name"], "Renamed");

        let req = test::TestRequest::get()
            .uri(&format!("{uri}/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["name"], "Renamed");
    }

    let req = test::TestRequest::get()
        .uri(&format!("{game_uri}/characters?q=renamed"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["role"], "Support");
}

#[actix_web::test]
async fn catalog_writes_validate_the_payload_and_target() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let bare = seed_game(&fx.store, None);
    let app = test_app!(fx.state().await).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/equipment", fx.game.id))
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(json!({ "name": "Ring", "type": "Accessory", "rarity": "Rare", "stats": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;

    let ghost = Uuid::new_v4();
    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{}/pets/{ghost}", fx.game.id))
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(json!({ "name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PET_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/characters", bare.id))
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(json!({ "name": "Rudy" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "FEATURE_DISABLED",
        StatusCode::NOT_FOUND,
        Some("characters"),
    )
    .await;
}

#[actix_web::test]
async fn admins_create_games_with_checked_table_names() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let app = test_app!(fx.state().await).await;

    let payload = json!({
        "name": "Epic Seven",
        "status": "coming_soon",
        "metadata": { "tables": { "characters": "e7_characters", "pets": "" } },
    });

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), None)))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ADMIN_REQUIRED",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["slug"], "epic-seven");
    assert_eq!(created["status"], "coming_soon");
    assert_eq!(created["navigation"], json!(["characters"]));
    assert_eq!(created["metadata"]["tables"]["characters"], "e7_characters");

    let req = test::TestRequest::get()
        .uri("/api/games/by-slug/epic-seven")
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["id"], created["id"]);
    assert!(fetched.get("metadata").is_none());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(json!({ "name": "Epic  Seven", "slug": "Epic Seven" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "SLUG_TAKEN",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(json!({
            "name": "Summoners War",
            "metadata": { "tables": { "teams": "teams; drop table games" } },
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_TABLE_NAME",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
}

#[actix_web::test]
async fn game_edits_take_effect_without_waiting_for_the_cache() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let app = test_app!(fx.state().await).await;
    let game_uri = format!("/api/games/{}", fx.game.id);

    // Warm the cached routes first.
    let req = test::TestRequest::get().uri(&game_uri).to_request();
    let before: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(before["features"]["pets"], true);

    let edit = json!({
        "name": "Seven Knights",
        "slug": fx.game.slug,
        "metadata": { "tables": { "characters": fx.tables.characters } },
    });
    let req = test::TestRequest::put()
        .uri(&game_uri)
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .set_json(&edit)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["navigation"], json!(["characters"]));

    let req = test::TestRequest::get().uri(&game_uri).to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after["features"]["pets"], false);

    let req = test::TestRequest::get()
        .uri(&format!("{game_uri}/pets"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "FEATURE_DISABLED",
        StatusCode::NOT_FOUND,
        Some("pets"),
    )
    .await;
}

#[actix_web::test]
async fn posts_and_comments_over_http() {
    let fx = GameFixture::new();
    let admin = Uuid::new_v4();
    fx.store.add_admin(admin);
    let app = test_app!(fx.state().await).await;
    let posts_uri = format!("/api/games/{}/posts", fx.game.id);
    let kai = Uuid::new_v4();
    let nok = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri(&posts_uri)
        .set_json(json!({ "title": "Tier list", "content": "Rudy first." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&posts_uri)
        .insert_header((header::AUTHORIZATION, bearer(kai, Some("Kai"))))
        .set_json(json!({ "title": "  ", "content": "Rudy first." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&posts_uri)
        .insert_header((header::AUTHORIZATION, bearer(kai, Some("Kai"))))
        .set_json(json!({ "title": "Tier list", "content": "Rudy first." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["author_name"], "Kai");
    let post_uri = format!("{posts_uri}/{}", post["id"].as_str().unwrap());

    let req = test::TestRequest::get().uri(&posts_uri).to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("{post_uri}/comments"))
        .insert_header((header::AUTHORIZATION, bearer(nok, Some("Nok"))))
        .set_json(json!({ "content": "Agreed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    assert_eq!(comment["thread_kind"], "post");
    let comment_uri = format!(
        "/api/games/{}/comments/{}",
        fx.game.id,
        comment["id"].as_str().unwrap()
    );

    let req = test::TestRequest::get()
        .uri(&format!("{post_uri}/comments"))
        .to_request();
    let thread: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(thread[0]["author_name"], "Nok");

    // The post author does not own the reply.
    let req = test::TestRequest::delete()
        .uri(&comment_uri)
        .insert_header((header::AUTHORIZATION, bearer(kai, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NOT_AUTHOR", StatusCode::FORBIDDEN, None)
        .await;

    let req = test::TestRequest::delete()
        .uri(&comment_uri)
        .insert_header((header::AUTHORIZATION, bearer(admin, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&post_uri)
        .insert_header((header::AUTHORIZATION, bearer(nok, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NOT_AUTHOR", StatusCode::FORBIDDEN, None)
        .await;

    let req = test::TestRequest::delete()
        .uri(&post_uri)
        .insert_header((header::AUTHORIZATION, bearer(kai, None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&post_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "POST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

#[actix_web::test]
async fn saved_teams_carry_their_own_comment_thread() {
    let fx = GameFixture::new();
    let app = test_app!(fx.state().await).await;
    let teams_uri = format!("/api/games/{}/teams", fx.game.id);
    let owner_id = Uuid::new_v4();
    let ids = fx.character_ids(2);

    let req = test::TestRequest::post()
        .uri(&teams_uri)
        .insert_header((header::AUTHORIZATION, bearer(owner_id, Some("Kai"))))
        .set_json(json!({ "name": "Duo", "mode": "Arena", "front": [ids[0], ids[1]] }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let thread_uri = format!("{teams_uri}/{}/comments", created["id"].as_str().unwrap());

    let req = test::TestRequest::post()
        .uri(&thread_uri)
        .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4(), Some("Nok"))))
        .set_json(json!({ "content": "Swap in Rachel for arena." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&thread_uri).to_request();
    let thread: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(thread.as_array().unwrap().len(), 1);
    assert_eq!(thread[0]["thread_kind"], "team");

    let req = test::TestRequest::post()
        .uri(&format!("{teams_uri}/{}/comments", Uuid::new_v4()))
        .insert_header((header::AUTHORIZATION, bearer(owner_id, None)))
        .set_json(json!({ "content": "Hello?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TEAM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}
