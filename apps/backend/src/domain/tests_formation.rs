use uuid::Uuid;

use crate::domain::formation::{
    CapacityLimit, Formation, FormationError, GameMode, Row, FRONT_CAPACITY,
};

fn ids(n: usize) -> Vec<Uuid> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn add_appends_in_insertion_order() {
    let [a, b, c] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let mut formation = Formation::default();

    formation.add(a, Row::Front, GameMode::Arena).unwrap();
    formation.add(b, Row::Front, GameMode::Arena).unwrap();
    formation.add(c, Row::Back, GameMode::Arena).unwrap();

    assert_eq!(formation.front, vec![a, b]);
    assert_eq!(formation.back, vec![c]);
    assert_eq!(formation.occupied(), 3);
}

#[test]
fn duplicate_across_rows_is_rejected_and_back_stays_empty() {
    let x = Uuid::new_v4();
    let mut formation = Formation::default();
    formation.add(x, Row::Front, GameMode::Arena).unwrap();

    let err = formation.add(x, Row::Back, GameMode::Arena).unwrap_err();

    assert_eq!(err, FormationError::DuplicateUnit(x));
    assert!(formation.back.is_empty());
    assert_eq!(formation.front, vec![x]);
}

#[test]
fn guild_war_caps_total_at_three() {
    let units = ids(4);
    let mut formation = Formation::default();
    for id in &units[..3] {
        formation.add(*id, Row::Back, GameMode::GuildWar).unwrap();
    }

    let err = formation.add(units[3], Row::Front, GameMode::GuildWar).unwrap_err();

    assert_eq!(
        err,
        FormationError::CapacityExceeded(CapacityLimit::Total {
            mode: GameMode::GuildWar,
            cap: 3
        })
    );
    assert_eq!(formation.occupied(), 3);
}

#[test]
fn total_cap_is_checked_before_duplicates() {
    let units = ids(3);
    let mut formation = Formation::default();
    for id in &units {
        formation.add(*id, Row::Front, GameMode::GuildWar).unwrap();
    }

    // Already present AND over cap: the cap wins.
    let err = formation.add(units[0], Row::Back, GameMode::GuildWar).unwrap_err();
    assert!(matches!(
        err,
        FormationError::CapacityExceeded(CapacityLimit::Total { .. })
    ));
}

#[test]
fn sixth_front_unit_leaves_row_unchanged() {
    // Arena's total cap (5) equals the front row cap, so the total check is
    // the one that fires when the front row is already full.
    let units = ids(FRONT_CAPACITY + 1);
    let mut formation = Formation::default();
    for id in &units[..FRONT_CAPACITY] {
        formation.add(*id, Row::Front, GameMode::Arena).unwrap();
    }
    let before = formation.front.clone();

    let err = formation
        .add(units[FRONT_CAPACITY], Row::Front, GameMode::Arena)
        .unwrap_err();

    assert!(matches!(err, FormationError::CapacityExceeded(_)));
    assert_eq!(formation.front, before);
}

#[test]
fn whole_team_may_sit_in_one_row() {
    let units = ids(FRONT_CAPACITY);
    let mut formation = Formation::default();
    for id in &units {
        formation.add(*id, Row::Front, GameMode::Arena).unwrap();
    }
    assert_eq!(formation.front.len(), FRONT_CAPACITY);
    assert!(formation.back.is_empty());
}

#[test]
fn remove_compacts_and_ignores_missing() {
    let [a, b, c] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let mut formation = Formation {
        front: vec![a, b, c],
        back: Vec::new(),
    };

    assert!(formation.remove(b, Row::Front));
    assert_eq!(formation.front, vec![a, c]);

    assert!(!formation.remove(b, Row::Front));
    assert!(!formation.remove(a, Row::Back));
    assert_eq!(formation.front, vec![a, c]);
}

#[test]
fn remove_then_add_restores_occupancy() {
    let [a, b] = [Uuid::new_v4(), Uuid::new_v4()];
    let mut formation = Formation::default();
    formation.add(a, Row::Back, GameMode::Arena).unwrap();
    formation.add(b, Row::Back, GameMode::Arena).unwrap();
    let before = formation.row(Row::Back).len();

    formation.remove(a, Row::Back);
    formation.add(a, Row::Back, GameMode::Arena).unwrap();

    assert_eq!(formation.row(Row::Back).len(), before);
}

#[test]
fn persisted_shape_is_two_id_lists() {
    let [a, b, c] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let formation = Formation {
        front: vec![a, b],
        back: vec![c],
    };

    let json = serde_json::to_value(&formation).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "front": [a.to_string(), b.to_string()],
            "back": [c.to_string()],
        })
    );
}

#[test]
fn rebuild_enforces_rules_on_stored_rows() {
    let a = Uuid::new_v4();
    let err = Formation::rebuild(&[a], &[a], GameMode::Arena).unwrap_err();
    assert_eq!(err, FormationError::DuplicateUnit(a));

    let units = ids(4);
    let err = Formation::rebuild(&units, &[], GameMode::GuildWar).unwrap_err();
    assert!(matches!(err, FormationError::CapacityExceeded(_)));
}

#[test]
fn lenient_rebuild_skips_offending_entries() {
    let units = ids(6);
    let (formation, rejected) =
        Formation::rebuild_lenient(&units, &[units[0], units[0]], GameMode::GuildWar);

    assert_eq!(formation.front, units[..3].to_vec());
    assert!(formation.back.is_empty());
    assert_eq!(rejected.len(), 5);
    assert!(matches!(
        rejected[0].1,
        FormationError::CapacityExceeded(CapacityLimit::Total { cap: 3, .. })
    ));

    let [a, b] = [Uuid::new_v4(), Uuid::new_v4()];
    let (formation, rejected) = Formation::rebuild_lenient(&[a], &[b, a], GameMode::Arena);
    assert_eq!(formation.front, vec![a]);
    assert_eq!(formation.back, vec![b]);
    assert_eq!(rejected, vec![(a, FormationError::DuplicateUnit(a))]);
}
