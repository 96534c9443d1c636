use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::builder::{BuilderState, TeamBuilder};
use crate::domain::formation::{Formation, FormationError, GameMode, Row, ValidationIssue};
use crate::domain::team::{Owner, Team};

fn owner() -> Owner {
    Owner {
        user_id: Uuid::new_v4(),
        display_name: "Kai".into(),
    }
}

fn builder_with(units: &[(Uuid, Row)], mode: GameMode) -> TeamBuilder {
    let mut builder = TeamBuilder::new(Uuid::new_v4(), mode);
    for (id, row) in units {
        builder.add_unit(*id, *row).unwrap();
    }
    builder
}

#[test]
fn state_tracks_occupancy_against_mode_cap() {
    let mut builder = TeamBuilder::new(Uuid::new_v4(), GameMode::GuildWar);
    assert_eq!(builder.state(), BuilderState::Empty);

    let ids: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();
    builder.add_unit(ids[0], Row::Front).unwrap();
    assert_eq!(builder.state(), BuilderState::PartiallyFilled);

    builder.add_unit(ids[1], Row::Back).unwrap();
    builder.add_unit(ids[2], Row::Back).unwrap();
    assert_eq!(builder.state(), BuilderState::Full);

    builder.remove_unit(ids[2], Row::Back).unwrap();
    assert_eq!(builder.state(), BuilderState::PartiallyFilled);

    builder.remove_unit(ids[0], Row::Front).unwrap();
    builder.remove_unit(ids[1], Row::Back).unwrap();
    assert_eq!(builder.state(), BuilderState::Empty);
}

#[test]
fn commit_produces_storable_team_in_insertion_order() {
    let [a, b, c] = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let mut builder = builder_with(
        &[(a, Row::Front), (b, Row::Front), (c, Row::Back)],
        GameMode::Arena,
    );
    builder.set_name("  Test Team ").unwrap();
    let owner = owner();

    let new_team = builder.begin_commit(Some(&owner)).unwrap();

    assert_eq!(new_team.name, "Test Team");
    assert_eq!(new_team.mode, GameMode::Arena);
    assert_eq!(new_team.owner_id, owner.user_id);
    assert_eq!(new_team.owner_name, "Kai");
    assert_eq!(
        new_team.formation,
        Formation {
            front: vec![a, b],
            back: vec![c]
        }
    );
    assert!(builder.is_committing());

    let team_id = Uuid::new_v4();
    assert_eq!(builder.finish_commit(Ok(team_id)), Ok(team_id));
    assert_eq!(builder.state(), BuilderState::Committed);
    assert_eq!(builder.committed_id(), Some(team_id));
}

#[test]
fn blank_name_fails_validation_first() {
    let mut builder = TeamBuilder::new(Uuid::new_v4(), GameMode::Arena);
    builder.set_name("   ").unwrap();

    // No units and no owner either: the name check still wins.
    let err = builder.begin_commit(None).unwrap_err();

    assert_eq!(
        err,
        FormationError::ValidationFailed(ValidationIssue::EmptyName)
    );
    assert!(!builder.is_committing());
}

#[test]
fn empty_formation_fails_validation() {
    let mut builder = TeamBuilder::new(Uuid::new_v4(), GameMode::Arena);
    builder.set_name("Solo").unwrap();

    let err = builder.begin_commit(Some(&owner())).unwrap_err();

    assert_eq!(
        err,
        FormationError::ValidationFailed(ValidationIssue::NoUnits)
    );
}

#[test]
fn missing_owner_requires_authentication() {
    let mut builder = builder_with(&[(Uuid::new_v4(), Row::Front)], GameMode::Arena);
    builder.set_name("Anon").unwrap();

    assert_eq!(
        builder.begin_commit(None),
        Err(FormationError::AuthenticationRequired)
    );
    assert_eq!(builder.state(), BuilderState::PartiallyFilled);
}

#[test]
fn failed_persistence_keeps_selections_for_retry() {
    let a = Uuid::new_v4();
    let mut builder = builder_with(&[(a, Row::Front)], GameMode::Arena);
    builder.set_name("Retry me").unwrap();
    builder.select_companion(Some(Uuid::new_v4())).unwrap();
    let companion = builder.companion();
    let owner = owner();

    builder.begin_commit(Some(&owner)).unwrap();
    let err = builder
        .finish_commit(Err("connection reset".into()))
        .unwrap_err();

    assert_eq!(
        err,
        FormationError::PersistenceFailed {
            detail: "connection reset".into()
        }
    );
    assert_eq!(builder.formation().front, vec![a]);
    assert_eq!(builder.companion(), companion);
    assert_eq!(builder.name(), "Retry me");

    // Retry succeeds.
    assert!(builder.begin_commit(Some(&owner)).is_ok());
}

#[test]
fn second_commit_while_in_flight_is_rejected_but_edits_are_allowed() {
    let mut builder = builder_with(&[(Uuid::new_v4(), Row::Front)], GameMode::Arena);
    builder.set_name("Busy").unwrap();
    let owner = owner();
    builder.begin_commit(Some(&owner)).unwrap();

    assert_eq!(
        builder.begin_commit(Some(&owner)),
        Err(FormationError::CommitInProgress)
    );
    assert!(builder.add_unit(Uuid::new_v4(), Row::Back).is_ok());
}

#[test]
fn mode_switch_over_cap_is_forbidden() {
    let units: Vec<_> = (0..4)
        .map(|i| {
            let row = if i % 2 == 0 { Row::Front } else { Row::Back };
            (Uuid::new_v4(), row)
        })
        .collect();
    let mut builder = builder_with(&units, GameMode::Arena);

    let err = builder.set_mode(GameMode::GuildWar).unwrap_err();

    assert_eq!(
        err,
        FormationError::ModeOverCapacity {
            mode: GameMode::GuildWar,
            occupied: 4,
            cap: 3
        }
    );
    assert_eq!(builder.mode(), GameMode::Arena);
    assert_eq!(builder.formation().occupied(), 4);

    builder.remove_unit(units[0].0, units[0].1).unwrap();
    assert!(builder.set_mode(GameMode::GuildWar).is_ok());
    assert_eq!(builder.state(), BuilderState::Full);
}

#[test]
fn abandoned_session_rejects_further_changes() {
    let mut builder = TeamBuilder::new(Uuid::new_v4(), GameMode::Arena);
    builder.abandon();

    assert_eq!(builder.state(), BuilderState::Abandoned);
    assert_eq!(
        builder.add_unit(Uuid::new_v4(), Row::Front),
        Err(FormationError::SessionClosed)
    );
    assert_eq!(
        builder.begin_commit(None),
        Err(FormationError::SessionClosed)
    );
}

#[test]
fn edit_flow_reloads_stored_team() {
    let [a, b] = [Uuid::new_v4(), Uuid::new_v4()];
    let pet = Uuid::new_v4();
    let team = Team {
        id: Uuid::new_v4(),
        game_id: Uuid::new_v4(),
        name: "Stored".into(),
        mode: GameMode::GuildWar,
        owner_id: Uuid::new_v4(),
        owner_name: "Nok".into(),
        formation: Formation {
            front: vec![a],
            back: vec![b],
        },
        companion_id: Some(pet),
        companion_image_url: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    };

    let builder = TeamBuilder::from_team(&team);

    assert_eq!(builder.editing(), Some(team.id));
    assert_eq!(builder.game_id(), team.game_id);
    assert_eq!(builder.name(), "Stored");
    assert_eq!(builder.mode(), GameMode::GuildWar);
    assert_eq!(builder.formation(), &team.formation);
    assert_eq!(builder.companion(), Some(pet));
    assert_eq!(builder.state(), BuilderState::PartiallyFilled);
}

#[test]
fn edit_flow_drops_stored_entries_that_break_the_rules() {
    let front: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
    let dup = Uuid::new_v4();
    let team = Team {
        id: Uuid::new_v4(),
        game_id: Uuid::new_v4(),
        name: "Corrupted".into(),
        mode: GameMode::GuildWar,
        owner_id: Uuid::new_v4(),
        owner_name: "Nok".into(),
        formation: Formation {
            front: front.clone(),
            back: vec![dup, dup],
        },
        companion_id: None,
        companion_image_url: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    };

    let builder = TeamBuilder::from_team(&team);

    assert_eq!(builder.formation().occupied(), 3);
    assert_eq!(builder.formation().front, front[..3].to_vec());
    assert!(builder.formation().back.is_empty());
    assert_eq!(builder.state(), BuilderState::Full);
}
