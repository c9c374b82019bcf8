//! Integration tests for the team picker and team pool loading.

use party_cup::logic::{expand_assignments, leagues, pick_teams_with_rng, slot_teams};
use party_cup::models::{load_team_pool, load_team_pool_from_path, AssignedTeams};
use party_cup::{PickError, PickerSettings, TeamRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn pool() -> Vec<TeamRecord> {
    vec![
        TeamRecord::new("Arsenal", "epl", "Premier League", 5.0),
        TeamRecord::new("Chelsea", "epl", "Premier League", 4.5),
        TeamRecord::new("Everton", "epl", "Premier League", 3.0),
        TeamRecord::new("Real Madrid", "laliga", "LaLiga", 5.0),
        TeamRecord::new("Sevilla", "laliga", "LaLiga", 4.0),
        TeamRecord::new("Bayern Munich", "bundesliga", "Bundesliga", 5.0),
        TeamRecord::new("Inter", "seriea", "Serie A", 4.5),
        TeamRecord::new("Napoli", "seriea", "Serie A", 4.5),
    ]
}

fn settings(player_count: usize) -> PickerSettings {
    PickerSettings {
        player_count,
        ..PickerSettings::default()
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(9)
}

fn spin(settings: &PickerSettings, locked: &[Option<TeamRecord>]) -> Result<Vec<TeamRecord>, PickError> {
    pick_teams_with_rng(&pool(), settings, locked, &mut rng()).map(|a| slot_teams(&a))
}

#[test]
fn default_settings() {
    let s = PickerSettings::default();
    assert_eq!(s.player_count, 4);
    assert_eq!((s.min_rating, s.max_rating), (4.5, 5.0));
    assert!(s.league_ids.is_none());
    assert_eq!(s.slots(), 4);

    let partial: PickerSettings = serde_json::from_str(r#"{"player_count": 6}"#).unwrap();
    assert_eq!(partial.player_count, 6);
    assert_eq!(partial.teams_per_player, 1);
}

#[test]
fn rejects_bad_settings() {
    assert_eq!(spin(&settings(1), &[]), Err(PickError::PlayerCountTooLow));

    let mut s = settings(2);
    s.league_ids = Some(Vec::new());
    assert_eq!(spin(&s, &[]), Err(PickError::NoLeaguesSelected));

    let mut s = settings(2);
    s.min_rating = f32::NAN;
    assert_eq!(spin(&s, &[]), Err(PickError::InvalidRatingRange));

    let mut s = settings(2);
    s.min_rating = 0.5;
    s.max_rating = 1.0;
    assert_eq!(spin(&s, &[]), Err(PickError::EmptyPool));
}

#[test]
fn picks_distinct_teams_in_range() {
    let teams = spin(&settings(5), &[]).unwrap();
    assert_eq!(teams.len(), 5);
    assert!(teams.iter().all(|t| (4.5..=5.0).contains(&t.stars)));
    let names: HashSet<_> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), 5);
}

#[test]
fn too_many_players_for_the_pool() {
    // Six teams rated 4.5 or more.
    assert_eq!(
        spin(&settings(7), &[]),
        Err(PickError::NotEnoughTeams { available: 6, needed: 7 })
    );
}

#[test]
fn oversized_requests_fail_without_allocating() {
    let mut s = settings(usize::MAX / 2);
    s.teams_per_player = 3;
    assert_eq!(s.slots(), usize::MAX);
    assert_eq!(
        spin(&s, &[]),
        Err(PickError::NotEnoughTeams { available: 6, needed: usize::MAX })
    );

    let mut s = settings(100_000_000);
    s.one_per_league = true;
    assert_eq!(
        spin(&s, &[]),
        Err(PickError::NotEnoughLeagues { available: 4, needed: 100_000_000 })
    );
}

#[test]
fn reversed_rating_bounds_are_swapped() {
    let mut s = settings(2);
    s.min_rating = 4.0;
    s.max_rating = 3.0;
    let teams = spin(&s, &[]).unwrap();
    assert!(teams.iter().all(|t| (3.0..=4.0).contains(&t.stars)));
}

#[test]
fn league_filter() {
    let mut s = settings(2);
    s.league_ids = Some(vec!["seriea".to_string()]);
    let names: HashSet<_> = spin(&s, &[]).unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, HashSet::from(["Inter".to_string(), "Napoli".to_string()]));
}

#[test]
fn one_team_per_league() {
    let mut s = settings(4);
    s.one_per_league = true;
    s.min_rating = 0.5;
    let teams = spin(&s, &[]).unwrap();
    let leagues: HashSet<_> = teams.iter().map(|t| t.league_id.as_str()).collect();
    assert_eq!(leagues.len(), 4);

    s.player_count = 5;
    assert_eq!(
        spin(&s, &[]),
        Err(PickError::NotEnoughLeagues { available: 4, needed: 5 })
    );
}

#[test]
fn locked_slots_are_kept() {
    let inter = TeamRecord::new("Inter", "seriea", "Serie A", 4.5);
    let locked = vec![None, Some(inter.clone()), None];
    let teams = spin(&settings(3), &locked).unwrap();
    assert_eq!(teams[1], inter);
    assert_eq!(teams.iter().filter(|t| t.name == "Inter").count(), 1);
}

#[test]
fn locks_outside_the_filter_are_replaced() {
    let everton = TeamRecord::new("Everton", "epl", "Premier League", 3.0);
    let teams = spin(&settings(2), &[Some(everton)]).unwrap();
    assert!(teams.iter().all(|t| t.name != "Everton"));
}

#[test]
fn locked_league_is_used_up() {
    let mut s = settings(3);
    s.one_per_league = true;
    let arsenal = TeamRecord::new("Arsenal", "epl", "Premier League", 5.0);
    let teams = spin(&s, &[Some(arsenal.clone())]).unwrap();
    assert_eq!(teams[0], arsenal);
    assert_eq!(teams.iter().filter(|t| t.league_id == "epl").count(), 1);
}

#[test]
fn several_teams_per_player() {
    let mut s = settings(2);
    s.teams_per_player = 2;
    let assignments = pick_teams_with_rng(&pool(), &s, &[], &mut rng()).unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[1].label, "Player 2");
    assert!(matches!(&assignments[0].teams, AssignedTeams::Multiple(teams) if teams.len() == 2));

    let owner = assignments[0].id;
    let entrants = expand_assignments(assignments);
    assert_eq!(entrants.len(), 4);
    assert_eq!(
        entrants.iter().filter(|p| p.owner.as_ref().map(|o| o.id) == Some(owner)).count(),
        2
    );
}

#[test]
fn leagues_are_listed_once_in_pool_order() {
    let ids: Vec<_> = leagues(&pool()).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, ["epl", "laliga", "bundesliga", "seriea"]);
}

#[test]
fn loads_pool_from_csv() {
    let data = "name,league_id,league_name,stars,logo\n\
                Ajax , eredivisie, Eredivisie ,3.5,\n\
                PSV,eredivisie,Eredivisie,3.5,psv.png\n";
    let pool = load_team_pool(data.as_bytes()).unwrap();
    assert_eq!(pool.len(), 2);
    assert_eq!(pool[0].name, "Ajax");
    assert_eq!(pool[0].league_name, "Eredivisie");
    assert_eq!(pool[0].logo, "");
    assert_eq!(pool[1].logo, "psv.png");

    assert!(load_team_pool("name,league_id,league_name,stars,logo\nX,y,Y,lots,\n".as_bytes()).is_err());
}

#[test]
fn bundled_pool_loads() {
    let pool = load_team_pool_from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/data/teams.csv")).unwrap();
    assert!(pool.len() >= 20);
    assert!(leagues(&pool).len() >= 5);
}
