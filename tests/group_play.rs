//! Integration tests for the group stage: round-robin scheduling, allocation and tables.

use party_cup::logic::{allocate_with_rng, group_count, round_robin_rounds, suggested_match_order};
use party_cup::models::Leg;
use party_cup::{schedule, standings, Group, GroupMode, Match, Participant, ParticipantId, TeamRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn participant(label: &str) -> Participant {
    Participant::new(
        label,
        TeamRecord::new(format!("{label} FC"), "epl", "Premier League", 4.5),
    )
}

fn participants(n: usize) -> Vec<Participant> {
    (0..n).map(|i| participant(&format!("P{i}"))).collect()
}

fn ids(ps: &[Participant]) -> Vec<ParticipantId> {
    ps.iter().map(|p| p.id).collect()
}

fn unordered(m: &Match) -> (ParticipantId, ParticipantId) {
    (m.home.min(m.away), m.home.max(m.away))
}

#[test]
fn single_round_robin_plays_every_pair_once() {
    for n in 2..=9 {
        let ps = participants(n);
        let matches = schedule("A", &ids(&ps), false);
        assert_eq!(matches.len(), n * (n - 1) / 2, "n = {n}");

        let pairs: HashSet<_> = matches.iter().map(unordered).collect();
        assert_eq!(pairs.len(), matches.len(), "duplicate pairing for n = {n}");
        assert!(matches.iter().all(|m| m.home != m.away));
        assert!(matches.iter().all(|m| m.score().is_none()));
    }
}

#[test]
fn nobody_plays_twice_in_a_round() {
    for n in 2..=9 {
        let ps = participants(n);
        let rounds = round_robin_rounds(&ids(&ps));
        assert_eq!(rounds.len(), if n % 2 == 0 { n - 1 } else { n });
        for round in &rounds {
            let mut seen = HashSet::new();
            for (home, away) in round {
                assert!(seen.insert(*home));
                assert!(seen.insert(*away));
            }
        }
    }
}

#[test]
fn odd_group_sits_each_participant_out_once() {
    let ps = participants(5);
    let rounds = round_robin_rounds(&ids(&ps));
    for p in &ps {
        let idle = rounds
            .iter()
            .filter(|round| !round.iter().any(|(h, a)| *h == p.id || *a == p.id))
            .count();
        assert_eq!(idle, 1);
    }
}

#[test]
fn circle_method_order_and_ids() {
    let ps = participants(4);
    let ids = ids(&ps);
    let matches = schedule("B", &ids, false);

    assert_eq!(matches[0].id, "B-R1M1");
    assert_eq!((matches[0].home, matches[0].away), (ids[0], ids[3]));
    assert_eq!(matches[1].id, "B-R1M2");
    assert_eq!((matches[1].home, matches[1].away), (ids[1], ids[2]));
    assert_eq!(matches[2].id, "B-R2M1");
    assert_eq!((matches[2].home, matches[2].away), (ids[0], ids[2]));
    assert_eq!(matches[4].id, "B-R3M1");
    assert_eq!((matches[4].home, matches[4].away), (ids[0], ids[1]));

    let unique: HashSet<_> = matches.iter().map(|m| m.id.clone()).collect();
    assert_eq!(unique.len(), matches.len());
}

#[test]
fn double_round_robin_swaps_home_and_away() {
    let ps = participants(5);
    let matches = schedule("A", &ids(&ps), true);
    assert_eq!(matches.len(), 5 * 4);

    let half = matches.len() / 2;
    let (first, second) = matches.split_at(half);
    assert!(first.iter().all(|m| m.leg == Leg::First));
    assert!(second.iter().all(|m| m.leg == Leg::Second));

    let last_first_round = first.iter().map(|m| m.round).max().unwrap();
    assert!(second.iter().all(|m| m.round > last_first_round));

    for m in first {
        let returns: Vec<_> = second
            .iter()
            .filter(|r| r.home == m.away && r.away == m.home)
            .collect();
        assert_eq!(returns.len(), 1);
    }
}

#[test]
fn fewer_than_two_gives_empty_schedule() {
    assert!(schedule("A", &[], false).is_empty());
    assert!(schedule("A", &ids(&participants(1)), true).is_empty());
}

#[test]
fn group_count_targets_four_per_group() {
    assert_eq!(group_count(3, GroupMode::GroupsOfFour), 1);
    assert_eq!(group_count(4, GroupMode::GroupsOfFour), 1);
    assert_eq!(group_count(5, GroupMode::GroupsOfFour), 2);
    assert_eq!(group_count(6, GroupMode::GroupsOfFour), 2);
    assert_eq!(group_count(8, GroupMode::GroupsOfFour), 2);
    assert_eq!(group_count(10, GroupMode::GroupsOfFour), 3);
    assert_eq!(group_count(16, GroupMode::GroupsOfFour), 4);
    assert_eq!(group_count(16, GroupMode::SingleGroup), 1);
}

#[test]
fn allocation_balances_groups_and_schedules_each() {
    let ps = participants(10);
    let mut rng = StdRng::seed_from_u64(7);
    let groups = allocate_with_rng(&ps, GroupMode::GroupsOfFour, false, &mut rng);

    let names: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    let sizes: Vec<_> = groups.iter().map(|g| g.teams.len()).collect();
    assert_eq!(sizes, [4, 3, 3]);

    let members: HashSet<_> = groups.iter().flat_map(|g| g.teams.iter().map(|p| p.id)).collect();
    assert_eq!(members, ids(&ps).into_iter().collect::<HashSet<_>>());

    for g in &groups {
        let k = g.teams.len();
        assert_eq!(g.matches.len(), k * (k - 1) / 2);
        assert!(g.matches.iter().all(|m| g.participant(m.home).is_some() && g.participant(m.away).is_some()));
        assert!(g.matches.iter().all(|m| m.id.starts_with(&format!("{}-", g.id))));
    }
}

#[test]
fn single_group_keeps_everyone_together() {
    let ps = participants(6);
    let mut rng = StdRng::seed_from_u64(1);
    let groups = allocate_with_rng(&ps, GroupMode::SingleGroup, true, &mut rng);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].teams.len(), 6);
    assert_eq!(groups[0].matches.len(), 30);
}

#[test]
fn degenerate_allocations() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(allocate_with_rng(&[], GroupMode::GroupsOfFour, false, &mut rng).is_empty());

    let groups = allocate_with_rng(&participants(1), GroupMode::SingleGroup, false, &mut rng);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].matches.is_empty());
}

#[test]
fn suggested_order_takes_two_per_group() {
    let ps = participants(7);
    let mut rng = StdRng::seed_from_u64(3);
    let groups = allocate_with_rng(&ps, GroupMode::GroupsOfFour, false, &mut rng);
    let order = suggested_match_order(&groups);

    let group_ids: Vec<_> = order.iter().map(|s| s.group_id.as_str()).collect();
    assert_eq!(group_ids, ["A", "A", "B", "B", "A", "A", "B", "A", "A"]);
    let indexes: Vec<_> = order.iter().map(|s| s.index).collect();
    assert_eq!(indexes, (1..=9).collect::<Vec<_>>());
}

fn two_team_group() -> (Group, Participant, Participant) {
    let p1 = participant("P1");
    let p2 = participant("P2");
    let group = Group {
        id: "A".into(),
        matches: schedule("A", &[p1.id, p2.id], false),
        teams: vec![p1.clone(), p2.clone()],
    };
    (group, p1, p2)
}

#[test]
fn standings_after_a_home_win() {
    let (mut group, p1, p2) = two_team_group();
    group.matches[0].home_goals = Some(2);
    group.matches[0].away_goals = Some(1);

    let table = standings(&group);
    assert_eq!(table[0].participant_id, p1.id);
    assert_eq!(table[0].played, 1);
    assert_eq!(table[0].won, 1);
    assert_eq!(table[0].points, 3);
    assert_eq!(table[0].goal_difference, 1);

    assert_eq!(table[1].participant_id, p2.id);
    assert_eq!(table[1].played, 1);
    assert_eq!(table[1].lost, 1);
    assert_eq!(table[1].points, 0);
    assert_eq!(table[1].goal_difference, -1);
}

#[test]
fn standings_ignore_half_entered_scores() {
    let (mut group, _, _) = two_team_group();
    group.matches[0].home_goals = Some(5);

    let table = standings(&group);
    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
    assert_eq!(table[0].label, "P1");
}

#[test]
fn standings_draw_gives_a_point_each() {
    let (mut group, _, _) = two_team_group();
    group.matches[0].home_goals = Some(1);
    group.matches[0].away_goals = Some(1);

    let table = standings(&group);
    assert!(table.iter().all(|r| r.drawn == 1 && r.points == 1 && r.goal_difference == 0));
}

#[test]
fn unplayed_members_are_listed_alphabetically() {
    let teams = vec![participant("Charlie"), participant("Alpha"), participant("Bravo")];
    let group = Group {
        id: "A".into(),
        matches: schedule("A", &ids(&teams), false),
        teams,
    };
    let labels: Vec<_> = standings(&group).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, ["Alpha", "Bravo", "Charlie"]);
}

#[test]
fn alphabetical_order_ignores_case() {
    let teams = vec![participant("Zed"), participant("amy"), participant("Bob")];
    let group = Group {
        id: "A".into(),
        matches: Vec::new(),
        teams,
    };
    let labels: Vec<_> = standings(&group).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, ["amy", "Bob", "Zed"]);
}

#[test]
fn tie_breaks_goal_difference_then_goals_for() {
    let [a, b, c, d] = ["A", "B", "C", "D"].map(participant);
    let mut a_b = Match::new("A", 1, 1, Leg::First, a.id, b.id);
    a_b.home_goals = Some(1);
    a_b.away_goals = Some(0);
    let mut c_d = Match::new("A", 1, 2, Leg::First, c.id, d.id);
    c_d.home_goals = Some(3);
    c_d.away_goals = Some(2);

    let group = Group {
        id: "A".into(),
        teams: vec![a, b, c, d],
        matches: vec![a_b, c_d],
    };

    let labels: Vec<_> = standings(&group).into_iter().map(|r| r.label).collect();
    assert_eq!(labels, ["C", "A", "D", "B"]);
}

#[test]
fn standings_are_repeatable() {
    let ps = participants(4);
    let mut group = Group {
        id: "A".into(),
        matches: schedule("A", &ids(&ps), false),
        teams: ps,
    };
    group.matches[0].home_goals = Some(0);
    group.matches[0].away_goals = Some(0);
    group.matches[3].home_goals = Some(4);
    group.matches[3].away_goals = Some(1);

    let first = standings(&group);
    assert_eq!(first, standings(&group));
    assert_eq!(first.len(), 4);
}
