//! Integration tests for round generation: court capacity, Americano and Mexicano pairing.

mod common;

use common::{completed, names, numbered_players, round, tournament};
use padel_tournament::{
    courts_used, edit_players, ensure_first_round, generate_first_round, generate_next_round,
    generate_round, next_round_number, MatchStatus, Round, Team, TournamentError, TournamentType,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn teams(round: &Round) -> Vec<(Team, Team)> {
    round
        .matches
        .iter()
        .map(|m| (m.team1.clone(), m.team2.clone()))
        .collect()
}

fn pair(a: &str, b: &str) -> Team {
    [a.to_string(), b.to_string()]
}

#[test]
fn first_round_fills_min_of_courts_and_groups_of_four() {
    let mut rng = StdRng::seed_from_u64(1);
    for player_count in 0..=22 {
        for courts in 1..=10u32 {
            let players = numbered_players(player_count);
            let rounds = generate_first_round(&players, courts, TournamentType::Americano, &mut rng);
            let expected = (courts as usize).min(player_count / 4);
            assert_eq!(courts_used(player_count, courts), expected);

            if expected == 0 {
                assert!(rounds.is_empty());
                continue;
            }
            assert_eq!(rounds.len(), 1);
            let r = &rounds[0];
            assert_eq!(r.round, 1);
            assert_eq!(r.matches.len(), expected);

            let mut seen = HashSet::new();
            for (i, m) in r.matches.iter().enumerate() {
                assert_eq!(m.court, i as u32 + 1);
                assert_eq!(m.status, MatchStatus::Upcoming);
                assert_eq!((m.score1, m.score2), (None, None));
                for p in m.players() {
                    assert!(players.contains(p));
                    assert!(seen.insert(p.clone()), "{p} plays twice in one round");
                }
            }
            assert_eq!(seen.len(), expected * 4);
        }
    }
}

#[test]
fn same_seed_gives_same_pairings() {
    let players = numbered_players(9);
    let a = generate_first_round(&players, 2, TournamentType::Americano, &mut StdRng::seed_from_u64(42));
    let b = generate_first_round(&players, 2, TournamentType::Americano, &mut StdRng::seed_from_u64(42));
    assert_eq!(teams(&a[0]), teams(&b[0]));
}

#[test]
fn mexicano_first_round_is_drawn_like_americano() {
    let players = numbered_players(8);
    let americano = generate_first_round(&players, 2, TournamentType::Americano, &mut StdRng::seed_from_u64(3));
    let mexicano = generate_first_round(&players, 2, TournamentType::Mexicano, &mut StdRng::seed_from_u64(3));
    assert_eq!(teams(&americano[0]), teams(&mexicano[0]));

    // no rounds played yet: the random rule applies to the next round too
    let next = generate_next_round(&players, 2, 1, &[], TournamentType::Mexicano, &mut StdRng::seed_from_u64(3));
    assert_eq!(teams(&next.unwrap()), teams(&americano[0]));
}

#[test]
fn mexicano_groups_by_rank_and_pairs_first_with_fourth() {
    let players = numbered_players(8);
    let rounds = vec![round(
        1,
        vec![
            completed(1, 1, ["P1", "P2"], ["P3", "P4"], 15, 6),
            completed(1, 2, ["P5", "P6"], ["P7", "P8"], 12, 9),
        ],
    )];
    // ranking: P1 P2 (15), P5 P6 (12), P7 P8 (9), P3 P4 (6)

    let next = generate_next_round(
        &players,
        2,
        2,
        &rounds,
        TournamentType::Mexicano,
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();

    assert_eq!(next.round, 2);
    assert_eq!(
        teams(&next),
        vec![
            (pair("P1", "P6"), pair("P2", "P5")),
            (pair("P7", "P4"), pair("P8", "P3")),
        ]
    );
}

#[test]
fn mexicano_drops_players_below_the_last_full_group() {
    let players = numbered_players(10);
    let rounds = vec![round(
        1,
        vec![
            completed(1, 1, ["P1", "P2"], ["P3", "P4"], 20, 1),
            completed(1, 2, ["P5", "P6"], ["P7", "P8"], 11, 10),
        ],
    )];
    // P9 and P10 sat out with 0 points; P3 and P4 have 1 point and rank above them

    let next = generate_next_round(&players, 3, 2, &rounds, TournamentType::Mexicano, &mut StdRng::seed_from_u64(0))
        .unwrap();

    assert_eq!(next.matches.len(), 2);
    assert!(next.matches.iter().all(|m| m.players().all(|p| p != "P9" && p != "P10")));
}

#[test]
fn mexicano_respects_court_limit() {
    let players = numbered_players(12);
    let rounds = vec![round(1, vec![completed(1, 1, ["P1", "P2"], ["P3", "P4"], 21, 0)])];
    // P5..P12 have no losses yet, so they rank above P3 and P4

    let next = generate_next_round(&players, 1, 2, &rounds, TournamentType::Mexicano, &mut StdRng::seed_from_u64(0))
        .unwrap();

    assert_eq!(teams(&next), vec![(pair("P1", "P6"), pair("P2", "P5"))]);
}

#[test]
fn no_round_with_fewer_than_four_players() {
    let players = names(&["A", "B", "C"]);
    let mut rng = StdRng::seed_from_u64(0);
    for format in [TournamentType::Americano, TournamentType::Mexicano] {
        assert!(generate_first_round(&players, 4, format, &mut rng).is_empty());
        assert!(generate_next_round(&players, 4, 2, &[], format, &mut rng).is_none());
    }
}

#[test]
fn next_round_number_follows_highest_round() {
    assert_eq!(next_round_number(&[]), 1);
    assert_eq!(next_round_number(&[round(1, vec![]), round(2, vec![])]), 3);
}

#[test]
fn ensure_first_round_only_once() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut t = tournament(numbered_players(6), 2, TournamentType::Mexicano);

    assert!(ensure_first_round(&mut t, &mut rng));
    let first = t.rounds.clone();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].matches.len(), 1);

    assert!(!ensure_first_round(&mut t, &mut rng));
    assert_eq!(t.rounds, first);
}

#[test]
fn ensure_first_round_waits_for_enough_players() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut t = tournament(names(&["A", "B", "C"]), 1, TournamentType::Americano);
    assert!(!ensure_first_round(&mut t, &mut rng));
    assert!(t.rounds.is_empty());

    edit_players(&mut t, names(&["A", "B", "C", "D"])).unwrap();
    assert!(ensure_first_round(&mut t, &mut rng));
    assert_eq!(t.rounds[0].round, 1);
}

#[test]
fn generate_round_appends_contiguous_rounds_with_unique_ids() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut t = tournament(numbered_players(9), 2, TournamentType::Americano);

    for expected in 1..=4 {
        assert_eq!(generate_round(&mut t, &mut rng), Ok(expected));
    }
    let numbers: Vec<_> = t.rounds.iter().map(|r| r.round).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let ids: HashSet<_> = t.rounds.iter().flat_map(|r| r.matches.iter().map(|m| m.id.clone())).collect();
    assert_eq!(ids.len(), 8);
}

#[test]
fn generate_round_keeps_previous_rounds_and_noops_when_players_drop() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut t = tournament(numbered_players(4), 1, TournamentType::Mexicano);
    generate_round(&mut t, &mut rng).unwrap();
    let id = t.rounds[0].matches[0].id.clone();
    t.submit_score(&id, Some(14)).unwrap();
    let before = t.rounds.clone();

    generate_round(&mut t, &mut rng).unwrap();
    assert_eq!(t.rounds[0], before[0]);

    edit_players(&mut t, names(&["P1", "P2", "P3"])).unwrap();
    let snapshot = t.clone();
    assert_eq!(generate_round(&mut t, &mut rng), Err(TournamentError::NotEnoughPlayers));
    assert_eq!(t, snapshot);
}

#[test]
fn eight_player_mexicano_tournament_end_to_end() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut t = tournament(numbered_players(8), 2, TournamentType::Mexicano);
    assert!(ensure_first_round(&mut t, &mut rng));

    let ids: Vec<_> = t.rounds[0].matches.iter().map(|m| m.id.clone()).collect();
    t.submit_score(&ids[0], Some(16)).unwrap();
    t.submit_score(&ids[1], Some(8)).unwrap();

    let ranking = padel_tournament::ranked_players(&t.players, &t.rounds);
    assert_eq!(generate_round(&mut t, &mut rng), Ok(2));

    let r2 = &t.rounds[1];
    for (court, group) in r2.matches.iter().zip(ranking.chunks_exact(4)) {
        assert_eq!(court.team1, pair(&group[0], &group[3]));
        assert_eq!(court.team2, pair(&group[1], &group[2]));
    }
}
