use crate::model::structures::{play::Play, play_rank::PlayRank};
use std::{cmp::Ordering, collections::HashSet};

/// Whether a candidate's performance value falls inside the acceptance
/// window (inclusive on both ends).
pub fn within_window(performance_points: f64, min_pp: f64, max_pp: f64) -> bool {
    performance_points >= min_pp && performance_points <= max_pp
}

/// Whether the beatmap is absent from the user's own play history.
pub fn not_ignored(beatmap_id: i64, ignored: &HashSet<i64>) -> bool {
    !ignored.contains(&beatmap_id)
}

/// Full-combo gate: passes unless the gate is enabled and the grade is
/// below S.
pub fn passes_combo_gate(rank: PlayRank, only_full_combo: bool) -> bool {
    !only_full_combo || rank >= PlayRank::S
}

/// Comparator ranking plays by absolute performance distance from `target`,
/// closest first. Used for both leaderboard and player-history ranking.
pub fn by_pp_distance(target: f64) -> impl Fn(&Play, &Play) -> Ordering {
    move |a, b| {
        let da = (a.performance_points - target).abs();
        let db = (b.performance_points - target).abs();
        da.total_cmp(&db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::generate_play;

    #[test]
    fn test_within_window_bounds_inclusive() {
        assert!(within_window(50.0, 50.0, 144.0));
        assert!(within_window(144.0, 50.0, 144.0));
        assert!(within_window(100.0, 50.0, 144.0));
        assert!(!within_window(49.0, 50.0, 144.0));
        assert!(!within_window(145.0, 50.0, 144.0));
    }

    #[test]
    fn test_not_ignored() {
        let ignored: HashSet<i64> = [10, 20, 30].into_iter().collect();
        assert!(not_ignored(40, &ignored));
        assert!(!not_ignored(20, &ignored));
    }

    #[test]
    fn test_combo_gate_disabled_passes_everything() {
        assert!(passes_combo_gate(PlayRank::D, false));
        assert!(passes_combo_gate(PlayRank::Ssh, false));
    }

    #[test]
    fn test_combo_gate_enabled_requires_s_or_better() {
        assert!(!passes_combo_gate(PlayRank::D, true));
        assert!(!passes_combo_gate(PlayRank::A, true));
        assert!(passes_combo_gate(PlayRank::S, true));
        assert!(passes_combo_gate(PlayRank::Ss, true));
        assert!(passes_combo_gate(PlayRank::Ssh, true));
    }

    #[test]
    fn test_by_pp_distance_orders_closest_first() {
        let mut plays = vec![
            generate_play(1, 100, 250.0),
            generate_play(2, 101, 95.0),
            generate_play(3, 102, 130.0),
        ];

        plays.sort_by(by_pp_distance(100.0));

        let ids: Vec<i64> = plays.iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_by_pp_distance_distance_is_absolute() {
        let mut plays = vec![generate_play(1, 100, 160.0), generate_play(2, 101, 45.0)];

        // |160 - 100| = 60, |45 - 100| = 55
        plays.sort_by(by_pp_distance(100.0));

        assert_eq!(plays[0].player_id, 2);
    }
}
