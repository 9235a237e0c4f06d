//! Leaderboard generation.

use crate::entity::Snake;
use protocol::LeaderboardEntry;

/// Rank the player (when given) and every bot by score, then length.
///
/// Built fresh on every call; rank is the 1-based position in the result.
pub fn generate(player: Option<&Snake>, bots: &[Snake]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = player
        .into_iter()
        .chain(bots.iter())
        .map(|snake| LeaderboardEntry {
            id: snake.id,
            name: snake.name.clone(),
            score: snake.score,
            length: snake.len(),
            is_player: snake.is_player(),
            color: snake.color,
        })
        .collect();

    // Stable sort keeps the player ahead of bots on a full tie.
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(b.length.cmp(&a.length)));
    entries
}

/// 1-based rank of the player, if present.
pub fn player_rank(entries: &[LeaderboardEntry]) -> Option<usize> {
    entries.iter().position(|e| e.is_player).map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BotTraits, Chain};
    use protocol::{Color, Point};

    fn snake(id: u32, score: i64, length: usize, player: bool) -> Snake {
        let chain = Chain::straight(Point::new(100.0, 100.0), 0.0, length, 12.0);
        let mut s = if player {
            Snake::player("You", Color::default(), chain, 0.0)
        } else {
            Snake::bot(
                id,
                format!("Bot{}", id),
                Color::default(),
                chain,
                0.0,
                BotTraits {
                    speed: 2.0,
                    aggressiveness: 0.5,
                    last_direction_change_ms: 0,
                    wander_interval_ms: 1000,
                },
            )
        };
        s.score = score;
        s
    }

    #[test]
    fn test_sorted_by_score_then_length() {
        let player = snake(0, 5, 13, true);
        let bots = vec![snake(1, 5, 20, false), snake(2, 9, 10, false), snake(3, 1, 9, false)];
        let board = generate(Some(&player), &bots);

        let ids: Vec<u32> = board.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 0, 3]);
        for pair in board.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].length >= pair[1].length);
            }
        }
        assert_eq!(player_rank(&board), Some(3));
    }

    #[test]
    fn test_without_player() {
        let bots = vec![snake(1, 2, 10, false)];
        let board = generate(None, &bots);
        assert_eq!(board.len(), 1);
        assert_eq!(player_rank(&board), None);
    }
}
