//! Head-to-head engine match harness.
//!
//! Plays two `Engine` implementations against each other on a single
//! `Position`, validating every engine move against the legal-move list
//! before applying it, with an optional seeded random opening prefix.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::{BoardStatus, Color};
use crate::game_state::position::Position;
use crate::utils::algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::WhiteWinCheckmate => Some(Color::White),
            MatchOutcome::BlackWinCheckmate => Some(Color::Black),
            MatchOutcome::DrawStalemate | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWinCheckmate { player: PlayerId, color: Color },
    DrawStalemate,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Random legal plies played before the engines take over.
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 0,
            opening_max_plies: 0,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_position: Position,
    pub opening_moves_lan: Vec<String>,
    pub played_moves_lan: Vec<String>,
    /// FEN of the position the match ended in.
    pub final_fen: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded match from the standard setup.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    let mut position = Position::new_game();
    let opening_moves_lan = apply_seeded_random_opening(&mut position, seed, config)?;
    play_engine_match_from_position(
        position,
        engine_white,
        engine_black,
        config,
        opening_moves_lan,
    )
}

/// Play a match from a caller-provided position, without a random opening.
pub fn play_engine_match_from(
    position: Position,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    config: &MatchConfig,
) -> ChessResult<MatchResult> {
    play_engine_match_from_position(position, engine_white, engine_black, config, Vec::new())
}

fn play_engine_match_from_position(
    mut position: Position,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    config: &MatchConfig,
    opening_moves_lan: Vec<String>,
) -> ChessResult<MatchResult> {
    engine_white.new_game();
    engine_black.new_game();

    let started_at = Utc::now();
    let first_engine_ply = position.undo_depth();
    let mut move_counts = [0u32; 2];
    let mut think_ns = [0u128; 2];
    let mut outcome = MatchOutcome::DrawMaxPlies;

    for _ in 0..config.max_plies {
        let mover = position.turn();
        match position.status(mover)? {
            BoardStatus::Checkmate => {
                outcome = match mover {
                    Color::White => MatchOutcome::BlackWinCheckmate,
                    Color::Black => MatchOutcome::WhiteWinCheckmate,
                };
                break;
            }
            BoardStatus::Stalemate => {
                outcome = MatchOutcome::DrawStalemate;
                break;
            }
            BoardStatus::NotInCheck | BoardStatus::Check => {}
        }

        let engine: &mut dyn Engine = match mover {
            Color::White => &mut *engine_white,
            Color::Black => &mut *engine_black,
        };

        let started = Instant::now();
        let out = engine.choose_move(&mut position, &config.go_params)?;
        let elapsed_ns = started.elapsed().as_nanos();
        move_counts[mover.index()] = move_counts[mover.index()].saturating_add(1);
        think_ns[mover.index()] = think_ns[mover.index()].saturating_add(elapsed_ns);

        let chosen = out
            .best_move
            .ok_or_else(|| ChessErrors::EngineReturnedNoMove(engine.name().to_owned()))?;
        if !position.is_legal(&chosen)? {
            return Err(ChessErrors::EngineReturnedIllegalMove {
                engine: engine.name().to_owned(),
                mv: chosen,
            });
        }
        for line in &out.info_lines {
            debug!(engine = engine.name(), "{line}");
        }

        if !position.make_move(&chosen)? {
            return Err(ChessErrors::LegalMoveRejected(chosen));
        }
        debug!(?mover, mv = %chosen, ply = position.ply(), "move played");
    }

    let played_moves_lan = position
        .move_history()
        .skip(first_engine_ply)
        .map(move_to_long_algebraic)
        .collect();
    Ok(MatchResult {
        outcome,
        final_fen: position.to_fen(),
        final_position: position,
        opening_moves_lan,
        played_moves_lan,
        started_at,
        finished_at: Utc::now(),
        white_move_count: move_counts[Color::White.index()],
        black_move_count: move_counts[Color::Black.index()],
        white_total_time_ns: think_ns[Color::White.index()],
        black_total_time_ns: think_ns[Color::Black.index()],
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> ChessResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();
        let (white, black) = if player1_is_white {
            (player1.name(), player2.name())
        } else {
            (player2.name(), player1.name())
        };
        info!(game = i + 1, of = config.games, seed, white, black, "starting game");

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_color, p2_color) = if player1_is_white {
            (Color::White, Color::Black)
        } else {
            (Color::Black, Color::White)
        };
        let counts = [result.white_move_count, result.black_move_count];
        let times = [result.white_total_time_ns, result.black_total_time_ns];
        stats.player1_moves = stats.player1_moves.saturating_add(counts[p1_color.index()]);
        stats.player2_moves = stats.player2_moves.saturating_add(counts[p2_color.index()]);
        stats.player1_total_time_ns = stats
            .player1_total_time_ns
            .saturating_add(times[p1_color.index()]);
        stats.player2_total_time_ns = stats
            .player2_total_time_ns
            .saturating_add(times[p2_color.index()]);

        let mapped = match result.outcome.winner() {
            Some(color) if color == p1_color => {
                stats.player1_wins += 1;
                SeriesOutcome::PlayerWinCheckmate {
                    player: PlayerId::Player1,
                    color,
                }
            }
            Some(color) => {
                stats.player2_wins += 1;
                SeriesOutcome::PlayerWinCheckmate {
                    player: PlayerId::Player2,
                    color,
                }
            }
            None => {
                stats.draws += 1;
                match result.outcome {
                    MatchOutcome::DrawStalemate => SeriesOutcome::DrawStalemate,
                    _ => SeriesOutcome::DrawMaxPlies,
                }
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            result = ?mapped,
            plies = result.played_moves_lan.len(),
            elapsed_ms = (result.finished_at - result.started_at).num_milliseconds(),
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "game finished"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    position: &mut Position,
    seed: u64,
    config: &MatchConfig,
) -> ChessResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves_lan = Vec::<String>::new();

    let low = config.opening_min_plies.min(config.opening_max_plies);
    let high = config.opening_max_plies.max(config.opening_min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let legal_moves = position.legal_moves()?;
        if legal_moves.is_empty() {
            break;
        }
        let chosen = legal_moves[rng.random_range(0..legal_moves.len())];
        if !position.make_move(&chosen)? {
            return Err(ChessErrors::LegalMoveRejected(chosen));
        }
        opening_moves_lan.push(move_to_long_algebraic(&chosen));
    }

    Ok(opening_moves_lan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::EngineOutput;
    use crate::game_state::chess_types::Move;
    use crate::search::minimax::MinimaxConfig;

    struct IllegalEngine;

    impl Engine for IllegalEngine {
        fn name(&self) -> &str {
            "Illegal"
        }

        fn choose_move(
            &mut self,
            _position: &mut Position,
            _params: &GoParams,
        ) -> ChessResult<EngineOutput> {
            Ok(EngineOutput {
                best_move: Some(Move::from_coords(7, 0, 4, 0)),
                info_lines: Vec::new(),
            })
        }
    }

    #[test]
    fn random_engines_play_a_full_match() {
        let config = MatchConfig {
            max_plies: 40,
            opening_min_plies: 2,
            opening_max_plies: 4,
            go_params: GoParams {
                seed: Some(17),
                ..GoParams::default()
            },
        };
        let result = play_engine_match(
            &mut RandomEngine::new(),
            &mut RandomEngine::new(),
            42,
            &config,
        )
        .expect("match should run");

        assert!((2..=4).contains(&result.opening_moves_lan.len()));
        assert_eq!(
            result.played_moves_lan.len() as u32,
            result.white_move_count + result.black_move_count
        );
        assert_eq!(
            result.final_position.undo_depth(),
            result.opening_moves_lan.len() + result.played_moves_lan.len()
        );
        assert!(result.finished_at >= result.started_at);
    }

    #[test]
    fn mate_in_one_ends_the_match() {
        let position = Position::from_fen(
            "r1bqkbnr/1ppp1ppp/2n5/p3p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
        )
        .expect("FEN");
        let config = MatchConfig {
            max_plies: 10,
            go_params: GoParams {
                depth: Some(0),
                seed: Some(1),
            },
            ..MatchConfig::default()
        };
        let mut white = MinimaxEngine::new(MinimaxConfig::default());
        let result = play_engine_match_from(position, &mut white, &mut RandomEngine::new(), &config)
            .expect("match should run");
        assert_eq!(result.outcome, MatchOutcome::WhiteWinCheckmate);
        assert_eq!(result.played_moves_lan, vec!["f3f7".to_owned()]);
        assert_eq!(
            result.final_fen,
            "r1bqkbnr/1ppp1Qpp/2n5/p3p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
        );
        let mut final_position = result.final_position;
        assert!(final_position
            .status(Color::Black)
            .expect("status")
            .is_game_over());
    }

    #[test]
    fn illegal_engine_move_is_an_error() {
        let result = play_engine_match(
            &mut IllegalEngine,
            &mut RandomEngine::new(),
            0,
            &MatchConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ChessErrors::EngineReturnedIllegalMove { .. })
        ));
    }

    #[test]
    fn series_aggregates_every_game() {
        let stats = play_engine_match_series(
            || Box::new(RandomEngine::new()),
            || Box::new(MinimaxEngine::new(MinimaxConfig { depth: 0 })),
            &MatchSeriesConfig {
                games: 3,
                base_seed: 777,
                per_game: MatchConfig {
                    max_plies: 12,
                    go_params: GoParams {
                        seed: Some(5),
                        ..GoParams::default()
                    },
                    ..MatchConfig::default()
                },
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 3);
        assert_eq!(stats.outcomes.len(), 3);
        assert_eq!(
            stats.player1_wins + stats.player2_wins + stats.draws,
            stats.games
        );
        assert!(stats.overall_avg_move_time_ms >= 0.0);
    }
}
