//! Per-frame simulation step
//!
//! Applies input, advances the ball once every `ball_slowness` frames,
//! resolves collisions against the three adjacent cells, clears any blocks
//! that were hit and applies the loss policy.

use glam::IVec2;

use super::direction::{Adjacent, Direction, Occupancy};
use super::grid::Cell;
use super::state::{GameEvent, GameState};
use crate::config::LossPolicy;

/// Input signals for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Move paddle left
    pub left: bool,
    /// Move paddle right
    pub right: bool,
    /// Quit requested
    pub quit: bool,
}

impl GameState {
    /// Advance one frame. Returns true when the outer loop should stop.
    pub fn update(&mut self, input: &FrameInput) -> bool {
        self.events.clear();

        let mut terminate = self.handle_input(input);

        self.frame_count += 1;
        if self.frame_count % self.config.ball_slowness as u64 == 0 {
            terminate |= self.move_ball();
        }

        terminate
    }

    fn handle_input(&mut self, input: &FrameInput) -> bool {
        let step = self.config.paddle_step;
        if input.left {
            self.paddle.move_by(-step, &self.config);
        }
        if input.right {
            self.paddle.move_by(step, &self.config);
        }
        if input.quit {
            log::info!("Quit requested at frame {}", self.frame_count);
        }
        input.quit
    }

    /// Which adjacent cells block the ball. The paddle only counts while
    /// descending; vertical headings only report their front cell.
    fn occupancy(&self, direction: Direction, adjacent: &Adjacent) -> Occupancy {
        let blocked = |pos: IVec2| {
            self.grid[pos].is_solid()
                || (direction.is_down() && self.paddle.covers(pos, &self.config))
        };
        if direction.is_vertical() {
            Occupancy::new(false, blocked(adjacent.front), false)
        } else {
            Occupancy::new(
                blocked(adjacent.left),
                blocked(adjacent.front),
                blocked(adjacent.right),
            )
        }
    }

    /// Move the ball one cell. Returns true if the loss policy ends the game.
    fn move_ball(&mut self) -> bool {
        let direction = self.ball.direction;
        let adjacent = direction.adjacent_cells(self.ball.pos);
        let occupancy = self.occupancy(direction, &adjacent);
        let new_direction = direction.reflect_occupancy(occupancy);

        let mut removed = 0;
        let mut hit_border = false;
        let mut hit_paddle = false;
        for (pos, occupied) in adjacent.cells().into_iter().zip(occupancy.flags()) {
            if !occupied {
                continue;
            }
            let cell = self.grid[pos];
            match cell {
                Cell::Block { color } => {
                    self.grid.remove_block(pos);
                    self.events.push(GameEvent::BlockDestroyed { at: pos, color });
                    log::trace!("Block destroyed at {}", pos);
                    removed += 1;
                }
                Cell::Border => hit_border = true,
                // Occupied but empty: only the paddle does that
                Cell::Empty => hit_paddle = true,
            }
        }
        if hit_border {
            self.events.push(GameEvent::BorderHit);
        }
        if hit_paddle {
            self.events.push(GameEvent::PaddleHit);
        }
        if removed > 0 && self.grid.block_count() == 0 {
            log::debug!("Arena cleared at frame {}", self.frame_count);
            self.events.push(GameEvent::Cleared);
        }

        // Step along the reflected heading, not the old one
        self.ball.direction = new_direction;
        self.ball.pos += new_direction.delta();

        if self.ball.pos.y >= self.config.paddle_row() {
            self.events.push(GameEvent::BallLost);
            log::debug!(
                "Ball lost at {} (frame {}), policy {}",
                self.ball.pos,
                self.frame_count,
                self.config.loss_policy.as_str()
            );
            return match self.config.loss_policy {
                LossPolicy::Terminate => true,
                LossPolicy::Reset => {
                    self.reset();
                    false
                }
            };
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::generate::BandLayout;
    use crate::sim::grid::Grid;
    use crate::sim::state::{Ball, Paddle};
    use crate::sim::Direction::*;

    fn fast_config() -> Config {
        Config {
            ball_slowness: 1,
            ..Default::default()
        }
    }

    fn state_with(config: Config, blocks: &[(i32, i32)], ball: Ball) -> GameState {
        let mut grid = Grid::new(config.columns, config.rows);
        for &(x, y) in blocks {
            assert!(grid.set_block(IVec2::new(x, y), 2));
        }
        GameState::from_parts(config, grid, ball, 1).expect("valid config")
    }

    fn destroyed(state: &GameState) -> Vec<IVec2> {
        state
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::BlockDestroyed { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_block_above_bounces_down() {
        let ball = Ball::new(IVec2::new(5, 6), Up);
        let mut state = state_with(fast_config(), &[(5, 5)], ball);

        assert!(!state.update(&FrameInput::default()));
        assert_eq!(state.grid()[IVec2::new(5, 5)], Cell::Empty);
        assert_eq!(state.ball().direction, Down);
        // Moves along the reflected heading
        assert_eq!(state.ball().pos, IVec2::new(5, 7));
        assert_eq!(destroyed(&state), vec![IVec2::new(5, 5)]);
        assert!(state.events().contains(&GameEvent::Cleared));
    }

    #[test]
    fn test_border_bounce_keeps_border() {
        let ball = Ball::new(IVec2::new(5, 0), Up);
        let mut state = state_with(fast_config(), &[], ball);

        state.update(&FrameInput::default());
        assert_eq!(state.ball().direction, Down);
        assert_eq!(state.ball().pos, IVec2::new(5, 1));
        assert_eq!(state.grid()[IVec2::new(5, -1)], Cell::Border);
        assert!(state.grid().border_intact());
        assert_eq!(state.events(), &[GameEvent::BorderHit]);
    }

    #[test]
    fn test_vertical_ignores_side_blocks() {
        let ball = Ball::new(IVec2::new(5, 6), Up);
        let mut state = state_with(fast_config(), &[(4, 5), (6, 5)], ball);

        state.update(&FrameInput::default());
        assert_eq!(state.ball().direction, Up);
        assert_eq!(state.ball().pos, IVec2::new(5, 5));
        assert_eq!(state.blocks_remaining(), 2);
        assert!(destroyed(&state).is_empty());
    }

    #[test]
    fn test_corner_removes_three_blocks() {
        let ball = Ball::new(IVec2::new(5, 6), UpRight);
        let mut state = state_with(fast_config(), &[(5, 5), (6, 5), (6, 6), (9, 9)], ball);

        state.update(&FrameInput::default());
        assert_eq!(state.ball().direction, DownLeft);
        assert_eq!(state.ball().pos, IVec2::new(4, 7));
        assert_eq!(
            destroyed(&state),
            vec![IVec2::new(5, 5), IVec2::new(6, 5), IVec2::new(6, 6)]
        );
        assert_eq!(state.blocks_remaining(), 1);
    }

    #[test]
    fn test_side_hit_reverses_one_axis() {
        // Block to the right only: horizontal component flips
        let ball = Ball::new(IVec2::new(5, 6), UpRight);
        let mut state = state_with(fast_config(), &[(6, 6)], ball);

        state.update(&FrameInput::default());
        assert_eq!(state.ball().direction, UpLeft);
        assert_eq!(state.ball().pos, IVec2::new(4, 5));
    }

    #[test]
    fn test_throttled_movement() {
        let config = Config {
            ball_slowness: 5,
            ..Default::default()
        };
        let start = IVec2::new(10, 30);
        let mut state = state_with(config, &[], Ball::new(start, UpLeft));

        for frame in 1..5 {
            state.update(&FrameInput::default());
            assert_eq!(state.frame_count(), frame);
            assert_eq!(state.ball().pos, start);
        }
        state.update(&FrameInput::default());
        assert_eq!(state.frame_count(), 5);
        assert_eq!(state.ball().pos, IVec2::new(9, 29));
    }

    #[test]
    fn test_paddle_deflects_descending_ball() {
        let config = fast_config();
        let paddle = Paddle::centered(&config);
        let row = config.paddle_row();
        let ball = Ball::new(IVec2::new(paddle.left + 2, row - 1), Down);
        let mut state = state_with(config, &[], ball);

        assert!(!state.update(&FrameInput::default()));
        assert_eq!(state.ball().direction, Up);
        assert_eq!(state.ball().pos, IVec2::new(paddle.left + 2, row - 2));
        assert_eq!(state.events(), &[GameEvent::PaddleHit]);
    }

    #[test]
    fn test_paddle_beneath_down_right() {
        let config = fast_config();
        let paddle = Paddle::centered(&config);
        let row = config.paddle_row();
        let x = paddle.left + 3;
        let ball = Ball::new(IVec2::new(x, row - 1), DownRight);
        let mut state = state_with(config, &[], ball);

        state.update(&FrameInput::default());
        // (left=false, front=true, right=true)
        assert_eq!(state.ball().direction, UpRight);
        assert_eq!(state.ball().pos, IVec2::new(x + 1, row - 2));
    }

    #[test]
    fn test_paddle_ignored_while_rising() {
        let config = fast_config();
        let paddle = Paddle::centered(&config);
        let row = config.paddle_row();
        // Right-hand lookahead cell is the paddle's leftmost cell
        let ball = Ball::new(IVec2::new(paddle.left - 1, row), UpRight);
        let mut state = state_with(config, &[], ball);

        state.update(&FrameInput::default());
        assert_eq!(state.ball().direction, UpRight);
        assert_eq!(state.ball().pos, IVec2::new(paddle.left, row - 1));
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_ball_lost_terminates() {
        let config = Config {
            loss_policy: LossPolicy::Terminate,
            ..fast_config()
        };
        let row = config.paddle_row();
        let ball = Ball::new(IVec2::new(2, row - 1), Down);
        let mut state = state_with(config, &[], ball);

        assert!(state.update(&FrameInput::default()));
        assert!(state.events().contains(&GameEvent::BallLost));
        assert_eq!(state.ball().pos, IVec2::new(2, row));
    }

    #[test]
    fn test_ball_lost_resets() {
        let config = fast_config();
        let row = config.paddle_row();
        let ball = Ball::new(IVec2::new(2, row - 1), DownRight);
        let mut state = state_with(config.clone(), &[], ball);

        assert!(!state.update(&FrameInput::default()));
        assert_eq!(state.events(), &[GameEvent::BallLost, GameEvent::Reset]);
        assert_eq!(state.ball(), Ball::serve(&config));
        assert_eq!(state.frame_count(), 0);
        assert!(state.blocks_remaining() > 0);
    }

    #[test]
    fn test_quit_is_reported_same_frame() {
        let mut state = GameState::new(Config::default(), 3).expect("valid config");
        let quit = FrameInput {
            quit: true,
            ..Default::default()
        };
        assert!(state.update(&quit));
        assert_eq!(state.frame_count(), 1);
    }

    #[test]
    fn test_paddle_input_clamps() {
        // Ball effectively frozen so a reset cannot recenter the paddle
        let config = Config {
            ball_slowness: 1000,
            ..Default::default()
        };
        let max = config.columns - config.paddle_width;
        let mut state = GameState::new(config, 3).expect("valid config");
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        let right = FrameInput {
            right: true,
            ..Default::default()
        };

        for _ in 0..60 {
            state.update(&left);
        }
        assert_eq!(state.paddle().left, 0);
        for _ in 0..60 {
            state.update(&right);
        }
        assert_eq!(state.paddle().left, max);
        // Both at once cancel out
        state.update(&FrameInput {
            left: true,
            right: true,
            quit: false,
        });
        assert_eq!(state.paddle().left, max);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut state = GameState::new(fast_config(), 2024).expect("valid config");
        let max_left = state.config().columns - state.config().paddle_width;

        for frame in 0..5000u32 {
            let before = state.grid().clone();
            // Sweep the paddle back and forth
            let input = FrameInput {
                left: (frame / 40) % 2 == 0,
                right: (frame / 40) % 2 == 1,
                quit: false,
            };
            assert!(!state.update(&input));
            let after = state.grid();

            assert!(after.border_intact());
            assert!((0..=max_left).contains(&state.paddle().left));
            assert!(after.in_bounds(state.ball().pos));

            if state.events().contains(&GameEvent::Reset) {
                continue;
            }
            let mut cleared = 0;
            for ((pos, old), (_, new)) in before.iter().zip(after.iter()) {
                if old != new {
                    assert!(old.is_destructible(), "{pos} changed from {old:?}");
                    assert_eq!(new, Cell::Empty);
                    cleared += 1;
                }
            }
            assert!(cleared <= 3);
            assert_eq!(cleared, destroyed(&state).len());
        }
    }

    #[test]
    fn test_reset_twice_gives_independent_valid_grids() {
        let config = Config::default();
        let layout = BandLayout::for_rows(config.rows);
        let mut state = GameState::new(config.clone(), 11).expect("valid config");

        state.reset();
        let first = state.grid().clone();
        state.reset();
        let second = state.grid().clone();

        assert_ne!(first, second);
        for grid in [&first, &second] {
            assert!(grid.border_intact());
            for y in layout.dense.clone() {
                for x in 0..config.columns {
                    assert!(grid[IVec2::new(x, y)].is_destructible());
                }
            }
        }

        // Density across many resets still falls through the gradient band
        let mut counts = vec![0usize; layout.gradient.len()];
        for _ in 0..150 {
            state.reset();
            for (i, y) in layout.gradient.clone().enumerate() {
                counts[i] += (0..config.columns)
                    .filter(|&x| state.grid()[IVec2::new(x, y)].is_destructible())
                    .count();
            }
        }
        let tolerance = 150 * config.columns as usize / 100;
        assert!(counts.windows(2).all(|w| w[1] <= w[0] + tolerance), "{counts:?}");
    }
}
