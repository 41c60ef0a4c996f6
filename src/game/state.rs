//! Match state, markers, messages and the pure gameplay rules.
//!
//! Everything here is free of ECS queries so it can be unit-tested directly;
//! the systems in `control`, `collision` and `end` apply these rules to the
//! entities.

use bevy::prelude::*;

// ── Match state ───────────────────────────────────────────────────────────────

/// Where the match is in its lifecycle.
///
/// `Attached → Launched → {Won | Lost} → Attached` (the last edge via reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Ball rides on the paddle, waiting for launch.
    Attached,
    /// Ball in play.
    Launched,
    Won,
    Lost,
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Banner shown in the game-over overlay.
    pub fn banner(self) -> &'static str {
        match self {
            Outcome::Won => "YOU WIN!",
            Outcome::Lost => "GAME OVER",
        }
    }

    pub fn banner_color(self) -> Color {
        match self {
            Outcome::Won => Color::srgb_u8(0xff, 0xd7, 0x00),
            Outcome::Lost => Color::WHITE,
        }
    }
}

/// The three match flags.
///
/// `won` only means something while `game_over` is set; all three are cleared
/// together by [`MatchState::reset`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchState {
    game_over: bool,
    won: bool,
    ball_launched: bool,
}

impl MatchState {
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn won(&self) -> bool {
        self.game_over && self.won
    }

    pub fn ball_launched(&self) -> bool {
        self.ball_launched
    }

    pub fn phase(&self) -> MatchPhase {
        match (self.game_over, self.won, self.ball_launched) {
            (true, true, _) => MatchPhase::Won,
            (true, false, _) => MatchPhase::Lost,
            (false, _, true) => MatchPhase::Launched,
            (false, _, false) => MatchPhase::Attached,
        }
    }

    /// Release the ball.  Returns `false` unless the ball was attached.
    pub fn launch(&mut self) -> bool {
        if self.phase() != MatchPhase::Attached {
            return false;
        }
        self.ball_launched = true;
        true
    }

    /// Enter an end state.  Returns `false` if the match is already over, so
    /// repeated triggers produce a single transition.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.won = outcome == Outcome::Won;
        true
    }

    /// Clear every flag, as at the start of a fresh match.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Input intent ──────────────────────────────────────────────────────────────

/// Per-frame input, decoupled from the keyboard so the rules can be driven
/// directly in tests.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchInput {
    pub left: bool,
    pub right: bool,
    /// Launch/restart key went down this frame (edge, not level).
    pub launch_pressed: bool,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Everything spawned by the match scene; despawned on `OnExit(Match)`.
#[derive(Component)]
pub struct MatchScoped;

#[derive(Component)]
pub struct Paddle;

#[derive(Component)]
pub struct Ball;

/// Invisible wall collider along the left, top or right edge.
#[derive(Component)]
pub struct Wall;

/// Sensor strip just below the bottom edge; touching it loses the match.
#[derive(Component)]
pub struct OutOfBoundsSensor;

/// Centred "YOU WIN!" / "GAME OVER" banner, empty during play.
#[derive(Component)]
pub struct GameOverText;

/// "Press SPACE to play again", visible only in an end state.
#[derive(Component)]
pub struct RestartPrompt;

/// "Press SPACE to launch", visible while the ball waits on the paddle.
#[derive(Component)]
pub struct LaunchPrompt;

/// One-shot paddle-hit sound entity.
#[derive(Component)]
pub struct HitSound;

// ── Messages ──────────────────────────────────────────────────────────────────

/// Written once per transition into an end state.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEnded(pub Outcome);

/// Launch key pressed while the match is over.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartRequested;

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Move the paddle one frame.
///
/// Left wins when both directions are held.  The result is clamped so the
/// paddle stays fully inside `[half_width, field_width − half_width]`.
pub fn step_paddle_x(
    x: f32,
    input: &MatchInput,
    speed: f32,
    half_width: f32,
    field_width: f32,
) -> f32 {
    if input.left {
        (x - speed).max(half_width)
    } else if input.right {
        (x + speed).min(field_width - half_width)
    } else {
        x
    }
}

/// Horizontal deflection factor for a paddle hit.
///
/// −1 at the paddle's left edge, +1 at its right edge; contacts beyond the
/// edges produce larger magnitudes.
pub fn paddle_deflection(ball_x: f32, paddle_x: f32, paddle_half_width: f32) -> f32 {
    (ball_x - paddle_x) / paddle_half_width
}

/// Launch velocity in field coordinates: up and to the right at 45°.
pub fn launch_velocity(ball_speed: f32) -> Vec2 {
    Vec2::new(ball_speed, -ball_speed)
}

/// Where the ball sits while attached to the paddle.
pub fn attached_ball_position(paddle: Vec2, offset: f32) -> Vec2 {
    Vec2::new(paddle.x, paddle.y - offset)
}
