//! Tests for player priority resolution.

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use bevy::prelude::*;

    use crate::characters::CharacterId;
    use crate::config::{AimMode, SimulationConfig};
    use crate::input::PlayerInput;
    use crate::player::controller::KEYBOARD_AIM_PITCH;
    use crate::player::*;
    use crate::state::GameState;

    const DT: f32 = 1.0 / 60.0;

    fn setup(character: CharacterId) -> (GameState, PlayerState, SimulationConfig) {
        (
            GameState::new_game(character, 0.0),
            PlayerState::default(),
            SimulationConfig::default(),
        )
    }

    #[test]
    fn test_forward_walk_and_sprint() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        let input = PlayerInput {
            forward: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(outcome.frame.intent, MovementIntent::Forward);
        assert!((player.position.z - 4.5 * DT).abs() < 1e-5);

        let sprint = PlayerInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        let before = player.position.z;
        let outcome = resolve_frame(&mut state, &mut player, &sprint, &config, DT);
        assert_eq!(outcome.frame.intent, MovementIntent::Run);
        assert!((player.position.z - before - 4.5 * 1.5 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_backward_is_slower_and_ignores_sprint() {
        let (mut state, mut player, config) = setup(CharacterId::Claire);
        let input = PlayerInput {
            backward: true,
            sprint: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(outcome.frame.intent, MovementIntent::Backward);
        assert!((player.position.z + 6.0 * 0.6 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_aiming_locks_translation() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        let input = PlayerInput {
            forward: true,
            aim_held: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!(outcome.frame.aiming);
        assert_eq!(outcome.frame.intent, MovementIntent::Idle);
        assert_eq!(player.position, Vec3::ZERO);
    }

    #[test]
    fn test_reloading_locks_translation_except_exempt() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        state.flags.reloading = true;
        let input = PlayerInput {
            forward: true,
            ..Default::default()
        };
        resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(player.position, Vec3::ZERO);

        let (mut state, mut player, config) = setup(CharacterId::Hunk);
        state.flags.reloading = true;
        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(outcome.frame.intent, MovementIntent::Forward);
        assert!((player.position.z - 3.5 * 0.7 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_exempt_character_strafes_while_aiming() {
        let (mut state, mut player, config) = setup(CharacterId::Hunk);
        let input = PlayerInput {
            left: true,
            aim_held: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!(outcome.frame.aiming);
        assert_eq!(outcome.frame.intent, MovementIntent::Forward);
        assert_eq!(player.yaw, 0.0);
        assert!((player.position.x - 3.5 * 0.4 * DT).abs() < 1e-5);
    }

    #[test]
    fn test_left_right_rotate_in_tank_mode() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        let input = PlayerInput {
            left: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(outcome.frame.intent, MovementIntent::Idle);
        assert!((player.yaw - 3.0 * DT).abs() < 1e-6);
        assert_eq!(player.position, Vec3::ZERO);
    }

    #[test]
    fn test_quick_turn_blocks_everything_and_eases_to_half_turn() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        assert!(start_quick_turn(&mut state, &mut player, false, config.quick_turn_secs));
        assert!(!start_quick_turn(&mut state, &mut player, false, config.quick_turn_secs));

        let input = PlayerInput {
            forward: true,
            aim_held: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, 0.1);
        assert!(!outcome.frame.aiming);
        assert_eq!(player.position, Vec3::ZERO);
        // p = 1/3 → t = 1 - (2/3)^3
        let expected = PI * (1.0 - (2.0f32 / 3.0).powi(3));
        assert!((player.yaw - expected).abs() < 1e-4, "yaw = {}", player.yaw);

        for _ in 0..3 {
            resolve_frame(&mut state, &mut player, &input, &config, 0.1);
        }
        assert!(!state.flags.quick_turning);
        assert!((player.yaw - PI).abs() < 1e-5);
    }

    #[test]
    fn test_quick_turn_rejected_while_aiming_or_reloading() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        assert!(!start_quick_turn(&mut state, &mut player, true, config.quick_turn_secs));

        state.flags.reloading = true;
        assert!(!start_quick_turn(&mut state, &mut player, false, config.quick_turn_secs));
        assert!(player.quick_turn.is_none());
    }

    #[test]
    fn test_keyboard_aim_controls_pitch_and_yaw() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        state.flags.keyboard_aim = true;
        let input = PlayerInput {
            forward: true,
            right: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!(outcome.frame.aiming);
        assert_eq!(outcome.frame.intent, MovementIntent::Idle);
        assert_eq!(player.position, Vec3::ZERO);
        assert!((player.aim_pitch - 0.002 * 100.0 * DT).abs() < 1e-6);
        assert!((player.yaw + 3.0 * DT).abs() < 1e-6);

        for _ in 0..2000 {
            resolve_frame(&mut state, &mut player, &input, &config, DT);
        }
        assert!((player.aim_pitch - KEYBOARD_AIM_PITCH).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_aim_mode_uses_latch() {
        let (mut state, mut player, mut config) = setup(CharacterId::Claire);
        config.aim_mode = AimMode::Toggle;
        let input = PlayerInput {
            aim_held: true,
            ..Default::default()
        };

        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!(!outcome.frame.aiming);

        state.flags.aim_latched = true;
        let outcome = resolve_frame(&mut state, &mut player, &PlayerInput::default(), &config, DT);
        assert!(outcome.frame.aiming);
    }

    #[test]
    fn test_mouse_look_while_aiming_clamps_pitch() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        let input = PlayerInput {
            aim_held: true,
            look_delta: Vec2::new(100.0, -10_000.0),
            ..Default::default()
        };

        resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!((player.yaw + 0.2).abs() < 1e-6);
        assert_eq!(player.aim_pitch, config.max_pitch);

        resolve_frame(&mut state, &mut player, &PlayerInput::default(), &config, DT);
        assert_eq!(player.aim_pitch, 0.0);
    }

    #[test]
    fn test_dance_blocks_movement_and_is_cancelled_by_input() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        state.flags.dancing = true;

        let idle = resolve_frame(&mut state, &mut player, &PlayerInput::default(), &config, DT);
        assert!(!idle.dance_cancelled);
        assert!(state.flags.dancing);

        let input = PlayerInput {
            forward: true,
            ..Default::default()
        };
        let outcome = resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert!(outcome.dance_cancelled);
        assert!(!state.flags.dancing);
        // Кадр отмены: без движения
        assert_eq!(player.position, Vec3::ZERO);
    }

    #[test]
    fn test_freecam_and_death_freeze_character() {
        let (mut state, mut player, config) = setup(CharacterId::Leon);
        let input = PlayerInput {
            forward: true,
            ..Default::default()
        };

        state.flags.freecam = true;
        resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(player.position, Vec3::ZERO);

        state.flags.freecam = false;
        state.flags.playing_death_animation = true;
        resolve_frame(&mut state, &mut player, &input, &config, DT);
        assert_eq!(player.position, Vec3::ZERO);
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
