//! Tests for RON config loading.

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SimulationConfig::from_ron_str("(seed: 7, aim_mode: Toggle)").unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.aim_mode, AimMode::Toggle);
        assert_eq!(config.tick_hz, 60.0);
        assert_eq!(config.quick_turn_secs, 0.3);
    }

    #[test]
    fn test_model_override() {
        let config = SimulationConfig::from_ron_str(
            r#"(enemy_models: { Tank: "custom/tank.glb" })"#,
        )
        .unwrap();

        assert_eq!(config.model_for(EnemyArchetype::Tank), "custom/tank.glb");
        assert_eq!(
            config.model_for(EnemyArchetype::Walker1),
            EnemyArchetype::Walker1.default_model()
        );
    }

    #[test]
    fn test_rejects_non_positive_durations() {
        let error = SimulationConfig::from_ron_str("(spawn_interval_secs: 0.0)").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)), "{error}");

        let error = SimulationConfig::from_ron_str("(tick_hz: -1.0)").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_positive_max_pitch() {
        // clamp(-max, max) с отрицательным max паникует в контроллере
        let error = SimulationConfig::from_ron_str("(max_pitch: -0.5)").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)), "{error}");

        let error = SimulationConfig::from_ron_str("(max_pitch: 0.0)").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let error = SimulationConfig::from_ron_str("(seed: \"not a number\")").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = SimulationConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn test_written_config_loads_from_disk() {
        let mut config = SimulationConfig {
            seed: 99,
            spawn_interval_secs: 1.5,
            ..Default::default()
        };
        config
            .enemy_models
            .insert(EnemyArchetype::Runner3, "custom/runner.glb".to_string());

        let path = std::env::temp_dir().join(format!("hordefall_config_{}.ron", std::process::id()));
        std::fs::write(&path, config.to_ron_string().unwrap()).unwrap();
        let loaded = SimulationConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
