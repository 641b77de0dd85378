pub mod logging;
mod macros;

#[cfg(test)]
mod tests {
    use crate::logging::{LogConfig, Level};

    #[test]
    fn test_scoped_macros_expand_in_expression_position() {
        let value = crate::profile!("test.profile", 2 + 2);
        assert_eq!(value, 4);

        let scoped = crate::profile!(scope: "physics", level: DEBUG, "test.scoped", value * 2);
        assert_eq!(scoped, 8);

        crate::interaction_log!(DEBUG, "grab {}", 1);
        crate::teleport_log!(TRACE, point = ?[1.0, 2.0], "pending target");
    }

    #[test]
    fn test_default_config_is_warn() {
        let config = LogConfig::default();
        assert_eq!(config.global_level(), Level::WARN);
        assert!(!config.should_log("interaction", Level::INFO));
    }
}
