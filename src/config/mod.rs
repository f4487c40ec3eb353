pub mod schema;

pub use schema::RouterConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexported_config_default_is_constructible() {
        let config = RouterConfig::default();

        assert_eq!(config.prefixes, vec!["!".to_string()]);
        assert!(!config.bots_allowed);
    }
}
