//! Prefix resolution and stripping.

use super::Router;

impl Router {
    /// The prefixes in effect right now: the dynamic function's result if
    /// one is configured, otherwise the static list.
    pub fn get_prefixes(&self) -> Vec<String> {
        match &self.prefix_func {
            Some(prefix_func) => prefix_func(),
            None => self.prefixes.clone(),
        }
    }
}

/// Strip the first prefix in `prefixes` that `text` starts with.
///
/// List order decides between overlapping prefixes: `["!", "!!"]` strips a
/// single `!` from `"!!ping"`.
pub fn match_and_strip<'a>(text: &'a str, prefixes: &[String], ignore_case: bool) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        if ignore_case {
            strip_prefix_folded(text, prefix)
        } else {
            text.strip_prefix(prefix.as_str())
        }
    })
}

fn strip_prefix_folded<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text;
    for expected in prefix.chars() {
        let mut chars = rest.chars();
        let actual = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouterConfig;

    fn prefixes(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn first_listed_prefix_wins_over_longer_one() {
        let list = prefixes(&["!", "!!"]);
        assert_eq!(match_and_strip("!!ping", &list, false), Some("!ping"));

        let list = prefixes(&["!!", "!"]);
        assert_eq!(match_and_strip("!!ping", &list, false), Some("ping"));
    }

    #[test]
    fn case_sensitive_prefix_requires_exact_case() {
        let list = prefixes(&["bot "]);
        assert_eq!(match_and_strip("bot ping", &list, false), Some("ping"));
        assert_eq!(match_and_strip("BOT ping", &list, false), None);
    }

    #[test]
    fn ignore_case_prefix_keeps_remainder_case() {
        let list = prefixes(&["bot "]);
        assert_eq!(match_and_strip("BoT Ping", &list, true), Some("Ping"));
        assert_eq!(match_and_strip("Ärger", &prefixes(&["är"]), true), Some("ger"));
    }

    #[test]
    fn no_matching_prefix() {
        let list = prefixes(&["!", "?"]);
        assert_eq!(match_and_strip("ping", &list, true), None);
        assert_eq!(match_and_strip("!", &prefixes(&["!!"]), false), None);
        assert_eq!(match_and_strip("anything", &[], false), None);
    }

    #[test]
    fn dynamic_prefixes_replace_static_list() {
        let router = Router::create(RouterConfig::default());
        assert_eq!(router.get_prefixes(), vec!["!".to_string()]);

        let router = router.with_prefix_func(|| vec!["$".to_string(), "%".to_string()]);
        assert_eq!(router.get_prefixes(), vec!["$".to_string(), "%".to_string()]);
    }
}
