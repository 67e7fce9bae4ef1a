//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, WalkConfig};
use proptest::prelude::*;

fn pattern_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}/\\*\\*",
        "\\*\\.[a-z]{1,5}",
        "\\*\\*/[a-z]{1,8}/\\*\\*",
    ]
}

fn walk_strategy() -> impl Strategy<Value = WalkConfig> {
    (prop::option::of(any::<bool>()), prop::option::of(any::<bool>())).prop_map(
        |(follow_symlinks, skip_hidden)| WalkConfig {
            follow_symlinks,
            skip_hidden,
        },
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(prop::collection::vec(pattern_strategy(), 0..4)),
        prop::option::of(prop::collection::vec(pattern_strategy(), 0..4)),
        prop::option::of(walk_strategy()),
    )
        .prop_map(|(enabled, include, exclude, walk)| Config {
            enabled,
            include,
            exclude,
            walk,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Set fields from the higher-precedence source always win
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        match high.enabled {
            Some(v) => prop_assert_eq!(result.enabled, Some(v)),
            None => prop_assert_eq!(result.enabled, low.enabled),
        }
        if high.include.is_some() {
            prop_assert_eq!(&result.include, &high.include);
        } else {
            prop_assert_eq!(&result.include, &low.include);
        }
    }

    // Exclude patterns only ever accumulate
    #[test]
    fn merge_exclude_is_union(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        for pattern in low.exclude_patterns().iter().chain(high.exclude_patterns()) {
            prop_assert!(result.exclude_patterns().contains(pattern));
        }
        for pattern in result.exclude_patterns() {
            prop_assert!(
                low.exclude_patterns().contains(pattern) || high.exclude_patterns().contains(pattern)
            );
        }
    }

    // Merging a config into itself changes nothing observable
    #[test]
    fn merge_self_is_stable(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);

        prop_assert_eq!(result.is_enabled(), config.is_enabled());
        prop_assert_eq!(result.include_patterns(), config.include_patterns());
        prop_assert_eq!(result.walk_options(), config.walk_options());
    }
}
