//! Property-based tests for input defaulting

use proptest::prelude::*;
use trello_link_config::{ActionConfig, ActionInputs};
use trello_link_core::{SourceSelection, DEFAULT_CODE_PATTERN, DEFAULT_REGION_FLAGS, DEFAULT_REGION_PATTERN};

fn blank() -> impl Strategy<Value = String> {
    r"[ \t]{0,4}"
}

proptest! {
    #[test]
    fn prop_blank_inputs_use_defaults(a in blank(), b in blank(), c in blank(), d in blank()) {
        let inputs = ActionInputs {
            replacement_regex: Some(a),
            replacement_regex_flags: Some(b),
            title_regex: Some(c),
            short_code_source: Some(d),
            token: Some("token".to_string()),
            ..ActionInputs::default()
        };
        let config = ActionConfig::from_inputs(&inputs).unwrap();

        prop_assert_eq!(config.replacement_regex.as_str(), DEFAULT_REGION_PATTERN);
        prop_assert_eq!(config.replacement_regex_flags.as_str(), DEFAULT_REGION_FLAGS);
        prop_assert_eq!(config.title_regex.as_str(), DEFAULT_CODE_PATTERN);
        prop_assert_eq!(config.short_code_source, SourceSelection::Both);
    }

    #[test]
    fn prop_supplied_input_only_changes_itself(flags in "[gimsu]{1,5}") {
        let inputs = ActionInputs {
            replacement_regex_flags: Some(flags.clone()),
            token: Some("token".to_string()),
            ..ActionInputs::default()
        };
        let config = ActionConfig::from_inputs(&inputs).unwrap();

        prop_assert_eq!(&config.replacement_regex_flags, &flags);
        prop_assert_eq!(config.replacement_regex.as_str(), DEFAULT_REGION_PATTERN);
        prop_assert!(config.compile().is_ok());
    }
}
