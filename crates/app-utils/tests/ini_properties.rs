//! Property-based tests for the INI parser

use app_utils::{ConfigParser, IniParser};
use core_model::ConfigSource;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Parsing arbitrary text must not panic
    #[test]
    fn prop_parse_never_panics(input in "\\PC*") {
        let _ = IniParser.parse(&input);
    }

    /// A written key/value pair reads back trimmed
    #[test]
    fn prop_key_value_reads_back(
        section in "[a-z_]{1,12}",
        key in "[a-z][a-z0-9]{0,4}",
        value in "[a-z(),.=&| ]{0,40}",
    ) {
        let text = format!("[{}]\n{} = {}\n", section, key, value);
        let doc = IniParser.parse(&text).unwrap();
        let expected = value.trim();
        prop_assert_eq!(doc.get_string(&format!("{}::{}", section, key)), expected);
    }
}
