//! Fuzz target for load_model_from_str
//!
//! Arbitrary `.conf` text must parse or fail cleanly. A loaded model must
//! hold every required section.

#![no_main]

use app_utils::{load_model_from_str, ConfigError};
use core_model::{ModelError, Section};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    match load_model_from_str(data) {
        Ok(model) => {
            for section in Section::REQUIRED {
                assert!(model.has_section(section));
            }
        }
        Err(ConfigError::Parse { line, .. }) => {
            assert!(line >= 1 && line <= data.lines().count());
        }
        Err(ConfigError::Model(ModelError::MissingRequiredSections { sections })) => {
            assert!(!sections.is_empty());
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
});
