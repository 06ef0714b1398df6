// Shared proptest configuration for integration tests.
//
// Env knobs:
// - PROPTEST_CASES: cases per property (default 32).
// - PROPTEST_MAX_SHRINK_MS: optional cap on shrinking time.

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    let cases: u32 = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1);

    let max_shrink_time: u32 = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // No regression files for integration binaries
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
