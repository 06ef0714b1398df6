//! Tracing subscriber for test binaries.
//!
//! Output goes through the libtest writer so it is captured per test and
//! only shown for failures or with `--nocapture`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVE: &str = "warn";

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string())
}

/// Install the subscriber. Safe to call from every test and from `ctor`
/// constructors; only the first call in a process does anything, and a
/// subscriber installed elsewhere is left in place.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(EnvFilter::new(directive()))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
