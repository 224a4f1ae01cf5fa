/*! Integration tests for formstate.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Path parsing, canonical form and the builder
 * - value: Deep reads and copy-on-path updates of the model
 * - register: The debounced field register
 * - status: Status map reconciliation against the register
 * - validation: Path enumeration, field resolution and declarative rules
 * - state: The batching state updater
 * - form: End-to-end scenarios through the form engine
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(formstate::constants::DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
mod path;
mod register;
mod state;
mod status;
mod validation;
mod value;
