/*! Integration tests for remap.
 *
 * This test suite is organized as a single integration test binary.
 * The module structure mirrors the main library structure:
 * - value: Keypath addressing over the dynamic JSON value model
 * - mapping: Mapping descriptions driven through the Mapper, both directions
 * - collections: Collection bindings, deduplication and additive semantics
 * - primary_keys: Identity resolution through primary-key keypaths
 * - session: Adaptor session lifecycle around root and nested mapping calls
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("remap=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod collections;
mod helpers;
mod session;
mod value;
