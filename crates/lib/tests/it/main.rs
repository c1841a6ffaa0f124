/*! Integration tests for keytree.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - doc: Tests for the Document container and its top-level operations
 * - paths: Tests for path-addressed writes (auto-vivification, appends)
 * - delete: Tests for path-addressed deletes and cascade pruning
 * - schema: Tests for schema discovery
 * - plain: Tests for plain-tree construction and flattening
 * - errors: Tests for the typed error surface
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("keytree=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod delete;
mod paths;
mod plain;
