//! Integration test: local files importing modules served over HTTP.
//!
//! Starts a minimal module server, flattens a project whose entry imports a
//! remote module (which imports a sibling), and checks the cache absorbs
//! repeat fetches.

mod common;

use std::fs;
use std::sync::Arc;

use jsbuild_core::assemble::{Assembler, IMPORTS_DIR, MAIN_FILE};
use jsbuild_core::cache::Cache;
use jsbuild_core::fetch::{http_cache_key, CurlTransport, Fetcher};
use jsbuild_core::graph::CyclePolicy;
use jsbuild_core::locator::Locator;
use jsbuild_core::Error;
use tempfile::tempdir;

fn assembler(cache: &Cache) -> Assembler {
    let fetcher = Fetcher::with_defaults(cache.clone(), Arc::new(CurlTransport::new()));
    Assembler::new(fetcher, CyclePolicy::Reject)
}

#[test]
fn remote_fetch_is_cached_after_first_transfer() {
    let server = common::module_server::start(&[("/x.js", "export const x = 42;\n")]);
    let cache_dir = tempdir().unwrap();
    let cache = Cache::open_at(cache_dir.path()).unwrap();
    let fetcher = Fetcher::with_defaults(cache.clone(), Arc::new(CurlTransport::new()));
    let loc = Locator::parse(&server.url("/x.js")).unwrap();

    assert_eq!(fetcher.fetch(&loc).unwrap(), "export const x = 42;\n");
    assert_eq!(fetcher.fetch(&loc).unwrap(), "export const x = 42;\n");
    assert_eq!(server.hits(), 1, "second fetch must come from the cache");
    assert_eq!(
        cache.get(&http_cache_key(loc.as_str())).unwrap().unwrap(),
        b"export const x = 42;\n"
    );
}

#[test]
fn flatten_mixes_local_and_remote_modules() {
    let server = common::module_server::start(&[
        ("/lib/a.js", "import {b} from \"./b.js\";\nexport const a = b + 1;\n"),
        ("/lib/b.js", "export const b = 1;\n"),
    ]);
    let cache_dir = tempdir().unwrap();
    let cache = Cache::open_at(cache_dir.path()).unwrap();

    let proj = tempdir().unwrap();
    let entry = proj.path().join("main.js");
    fs::write(
        &entry,
        format!(
            "import {{a}} from \"{}\";\nconsole.log(a);\n",
            server.url("/lib/a.js")
        ),
    )
    .unwrap();

    let asm = assembler(&cache);
    let flat = asm.flatten(&entry).unwrap();

    let a = Locator::parse(&server.url("/lib/a.js")).unwrap();
    let b = Locator::parse(&server.url("/lib/b.js")).unwrap();
    let main = fs::read_to_string(flat.dir().join(MAIN_FILE)).unwrap();
    assert_eq!(
        main,
        format!(
            "import {{a}} from \"./imports/{}\";\nconsole.log(a);\n",
            a.flat_filename()
        )
    );
    let a_out = fs::read_to_string(flat.dir().join(IMPORTS_DIR).join(a.flat_filename())).unwrap();
    assert_eq!(
        a_out,
        format!(
            "import {{b}} from \"./{}\";\nexport const a = b + 1;\n",
            b.flat_filename()
        )
    );
    assert!(flat.dir().join(IMPORTS_DIR).join(b.flat_filename()).is_file());
    let after_first = server.hits();

    // A second build is served entirely from the cache.
    let listing = asm.list_dependencies(&entry).unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].locator, a.as_str());
    assert_eq!(listing[1].locator, b.as_str());
    assert_eq!(server.hits(), after_first);
}

#[test]
fn http_404_is_fetch_failure() {
    let server = common::module_server::start(&[]);
    let cache_dir = tempdir().unwrap();
    let cache = Cache::open_at(cache_dir.path()).unwrap();
    let fetcher = Fetcher::with_defaults(cache.clone(), Arc::new(CurlTransport::new()));
    let err = fetcher
        .fetch(&Locator::parse(&server.url("/missing.js")).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::FetchFailed { .. }), "{err:?}");
    assert!(cache.entries().unwrap().is_empty());
}
