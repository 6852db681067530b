//! Bake a directory of static files into an immutable, fingerprinted asset table.
//!
//! # Module Structure
//!
//! ```text
//! asset/     # walk → compress → fingerprint → table
//! emit/      # artifact writers (Rust module, packed binary) and pack loader
//! resolve/   # runtime resolver (development passthrough / compiled lookup)
//! http       # response contract for serving collaborators
//! config/    # assetbake.toml
//! logger     # log!/debug! macros and progress display
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // build time
//! let table = assetbake::bake("public", &BakeOptions::default())?;
//! assetbake::emit::write_artifact(&table, "src/assets.rs".as_ref(), Format::Rust, None)?;
//!
//! // runtime
//! mod assets; // generated
//! let asset = assets::asset("/app.js");
//! ```

// generated modules name the crate; lets them compile inside its own tests
extern crate self as assetbake;

pub mod asset;
pub mod config;
pub mod emit;
pub mod http;
pub mod logger;
pub mod resolve;

pub use asset::{
    AssetRecord, AssetTable, BakeError, BakeOptions, Fingerprint, bake, content_type,
};
pub use emit::{Format, PackError, PackedAssets};
pub use resolve::{
    Asset, Catalog, DevAssets, EmbeddedAsset, EmbeddedAssets, Mode, Origin, Resolver,
    resolve_compiled,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::decompress;
    use std::fs;
    use tempfile::TempDir;

    /// `index.html` = "A", `app.js` = "B"
    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "A").unwrap();
        fs::write(dir.path().join("app.js"), "B").unwrap();
        dir
    }

    #[test]
    fn test_bake_and_resolve_site() {
        let dir = site();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        assert_eq!(table.paths().collect::<Vec<_>>(), ["/app.js", "/index.html"]);

        let record = table.get("/app.js").unwrap();
        let asset = resolve_compiled(&table, "/app.js");
        assert_eq!(asset.origin, Origin::Found);
        assert_eq!(&*asset.data, &*record.payload);
        assert_eq!(asset.fingerprint, record.fingerprint.to_hex());
        assert_eq!(asset.content_type, "application/js");
        assert_eq!(decompress(&asset.data).unwrap(), b"B");

        let index = table.get("/index.html").unwrap();
        let fallback = resolve_compiled(&table, "/missing/route");
        assert_eq!(fallback.origin, Origin::Fallback);
        assert_eq!(&*fallback.data, &*index.payload);
        assert_eq!(fallback.fingerprint, table.fallback_token().to_hex());
    }

    #[test]
    fn test_development_root_serves_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "A").unwrap();

        let resolver = Resolver::development(dir.path());
        let asset = resolver.resolve("/");
        assert_eq!(resolver.mode(), Mode::Development);
        assert_eq!(asset.content_type, "text/html");
        assert_eq!(decompress(&asset.data).unwrap(), b"A");
    }

    #[test]
    fn test_modes_agree_on_found_assets() {
        let dir = site();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        let dev = DevAssets::new(dir.path());

        for path in ["/", "/index.html", "/app.js"] {
            let compiled = resolve_compiled(&table, path);
            let live = dev.resolve(path);
            assert_eq!(compiled.data, live.data, "{path}");
            assert_eq!(compiled.fingerprint, live.fingerprint, "{path}");
            assert_eq!(compiled.content_type, live.content_type, "{path}");
        }
    }

    #[test]
    fn test_rebake_only_changes_token() {
        let dir = site();
        let first = bake(dir.path(), &BakeOptions::default()).unwrap();
        let second = bake(dir.path(), &BakeOptions::default()).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.path, b.path);
            assert_eq!(a.payload, b.payload);
            assert_eq!(a.fingerprint, b.fingerprint);
        }
        assert_ne!(first.fallback_token(), second.fallback_token());
    }

    #[test]
    fn test_cached_fingerprint_gets_not_modified() {
        let dir = site();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        let etag = table.get("/app.js").unwrap().fingerprint.to_hex();

        let reply = http::reply(resolve_compiled(&table, "/app.js"), Some(&etag));
        assert_eq!(reply.status, 304);
        assert!(reply.body.is_empty());

        // a fallback response never validates against a cached content fingerprint
        let index_etag = table.get("/index.html").unwrap().fingerprint.to_hex();
        let reply = http::reply(resolve_compiled(&table, "/nope"), Some(&index_etag));
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn test_pack_artifact_serves_same_assets() {
        let dir = site();
        let out = TempDir::new().unwrap();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        let pack = out.path().join("site.pack");
        emit::write_artifact(&table, &pack, Format::Pack, Some("embed")).unwrap();

        let packed = PackedAssets::open(&pack).unwrap();
        assert_eq!(packed.tag(), Some("embed"));
        let resolver = Resolver::compiled(packed);
        for path in ["/app.js", "/index.html", "/missing"] {
            let expected = resolve_compiled(&table, path);
            let actual = resolver.resolve(path);
            assert_eq!(actual.data, expected.data, "{path}");
            assert_eq!(actual.fingerprint, expected.fingerprint, "{path}");
            assert_eq!(actual.origin, expected.origin, "{path}");
        }
    }
}
