// Code generated by assetbake 0.1.0. DO NOT EDIT.

#![allow(dead_code)]

use assetbake::{Asset, EmbeddedAsset, EmbeddedAssets};

// "/app.js"
const APP_JS: &[u8] = &[
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x4b, 0xc9,
    0x4f, 0x2e, 0xcd, 0x4d, 0xcd, 0x2b, 0xd1, 0x2b, 0xc9, 0x2c, 0xc9, 0x49,
    0x55, 0xb0, 0x55, 0x50, 0x72, 0x52, 0xb2, 0xe6, 0x02, 0x00, 0x5d, 0x2a,
    0x05, 0x59, 0x16, 0x00, 0x00, 0x00,
];

// "/css/site.css"
const CSS_SITE_CSS: &[u8] = &[
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x4b, 0xca,
    0x4f, 0xa9, 0x54, 0xa8, 0x56, 0xc8, 0x4d, 0x2c, 0x4a, 0xcf, 0xcc, 0xb3,
    0x52, 0x30, 0xb0, 0x56, 0xa8, 0xe5, 0x02, 0x00, 0xa2, 0x40, 0xdf, 0xbc,
    0x14, 0x00, 0x00, 0x00,
];

// "/index.html"
const INDEX_HTML: &[u8] = &[
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0xb3, 0x51,
    0x4c, 0xc9, 0x4f, 0x2e, 0xa9, 0x2c, 0x48, 0x55, 0xc8, 0x28, 0xc9, 0xcd,
    0xb1, 0xe3, 0xb2, 0x29, 0xb0, 0x73, 0xb4, 0xd1, 0x2f, 0xb0, 0xe3, 0x02,
    0x00, 0xa8, 0x01, 0xa3, 0x10, 0x19, 0x00, 0x00, 0x00,
];

/// Content type of `path` (empty when unknown).
pub fn content_type(path: &str) -> &'static str {
    assetbake::content_type(path)
}

/// Fingerprint reported for unknown paths; regenerated on every bake.
pub const FALLBACK_TOKEN: &str = "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

pub static ASSETS: EmbeddedAssets = EmbeddedAssets::new(
    &[
        EmbeddedAsset::new("/app.js", APP_JS, "0123456789abcdef0123456789abcdef", "application/js"),
        EmbeddedAsset::new("/css/site.css", CSS_SITE_CSS, "fedcba9876543210fedcba9876543210", "text/css"),
        EmbeddedAsset::new("/index.html", INDEX_HTML, "00112233445566778899aabbccddeeff", "text/html"),
    ],
    FALLBACK_TOKEN,
);

/// Gzip payload, fingerprint and content type for `path`.
///
/// Unknown paths resolve to `/index.html` when it exists.
pub fn asset(path: &str) -> Asset<'static> {
    ASSETS.resolve(path)
}
