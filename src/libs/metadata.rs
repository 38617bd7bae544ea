//! Build-time application metadata generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

/// Vendor directory segment used for on-disk storage.
pub fn vendor_name() -> &'static str {
    if APP_METADATA_VENDOR_OVERRIDE.is_empty() {
        APP_METADATA_OWNER
    } else {
        APP_METADATA_VENDOR_OVERRIDE
    }
}

/// Application name as declared in `Cargo.toml`.
pub fn app_name() -> &'static str {
    APP_METADATA_NAME
}

