//! # POS Bootstrap
//!
//! Loads everything the POS screen needs before it becomes usable: the
//! product catalog and the public merchant settings. The two reads are
//! independent and run concurrently; there is no ordering guarantee between
//! them, only that both must complete.

use tracing::info;

use banca_core::{Product, SettingsMap};

use crate::ports::{CatalogGateway, GatewayResult, SettingsGateway};

/// Page size for the initial catalog load. The POS screen filters locally,
/// so it pulls one large page up front instead of paginating.
pub const CATALOG_PAGE_SIZE: u32 = 1000;

/// Everything required for the POS screen to open.
#[derive(Debug, Clone)]
pub struct PosData {
    pub products: Vec<Product>,
    pub settings: SettingsMap,
}

/// Fetches catalog and settings concurrently.
///
/// Either failure aborts the bootstrap; the caller decides whether to retry
/// (explicitly, never automatically here).
pub async fn load_pos_data<C, S>(catalog: &C, settings: &S) -> GatewayResult<PosData>
where
    C: CatalogGateway,
    S: SettingsGateway,
{
    let (page, settings) = tokio::try_join!(
        catalog.list_products(1, CATALOG_PAGE_SIZE),
        settings.public_settings()
    )?;

    info!(
        products = page.data.len(),
        settings_keys = settings.len(),
        "POS data loaded"
    );

    Ok(PosData {
        products: page.data,
        settings,
    })
}
