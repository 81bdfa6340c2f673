use std::sync::Arc;

use shared::domain::{DataUri, Product, ProductId};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

pub mod seed;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notifications for observers of the catalog (the presentation layer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    ProductsChanged { ids: Vec<ProductId> },
    HeroImageChanged,
}

/// Ordered product list plus the hero banner slot.
///
/// Records are fixed at construction. The only mutations are setting a
/// product's generated image and setting the hero image.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<CatalogState>>,
    events: broadcast::Sender<CatalogEvent>,
}

struct CatalogState {
    products: Vec<Product>,
    hero_image: Option<DataUri>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(CatalogState {
                products,
                hero_image: None,
            })),
            events,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::default_products())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub async fn all_products(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    pub async fn product(&self, product_id: &ProductId) -> Option<Product> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|product| &product.id == product_id)
            .cloned()
    }

    pub async fn hero_image(&self) -> Option<DataUri> {
        self.inner.read().await.hero_image.clone()
    }

    /// Returns `false` without notifying when no record matches.
    pub async fn set_generated_image(&self, product_id: &ProductId, image: DataUri) -> bool {
        let updated = {
            let mut guard = self.inner.write().await;
            replace_generated_image(&mut guard.products, product_id, image)
        };

        if updated {
            debug!(product_id = %product_id, "generated image stored");
            let _ = self.events.send(CatalogEvent::ProductsChanged {
                ids: vec![product_id.clone()],
            });
        } else {
            debug!(product_id = %product_id, "ignoring image for unknown product");
        }
        updated
    }

    /// Commits several images under one write lock and one notification.
    pub async fn apply_generated_images(&self, images: Vec<(ProductId, DataUri)>) -> usize {
        let applied = {
            let mut guard = self.inner.write().await;
            images
                .into_iter()
                .filter_map(|(product_id, image)| {
                    replace_generated_image(&mut guard.products, &product_id, image)
                        .then_some(product_id)
                })
                .collect::<Vec<_>>()
        };

        let count = applied.len();
        if count > 0 {
            debug!(count, "generated image batch committed");
            let _ = self
                .events
                .send(CatalogEvent::ProductsChanged { ids: applied });
        }
        count
    }

    pub async fn set_hero_image(&self, image: DataUri) {
        self.inner.write().await.hero_image = Some(image);
        debug!("hero image stored");
        let _ = self.events.send(CatalogEvent::HeroImageChanged);
    }
}

fn replace_generated_image(
    products: &mut [Product],
    product_id: &ProductId,
    image: DataUri,
) -> bool {
    match products.iter_mut().find(|product| &product.id == product_id) {
        Some(slot) => {
            *slot = slot.with_generated_image(image);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
