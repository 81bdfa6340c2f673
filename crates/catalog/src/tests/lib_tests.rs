use super::*;

use std::collections::HashSet;

fn image(tag: &str) -> DataUri {
    DataUri::new("image/png", tag)
}

#[tokio::test]
async fn seeds_four_products_in_order_without_images() {
    let store = CatalogStore::seeded();
    let products = store.all_products().await;

    let ids = products
        .iter()
        .map(|product| product.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["p1", "p2", "p3", "p4"]);
    assert!(products.iter().all(|product| product.generated_image.is_none()));
    assert!(products.iter().all(|product| product.price > 0));
    assert!(store.hero_image().await.is_none());

    let unique = products
        .iter()
        .map(|product| product.id.clone())
        .collect::<HashSet<_>>();
    assert_eq!(unique.len(), products.len());
}

#[tokio::test]
async fn set_generated_image_touches_only_the_target_record() {
    let store = CatalogStore::seeded();
    let before = store.all_products().await;

    assert!(
        store
            .set_generated_image(&ProductId::new("p2"), image("AAAA"))
            .await
    );

    let after = store.all_products().await;
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        if new.id.as_str() == "p2" {
            assert_eq!(new.generated_image, Some(image("AAAA")));
            let mut restored = new.clone();
            restored.generated_image = None;
            assert_eq!(&restored, old);
        } else {
            assert_eq!(new, old);
        }
    }
}

#[tokio::test]
async fn unknown_product_is_a_silent_no_op() {
    let store = CatalogStore::seeded();
    let mut events = store.subscribe();
    let before = store.all_products().await;

    assert!(
        !store
            .set_generated_image(&ProductId::new("missing"), image("AAAA"))
            .await
    );

    assert_eq!(store.all_products().await, before);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn second_image_overwrites_first() {
    let store = CatalogStore::seeded();
    let id = ProductId::new("p3");

    store.set_generated_image(&id, image("first")).await;
    store.set_generated_image(&id, image("second")).await;

    let product = store.product(&id).await.expect("product");
    assert_eq!(product.generated_image, Some(image("second")));
}

#[tokio::test]
async fn batch_commit_notifies_once_and_skips_unknown_ids() {
    let store = CatalogStore::seeded();
    let mut events = store.subscribe();

    let applied = store
        .apply_generated_images(vec![
            (ProductId::new("p1"), image("one")),
            (ProductId::new("ghost"), image("boo")),
            (ProductId::new("p4"), image("four")),
        ])
        .await;

    assert_eq!(applied, 2);
    assert_eq!(
        events.recv().await.expect("event"),
        CatalogEvent::ProductsChanged {
            ids: vec![ProductId::new("p1"), ProductId::new("p4")],
        }
    );
    assert!(events.try_recv().is_err());

    let with_images = store
        .all_products()
        .await
        .into_iter()
        .filter(|product| product.has_generated_image())
        .count();
    assert_eq!(with_images, 2);
}

#[tokio::test]
async fn empty_batch_commit_is_silent() {
    let store = CatalogStore::seeded();
    let mut events = store.subscribe();

    assert_eq!(store.apply_generated_images(Vec::new()).await, 0);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn hero_image_change_is_broadcast() {
    let store = CatalogStore::seeded();
    let mut events = store.subscribe();

    store.set_hero_image(image("hero")).await;

    assert_eq!(store.hero_image().await, Some(image("hero")));
    assert_eq!(
        events.recv().await.expect("event"),
        CatalogEvent::HeroImageChanged
    );
}
