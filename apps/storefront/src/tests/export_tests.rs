use super::*;

use catalog::seed::default_products;

#[tokio::test]
async fn writes_hero_and_generated_products_with_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut products = default_products();
    products[1] = products[1].with_generated_image(DataUri::from_bytes("image/jpeg", b"foam"));
    let hero = DataUri::from_bytes("image/png", b"hero-bytes");

    let manifest = export_visuals(dir.path(), "test-model", Some(&hero), &products)
        .await
        .expect("export");

    assert_eq!(manifest.entries.len(), 2);
    assert_eq!(
        std::fs::read(dir.path().join("hero.png")).expect("hero"),
        b"hero-bytes"
    );
    assert_eq!(std::fs::read(dir.path().join("p2.jpg")).expect("p2"), b"foam");
    assert!(!dir.path().join("p1.png").exists());

    let raw = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).expect("manifest");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["model"], "test-model");
    assert_eq!(json["entries"][1]["target"], "p2");
    assert_eq!(json["entries"][1]["name"], "Velvet Foam Pro");
    assert_eq!(json["entries"][1]["size_bytes"], 4);
    assert!(json["exported_at"].is_string());
}

#[tokio::test]
async fn empty_export_still_writes_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("nested").join("out");

    let manifest = export_visuals(&nested, "m", None, &default_products())
        .await
        .expect("export");

    assert!(manifest.entries.is_empty());
    assert!(nested.join(MANIFEST_FILE).exists());
}

#[tokio::test]
async fn undecodable_payload_fails_the_export() {
    let dir = tempfile::tempdir().expect("tempdir");
    let hero = DataUri::new("image/png", "not base64!");

    let err = export_visuals(dir.path(), "m", Some(&hero), &[])
        .await
        .expect_err("should fail");

    assert!(err.to_string().contains("failed to decode visual"));
}
