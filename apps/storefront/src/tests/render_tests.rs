use super::*;

use catalog::seed::default_products;
use shared::domain::ProductId;

fn png(payload: &str) -> DataUri {
    DataUri::new("image/png", payload)
}

#[test]
fn home_shows_placeholders_until_images_exist() {
    let products = default_products();
    let rendered = render_home(&products, None, false);

    assert_eq!(rendered.matches("placeholder linear-gradient").count(), 4);
    assert!(rendered.contains("backdrop: radial gradient"));
    assert!(rendered.contains("Refresh Visual"));
    assert!(!rendered.contains("image image/png"));
}

#[test]
fn generated_image_replaces_placeholder() {
    let mut products = default_products();
    products[0] = products[0].with_generated_image(png("aGVsbG8="));

    let rendered = render_home(&products, Some(&png("AAAA")), true);

    assert_eq!(rendered.matches("placeholder linear-gradient").count(), 3);
    assert!(rendered.contains("image image/png (~5 B)"));
    assert!(rendered.contains("backdrop: image image/png (~3 B)"));
    assert!(rendered.contains("Generating..."));
    assert!(!rendered.contains(&products[0].placeholder_color));
}

#[test]
fn detail_swaps_generate_action_for_image() {
    let products = default_products();
    let plain = render_product_detail(&products, &products[2], false);
    assert!(plain.contains("Precision Pour"));
    assert!(plain.contains("$189"));
    assert!(plain.contains("Generate Product Visual"));
    assert!(plain.contains("Coffee. Elevated to art."));
    assert!(plain.contains("✦ PID Control"));
    assert!(plain.contains("Temp Accuracy"));
    assert!(plain.contains("[Coffee]"));

    let busy = render_product_detail(&products, &products[2], true);
    assert!(busy.contains("Curating..."));

    let generated = products[2].with_generated_image(png("AAAA"));
    let with_image = render_product_detail(&products, &generated, false);
    assert!(with_image.contains("image image/png"));
    assert!(!with_image.contains("Generate Product Visual"));
    assert!(!with_image.contains("placeholder"));
}

#[test]
fn unknown_product_view_renders_home() {
    let products = default_products();
    let rendered = render_view(&View::Product(ProductId::new("p9")), &products, None, false);
    assert!(rendered.contains(HERO_TITLE));
}

#[test]
fn sizes_are_humanized() {
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(2048), "2.0 KB");
    assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
}
