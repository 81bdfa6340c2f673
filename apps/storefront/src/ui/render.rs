use std::fmt::Write as _;

use shared::domain::{DataUri, Product, ProductVisual, View};

pub const BRAND: &str = "YESERLI";
const HERO_TITLE: &str = "Pro. Beyond.";
const HERO_SUBTITLE: &str = "The new gold standard for home essentials.";
const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn render_nav(products: &[Product], current: &View) -> String {
    let links = products
        .iter()
        .map(|product| {
            if matches!(current, View::Product(id) if *id == product.id) {
                format!("[{}]", product.category)
            } else {
                product.category.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{BRAND}    {links}")
}

pub fn render_home(products: &[Product], hero: Option<&DataUri>, busy: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_nav(products, &View::Home));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{BRAND}");
    let _ = writeln!(out, "{HERO_TITLE}");
    let _ = writeln!(out, "{HERO_SUBTITLE}");
    let backdrop = match hero {
        Some(image) => describe_image(image),
        None => "radial gradient".to_string(),
    };
    let _ = writeln!(out, "  backdrop: {backdrop}");
    let hero_action = if busy { "Generating..." } else { "Refresh Visual" };
    let _ = writeln!(out, "  actions: View Collection | {hero_action}");
    let _ = writeln!(out, "{RULE}");

    for product in products {
        let _ = writeln!(
            out,
            "{:<4}{} - {}",
            product.id, product.name, product.tagline
        );
        let _ = writeln!(out, "    {}", describe_visual(product.visual()));
    }
    out
}

pub fn render_product_detail(products: &[Product], product: &Product, busy: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        render_nav(products, &View::Product(product.id.clone()))
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "NEW");
    let _ = writeln!(out, "{}", product.name);
    let _ = writeln!(out, "{}", product.tagline);
    let _ = writeln!(out, "${}  [Buy]", product.price);
    match product.visual() {
        ProductVisual::Generated(image) => {
            let _ = writeln!(out, "  {}", describe_image(image));
        }
        ProductVisual::Placeholder(_) => {
            let action = if busy {
                "Curating..."
            } else {
                "Generate Product Visual"
            };
            let _ = writeln!(out, "  {}", describe_visual(product.visual()));
            let _ = writeln!(out, "  action: {action}");
        }
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}. Elevated to art.", product.category);
    let _ = writeln!(out, "{}", product.description);
    let _ = writeln!(out);
    for feature in &product.features {
        let _ = writeln!(out, "  ✦ {feature}");
    }
    let _ = writeln!(out);
    for spec in &product.specs {
        let _ = writeln!(out, "  {:<16}{}", spec.label, spec.value);
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Back to Overview: home");
    out
}

pub fn render_view(
    view: &View,
    products: &[Product],
    hero: Option<&DataUri>,
    busy: bool,
) -> String {
    match view {
        View::Product(id) => match products.iter().find(|product| product.id == *id) {
            Some(product) => render_product_detail(products, product, busy),
            None => render_home(products, hero, busy),
        },
        View::Home => render_home(products, hero, busy),
    }
}

pub fn describe_visual(visual: ProductVisual<'_>) -> String {
    match visual {
        ProductVisual::Generated(image) => describe_image(image),
        ProductVisual::Placeholder(color) => format!("placeholder {color}"),
    }
}

fn describe_image(image: &DataUri) -> String {
    format!(
        "image {} (~{})",
        image.mime_type(),
        human_size(approx_decoded_len(image))
    )
}

fn approx_decoded_len(image: &DataUri) -> usize {
    let payload = image.payload_b64();
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    (payload.len() / 4 * 3).saturating_sub(padding)
}

fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
