//! The storefront's fixed product line-up.

use shared::domain::{Product, ProductId, ProductSpec};

pub const HERO_PROMPT: &str = "Abstract black and gold liquid metal flowing in dark void, cinematic apple wallpaper style, 8k, minimalistic";

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    tagline: &'static str,
    category: &'static str,
    price: u32,
    description: &'static str,
    features: [&'static str; 4],
    specs: [(&'static str, &'static str); 4],
    image_prompt: &'static str,
    placeholder_color: &'static str,
}

const SEED: [SeedProduct; 4] = [
    SeedProduct {
        id: "p1",
        name: "Obsidian Heater",
        tagline: "Warmth. Redefined.",
        category: "Heating",
        price: 399,
        description: "The Obsidian Outdoor Heater isn't just a heat source; it's a centerpiece. Crafted with aerospace-grade aluminum and a matte black ceramic finish, it delivers silent, radiant heat that transforms your patio into an extension of your living room.",
        features: [
            "Infrared Core",
            "Silent Operation",
            "Weatherproof IP65",
            "Smart Remote",
        ],
        specs: [
            ("Heat Output", "1500W"),
            ("Material", "Anodized Aluminum"),
            ("Height", "42 inches"),
            ("Weight", "18 lbs"),
        ],
        image_prompt: "Photorealistic luxury outdoor patio at night, a sleek matte black tall outdoor heater standing next to modern dark furniture, warm ambient lighting, fire pit nearby, gold accents, cinematic 8k resolution, apple product photography style.",
        placeholder_color: "linear-gradient(135deg, #1a1a1a 0%, #2c1e05 100%)",
    },
    SeedProduct {
        id: "p2",
        name: "Velvet Foam Pro",
        tagline: "Barista grade. At home.",
        category: "Kitchen",
        price: 129,
        description: "Experience the texture of pure silk. The Velvet Foam Pro uses magnetic induction to create the perfect micro-foam for your latte art, housed in a minimal black cylinder with a refined gold base. It's not just milk; it's velvet.",
        features: [
            "Magnetic Drive",
            "4 Temp Modes",
            "Dishwasher Safe",
            "Silent Spin",
        ],
        specs: [
            ("Capacity", "250ml"),
            ("Temp Range", "40°C - 70°C"),
            ("Power", "500W"),
            ("Finish", "Matte Black"),
        ],
        image_prompt: "Close up luxury product shot of a sleek black milk frother pouring creamy white milk foam into a black and gold ceramic cup, dark marble kitchen countertop, moody dramatic lighting, 8k, minimalist composition.",
        placeholder_color: "linear-gradient(135deg, #1a1a1a 0%, #1c1c1c 100%)",
    },
    SeedProduct {
        id: "p3",
        name: "Precision Pour",
        tagline: "Master every degree.",
        category: "Coffee",
        price: 189,
        description: "Control is everything. The Precision Pour Artisan kettle features a gooseneck spout for exact flow rate and a stunning black-on-black interface with illuminated gold temperature readouts. Pour with intention.",
        features: [
            "PID Control",
            "60m Keep Warm",
            "Balanced Grip",
            "OLED Display",
        ],
        specs: [
            ("Capacity", "0.9 Liters"),
            ("Temp Accuracy", "+/- 1°F"),
            ("Heat Up Time", "3 Minutes"),
            ("Base", "360° Swivel"),
        ],
        image_prompt: "Elegant matte black electric gooseneck pour-over kettle on a dark wooden table, steam rising gently, professional barista setting, sharp focus, gold details, luxury aesthetic, studio lighting.",
        placeholder_color: "linear-gradient(135deg, #000000 0%, #222222 100%)",
    },
    SeedProduct {
        id: "p4",
        name: "Zephyr Tower",
        tagline: "Pure air. Pure silence.",
        category: "Climate",
        price: 249,
        description: "Silence is golden. The Zephyr Tower Fan combines a bladeless air multiplier design with an active air purification filter, wrapped in a sculptural black monolith. It cleans as it cools, invisibly.",
        features: [
            "Bladeless",
            "HEPA Filter",
            "Whisper Quiet",
            "90° Oscillation",
        ],
        specs: [
            ("Airflow", "400 L/s"),
            ("Noise Level", "< 25dB"),
            ("Height", "1.1 Meters"),
            ("Filter Life", "12 Months"),
        ],
        image_prompt: "Modern bladeless tower fan standing in a minimalist luxury living room, dark interior design, black walls, subtle gold decor, soft breeze visualization, photorealistic 8k, wide angle.",
        placeholder_color: "linear-gradient(135deg, #0a0a0a 0%, #1a1a1a 100%)",
    },
];

pub fn default_products() -> Vec<Product> {
    SEED.iter().map(SeedProduct::to_product).collect()
}

impl SeedProduct {
    fn to_product(&self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            tagline: self.tagline.to_string(),
            category: self.category.to_string(),
            price: self.price,
            description: self.description.to_string(),
            features: self.features.iter().map(|f| f.to_string()).collect(),
            specs: self
                .specs
                .iter()
                .map(|(label, value)| ProductSpec::new(*label, *value))
                .collect(),
            image_prompt: self.image_prompt.to_string(),
            generated_image: None,
            placeholder_color: self.placeholder_color.to_string(),
        }
    }
}
