use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::DataUriError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }
    };
}

id_newtype!(ProductId);

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Inline image payload tagged with its MIME type.
///
/// The payload is kept in its base64 form; [`DataUri::decode`] is only
/// needed when the raw bytes leave the process (export to disk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri {
    mime_type: String,
    payload_b64: String,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, payload_b64: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload_b64: payload_b64.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn parse(raw: &str) -> Result<Self, DataUriError> {
        let rest = raw
            .trim()
            .strip_prefix(DATA_SCHEME)
            .ok_or(DataUriError::MissingScheme)?;
        let (mime_type, payload_b64) = rest
            .split_once(BASE64_MARKER)
            .ok_or(DataUriError::MissingBase64Marker)?;
        if mime_type.is_empty() {
            return Err(DataUriError::EmptyMimeType);
        }
        Ok(Self::new(mime_type, payload_b64))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload_b64(&self) -> &str {
        &self.payload_b64
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        Ok(STANDARD.decode(self.payload_b64.as_bytes())?)
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DATA_SCHEME}{}{BASE64_MARKER}{}",
            self.mime_type, self.payload_b64
        )
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DataUri {
    type Error = DataUriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DataUri> for String {
    fn from(value: DataUri) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub label: String,
    pub value: String,
}

impl ProductSpec {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub tagline: String,
    pub category: String,
    pub price: u32,
    pub description: String,
    pub features: Vec<String>,
    pub specs: Vec<ProductSpec>,
    pub image_prompt: String,
    pub generated_image: Option<DataUri>,
    pub placeholder_color: String,
}

/// What the presentation layer draws for a product: never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductVisual<'a> {
    Generated(&'a DataUri),
    Placeholder(&'a str),
}

impl Product {
    pub fn visual(&self) -> ProductVisual<'_> {
        match &self.generated_image {
            Some(image) => ProductVisual::Generated(image),
            None => ProductVisual::Placeholder(&self.placeholder_color),
        }
    }

    pub fn has_generated_image(&self) -> bool {
        self.generated_image.is_some()
    }

    pub fn with_generated_image(&self, image: DataUri) -> Self {
        Self {
            generated_image: Some(image),
            ..self.clone()
        }
    }
}

pub const HOME_VIEW: &str = "home";

/// The single piece of navigation state: the landing page or one product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Product(ProductId),
}

impl View {
    /// Unknown ids fall back to the landing page.
    pub fn resolve(raw: &str, products: &[Product]) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(HOME_VIEW) {
            return Self::Home;
        }
        products
            .iter()
            .find(|product| product.id.as_str() == raw)
            .map(|product| Self::Product(product.id.clone()))
            .unwrap_or(Self::Home)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Home => HOME_VIEW,
            Self::Product(id) => id.as_str(),
        }
    }
}
