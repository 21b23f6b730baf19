use serde::{Deserialize, Deserializer};

pub const APP_ID: &str = "id.nalumsari.KlinikMap";
pub const APP_TITLE: &str = "SIG Klinik Nalumsari";
pub const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// A point on the map. Clinics are keyed by this pair, so comparison is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Clinic {
    #[serde(rename = "nama_klinik")]
    pub name: String,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "jenis_klinik", default, deserialize_with = "category_text")]
    pub category: String,
    #[serde(deserialize_with = "coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "coordinate")]
    pub longitude: f64,
    #[serde(rename = "telepon", default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(rename = "jam_operasional", default, deserialize_with = "optional_text")]
    pub hours: Option<String>,
    #[serde(rename = "fasilitas", default, deserialize_with = "optional_text")]
    pub facilities: Option<String>,
}

impl Clinic {
    pub fn location(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn kind(&self) -> Category {
        Category::from_label(&self.category)
    }

    pub fn directions_url(&self) -> String {
        format!(
            "{}?api=1&destination={},{}",
            DIRECTIONS_URL, self.latitude, self.longitude
        )
    }
}

/// Response body of the clinic endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Clinic>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Dental,
    Maternity,
    Specialist,
}

impl Category {
    /// Total lookup: anything unrecognised is a general clinic.
    pub fn from_label(label: &str) -> Self {
        match label {
            "gigi" => Category::Dental,
            "bersalin" => Category::Maternity,
            "spesialis" => Category::Specialist,
            _ => Category::General,
        }
    }

    pub fn style(self) -> PinStyle {
        match self {
            Category::General => PinStyle {
                key: "default-blue",
                badge: "primary",
            },
            Category::Dental => PinStyle {
                key: "dental-green",
                badge: "success",
            },
            Category::Maternity => PinStyle {
                key: "maternity-red",
                badge: "danger",
            },
            Category::Specialist => PinStyle {
                key: "specialist-violet",
                badge: "info",
            },
        }
    }
}

/// Visual style shared by map pins and list badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinStyle {
    pub key: &'static str,
    pub badge: &'static str,
}

/// Values offered by the category filter, as (query value, display label).
pub const CATEGORY_FILTERS: &[(&str, &str)] = &[
    ("", "Semua jenis"),
    ("umum", "Umum"),
    ("gigi", "Gigi"),
    ("bersalin", "Bersalin"),
    ("spesialis", "Spesialis"),
];

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate {:?}", text))),
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.is_empty()))
}

/// A null category is treated like a missing one and falls back to general.
fn category_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
