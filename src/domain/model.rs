use serde::{Deserialize, Serialize};
use std::fmt;

/// Service categories, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    Plagas,
    Higiene,
    Especializados,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Plagas,
        ServiceCategory::Higiene,
        ServiceCategory::Especializados,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Plagas => "Plagas",
            ServiceCategory::Higiene => "Higiene",
            ServiceCategory::Especializados => "Especializados",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceIcon {
    #[default]
    Spray,
    Rat,
    Cockroach,
    Fly,
    Mosquito,
    Ant,
    Flea,
    Tick,
    Bird,
    Termite,
    Bat,
    Snake,
    Grain,
    Shield,
    Water,
    Wrench,
}

impl ServiceIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIcon::Spray => "spray",
            ServiceIcon::Rat => "rat",
            ServiceIcon::Cockroach => "cockroach",
            ServiceIcon::Fly => "fly",
            ServiceIcon::Mosquito => "mosquito",
            ServiceIcon::Ant => "ant",
            ServiceIcon::Flea => "flea",
            ServiceIcon::Tick => "tick",
            ServiceIcon::Bird => "bird",
            ServiceIcon::Termite => "termite",
            ServiceIcon::Bat => "bat",
            ServiceIcon::Snake => "snake",
            ServiceIcon::Grain => "grain",
            ServiceIcon::Shield => "shield",
            ServiceIcon::Water => "water",
            ServiceIcon::Wrench => "wrench",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub summary: String,
    #[serde(default)]
    pub icon: ServiceIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub highlight: bool,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_src: Option<String>,
    #[serde(default)]
    pub recommended_service_ids: Vec<String>,
    #[serde(default)]
    pub recommended_control_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeClient {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyColors {
    pub palmera_green: String,
    pub anticimex_blue: String,
    pub ink: String,
    pub paper: String,
    pub muted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub value: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub tagline: String,
    pub support_line: String,
    pub colors: CompanyColors,
    #[serde(default)]
    pub coverage: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub representative_clients: Vec<RepresentativeClient>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

/// Anything the ordering and derivation code can look up by id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}

macro_rules! catalog_entry {
    ($($ty:ty),*) => {
        $(impl CatalogEntry for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

catalog_entry!(Service, Control, Client, Certification, RepresentativeClient);

/// The full set of choosable items. Loaded once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub company: Company,
    pub services: Vec<Service>,
    pub controls: Vec<Control>,
    pub clients: Vec<Client>,
}

impl Catalog {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.company.certifications
    }

    pub fn representative_clients(&self) -> &[RepresentativeClient] {
        &self.company.representative_clients
    }

    pub fn certification_ids(&self) -> Vec<String> {
        self.company.certifications.iter().map(|c| c.id.clone()).collect()
    }

    pub fn representative_client_ids(&self) -> Vec<String> {
        self.company
            .representative_clients
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }
}
