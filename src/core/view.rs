use crate::core::codec::{DesignVariant, PrintPaper};
use crate::domain::model::{Client, Company, Control, Service, ServiceCategory};
use serde::Serialize;

pub const DEFAULT_LOGO_SRC: &str = "/brand/palmera-junior.webp";
pub const ANTICIMEX_LOGO_SRC: &str = "/brand/anticimex.png";
pub const AQUA_ACCENT: &str = "#3bd5ff";
pub const DEFAULT_MAX_REPRESENTATIVE_CLIENTS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrochureTheme {
    Green,
    Aqua,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewOptions {
    pub logo_src: String,
    pub accent_color: String,
    pub show_anticimex_badge: bool,
    pub show_client_meta: bool,
    pub max_representative_clients: usize,
    pub service_category_order: Vec<ServiceCategory>,
    pub brochure_theme: BrochureTheme,
    pub print_paper: PrintPaper,
}

/// Derived, denormalized portfolio handed to the templates.
///
/// `company` carries the selected certifications, representative clients and
/// coverage in their chosen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioView {
    pub company: Company,
    pub client: Client,
    pub title: String,
    pub subtitle: String,
    pub services: Vec<Service>,
    pub controls: Vec<Control>,
    pub options: PreviewOptions,
    pub variant: DesignVariant,
    /// Public view with the order editor panel.
    pub edit: bool,
    pub auto_print: bool,
}

impl PortfolioView {
    pub fn representative_clients_shown(&self) -> &[crate::domain::model::RepresentativeClient] {
        let reps = &self.company.representative_clients;
        &reps[..reps.len().min(self.options.max_representative_clients)]
    }

    pub fn highlighted_controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter().filter(|c| c.highlight)
    }
}
