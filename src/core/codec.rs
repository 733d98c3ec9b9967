//! Query-string codec for shareable portfolio links.
//!
//! Decoding is total: every parameter is optional and anything missing or
//! unrecognized resolves to a documented fallback instead of an error.

use crate::catalog::{build_generic_client, GENERIC_CLIENT_ID};
use crate::core::ordering::ServiceOrderState;
use crate::domain::model::{Catalog, Client};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use url::{form_urlencoded, Url};

pub const DEFAULT_TITLE: &str = "Portafolio de Servicios";
pub const DEFAULT_TITLE_GENERIC: &str = "Portafolio General de Servicios";
pub const DEFAULT_SUBTITLE: &str = "Propuesta para";
pub const DEFAULT_SUBTITLE_GENERIC: &str = "Soluciones integrales para organizaciones";

pub mod params {
    pub const CLIENT: &str = "client";
    pub const SERVICES: &str = "services";
    pub const CONTROLS: &str = "controls";
    pub const REP_CLIENTS: &str = "repClients";
    pub const CERTS: &str = "certs";
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    pub const VARIANT: &str = "variant";
    pub const PAPER: &str = "paper";
    pub const EDIT: &str = "edit";
    pub const PRINT: &str = "print";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignVariant {
    Executive,
    Split,
    Minimal,
    Infographic,
    #[default]
    Brochure,
    BrochureAlt,
}

impl DesignVariant {
    pub const ALL: [DesignVariant; 6] = [
        DesignVariant::Executive,
        DesignVariant::Split,
        DesignVariant::Minimal,
        DesignVariant::Infographic,
        DesignVariant::Brochure,
        DesignVariant::BrochureAlt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesignVariant::Executive => "executive",
            DesignVariant::Split => "split",
            DesignVariant::Minimal => "minimal",
            DesignVariant::Infographic => "infographic",
            DesignVariant::Brochure => "brochure",
            DesignVariant::BrochureAlt => "brochure_alt",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DesignVariant::Executive => "Ejecutivo",
            DesignVariant::Split => "Dividido",
            DesignVariant::Minimal => "Minimalista",
            DesignVariant::Infographic => "Infográfico",
            DesignVariant::Brochure => "Brochure Verde",
            DesignVariant::BrochureAlt => "Brochure Aqua",
        }
    }
}

impl fmt::Display for DesignVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintPaper {
    #[default]
    A4,
    Letter,
    Legal,
}

impl PrintPaper {
    pub const ALL: [PrintPaper; 3] = [PrintPaper::A4, PrintPaper::Letter, PrintPaper::Legal];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrintPaper::A4 => "a4",
            PrintPaper::Letter => "letter",
            PrintPaper::Legal => "legal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Sheet width and height in millimetres.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            PrintPaper::A4 => (210, 297),
            PrintPaper::Letter => (216, 279),
            PrintPaper::Legal => (216, 356),
        }
    }
}

impl fmt::Display for PrintPaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a share link carries, in its flattened form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioQuery {
    pub client_id: String,
    pub service_ids: Vec<String>,
    pub control_ids: Vec<String>,
    pub representative_client_ids: Vec<String>,
    pub certification_ids: Vec<String>,
    pub title: String,
    pub subtitle: String,
    pub variant: DesignVariant,
    pub paper: PrintPaper,
    pub edit: bool,
    pub print: bool,
}

/// Fully resolved state hydrated from a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPortfolio {
    pub client: Client,
    pub services: ServiceOrderState,
    pub control_ids: Vec<String>,
    pub representative_client_ids: Vec<String>,
    pub certification_ids: Vec<String>,
    pub title: String,
    pub subtitle: String,
    pub variant: DesignVariant,
    pub paper: PrintPaper,
    /// Editor overlay; never active together with `print`.
    pub edit: bool,
    pub print: bool,
}

pub fn encode(query: &PortfolioQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer
        .append_pair(params::CLIENT, &query.client_id)
        .append_pair(params::SERVICES, &query.service_ids.join(","))
        .append_pair(params::CONTROLS, &query.control_ids.join(","))
        .append_pair(params::REP_CLIENTS, &query.representative_client_ids.join(","))
        .append_pair(params::CERTS, &query.certification_ids.join(","))
        .append_pair(params::TITLE, &query.title)
        .append_pair(params::SUBTITLE, &query.subtitle)
        .append_pair(params::VARIANT, query.variant.as_str())
        .append_pair(params::PAPER, query.paper.as_str());
    if query.edit {
        serializer.append_pair(params::EDIT, "1");
    }
    if query.print {
        serializer.append_pair(params::PRINT, "1");
    }
    serializer.finish()
}

struct RawParams(Vec<(String, String)>);

impl RawParams {
    fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        Self(
            form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// First value for `key`, like `URLSearchParams.get`.
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn id_list(&self, key: &str) -> Vec<String> {
        split_id_list(self.get(key).unwrap_or_default())
    }
}

/// Splits a comma-joined id list, trimming blanks and dropping repeats.
pub fn split_id_list(value: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}

fn resolve_client(raw: Option<&str>, catalog: &Catalog) -> Client {
    let generic = || build_generic_client(&catalog.services, &catalog.controls);
    let first = || catalog.clients.first().cloned().unwrap_or_else(generic);

    match raw {
        Some(GENERIC_CLIENT_ID) => generic(),
        Some(id) if !id.is_empty() => catalog.client(id).cloned().unwrap_or_else(|| {
            tracing::warn!("Unknown client '{}', falling back to first catalog client", id);
            first()
        }),
        _ => first(),
    }
}

fn known_ids(ids: Vec<String>, known: &[String]) -> Vec<String> {
    ids.into_iter().filter(|id| known.contains(id)).collect()
}

pub fn decode(query: &str, catalog: &Catalog) -> DecodedPortfolio {
    let raw = RawParams::parse(query);
    let client = resolve_client(raw.get(params::CLIENT), catalog);
    let is_generic = client.id == GENERIC_CLIENT_ID;

    let service_ids = raw.id_list(params::SERVICES);
    let services = if service_ids.is_empty() {
        ServiceOrderState::initialize(&client.recommended_service_ids, &catalog.services)
    } else {
        ServiceOrderState::from_ordered_ids(&service_ids, &catalog.services)
    };

    let control_catalog: Vec<String> = catalog.controls.iter().map(|c| c.id.clone()).collect();
    let control_ids = match raw.id_list(params::CONTROLS) {
        ids if ids.is_empty() => known_ids(client.recommended_control_ids.clone(), &control_catalog),
        ids => known_ids(ids, &control_catalog),
    };

    let rep_catalog = catalog.representative_client_ids();
    let representative_client_ids = match raw.id_list(params::REP_CLIENTS) {
        ids if ids.is_empty() => rep_catalog,
        ids => known_ids(ids, &rep_catalog),
    };

    let cert_catalog = catalog.certification_ids();
    let certification_ids = match raw.id_list(params::CERTS) {
        ids if ids.is_empty() => cert_catalog,
        ids => known_ids(ids, &cert_catalog),
    };

    let title = match raw.get(params::TITLE) {
        None | Some(DEFAULT_TITLE) if is_generic => DEFAULT_TITLE_GENERIC.to_string(),
        None => DEFAULT_TITLE.to_string(),
        Some(title) => title.to_string(),
    };
    let subtitle = match raw.get(params::SUBTITLE) {
        None | Some(DEFAULT_SUBTITLE) if is_generic => DEFAULT_SUBTITLE_GENERIC.to_string(),
        None => DEFAULT_SUBTITLE.to_string(),
        Some(subtitle) => subtitle.to_string(),
    };

    let variant = raw
        .get(params::VARIANT)
        .and_then(DesignVariant::parse)
        .unwrap_or_default();
    let paper = raw
        .get(params::PAPER)
        .and_then(PrintPaper::parse)
        .unwrap_or_default();

    let print = raw.get(params::PRINT) == Some("1");
    let edit = raw.get(params::EDIT) == Some("1") && !print;

    tracing::debug!(
        "Decoded portfolio: client={}, services={}, controls={}, variant={}",
        client.id,
        services.flattened_ids().len(),
        control_ids.len(),
        variant
    );

    DecodedPortfolio {
        client,
        services,
        control_ids,
        representative_client_ids,
        certification_ids,
        title,
        subtitle,
        variant,
        paper,
        edit,
        print,
    }
}

/// Decodes the query part of a full or relative URL. Unparseable input is
/// treated as an empty query.
pub fn decode_url(link: &str, catalog: &Catalog) -> DecodedPortfolio {
    let query = Url::parse(link)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(link)))
        .ok()
        .and_then(|url| url.query().map(str::to_string))
        .unwrap_or_default();
    decode(&query, catalog)
}

/// Relative share path, e.g. `/p?client=...`.
pub fn share_path(public_path: &str, query: &PortfolioQuery) -> String {
    format!("{}?{}", public_path, encode(query))
}

/// Fully qualified share link for the clipboard.
pub fn share_url(base_url: &str, public_path: &str, query: &PortfolioQuery) -> Result<String> {
    let base = Url::parse(base_url)?;
    let url = base.join(&share_path(public_path, query))?;
    Ok(url.to_string())
}

/// Share link that opens straight into the browser print dialog.
pub fn browser_pdf_url(share_url: &str) -> String {
    let separator = if share_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}=1", share_url, separator, params::PRINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::domain::model::ServiceCategory::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample_query() -> PortfolioQuery {
        PortfolioQuery {
            client_id: "alpina".to_string(),
            service_ids: ids(&["desinfeccion", "palomas", "roedores", "comejen"]),
            control_ids: ids(&["evidencias", "mip"]),
            representative_client_ids: ids(&["ramo", "colanta"]),
            certification_ids: ids(&["haccp", "iso-9001"]),
            title: "Propuesta 2025 & más".to_string(),
            subtitle: "Preparado para".to_string(),
            variant: DesignVariant::Infographic,
            paper: PrintPaper::Legal,
            edit: false,
            print: false,
        }
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let catalog = builtin::catalog();
        let query = sample_query();
        let decoded = decode(&encode(&query), &catalog);

        assert_eq!(decoded.client.id, "alpina");
        assert_eq!(decoded.services.flattened_ids(), query.service_ids);
        assert_eq!(decoded.services.category_order, vec![Higiene, Plagas, Especializados]);
        assert_eq!(decoded.control_ids, query.control_ids);
        assert_eq!(decoded.representative_client_ids, query.representative_client_ids);
        assert_eq!(decoded.certification_ids, query.certification_ids);
        assert_eq!(decoded.title, query.title);
        assert_eq!(decoded.subtitle, query.subtitle);
        assert_eq!(decoded.variant, DesignVariant::Infographic);
        assert_eq!(decoded.paper, PrintPaper::Legal);
    }

    #[test]
    fn test_missing_services_fall_back_to_client_recommendations() {
        let catalog = builtin::catalog();
        let decoded = decode("client=colanta", &catalog);

        assert_eq!(decoded.services.category_order, vec![Plagas, Higiene]);
        assert_eq!(
            decoded.services.flattened_ids(),
            ids(&["roedores", "moscas", "cucarachas", "mosquitos", "desinfeccion", "lavado_tanques"])
        );
        assert_eq!(
            decoded.control_ids,
            catalog.client("colanta").unwrap().recommended_control_ids
        );
    }

    #[test]
    fn test_empty_query_uses_all_defaults() {
        let catalog = builtin::catalog();
        let decoded = decode("", &catalog);

        assert_eq!(decoded.client.id, "colanta");
        assert_eq!(decoded.title, DEFAULT_TITLE);
        assert_eq!(decoded.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(decoded.variant, DesignVariant::Brochure);
        assert_eq!(decoded.paper, PrintPaper::A4);
        assert_eq!(decoded.representative_client_ids, catalog.representative_client_ids());
        assert_eq!(decoded.certification_ids, catalog.certification_ids());
        assert!(!decoded.edit);
        assert!(!decoded.print);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let catalog = builtin::catalog();
        let decoded = decode(
            "client=acme&variant=neon&paper=a0&services=ghost,,roedores&controls=%%%,mip",
            &catalog,
        );

        assert_eq!(decoded.client.id, "colanta");
        assert_eq!(decoded.variant, DesignVariant::Brochure);
        assert_eq!(decoded.paper, PrintPaper::A4);
        assert_eq!(decoded.services.flattened_ids(), ids(&["roedores"]));
        assert_eq!(decoded.control_ids, ids(&["mip"]));
    }

    #[test]
    fn test_malformed_input_never_panics() {
        let catalog = builtin::catalog();
        let inputs = [
            "?",
            "&&&",
            "=",
            "services",
            "services=,,,",
            "client=&title=",
            "%ZZ%ZZ=%%",
            "certs=haccp,haccp,haccp&repClients=x",
            "variant=BROCHURE&paper=Letter",
            "title=%E0%A4%A",
        ];
        for input in inputs {
            let decoded = decode(input, &catalog);
            assert!(decoded.services.is_consistent(), "input {:?}", input);
        }
    }

    #[test]
    fn test_duplicate_ids_in_link_are_collapsed() {
        let catalog = builtin::catalog();
        let decoded = decode("services=roedores,moscas,roedores&certs=haccp,haccp", &catalog);
        assert_eq!(decoded.services.flattened_ids(), ids(&["roedores", "moscas"]));
        assert_eq!(decoded.certification_ids, ids(&["haccp"]));
    }

    #[test]
    fn test_generic_client_swaps_default_copy() {
        let catalog = builtin::catalog();
        let decoded = decode("client=generic-client&title=Portafolio+de+Servicios", &catalog);

        assert_eq!(decoded.client.id, GENERIC_CLIENT_ID);
        assert_eq!(decoded.title, DEFAULT_TITLE_GENERIC);
        assert_eq!(decoded.subtitle, DEFAULT_SUBTITLE_GENERIC);
        assert_eq!(decoded.services.flattened_ids().len(), catalog.services.len());

        let custom = decode("client=generic-client&title=Mi+propuesta", &catalog);
        assert_eq!(custom.title, "Mi propuesta");
    }

    #[test]
    fn test_print_disables_edit() {
        let catalog = builtin::catalog();
        assert!(decode("edit=1", &catalog).edit);
        let both = decode("edit=1&print=1", &catalog);
        assert!(both.print);
        assert!(!both.edit);
        assert!(!decode("edit=true", &catalog).edit);
    }

    #[test]
    fn test_decode_url_accepts_full_and_relative_links() {
        let catalog = builtin::catalog();
        let full = decode_url("https://example.com/p?client=frisby&variant=minimal", &catalog);
        assert_eq!(full.client.id, "frisby");
        assert_eq!(full.variant, DesignVariant::Minimal);

        let relative = decode_url("/p?client=alpina", &catalog);
        assert_eq!(relative.client.id, "alpina");
    }

    #[test]
    fn test_share_and_print_urls() {
        let query = sample_query();
        let url = share_url("https://portfolio.example.com", "/p", &query).unwrap();
        assert!(url.starts_with("https://portfolio.example.com/p?client=alpina&services="));
        assert!(url.contains("desinfeccion%2Cpalomas"));

        let pdf = browser_pdf_url(&url);
        assert!(pdf.ends_with("&print=1"));
        assert_eq!(browser_pdf_url("https://x.test/p"), "https://x.test/p?print=1");

        assert!(share_url("not a url", "/p", &query).is_err());
    }
}
