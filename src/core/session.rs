//! Portfolio editing session: the one owner of selection and ordering state.
//!
//! A session is created for the builder (seeded from a client) or hydrated
//! from a share link, mutated by UI events, and thrown away afterwards.

use crate::catalog::{build_generic_client, GENERIC_CLIENT_ID};
use crate::core::codec::{
    self, DecodedPortfolio, DesignVariant, PortfolioQuery, PrintPaper, DEFAULT_SUBTITLE,
    DEFAULT_SUBTITLE_GENERIC, DEFAULT_TITLE, DEFAULT_TITLE_GENERIC,
};
use crate::core::derive::{derive_ordered_flat, derive_ordered_services, order_key};
use crate::core::ordering::{self, ServiceOrderState};
use crate::core::view::{
    BrochureTheme, PortfolioView, PreviewOptions, AQUA_ACCENT, DEFAULT_LOGO_SRC,
    DEFAULT_MAX_REPRESENTATIVE_CLIENTS,
};
use crate::domain::model::{
    Catalog, Certification, Client, Control, RepresentativeClient, Service, ServiceCategory,
};
use crate::utils::error::Result;

/// Client the builder opens with when the catalog has it.
pub const INITIAL_CLIENT_ID: &str = "colanta";

#[derive(Debug, Clone)]
pub struct PortfolioSession {
    catalog: Catalog,
    client: Client,
    services: ServiceOrderState,
    control_ids: Vec<String>,
    representative_client_ids: Vec<String>,
    certification_ids: Vec<String>,
    coverage_order: Vec<String>,
    title: String,
    subtitle: String,
    variant: DesignVariant,
    paper: PrintPaper,
    edit: bool,
    print: bool,
    revision: u64,
    order_key: String,
}

impl PortfolioSession {
    /// Builder session seeded from `INITIAL_CLIENT_ID` (or the first client).
    pub fn new(catalog: Catalog) -> Self {
        let client = catalog
            .client(INITIAL_CLIENT_ID)
            .or_else(|| catalog.clients.first())
            .cloned()
            .unwrap_or_else(|| build_generic_client(&catalog.services, &catalog.controls));

        let is_generic = client.id == GENERIC_CLIENT_ID;
        let decoded = DecodedPortfolio {
            services: ServiceOrderState::initialize(
                &client.recommended_service_ids,
                &catalog.services,
            ),
            control_ids: client.recommended_control_ids.clone(),
            representative_client_ids: catalog.representative_client_ids(),
            certification_ids: catalog.certification_ids(),
            title: if is_generic { DEFAULT_TITLE_GENERIC } else { DEFAULT_TITLE }.to_string(),
            subtitle: if is_generic { DEFAULT_SUBTITLE_GENERIC } else { DEFAULT_SUBTITLE }
                .to_string(),
            variant: DesignVariant::default(),
            paper: PrintPaper::default(),
            edit: false,
            print: false,
            client,
        };
        Self::from_decoded(catalog, decoded)
    }

    /// Public-view session hydrated from a share link query string.
    pub fn from_query(catalog: Catalog, query: &str) -> Self {
        let decoded = codec::decode(query, &catalog);
        Self::from_decoded(catalog, decoded)
    }

    /// Same as [`from_query`](Self::from_query) for a full or relative link.
    pub fn from_url(catalog: Catalog, link: &str) -> Self {
        let decoded = codec::decode_url(link, &catalog);
        Self::from_decoded(catalog, decoded)
    }

    fn from_decoded(catalog: Catalog, decoded: DecodedPortfolio) -> Self {
        let coverage_order = catalog.company.coverage.clone();
        let mut session = Self {
            catalog,
            client: decoded.client,
            services: decoded.services,
            control_ids: decoded.control_ids,
            representative_client_ids: decoded.representative_client_ids,
            certification_ids: decoded.certification_ids,
            coverage_order,
            title: decoded.title,
            subtitle: decoded.subtitle,
            variant: decoded.variant,
            paper: decoded.paper,
            edit: decoded.edit,
            print: decoded.print,
            revision: 0,
            order_key: String::new(),
        };
        session.order_key = order_key(&session.ordered_services());
        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_generic_client(&self) -> bool {
        self.client.id == GENERIC_CLIENT_ID
    }

    pub fn service_order(&self) -> &ServiceOrderState {
        &self.services
    }

    pub fn control_ids(&self) -> &[String] {
        &self.control_ids
    }

    pub fn representative_client_ids(&self) -> &[String] {
        &self.representative_client_ids
    }

    pub fn certification_ids(&self) -> &[String] {
        &self.certification_ids
    }

    pub fn coverage_order(&self) -> &[String] {
        &self.coverage_order
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn variant(&self) -> DesignVariant {
        self.variant
    }

    pub fn paper(&self) -> PrintPaper {
        self.paper
    }

    pub fn is_editing(&self) -> bool {
        self.edit
    }

    pub fn auto_print(&self) -> bool {
        self.print
    }

    /// Bumped each time the ordered service sequence changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Resets services and controls to `client_id`'s recommendations.
    ///
    /// Default cover texts follow the switch between a specific and the
    /// generic client; custom texts are left alone. Returns false, without
    /// touching anything, for an unknown client.
    pub fn select_client(&mut self, client_id: &str) -> bool {
        let next = if client_id == GENERIC_CLIENT_ID {
            build_generic_client(&self.catalog.services, &self.catalog.controls)
        } else {
            match self.catalog.client(client_id) {
                Some(client) => client.clone(),
                None => {
                    tracing::warn!("Ignoring selection of unknown client '{}'", client_id);
                    return false;
                }
            }
        };

        if next.id == GENERIC_CLIENT_ID {
            if self.title == DEFAULT_TITLE {
                self.title = DEFAULT_TITLE_GENERIC.to_string();
            }
            if self.subtitle == DEFAULT_SUBTITLE {
                self.subtitle = DEFAULT_SUBTITLE_GENERIC.to_string();
            }
        } else {
            if self.title == DEFAULT_TITLE_GENERIC {
                self.title = DEFAULT_TITLE.to_string();
            }
            if self.subtitle == DEFAULT_SUBTITLE_GENERIC {
                self.subtitle = DEFAULT_SUBTITLE.to_string();
            }
        }

        self.services =
            ServiceOrderState::initialize(&next.recommended_service_ids, &self.catalog.services);
        self.control_ids = next.recommended_control_ids.clone();
        tracing::debug!("Client switched to {}", next.id);
        self.client = next;
        self.refresh_revision();
        true
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
    }

    pub fn set_variant(&mut self, variant: DesignVariant) {
        self.variant = variant;
    }

    pub fn set_paper(&mut self, paper: PrintPaper) {
        self.paper = paper;
    }

    pub fn toggle_service(&mut self, service_id: &str) -> bool {
        let Some(service) = self.catalog.service(service_id).cloned() else {
            return false;
        };
        self.services = ordering::toggle_service(&self.services, &service);
        self.refresh_revision();
        true
    }

    pub fn toggle_control(&mut self, control_id: &str) -> bool {
        if self.catalog.control(control_id).is_none() {
            return false;
        }
        self.control_ids = ordering::toggle_flat_selection(&self.control_ids, control_id);
        true
    }

    pub fn toggle_representative_client(&mut self, id: &str) -> bool {
        if !self.catalog.representative_clients().iter().any(|c| c.id == id) {
            return false;
        }
        self.representative_client_ids =
            ordering::toggle_flat_selection(&self.representative_client_ids, id);
        true
    }

    pub fn toggle_certification(&mut self, id: &str) -> bool {
        if !self.catalog.certifications().iter().any(|c| c.id == id) {
            return false;
        }
        self.certification_ids = ordering::toggle_flat_selection(&self.certification_ids, id);
        true
    }

    pub fn toggle_category_collapsed(&mut self, category: ServiceCategory) {
        self.services = ordering::toggle_collapsed(&self.services, category);
    }

    /// Drag end over the category list; ids are `cat:<name>` tokens.
    pub fn move_category(&mut self, active: &str, over: &str) {
        self.services = ordering::move_category(&self.services, active, over);
        self.refresh_revision();
    }

    pub fn move_service(&mut self, category: ServiceCategory, active: &str, over: &str) {
        self.services = ordering::move_service(&self.services, category, active, over);
        self.refresh_revision();
    }

    pub fn move_control(&mut self, active: &str, over: &str) {
        self.control_ids = ordering::move_within_list(&self.control_ids, active, over);
    }

    pub fn move_representative_client(&mut self, active: &str, over: &str) {
        self.representative_client_ids =
            ordering::move_within_list(&self.representative_client_ids, active, over);
    }

    pub fn move_certification(&mut self, active: &str, over: &str) {
        self.certification_ids = ordering::move_within_list(&self.certification_ids, active, over);
    }

    pub fn move_coverage(&mut self, active: &str, over: &str) {
        self.coverage_order = ordering::move_within_list(&self.coverage_order, active, over);
    }

    fn refresh_revision(&mut self) {
        let key = order_key(&self.ordered_services());
        if key != self.order_key {
            self.order_key = key;
            self.revision += 1;
            tracing::debug!("Service order changed, revision {}", self.revision);
        }
    }

    pub fn ordered_services(&self) -> Vec<Service> {
        derive_ordered_services(
            &self.services.category_order,
            &self.services.service_order_by_category,
            &self.catalog.services,
        )
    }

    pub fn ordered_controls(&self) -> Vec<Control> {
        derive_ordered_flat(&self.control_ids, &self.catalog.controls)
    }

    pub fn ordered_certifications(&self) -> Vec<Certification> {
        derive_ordered_flat(&self.certification_ids, self.catalog.certifications())
    }

    pub fn ordered_representative_clients(&self) -> Vec<RepresentativeClient> {
        derive_ordered_flat(
            &self.representative_client_ids,
            self.catalog.representative_clients(),
        )
    }

    pub fn query(&self) -> PortfolioQuery {
        PortfolioQuery {
            client_id: self.client.id.clone(),
            service_ids: self.ordered_services().into_iter().map(|s| s.id).collect(),
            control_ids: self.ordered_controls().into_iter().map(|c| c.id).collect(),
            representative_client_ids: self
                .ordered_representative_clients()
                .into_iter()
                .map(|c| c.id)
                .collect(),
            certification_ids: self
                .ordered_certifications()
                .into_iter()
                .map(|c| c.id)
                .collect(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            variant: self.variant,
            paper: self.paper,
            edit: false,
            print: false,
        }
    }

    pub fn share_path(&self, public_path: &str) -> String {
        codec::share_path(public_path, &self.query())
    }

    pub fn share_url(&self, base_url: &str, public_path: &str) -> Result<String> {
        codec::share_url(base_url, public_path, &self.query())
    }

    pub fn browser_pdf_url(&self, base_url: &str, public_path: &str) -> Result<String> {
        Ok(codec::browser_pdf_url(&self.share_url(base_url, public_path)?))
    }

    pub fn preview_options(&self) -> PreviewOptions {
        let aqua = self.variant == DesignVariant::BrochureAlt;
        let selected_reps = self.ordered_representative_clients().len();
        PreviewOptions {
            logo_src: DEFAULT_LOGO_SRC.to_string(),
            accent_color: if aqua {
                AQUA_ACCENT.to_string()
            } else {
                self.catalog.company.colors.palmera_green.clone()
            },
            show_anticimex_badge: true,
            show_client_meta: !self.is_generic_client(),
            max_representative_clients: if selected_reps == 0 {
                DEFAULT_MAX_REPRESENTATIVE_CLIENTS
            } else {
                selected_reps
            },
            service_category_order: self.services.category_order.clone(),
            brochure_theme: if aqua { BrochureTheme::Aqua } else { BrochureTheme::Green },
            print_paper: self.paper,
        }
    }

    pub fn view(&self) -> PortfolioView {
        let mut company = self.catalog.company.clone();
        company.certifications = self.ordered_certifications();
        company.representative_clients = self.ordered_representative_clients();
        company.coverage = self
            .coverage_order
            .iter()
            .filter(|c| !c.is_empty())
            .cloned()
            .collect();

        PortfolioView {
            company,
            client: self.client.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            services: self.ordered_services(),
            controls: self.ordered_controls(),
            options: self.preview_options(),
            variant: self.variant,
            edit: self.edit,
            auto_print: self.print,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use ServiceCategory::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn service_ids(session: &PortfolioSession) -> Vec<String> {
        session.ordered_services().into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_new_session_starts_with_initial_client() {
        let session = PortfolioSession::new(builtin::catalog());
        assert_eq!(session.client().id, "colanta");
        assert_eq!(session.title(), DEFAULT_TITLE);
        assert_eq!(session.service_order().category_order, vec![Plagas, Higiene]);
        assert_eq!(session.revision(), 0);
        assert_eq!(session.ordered_certifications().len(), 6);
        assert_eq!(session.ordered_representative_clients().len(), 8);
    }

    #[test]
    fn test_select_client_resets_selection() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.toggle_service("comejen");
        session.toggle_category_collapsed(Plagas);

        assert!(session.select_client("frisby"));
        assert_eq!(service_ids(&session), ids(&["cucarachas", "roedores", "moscas", "desinfeccion"]));
        assert_eq!(session.control_ids(), ids(&["mip", "diagnostico", "plan_accion", "evidencias"]));
        assert!(session.service_order().collapsed_categories.is_empty());
    }

    #[test]
    fn test_select_unknown_client_is_ignored() {
        let mut session = PortfolioSession::new(builtin::catalog());
        let before = service_ids(&session);
        assert!(!session.select_client("acme"));
        assert_eq!(session.client().id, "colanta");
        assert_eq!(service_ids(&session), before);
    }

    #[test]
    fn test_generic_client_swaps_default_texts_only() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.select_client(GENERIC_CLIENT_ID);
        assert_eq!(session.title(), DEFAULT_TITLE_GENERIC);
        assert_eq!(session.subtitle(), DEFAULT_SUBTITLE_GENERIC);
        assert!(!session.preview_options().show_client_meta);

        session.set_title("Plan anual");
        session.select_client("alpina");
        assert_eq!(session.title(), "Plan anual");
        assert_eq!(session.subtitle(), DEFAULT_SUBTITLE);
    }

    #[test]
    fn test_custom_subtitle_survives_client_switch() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.set_subtitle("Propuesta regional");
        session.select_client(GENERIC_CLIENT_ID);
        assert_eq!(session.subtitle(), "Propuesta regional");
        assert_eq!(session.title(), DEFAULT_TITLE_GENERIC);

        let restored = PortfolioSession::from_query(
            builtin::catalog(),
            &codec::encode(&session.query()),
        );
        assert_eq!(restored.subtitle(), "Propuesta regional");
    }

    #[test]
    fn test_revision_tracks_order_changes_only() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.move_service(Plagas, "moscas", "roedores");
        assert_eq!(session.revision(), 1);

        // no-op drags and collapse flags leave the order untouched
        session.move_service(Plagas, "moscas", "moscas");
        session.move_category("cat:Plagas", "cat:Nope");
        session.toggle_category_collapsed(Higiene);
        session.move_control("mip", "evidencias");
        assert_eq!(session.revision(), 1);

        session.move_category("cat:Higiene", "cat:Plagas");
        assert_eq!(session.revision(), 2);
        assert_eq!(session.service_order().category_order, vec![Higiene, Plagas]);
    }

    #[test]
    fn test_toggles_reject_unknown_ids() {
        let mut session = PortfolioSession::new(builtin::catalog());
        assert!(!session.toggle_service("ghost"));
        assert!(!session.toggle_control("ghost"));
        assert!(!session.toggle_certification("ghost"));
        assert!(!session.toggle_representative_client("ghost"));
    }

    #[test]
    fn test_flat_toggles_and_moves() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.toggle_certification("iso-9001");
        assert!(!session.certification_ids().contains(&"iso-9001".to_string()));
        session.toggle_certification("iso-9001");
        assert_eq!(session.certification_ids().last().unwrap(), "iso-9001");

        session.move_representative_client("campollo", "colanta");
        assert_eq!(session.ordered_representative_clients()[0].id, "campollo");

        session.move_coverage("Cali", "Bogotá");
        assert_eq!(session.coverage_order()[0], "Cali");
        assert_eq!(session.view().company.coverage[0], "Cali");
    }

    #[test]
    fn test_share_link_round_trip() {
        let mut session = PortfolioSession::new(builtin::catalog());
        session.toggle_service("comejen");
        session.move_category("cat:Especializados", "cat:Plagas");
        session.move_control("soporte_documental", "mip");
        session.toggle_certification("norsok");
        session.move_representative_client("ramo", "alpina");
        session.set_variant(DesignVariant::Split);
        session.set_paper(PrintPaper::Letter);
        session.set_title("Título con espacios, comas & signos");

        let path = session.share_path("/p");
        let query = path.split_once('?').unwrap().1;
        let hydrated = PortfolioSession::from_query(builtin::catalog(), query);

        assert_eq!(hydrated.query(), session.query());
        assert_eq!(
            hydrated.service_order().category_order,
            session.service_order().category_order
        );
    }

    #[test]
    fn test_browser_pdf_url_requests_print() {
        let session = PortfolioSession::new(builtin::catalog());
        let url = session.browser_pdf_url("https://portfolio.example.com", "/p").unwrap();
        assert!(url.starts_with("https://portfolio.example.com/p?client=colanta"));
        assert!(url.ends_with("&print=1"));

        let printed = PortfolioSession::from_query(builtin::catalog(), url.split_once('?').unwrap().1);
        assert!(printed.auto_print());
        assert!(printed.view().auto_print);
    }

    #[test]
    fn test_preview_options_follow_variant() {
        let mut session = PortfolioSession::new(builtin::catalog());
        assert_eq!(session.preview_options().brochure_theme, BrochureTheme::Green);
        assert_eq!(session.preview_options().accent_color, "#00ac4b");

        session.set_variant(DesignVariant::BrochureAlt);
        let options = session.preview_options();
        assert_eq!(options.brochure_theme, BrochureTheme::Aqua);
        assert_eq!(options.accent_color, AQUA_ACCENT);
        assert_eq!(options.max_representative_clients, 8);

        for id in builtin::catalog().representative_client_ids() {
            session.toggle_representative_client(&id);
        }
        assert_eq!(
            session.preview_options().max_representative_clients,
            DEFAULT_MAX_REPRESENTATIVE_CLIENTS
        );
    }
}
