//! HTML rendering of a derived portfolio.
//!
//! Every variant renders the same [`PortfolioView`]; only the layout differs.
//! The page shell adds print CSS for the chosen paper size and, for
//! auto-print links, a delayed call to the browser print dialog.

mod templates;

use crate::core::codec::{DesignVariant, PrintPaper};
use crate::core::derive::group_services;
use crate::core::ordering::category_token;
use crate::core::view::PortfolioView;
use std::borrow::Cow;
use std::time::Duration;

/// Time given to layout and images before the print dialog opens.
pub const AUTO_PRINT_DELAY: Duration = Duration::from_millis(420);

pub(crate) fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

pub(crate) fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Renders the body markup of `view.variant`.
pub fn render_body(view: &PortfolioView) -> String {
    match view.variant {
        DesignVariant::Executive => templates::executive(view),
        DesignVariant::Split => templates::split(view),
        DesignVariant::Minimal => templates::minimal(view),
        DesignVariant::Infographic => templates::infographic(view),
        DesignVariant::Brochure | DesignVariant::BrochureAlt => templates::brochure(view),
    }
}

/// Renders a standalone HTML page for the portfolio.
pub fn render_html(view: &PortfolioView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{} · {}</title>\n",
        esc(&view.title),
        esc(&view.client.name)
    ));
    html.push_str("<style>\n");
    html.push_str(&base_css(view));
    html.push_str(&print_css(view.options.print_paper));
    html.push_str("</style>\n</head>\n");
    html.push_str(&format!(
        "<body class=\"variant-{}\">\n<div class=\"portfolio-public-shell\">\n",
        view.variant.as_str()
    ));

    if view.edit {
        html.push_str(&render_editor(view));
    }

    html.push_str("<main class=\"portfolio-public-card\">\n");
    html.push_str(&render_body(view));
    html.push_str("</main>\n");

    if !view.edit {
        html.push_str(
            "<p class=\"portfolio-public-tip\">Tip: agrega <strong>?edit=1</strong> a la URL para ordenar por drag &amp; drop.</p>\n",
        );
    }
    html.push_str("</div>\n");

    if view.auto_print {
        html.push_str(&auto_print_script(AUTO_PRINT_DELAY));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn base_css(view: &PortfolioView) -> String {
    let colors = &view.company.colors;
    format!(
        ":root {{ --accent: {accent}; --ink: {ink}; --muted: {muted}; --paper: {paper}; }}\n\
         body {{ margin: 0; font-family: system-ui, sans-serif; color: var(--ink); background: var(--muted); }}\n\
         .portfolio-public-shell {{ max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }}\n\
         .portfolio-public-card {{ background: var(--paper); border-radius: 1rem; padding: 1.25rem; border: 1px solid rgba(51,45,46,.12); }}\n\
         .portfolio-public-tip {{ font-size: .75rem; opacity: .7; }}\n\
         section {{ margin-bottom: 2rem; }}\n\
         .cover {{ border-radius: 1rem; padding: 1.5rem; }}\n\
         .card {{ border: 1px solid rgba(51,45,46,.12); border-radius: .75rem; padding: 1rem; }}\n\
         .grid {{ display: grid; gap: .75rem; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); }}\n\
         .pill {{ display: inline-block; border-radius: 999px; padding: .25rem .75rem; font-size: .75rem; background: var(--muted); margin: .125rem; }}\n\
         .accent {{ color: var(--accent); }}\n\
         .star {{ color: var(--accent); }}\n\
         .editor {{ background: #fff; border-radius: 1rem; padding: 1rem; margin-bottom: 1rem; }}\n",
        accent = attr(&view.options.accent_color),
        ink = attr(&colors.ink),
        muted = attr(&colors.muted),
        paper = attr(&colors.paper),
    )
}

/// `@page` rules for the chosen sheet plus print-only resets of the shell.
pub fn print_css(paper: PrintPaper) -> String {
    let (width, height) = paper.dimensions_mm();
    format!(
        "@page {{ size: {width}mm {height}mm; margin: 0; }}\n\
         @media print {{\n\
         body {{ background: #fff !important; }}\n\
         .portfolio-public-shell {{ max-width: none !important; padding: 0 !important; }}\n\
         .portfolio-public-card {{ border: none !important; box-shadow: none !important; padding: 0 !important; }}\n\
         .portfolio-public-tip, .editor {{ display: none !important; }}\n\
         section {{ break-inside: avoid; }}\n\
         }}\n"
    )
}

pub fn auto_print_script(delay: Duration) -> String {
    format!(
        "<script>window.addEventListener(\"load\", function () {{ setTimeout(function () {{ window.print(); }}, {}); }});</script>\n",
        delay.as_millis()
    )
}

/// Order editor panel. Items carry the drag ids a sortable list reports back.
fn render_editor(view: &PortfolioView) -> String {
    let mut html = String::from(
        "<aside class=\"editor\">\n<p><strong>Editor de contenido</strong></p>\n\
         <p>Organiza el orden de servicios, clientes, certificaciones y cobertura para esta versión del portafolio.</p>\n",
    );

    html.push_str("<ol data-sortable=\"categories\">\n");
    for (category, services) in group_services(&view.services) {
        html.push_str(&format!(
            "<li data-sort-id=\"{}\">{}\n<ol data-sortable=\"services\">\n",
            attr(&category_token(category)),
            esc(category.as_str())
        ));
        for service in services {
            html.push_str(&format!(
                "<li data-sort-id=\"{}\">{}</li>\n",
                attr(&service.id),
                esc(&service.name)
            ));
        }
        html.push_str("</ol>\n</li>\n");
    }
    html.push_str("</ol>\n");

    let flat_lists: [(&str, Vec<(&str, &str)>); 3] = [
        (
            "repClients",
            view.company
                .representative_clients
                .iter()
                .map(|c| (c.id.as_str(), c.name.as_str()))
                .collect(),
        ),
        (
            "certs",
            view.company
                .certifications
                .iter()
                .map(|c| (c.id.as_str(), c.name.as_str()))
                .collect(),
        ),
        (
            "coverage",
            view.company
                .coverage
                .iter()
                .map(|c| (c.as_str(), c.as_str()))
                .collect(),
        ),
    ];
    for (name, items) in flat_lists {
        html.push_str(&format!("<ol data-sortable=\"{}\">\n", name));
        for (id, label) in items {
            html.push_str(&format!(
                "<li data-sort-id=\"{}\">{}</li>\n",
                attr(id),
                esc(label)
            ));
        }
        html.push_str("</ol>\n");
    }

    html.push_str("</aside>\n");
    html
}
