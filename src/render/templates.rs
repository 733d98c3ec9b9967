use super::{attr, esc};
use crate::core::derive::group_services;
use crate::core::view::{BrochureTheme, PortfolioView, ANTICIMEX_LOGO_SRC};
use crate::domain::model::{Control, Service};

fn client_line(view: &PortfolioView) -> String {
    if view.options.show_client_meta {
        format!(
            "{} <strong>{}</strong>",
            esc(&view.subtitle),
            esc(&view.client.name)
        )
    } else {
        esc(&view.subtitle).into_owned()
    }
}

fn client_meta(view: &PortfolioView) -> String {
    if !view.options.show_client_meta {
        return "<p><strong>Portafolio general</strong></p><p>Sin cliente específico</p>".to_string();
    }
    let city = view
        .client
        .city
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!(" • {}", esc(c)))
        .unwrap_or_default();
    format!(
        "<p><strong>{}</strong></p><p>{}{}</p>",
        esc(&view.client.name),
        esc(&view.client.industry),
        city
    )
}

fn logos(view: &PortfolioView) -> String {
    let mut html = format!(
        "<img src=\"{}\" alt=\"{}\" width=\"220\">",
        attr(&view.options.logo_src),
        attr(&view.company.name)
    );
    if view.options.show_anticimex_badge {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Anticimex\" width=\"130\"><p>{}</p>",
            ANTICIMEX_LOGO_SRC,
            esc(&view.company.support_line)
        ));
    }
    html
}

fn service_card(service: &Service, show_category: bool) -> String {
    let category = if show_category {
        format!("<span class=\"pill\">{}</span>", esc(service.category.as_str()))
    } else {
        String::new()
    };
    format!(
        "<div class=\"card\" data-icon=\"{}\"><p><strong>{}</strong></p><p>{}</p>{}</div>\n",
        service.icon.as_str(),
        esc(&service.name),
        esc(&service.summary),
        category
    )
}

fn services_flat(services: &[Service]) -> String {
    let mut html = String::from("<div class=\"grid\">\n");
    for service in services {
        html.push_str(&service_card(service, true));
    }
    html.push_str("</div>\n");
    html
}

fn services_by_category(services: &[Service]) -> String {
    let mut html = String::new();
    for (category, members) in group_services(services) {
        html.push_str(&format!(
            "<h4 class=\"accent\">{}</h4>\n<div class=\"grid\">\n",
            esc(category.as_str())
        ));
        for service in members {
            html.push_str(&service_card(service, false));
        }
        html.push_str("</div>\n");
    }
    html
}

fn control_item(control: &Control) -> String {
    format!(
        "<div class=\"card\"><p><strong>{}</strong>{}</p><p>{}</p></div>\n",
        esc(&control.name),
        if control.highlight { " <span class=\"star\">★</span>" } else { "" },
        esc(&control.summary)
    )
}

fn controls_grid(controls: &[Control]) -> String {
    let mut html = String::from("<div class=\"grid\">\n");
    for control in controls {
        html.push_str(&control_item(control));
    }
    html.push_str("</div>\n");
    html
}

fn certification_pills(view: &PortfolioView) -> String {
    view.company
        .certifications
        .iter()
        .map(|cert| {
            format!(
                "<span class=\"pill\" title=\"{}\">{}</span>",
                attr(cert.description.as_deref().unwrap_or_default()),
                esc(&cert.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn certification_cards(view: &PortfolioView) -> String {
    let mut html = String::from("<div class=\"grid\">\n");
    for cert in &view.company.certifications {
        let logo = cert
            .logo_src
            .as_deref()
            .map(|src| format!("<img src=\"{}\" alt=\"{}\" height=\"48\">", attr(src), attr(&cert.name)))
            .unwrap_or_default();
        html.push_str(&format!(
            "<div class=\"card\">{}<p><strong>{}</strong></p><p>{}</p></div>\n",
            logo,
            esc(&cert.name),
            esc(cert.description.as_deref().unwrap_or_default())
        ));
    }
    html.push_str("</div>\n");
    html
}

fn representative_clients(view: &PortfolioView, with_logos: bool) -> String {
    let mut html = String::from("<ul>\n");
    for rep in view.representative_clients_shown() {
        match rep.logo_src.as_deref().filter(|_| with_logos) {
            Some(src) => html.push_str(&format!(
                "<li><img src=\"{}\" alt=\"{}\" height=\"40\"></li>\n",
                attr(src),
                attr(&rep.name)
            )),
            None => html.push_str(&format!("<li>{}</li>\n", esc(&rep.name))),
        }
    }
    html.push_str("</ul>\n");
    html
}

fn coverage(view: &PortfolioView) -> String {
    view.company
        .coverage
        .iter()
        .map(|city| format!("<span class=\"pill\">{}</span>", esc(city)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn contact(view: &PortfolioView) -> String {
    let mut html = String::from("<ul class=\"contact\">\n");
    for social in &view.company.socials {
        html.push_str(&format!(
            "<li>{}: <a href=\"{}\">{}</a></li>\n",
            esc(&social.label),
            attr(&social.href),
            esc(&social.value)
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn section(title: &str, body: &str) -> String {
    format!("<section>\n<h3>{}</h3>\n{}</section>\n", esc(title), body)
}

pub(super) fn executive(view: &PortfolioView) -> String {
    let mut html = format!(
        "<section class=\"cover\" style=\"background: {}; color: white\">\n\
         <p>{}</p>\n<h2>{}</h2>\n<p>{}</p>\n<p>{}</p>\n<div class=\"logos\">{}</div>\n</section>\n",
        attr(&view.company.colors.ink),
        esc(&view.company.name),
        esc(&view.title),
        client_line(view),
        esc(&view.company.tagline),
        logos(view)
    );
    html.push_str(&section(
        "Trayectoria y experiencia",
        &format!(
            "<p>Operación con enfoque en manejo integrado de plagas, orientada a prevención, cumplimiento y continuidad operativa.</p>\n\
             <div class=\"card\"><p><strong>Clientes representativos</strong></p>{}</div>\n",
            representative_clients(view, false)
        ),
    ));
    html.push_str(&section("Servicios ofrecidos", &services_flat(&view.services)));
    html.push_str(&section("Controles y diferenciales", &controls_grid(&view.controls)));
    html.push_str(&section("Certificaciones y respaldos", &certification_pills(view)));
    html.push_str(&section("Cobertura", &coverage(view)));
    html
}

pub(super) fn split(view: &PortfolioView) -> String {
    let mut html = format!(
        "<section class=\"cover split\">\n<div>\n<p>{}</p>\n<h2>{}</h2>\n<p>{}</p>\n</div>\n\
         <div class=\"card\">{}{}</div>\n</section>\n",
        esc(&view.company.name),
        esc(&view.title),
        client_line(view),
        client_meta(view),
        logos(view)
    );
    html.push_str("<div class=\"grid\">\n<div>\n");
    html.push_str(&section("Servicios", &services_by_category(&view.services)));
    html.push_str("</div>\n<div>\n");
    html.push_str(&section("Controles", &controls_grid(&view.controls)));
    html.push_str(&section("Certificaciones", &certification_pills(view)));
    html.push_str(&section(
        "Clientes representativos",
        &representative_clients(view, true),
    ));
    html.push_str("</div>\n</div>\n");
    html.push_str(&section("Cobertura", &coverage(view)));
    html
}

pub(super) fn minimal(view: &PortfolioView) -> String {
    let mut html = format!(
        "<section class=\"cover card\">\n<p>{}</p>\n<h2>{}</h2>\n<p>{}</p>\n\
         <hr style=\"border-color: {}\">\n<p>{}</p>\n<div class=\"card\">{}</div>\n</section>\n",
        esc(&view.company.name),
        esc(&view.title),
        client_line(view),
        attr(&view.options.accent_color),
        esc(&view.company.tagline),
        client_meta(view)
    );
    let services: String = view
        .services
        .iter()
        .map(|s| format!("<li><strong>{}</strong> — {}</li>\n", esc(&s.name), esc(&s.summary)))
        .collect();
    html.push_str(&section("Servicios", &format!("<ol>\n{}</ol>\n", services)));
    let controls: String = view
        .controls
        .iter()
        .map(|c| format!("<li>{}</li>\n", esc(&c.name)))
        .collect();
    html.push_str(&section("Controles", &format!("<ul>\n{}</ul>\n", controls)));
    html.push_str(&section("Certificaciones", &certification_pills(view)));
    html
}

pub(super) fn infographic(view: &PortfolioView) -> String {
    let highlighted = view.highlighted_controls().count();
    let mut html = format!(
        "<section class=\"cover\" style=\"background: {}; color: white\">\n<h2>{}</h2>\n<p>{}</p>\n\
         <div class=\"logos\">{}</div>\n</section>\n",
        attr(&view.options.accent_color),
        esc(&view.title),
        client_line(view),
        logos(view)
    );
    html.push_str(&format!(
        "<section class=\"stats grid\">\n\
         <div class=\"card\"><p class=\"accent\"><strong>{}</strong></p><p>Servicios</p></div>\n\
         <div class=\"card\"><p class=\"accent\"><strong>{}</strong></p><p>Controles clave</p></div>\n\
         <div class=\"card\"><p class=\"accent\"><strong>{}</strong></p><p>Certificaciones</p></div>\n\
         <div class=\"card\"><p class=\"accent\"><strong>{}</strong></p><p>Ciudades</p></div>\n\
         </section>\n",
        view.services.len(),
        highlighted,
        view.company.certifications.len(),
        view.company.coverage.len()
    ));
    html.push_str(&section("Servicios por línea", &services_by_category(&view.services)));
    html.push_str(&section("Controles y diferenciales", &controls_grid(&view.controls)));
    html.push_str(&section("Certificaciones", &certification_cards(view)));
    html.push_str(&section(
        "Clientes que confían en nosotros",
        &representative_clients(view, true),
    ));
    html.push_str(&section("Cobertura", &coverage(view)));
    html.push_str(&section("Contacto", &contact(view)));
    html
}

pub(super) fn brochure(view: &PortfolioView) -> String {
    let theme = match view.options.brochure_theme {
        BrochureTheme::Green => "green",
        BrochureTheme::Aqua => "aqua",
    };
    let mut html = format!(
        "<div class=\"brochure theme-{}\">\n\
         <section class=\"cover\" style=\"background: linear-gradient(160deg, {}, {}); color: white\">\n\
         <div class=\"logos\">{}</div>\n<h2>{}</h2>\n<p>{}</p>\n<p>{}</p>\n</section>\n",
        theme,
        attr(&view.options.accent_color),
        attr(&view.company.colors.ink),
        logos(view),
        esc(&view.title),
        client_line(view),
        esc(&view.company.tagline)
    );
    html.push_str(&section("Nuestros servicios", &services_by_category(&view.services)));
    html.push_str(&section("¿Por qué elegirnos?", &controls_grid(&view.controls)));
    html.push_str(&section("Certificaciones", &certification_cards(view)));
    html.push_str(&section(
        "Clientes representativos",
        &representative_clients(view, true),
    ));
    html.push_str(&section("Cobertura nacional", &coverage(view)));
    html.push_str(&section("Hablemos", &contact(view)));
    html.push_str("</div>\n");
    html
}
