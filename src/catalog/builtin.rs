//! Builtin catalog used when no external catalog source is configured.

use crate::domain::model::{
    Catalog, Certification, Client, Company, CompanyColors, Control, RepresentativeClient,
    Service, ServiceCategory, ServiceIcon, SocialLink,
};

fn service(
    id: &str,
    name: &str,
    category: ServiceCategory,
    icon: ServiceIcon,
    summary: &str,
) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        category,
        summary: summary.to_string(),
        icon,
    }
}

fn control(id: &str, name: &str, highlight: bool, summary: &str) -> Control {
    Control {
        id: id.to_string(),
        name: name.to_string(),
        highlight,
        summary: summary.to_string(),
    }
}

fn certification(id: &str, name: &str, description: &str) -> Certification {
    Certification {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        logo_src: Some(format!("/brand/certs/{}.png", id)),
    }
}

fn representative_client(id: &str, name: &str) -> RepresentativeClient {
    RepresentativeClient {
        id: id.to_string(),
        name: name.to_string(),
        logo_src: Some(format!("/brand/clients/{}.png", id)),
        description: None,
    }
}

fn client(id: &str, name: &str, industry: &str, city: &str, services: &[&str], controls: &[&str]) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        city: Some(city.to_string()),
        logo_src: Some(format!("/brand/clients/{}.png", id)),
        recommended_service_ids: services.iter().map(|s| s.to_string()).collect(),
        recommended_control_ids: controls.iter().map(|s| s.to_string()).collect(),
    }
}

fn social(label: &str, value: &str, href: &str) -> SocialLink {
    SocialLink {
        label: label.to_string(),
        value: value.to_string(),
        href: href.to_string(),
    }
}

pub fn company() -> Company {
    Company {
        name: "Palmera Junior SAS".to_string(),
        tagline: "Control de plagas sin contaminar".to_string(),
        support_line: "Una empresa de Anticimex".to_string(),
        colors: CompanyColors {
            palmera_green: "#00ac4b".to_string(),
            anticimex_blue: "#332d2e".to_string(),
            ink: "#332d2e".to_string(),
            paper: "#FFFFFF".to_string(),
            muted: "#F2FBF6".to_string(),
        },
        coverage: [
            "Bogotá",
            "Medellín",
            "Cali",
            "Barranquilla",
            "Cartagena",
            "Bucaramanga",
            "Pereira",
            "Manizales",
            "Armenia",
            "Ibagué",
            "Villavicencio",
            "Neiva",
            "Santa Marta",
            "Valledupar",
            "Montería",
            "Cúcuta",
            "Pasto",
            "Popayán",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
        certifications: vec![
            certification("iso-22000", "ISO 22000", "Sistema de gestión de inocuidad y seguridad alimentaria."),
            certification("iso-9001", "ISO 9001", "Gestión de calidad, estandarización y mejora continua."),
            certification("iso-14001", "ISO 14001", "Gestión ambiental y buenas prácticas para reducción de impacto."),
            certification("iso-45001", "ISO 45001", "Seguridad y salud en el trabajo: prevención y control de riesgos."),
            certification("haccp", "HACCP", "Sistema preventivo para control de peligros y puntos críticos."),
            certification("norsok", "NORSOK", "Estándares para entornos industriales exigentes (según alcance)."),
        ],
        representative_clients: vec![
            representative_client("colanta", "Colanta"),
            representative_client("alpina", "Alpina"),
            representative_client("frisby", "Frisby"),
            representative_client("parmalat", "Parmalat"),
            representative_client("qbano", "Qbano"),
            representative_client("ramo", "Ramo"),
            representative_client("bucanero", "Bucanero"),
            representative_client("campollo", "Campollo"),
        ],
        socials: vec![
            social("Web", "palmerajunior.com", "https://palmerajunior.com"),
            social("Email", "contacto@palmerajunior.com", "mailto:contacto@palmerajunior.com"),
            social("WhatsApp", "+57 312 233 9551", "https://wa.me/573122339551"),
            social("Tel", "(602) 489 00 30", "tel:+576024890030"),
        ],
    }
}

pub fn services() -> Vec<Service> {
    use ServiceCategory::*;
    use ServiceIcon::*;

    vec![
        service("fumigacion", "Fumigación / Desinsectación", Plagas, Spray,
            "Control de plagas rastreras y voladoras con técnicas profesionales para reducir focos y proteger la operación."),
        service("roedores", "Control de roedores (ratas y ratones)", Plagas, Rat,
            "Prevención y control con enfoque MIP: inspección, puntos críticos y medidas de control."),
        service("cucarachas", "Control de cucarachas", Plagas, Cockroach,
            "Tratamientos focalizados y acciones preventivas para cortar reinfestación."),
        service("moscas", "Control de moscas", Plagas, Fly,
            "Identificación de focos, control y recomendaciones para reducir presencia en áreas sensibles."),
        service("mosquitos", "Control de zancudos / mosquitos", Plagas, Mosquito,
            "Control en entornos residenciales, comerciales e industriales con métodos aprobados."),
        service("hormigas", "Control de hormigas", Plagas, Ant,
            "Control y prevención según puntos de ingreso y condiciones del entorno."),
        service("pulgas", "Control de pulgas", Plagas, Flea,
            "Intervención orientada a cortar ciclo y reducir riesgo en áreas de convivencia."),
        service("garrapatas", "Control de garrapatas", Plagas, Tick,
            "Acompañamiento y control para disminuir presencia y riesgo sanitario."),
        service("palomas", "Control de palomas / aves", Plagas, Bird,
            "Medidas de control y exclusión para reducir afectación sanitaria y deterioro en infraestructura."),
        service("comejen", "Control de comején / termitas", Especializados, Termite,
            "Intervención especializada para proteger estructura y activos."),
        service("murcielagos", "Control de murciélagos", Especializados, Bat,
            "Manejo especializado para mitigar riesgos sanitarios y operativos."),
        service("ofidios", "Control de ofidios (serpientes)", Especializados, Snake,
            "Prevención, manejo y acciones estratégicas en zonas con riesgo."),
        service("granos_almacenados", "Control de plagas en granos almacenados", Especializados, Grain,
            "Prevención y control para reducir deterioro y contaminación en almacenamiento."),
        service("desinfeccion", "Desinfección de ambientes y superficies", Higiene, Shield,
            "Protocolos de desinfección según necesidad del cliente y tipo de área."),
        service("lavado_tanques", "Lavado de tanques de agua", Higiene, Water,
            "Limpieza y mantenimiento para reducir contaminación en el suministro de agua."),
        service("servicios_especiales", "Servicios especiales (mallas, anjeos, sellos, etc.)", Especializados, Wrench,
            "Acciones complementarias de control físico y mecánico para reforzar la prevención."),
    ]
}

pub fn controls() -> Vec<Control> {
    vec![
        control("mip", "MIP — Manejo Integrado de Plagas", true,
            "Enfoque preventivo: inspección, control, correcciones y seguimiento."),
        control("diagnostico", "Diagnóstico e inspección técnica", true,
            "Levantamiento de condiciones, puntos críticos y nivel de riesgo."),
        control("plan_accion", "Plan de acción + recomendaciones", true,
            "Medidas preventivas y correctivas para disminuir reinfestación."),
        control("evidencias", "Evidencias e informes para auditoría", true,
            "Registro de actividades, hallazgos y soporte del servicio."),
        control("soporte_documental", "Soporte documental (SDS, certificados, cronogramas)", true,
            "Fichas, hojas de seguridad, certificados y soportes para auditorías."),
        control("productos_aprobados", "Productos y técnicas aprobadas", false,
            "Productos y técnicas permitidas por autoridades sanitarias."),
        control("personal_calificado", "Personal calificado y certificado", false,
            "Equipo técnico con perfiles profesionales y protocolos de seguridad."),
        control("poliza_rc", "Pólizas de responsabilidad civil", false,
            "Cobertura para protección de instalaciones y operación del cliente."),
    ]
}

pub fn clients() -> Vec<Client> {
    vec![
        client(
            "colanta",
            "Colanta",
            "Industria de alimentos",
            "Medellín",
            &["roedores", "moscas", "cucarachas", "mosquitos", "desinfeccion", "lavado_tanques"],
            &["mip", "diagnostico", "plan_accion", "evidencias", "soporte_documental"],
        ),
        client(
            "alpina",
            "Alpina",
            "Industria de alimentos",
            "Bogotá",
            &["roedores", "moscas", "cucarachas", "palomas", "desinfeccion"],
            &["mip", "diagnostico", "plan_accion", "evidencias", "soporte_documental"],
        ),
        client(
            "frisby",
            "Frisby",
            "Restaurantes",
            "Pereira",
            &["cucarachas", "roedores", "moscas", "desinfeccion"],
            &["mip", "diagnostico", "plan_accion", "evidencias"],
        ),
    ]
}

pub fn catalog() -> Catalog {
    Catalog {
        company: company(),
        services: services(),
        controls: controls(),
        clients: clients(),
    }
}
