//! Presentation order of domains' subdomains.
//!
//! The architecture deck follows a fixed editorial order within each
//! domain; subdomains outside the table sort to the end alphabetically.

/// Sort key for subdomains not present in the order table.
pub const UNORDERED_SORT_KEY: usize = 999;

/// Ordered subdomain base names per domain key (lowercase).
pub fn subdomain_order(domain: &str) -> Option<&'static [&'static str]> {
    Some(match domain {
        "canales" => &[
            "sitio_publico",
            "web_retail",
            "app_retail",
            "web_empresas",
            "app_empresas",
            "call_center",
            "sucursales",
            "wallet",
            "plataformas_de_terceros",
            "atm",
            "pos",
            "gestion_de_contenidos",
            "crm",
            "martech",
            "otros",
        ],
        "integracionprocesos" => &[
            "api_management_gateway",
            "microservicios",
            "event_broker",
            "bpm",
            "brms",
            "message_broker",
            "esb_eai",
            "transferencia_de_archivos",
            "rpa",
        ],
        "soporteempresarial" => &[
            "erp",
            "hr",
            "auditoria",
            "administracion_de_contratos",
            "riesgo",
            "cumplimiento",
            "mercados_tesoreria_comex",
        ],
        "corebanking" => &[
            "depositos_cuentas_inversiones",
            "creditos_e_inversiones",
            "cuentas_bancarias_comercio_minorista_y_empresas",
            "pagos_y_tarjetas",
            "cobranzas",
        ],
        "datos" => &[
            "almacenamiento",
            "consumo",
            "gobierno",
            "integracion_ingestion_y_procesamiento",
            "servicios_datos",
        ],
        "operacionti" => &[
            "planeacion_documentacion_y_diseno",
            "desarrollo",
            "pruebas",
            "despliegue",
            "monitoreo_y_operaciones",
        ],
        _ => return None,
    })
}

/// Collapse a split file stem ("canales_web_retail_2") to its reporting
/// subdomain ("canales_web_retail").
pub fn display_subdomain(stem: &str) -> &str {
    strip_split_suffix(stem)
}

/// Sort key of a subdomain within its domain: the table position of the
/// base name (domain prefix and split suffix removed), or
/// [`UNORDERED_SORT_KEY`].
pub fn subdomain_sort_key(domain: &str, subdomain: &str) -> usize {
    let stripped = subdomain
        .strip_prefix(domain)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(subdomain);
    let base = strip_split_suffix(stripped);
    subdomain_order(domain)
        .and_then(|order| order.iter().position(|name| *name == base))
        .unwrap_or(UNORDERED_SORT_KEY)
}

/// Remove a trailing `_<digits>` split suffix.
fn strip_split_suffix(name: &str) -> &str {
    match name.rfind('_') {
        Some(pos) => {
            let suffix = &name[pos + 1..];
            if !suffix.is_empty() && suffix.chars().all(|ch| ch.is_ascii_digit()) {
                &name[..pos]
            } else {
                name
            }
        }
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_suffixes_collapse() {
        assert_eq!(display_subdomain("canales_web_retail_2"), "canales_web_retail");
        assert_eq!(display_subdomain("canales_web_retail"), "canales_web_retail");
        assert_eq!(display_subdomain("canales_atm"), "canales_atm");
        assert_eq!(display_subdomain("pos_1"), "pos");
    }

    #[test]
    fn sort_keys_follow_the_table() {
        assert_eq!(subdomain_sort_key("canales", "canales_sitio_publico"), 0);
        assert_eq!(subdomain_sort_key("canales", "canales_web_retail"), 1);
        assert_eq!(subdomain_sort_key("canales", "canales_web_retail_2"), 1);
        assert!(
            subdomain_sort_key("canales", "canales_web_retail")
                < subdomain_sort_key("canales", "canales_atm")
        );
    }

    #[test]
    fn unknown_subdomains_and_domains_sort_last() {
        assert_eq!(
            subdomain_sort_key("canales", "canales_inventado"),
            UNORDERED_SORT_KEY
        );
        assert_eq!(
            subdomain_sort_key("general", "apps"),
            UNORDERED_SORT_KEY
        );
    }
}
