//! Column-mapping configuration for the criteria evaluator.
//!
//! Maps each logical criterion (and the slide icon/technology columns) to
//! the underlying record column carrying its data. `None` marks a
//! hard-coded rule with no data dependency. The indirection lets the same
//! evaluation logic run against direct spreadsheet reads and against the
//! staging store, whose column names are sanitized and suffix-deduplicated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaMap {
    /// Column holding the canonical application name.
    pub aplicacion: String,
    pub obsolescencia: Option<String>,
    pub escalabilidad: Option<String>,
    pub acople: Option<String>,
    pub estabilidad: Option<String>,
    /// Agilidad reads two columns: (devops-enabled, automated-deploy).
    pub agilidad: Option<(String, String)>,
    pub extensibilidad: Option<String>,
    pub seguridad: Option<String>,
    pub cobertura: Option<String>,
    pub ux: Option<String>,
    pub icon_sas: Option<String>,
    pub icon_cots: Option<String>,
    pub icon_cloud: Option<String>,
    pub icon_regional: Option<String>,
    pub tecnologia: Option<String>,
}

impl CriteriaMap {
    /// Mapping for inventories read directly from the master spreadsheets,
    /// whose headers have been normalized but not sanitized.
    pub fn spreadsheet() -> Self {
        Self {
            aplicacion: "aplicacion sistema".into(),
            obsolescencia: Some("nivel de obsolescencia".into()),
            escalabilidad: Some("tiene alta disponibilidad".into()),
            acople: None,
            estabilidad: Some(
                "ha presentado caidas o degradacion del servicio en los ultimos 12 meses".into(),
            ),
            agilidad: Some(("devops".into(), "despliegue a pdn automatizado".into())),
            extensibilidad: Some("bns".into()),
            seguridad: Some("seguridad".into()),
            cobertura: None,
            ux: Some("ux".into()),
            icon_sas: Some("sas".into()),
            icon_cots: Some("nivel de customizacion".into()),
            icon_cloud: Some("nube vs onpremise".into()),
            icon_regional: Some("bns".into()),
            tecnologia: Some("tecnologia subyacente".into()),
        }
    }

    /// Mapping for inventories read back from the staging store. The `_1`
    /// suffixes come from de-duplication of repeated source columns; the
    /// suffixed copy is the one the assessment reads.
    pub fn database() -> Self {
        Self {
            aplicacion: "aplicacion_sistema".into(),
            obsolescencia: Some("nivel_de_obsolescencia_1".into()),
            escalabilidad: Some("tiene_alta_disponibilidad_1".into()),
            acople: None,
            estabilidad: Some(
                "ha_presentado_caidas_o_degradacion_del_servicio_en_los_ultimo_1".into(),
            ),
            agilidad: Some(("devops_1".into(), "despliegue_a_pdn_automatizado_1".into())),
            extensibilidad: Some("extensibilidad".into()),
            seguridad: Some("seguridad".into()),
            cobertura: None,
            ux: Some("ux".into()),
            icon_sas: Some("sas".into()),
            icon_cots: Some("nivel_de_customizacion".into()),
            icon_cloud: Some("nube_vs_onpremise".into()),
            icon_regional: Some("bns".into()),
            tecnologia: Some("tecnologia_subyacente".into()),
        }
    }
}

impl Default for CriteriaMap {
    fn default() -> Self {
        Self::spreadsheet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_coded_criteria_have_no_column() {
        for map in [CriteriaMap::spreadsheet(), CriteriaMap::database()] {
            assert!(map.acople.is_none());
            assert!(map.cobertura.is_none());
        }
    }

    #[test]
    fn partial_toml_override_keeps_defaults() {
        let map: CriteriaMap = toml::from_str(
            r#"
            seguridad = "calificacion de seguridad"
            agilidad = ["devops habilitado", "despliegue automatico"]
            "#,
        )
        .unwrap();
        assert_eq!(map.seguridad.as_deref(), Some("calificacion de seguridad"));
        assert_eq!(
            map.agilidad,
            Some(("devops habilitado".into(), "despliegue automatico".into()))
        );
        // Unnamed keys fall back to the spreadsheet mapping.
        assert_eq!(map.aplicacion, "aplicacion sistema");
        assert!(map.acople.is_none());
    }
}
