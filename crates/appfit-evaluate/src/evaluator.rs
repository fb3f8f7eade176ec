//! Per-criterion evaluation rules.
//!
//! Every rule is a pure function of one or two column values resolved
//! through the [`CriteriaMap`]. Missing, blank and literal `"0"` values
//! are "no data" and produce an empty verdict — never an error; a batch
//! must survive any cell content.

use appfit_model::{Bank, CriteriaMap, Criterion, Evaluation, Record, Verdict};

use crate::rules::RuleSet;

/// Evaluate all nine criteria for one application record.
///
/// Evaluation is two-phase: obsolescencia is computed first because its
/// verdict is an input to extensibilidad (an obsolete application cannot
/// be extensible, whatever its footprint says).
pub fn evaluate(record: &Record, bank: Bank, map: &CriteriaMap, rules: RuleSet) -> Evaluation {
    let mut evaluation = Evaluation::new();

    let obsolescencia = eval_obsolescencia(record, bank, map, rules);
    evaluation.set(Criterion::Obsolescencia, obsolescencia);
    evaluation.set(
        Criterion::Escalabilidad,
        eval_si_no(
            record,
            map.escalabilidad.as_deref(),
            Verdict::Cumple,
            Verdict::NoCumple,
        ),
    );
    evaluation.set(Criterion::Acople, eval_acople(map));
    // Having had incidents is the non-compliant answer, so SI and NO swap.
    evaluation.set(
        Criterion::Estabilidad,
        eval_si_no(
            record,
            map.estabilidad.as_deref(),
            Verdict::NoCumple,
            Verdict::Cumple,
        ),
    );
    evaluation.set(
        Criterion::Extensibilidad,
        eval_extensibilidad(record, map, rules, obsolescencia),
    );
    evaluation.set(Criterion::Seguridad, eval_seguridad(record, map, rules));
    evaluation.set(Criterion::Cobertura, eval_cobertura(map));
    evaluation.set(
        Criterion::Ux,
        eval_si_no(record, map.ux.as_deref(), Verdict::Cumple, Verdict::NoCumple),
    );
    evaluation.set(Criterion::Agilidad, eval_agilidad(record, map));

    evaluation
}

/// Criterion field read: first occurrence of the column, trimmed; blank
/// and literal "0" count as no data.
fn field_value<'a>(record: &'a Record, column: Option<&str>) -> Option<&'a str> {
    let value = record.value(column?)?;
    if value == "0" { None } else { Some(value) }
}

fn eval_obsolescencia(record: &Record, bank: Bank, map: &CriteriaMap, rules: RuleSet) -> Verdict {
    let Some(value) = field_value(record, map.obsolescencia.as_deref()) else {
        return Verdict::SinDato;
    };
    let lower = value.to_lowercase();

    match rules {
        RuleSet::BankKeyed => match bank {
            // The buyer's sheet rates lifecycle status; anything not
            // marked current is treated as obsolete.
            Bank::Buyer => {
                if lower.contains("vigente") {
                    Verdict::Cumple
                } else {
                    Verdict::NoCumple
                }
            }
            // The bought bank's sheet answers obsolete yes/no in prose.
            // "no obsoleto" must be checked first: it contains "obsoleto".
            Bank::Bought => {
                if lower.contains("no obsoleto") {
                    Verdict::Cumple
                } else if lower.contains("obsoleto") {
                    Verdict::NoCumple
                } else {
                    Verdict::SinDato
                }
            }
        },
        RuleSet::Prescored => {
            if lower.contains("no obsoleto") || lower.contains("vigente") {
                Verdict::Cumple
            } else if lower.contains("obsoleto") {
                Verdict::NoCumple
            } else {
                Verdict::SinDato
            }
        }
    }
}

fn eval_si_no(record: &Record, column: Option<&str>, on_si: Verdict, on_no: Verdict) -> Verdict {
    match field_value(record, column).map(str::to_uppercase).as_deref() {
        Some("SI") => on_si,
        Some("NO") => on_no,
        _ => Verdict::SinDato,
    }
}

/// Deliberate placeholder: coupling has no per-application data source
/// yet, every evaluated application is "Parcialmente". A mapped column
/// would switch this to a real rule.
fn eval_acople(map: &CriteriaMap) -> Verdict {
    if map.acople.is_none() {
        Verdict::Parcialmente
    } else {
        Verdict::SinDato
    }
}

fn eval_agilidad(record: &Record, map: &CriteriaMap) -> Verdict {
    let Some((devops_col, deploy_col)) = map.agilidad.as_ref() else {
        return Verdict::SinDato;
    };
    let devops = field_value(record, Some(devops_col.as_str())).map(str::to_uppercase);
    let deploy = field_value(record, Some(deploy_col.as_str())).map(str::to_uppercase);

    match devops.as_deref() {
        Some("NO") => Verdict::NoCumple,
        Some("SI") if deploy.as_deref() == Some("SI") => Verdict::Cumple,
        Some("SI") => Verdict::Parcialmente,
        _ => Verdict::SinDato,
    }
}

fn eval_extensibilidad(
    record: &Record,
    map: &CriteriaMap,
    rules: RuleSet,
    obsolescencia: Verdict,
) -> Verdict {
    // Cross-criterion dependency: an obsolete application is not
    // extensible regardless of its own column.
    if obsolescencia == Verdict::NoCumple {
        return Verdict::NoCumple;
    }
    let Some(value) = field_value(record, map.extensibilidad.as_deref()) else {
        return Verdict::SinDato;
    };

    match rules {
        RuleSet::BankKeyed => match title_case(value).as_str() {
            "Regional" | "Global" => Verdict::Cumple,
            "Local" => Verdict::NoCumple,
            _ => Verdict::SinDato,
        },
        RuleSet::Prescored => prescored_verdict(value),
    }
}

fn eval_seguridad(record: &Record, map: &CriteriaMap, rules: RuleSet) -> Verdict {
    let Some(value) = field_value(record, map.seguridad.as_deref()) else {
        return Verdict::SinDato;
    };
    if value.eq_ignore_ascii_case("n/a") {
        return Verdict::NoAplica;
    }

    match rules {
        RuleSet::BankKeyed => match value.parse::<f64>() {
            Ok(rating) if rating <= 0.0 => Verdict::SinDato,
            Ok(rating) if rating <= 2.0 => Verdict::NoCumple,
            Ok(rating) if rating == 3.0 => Verdict::Parcialmente,
            Ok(rating) if rating >= 4.0 => Verdict::Cumple,
            _ => Verdict::SinDato,
        },
        RuleSet::Prescored => prescored_verdict(value),
    }
}

fn eval_cobertura(map: &CriteriaMap) -> Verdict {
    // No rule defined: empty whether or not a column is mapped.
    let _ = map;
    Verdict::SinDato
}

/// Map pre-scored cell text through to a verdict.
fn prescored_verdict(value: &str) -> Verdict {
    match title_case(value).as_str() {
        "Cumple" => Verdict::Cumple,
        "Parcialmente" => Verdict::Parcialmente,
        "No Cumple" => Verdict::NoCumple,
        _ => Verdict::SinDato,
    }
}

/// Title-case each whitespace-separated word ("no cumple" -> "No Cumple").
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_multi_word_values() {
        assert_eq!(title_case("no cumple"), "No Cumple");
        assert_eq!(title_case("REGIONAL"), "Regional");
        assert_eq!(title_case("  local  "), "Local");
    }

    #[test]
    fn field_value_treats_zero_as_missing() {
        let record = Record::from_pairs([("seguridad", "0"), ("ux", "SI")]);
        assert_eq!(field_value(&record, Some("seguridad")), None);
        assert_eq!(field_value(&record, Some("ux")), Some("SI"));
        assert_eq!(field_value(&record, None), None);
    }
}
