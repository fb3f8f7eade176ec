//! Rule-table behavior across both rule sets.

use appfit_evaluate::{RuleSet, evaluate};
use appfit_model::{Bank, CriteriaMap, Criterion, Record, Verdict};

fn map() -> CriteriaMap {
    CriteriaMap::spreadsheet()
}

fn record(pairs: &[(&str, &str)]) -> Record {
    Record::from_pairs(pairs.iter().copied())
}

fn run(record: &Record, bank: Bank) -> appfit_model::Evaluation {
    evaluate(record, bank, &map(), RuleSet::BankKeyed)
}

#[test]
fn obsolescencia_buyer_reads_vigente() {
    let current = record(&[("nivel de obsolescencia", "Vigente")]);
    let legacy = record(&[("nivel de obsolescencia", "Legado")]);
    let missing = record(&[]);

    assert_eq!(
        run(&current, Bank::Buyer).get(Criterion::Obsolescencia),
        Verdict::Cumple
    );
    assert_eq!(
        run(&legacy, Bank::Buyer).get(Criterion::Obsolescencia),
        Verdict::NoCumple
    );
    assert_eq!(
        run(&missing, Bank::Buyer).get(Criterion::Obsolescencia),
        Verdict::SinDato
    );
}

#[test]
fn obsolescencia_bought_distinguishes_no_obsoleto() {
    let kept = record(&[("nivel de obsolescencia", "No obsoleto")]);
    let obsolete = record(&[("nivel de obsolescencia", "Obsoleto parcial")]);
    let other = record(&[("nivel de obsolescencia", "Moderno")]);

    assert_eq!(
        run(&kept, Bank::Bought).get(Criterion::Obsolescencia),
        Verdict::Cumple
    );
    assert_eq!(
        run(&obsolete, Bank::Bought).get(Criterion::Obsolescencia),
        Verdict::NoCumple
    );
    assert_eq!(
        run(&other, Bank::Bought).get(Criterion::Obsolescencia),
        Verdict::SinDato
    );
}

#[test]
fn escalabilidad_and_ux_map_si_no() {
    let yes = record(&[("tiene alta disponibilidad", "si"), ("ux", "SI")]);
    let no = record(&[("tiene alta disponibilidad", "NO"), ("ux", "no")]);
    let odd = record(&[("tiene alta disponibilidad", "tal vez")]);

    assert_eq!(
        run(&yes, Bank::Buyer).get(Criterion::Escalabilidad),
        Verdict::Cumple
    );
    assert_eq!(run(&yes, Bank::Buyer).get(Criterion::Ux), Verdict::Cumple);
    assert_eq!(
        run(&no, Bank::Buyer).get(Criterion::Escalabilidad),
        Verdict::NoCumple
    );
    assert_eq!(run(&no, Bank::Buyer).get(Criterion::Ux), Verdict::NoCumple);
    assert_eq!(
        run(&odd, Bank::Buyer).get(Criterion::Escalabilidad),
        Verdict::SinDato
    );
}

#[test]
fn estabilidad_inverts_incident_flag() {
    let incidents = record(&[(
        "ha presentado caidas o degradacion del servicio en los ultimos 12 meses",
        "SI",
    )]);
    let stable = record(&[(
        "ha presentado caidas o degradacion del servicio en los ultimos 12 meses",
        "NO",
    )]);

    assert_eq!(
        run(&incidents, Bank::Buyer).get(Criterion::Estabilidad),
        Verdict::NoCumple
    );
    assert_eq!(
        run(&stable, Bank::Buyer).get(Criterion::Estabilidad),
        Verdict::Cumple
    );
}

#[test]
fn acople_is_always_parcialmente() {
    for pairs in [
        &[][..],
        &[("bns", "Regional"), ("seguridad", "5")][..],
        &[("acople", "NO")][..],
    ] {
        for bank in Bank::ALL {
            for rules in RuleSet::ALL {
                let evaluation = evaluate(&record(pairs), bank, &map(), rules);
                assert_eq!(evaluation.get(Criterion::Acople), Verdict::Parcialmente);
            }
        }
    }
}

#[test]
fn cobertura_is_always_empty() {
    let full = record(&[("cobertura", "SI")]);
    assert_eq!(
        run(&full, Bank::Buyer).get(Criterion::Cobertura),
        Verdict::SinDato
    );
}

#[test]
fn agilidad_combines_devops_and_deploy() {
    let no_devops = record(&[("devops", "NO"), ("despliegue a pdn automatizado", "SI")]);
    let automated = record(&[("devops", "SI"), ("despliegue a pdn automatizado", "SI")]);
    let manual = record(&[("devops", "SI"), ("despliegue a pdn automatizado", "NO")]);
    let partial = record(&[("devops", "SI")]);
    let unknown = record(&[]);

    assert_eq!(
        run(&no_devops, Bank::Buyer).get(Criterion::Agilidad),
        Verdict::NoCumple
    );
    assert_eq!(
        run(&automated, Bank::Buyer).get(Criterion::Agilidad),
        Verdict::Cumple
    );
    assert_eq!(
        run(&manual, Bank::Buyer).get(Criterion::Agilidad),
        Verdict::Parcialmente
    );
    assert_eq!(
        run(&partial, Bank::Buyer).get(Criterion::Agilidad),
        Verdict::Parcialmente
    );
    assert_eq!(
        run(&unknown, Bank::Buyer).get(Criterion::Agilidad),
        Verdict::SinDato
    );
}

#[test]
fn extensibilidad_classifies_footprint() {
    let regional = record(&[
        ("nivel de obsolescencia", "Vigente"),
        ("bns", "regional"),
    ]);
    let global = record(&[("nivel de obsolescencia", "Vigente"), ("bns", "GLOBAL")]);
    let local = record(&[("nivel de obsolescencia", "Vigente"), ("bns", "Local")]);
    let odd = record(&[("nivel de obsolescencia", "Vigente"), ("bns", "Binacional")]);

    assert_eq!(
        run(&regional, Bank::Buyer).get(Criterion::Extensibilidad),
        Verdict::Cumple
    );
    assert_eq!(
        run(&global, Bank::Buyer).get(Criterion::Extensibilidad),
        Verdict::Cumple
    );
    assert_eq!(
        run(&local, Bank::Buyer).get(Criterion::Extensibilidad),
        Verdict::NoCumple
    );
    assert_eq!(
        run(&odd, Bank::Buyer).get(Criterion::Extensibilidad),
        Verdict::SinDato
    );
}

#[test]
fn obsolete_application_forces_extensibilidad() {
    // Regional footprint would be Cumple, but the obsolescencia verdict
    // overrides it.
    let obsolete = record(&[("nivel de obsolescencia", "Legado"), ("bns", "Regional")]);
    let evaluation = run(&obsolete, Bank::Buyer);

    assert_eq!(evaluation.get(Criterion::Obsolescencia), Verdict::NoCumple);
    assert_eq!(evaluation.get(Criterion::Extensibilidad), Verdict::NoCumple);
}

#[test]
fn seguridad_rating_ladder() {
    let cases = [
        ("0", Verdict::SinDato),
        ("1", Verdict::NoCumple),
        ("2", Verdict::NoCumple),
        ("3", Verdict::Parcialmente),
        ("4", Verdict::Cumple),
        ("5", Verdict::Cumple),
        ("N/A", Verdict::NoAplica),
        ("abc", Verdict::SinDato),
    ];
    for (value, expected) in cases {
        let evaluation = run(&record(&[("seguridad", value)]), Bank::Buyer);
        assert_eq!(
            evaluation.get(Criterion::Seguridad),
            expected,
            "seguridad = {value:?}"
        );
    }

    let missing = run(&record(&[]), Bank::Buyer);
    assert_eq!(missing.get(Criterion::Seguridad), Verdict::SinDato);
}

#[test]
fn duplicate_columns_use_first_occurrence() {
    let record = record(&[("seguridad", "5"), ("seguridad", "1")]);
    assert_eq!(
        run(&record, Bank::Buyer).get(Criterion::Seguridad),
        Verdict::Cumple
    );
}

#[test]
fn prescored_rules_map_precomputed_text() {
    let map = map();
    let sheet = record(&[
        ("nivel de obsolescencia", "No obsoleto"),
        ("bns", "parcialmente"),
        ("seguridad", "no cumple"),
    ]);
    let evaluation = evaluate(&sheet, Bank::Buyer, &map, RuleSet::Prescored);

    assert_eq!(evaluation.get(Criterion::Obsolescencia), Verdict::Cumple);
    assert_eq!(
        evaluation.get(Criterion::Extensibilidad),
        Verdict::Parcialmente
    );
    assert_eq!(evaluation.get(Criterion::Seguridad), Verdict::NoCumple);
}

#[test]
fn prescored_obsolescencia_ignores_bank() {
    let sheet = record(&[("nivel de obsolescencia", "Vigente")]);
    for bank in Bank::ALL {
        let evaluation = evaluate(&sheet, bank, &map(), RuleSet::Prescored);
        assert_eq!(evaluation.get(Criterion::Obsolescencia), Verdict::Cumple);
    }
}

#[test]
fn rule_sets_diverge_on_footprint_text() {
    // The bank-keyed rules do not understand pre-scored text, and the
    // prescored rules do not understand footprint classes.
    let footprint = record(&[("nivel de obsolescencia", "Vigente"), ("bns", "Regional")]);
    let prescored = evaluate(&footprint, Bank::Buyer, &map(), RuleSet::Prescored);
    assert_eq!(prescored.get(Criterion::Extensibilidad), Verdict::SinDato);

    let scored = record(&[("nivel de obsolescencia", "Vigente"), ("bns", "Cumple")]);
    let bank_keyed = evaluate(&scored, Bank::Buyer, &map(), RuleSet::BankKeyed);
    assert_eq!(bank_keyed.get(Criterion::Extensibilidad), Verdict::SinDato);
}
