use anyhow::Result;
use comfy_table::Table;

use appfit_cli::pipeline::{
    InventorySource, LoadOptions, LoadResult, ReportOptions, ReportResult, SuggestOptions,
    SuggestResult, run_load, run_report, run_suggest,
};
use appfit_evaluate::RuleSet;
use appfit_model::Criterion;

use crate::cli::{LoadArgs, ReportArgs, RulesArg, SuggestArgs};
use crate::summary::apply_table_style;

pub fn report(args: &ReportArgs) -> Result<ReportResult> {
    let source = match (&args.buyer, &args.bought, &args.store) {
        (Some(buyer), Some(bought), None) => InventorySource::Files {
            buyer: buyer.clone(),
            bought: bought.clone(),
        },
        (_, _, Some(store)) => InventorySource::Store {
            path: store.clone(),
        },
        // clap enforces the buyer/bought/store combinations.
        _ => anyhow::bail!("either --buyer/--bought or --store is required"),
    };

    let options = ReportOptions {
        inputs: args.inputs.clone(),
        source,
        output_dir: args.output_dir.clone(),
        rules: match args.rules {
            RulesArg::BankKeyed => RuleSet::BankKeyed,
            RulesArg::Prescored => RuleSet::Prescored,
        },
        threshold: args.threshold,
        criteria_map: args.criteria_map.clone(),
    };
    run_report(&options)
}

pub fn load(args: &LoadArgs) -> Result<LoadResult> {
    run_load(&LoadOptions {
        buyer: args.buyer.clone(),
        bought: args.bought.clone(),
        store: args.store.clone(),
    })
}

pub fn suggest(args: &SuggestArgs) -> Result<SuggestResult> {
    run_suggest(&SuggestOptions {
        store: args.store.clone(),
        pending_file: args.pending.clone(),
        output: args.output.clone(),
        limit: args.limit,
    })
}

pub fn criteria() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Criterio", "Regla"]);
    apply_table_style(&mut table);
    for criterion in Criterion::ALL {
        table.add_row(vec![criterion.header(), describe(criterion)]);
    }
    println!("{table}");
    Ok(())
}

fn describe(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Obsolescencia => {
            "Vigente cumple (buyer); no obsoleto cumple, obsoleto no cumple (bought)"
        }
        Criterion::Escalabilidad => "Alta disponibilidad: SI cumple, NO no cumple",
        Criterion::Acople => "Sin fuente de datos: siempre Parcialmente",
        Criterion::Estabilidad => "Incidentes en 12 meses: SI no cumple, NO cumple",
        Criterion::Extensibilidad => {
            "Regional/Global cumple, Local no cumple; forzado por obsolescencia"
        }
        Criterion::Seguridad => "Rating 1-2 no cumple, 3 parcialmente, 4-5 cumple",
        Criterion::Cobertura => "Sin regla definida: siempre vacio",
        Criterion::Ux => "SI cumple, NO no cumple",
        Criterion::Agilidad => {
            "DevOps NO no cumple; SI con despliegue automatizado cumple, sin el parcialmente"
        }
    }
}
