//! # calc 命令实现
//!
//! 单次计算互扩散系数，显示结果并记录到结果存储。
//!
//! ## 依赖关系
//! - 使用 `cli/calc.rs` 定义的参数
//! - 使用 `diffusion/calculator.rs`, `diffusion/store.rs`
//! - 使用 `utils/output.rs`

use crate::cli::calc::CalcArgs;
use crate::diffusion::{self, CorrelationTerms, RecordOutcome, ResultStore};
use crate::error::Result;
use crate::models::{CalculationInput, CurvePoint, FIELD_NAMES};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 calc 命令
pub fn execute(args: CalcArgs) -> Result<()> {
    output::print_header("Mutual Diffusion Coefficient (UNIFAC correlation)");

    let input = super::resolve_input(&args.params)?;
    print_parameter_table(&input);

    let result = diffusion::compute(&input)?;

    if args.show_terms {
        print_terms_table(&CorrelationTerms::evaluate(&input));
    }

    output::print_separator();
    output::print_value("D_AB", &format!("{:.6e}", result.d_ab));
    output::print_value("D_exp", &format!("{:.6e}", input.d_exp));
    output::print_relative_error(result.relative_error_percent);
    output::print_separator();

    if args.no_store {
        return Ok(());
    }

    let store = ResultStore::new(&args.store.store);
    match store.record(CurvePoint::new(input.fraction_a, result.d_ab))? {
        RecordOutcome::Added => output::print_success(&format!(
            "Recorded X_A = {} in '{}'",
            input.fraction_a,
            store.path().display()
        )),
        RecordOutcome::Existing => output::print_info(&format!(
            "Existing calculation for X_A = {} in '{}', not recorded again",
            input.fraction_a,
            store.path().display()
        )),
    }

    Ok(())
}

/// 打印输入参数表格
fn print_parameter_table(input: &CalculationInput) {
    #[derive(Tabled)]
    struct ParamRow {
        #[tabled(rename = "Parameter")]
        name: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<ParamRow> = FIELD_NAMES
        .iter()
        .zip(input.values())
        .map(|(name, value)| ParamRow {
            name: *name,
            value: format!("{}", value),
        })
        .collect();

    println!("{}", Table::new(&rows));
}

/// 打印 ln D_AB 各项分解
fn print_terms_table(terms: &CorrelationTerms) {
    #[derive(Tabled)]
    struct TermRow {
        #[tabled(rename = "Term")]
        name: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        TermRow {
            name: "phi_A",
            value: format!("{:.8}", terms.phi_a),
        },
        TermRow {
            name: "phi_B",
            value: format!("{:.8}", terms.phi_b),
        },
        TermRow {
            name: "term1 (dilution + combinatorial)",
            value: format!("{:.8}", terms.term1),
        },
        TermRow {
            name: "term2 (size ratio)",
            value: format!("{:.8}", terms.term2),
        },
        TermRow {
            name: "term3 (residual, A side)",
            value: format!("{:.8}", terms.term3),
        },
        TermRow {
            name: "term4 (residual, B side)",
            value: format!("{:.8}", terms.term4),
        },
        TermRow {
            name: "ln D_AB",
            value: format!("{:.8}", terms.ln_d_ab()),
        },
    ];

    output::print_header("Correlation Terms");
    println!("{}", Table::new(&rows));
}
