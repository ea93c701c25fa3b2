//! Coefficient synthesis command.

use super::common::{DesignArgs, format_list, linear_to_db};
use clap::{Args, ValueEnum};

/// Output format for `cheby design`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Flat coefficient list on one line
    #[default]
    List,
    /// Diagnostic report with one line per pole
    Table,
    /// JSON object with `a`, `b`, `list` and `order`
    Json,
}

#[derive(Args)]
pub struct DesignCommandArgs {
    #[command(flatten)]
    design: DesignArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::List)]
    format: OutputFormat,
}

pub fn run(args: DesignCommandArgs) -> anyhow::Result<()> {
    let preset = args.design.to_preset()?;
    let order = preset.coefficient_order();

    match args.format {
        OutputFormat::List => {
            let coeffs = preset.design()?;
            println!("{}", format_list(&coeffs.to_list(order)));
        }
        OutputFormat::Table => {
            let designer = preset.designer()?;
            let coeffs = designer.design()?;
            println!("{}", designer.report()?);
            println!();
            println!(
                "DC gain {:.1} dB, Nyquist gain {:.1} dB",
                linear_to_db(coeffs.dc_gain().abs()),
                linear_to_db(coeffs.nyquist_gain().abs())
            );
        }
        OutputFormat::Json => {
            let coeffs = preset.design()?;
            let json = serde_json::json!({
                "pass": preset.pass_type().as_str(),
                "poles": coeffs.poles(),
                "ripple": preset.design.ripple,
                "cutoff": preset.normalized_cutoff()?,
                "order": order.to_string(),
                "a": coeffs.a(),
                "b": coeffs.b(),
                "list": coeffs.to_list(order),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
