use std::env;

use anyhow::{anyhow, bail, Context, Result};
use tangent_core::euler::{step_explicit, step_implicit, Sample, StepError};
use tangent_core::expression::Expression;

mod table;

const USAGE: &str = "Usage: tangent <explicit|implicit|both> <y0> <t0> <h> <s> <f_expr> [<df_expr>]";
const DECIMALS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Explicit,
    Implicit,
    Both,
}

impl Method {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "explicit" => Ok(Self::Explicit),
            "implicit" => Ok(Self::Implicit),
            "both" => Ok(Self::Both),
            other => Err(anyhow!(
                "method must be 'explicit', 'implicit' or 'both', got '{other}'"
            )),
        }
    }

    fn runs_explicit(self) -> bool {
        matches!(self, Self::Explicit | Self::Both)
    }

    fn runs_implicit(self) -> bool {
        matches!(self, Self::Implicit | Self::Both)
    }
}

#[derive(Debug)]
struct Args {
    method: Method,
    y0: f64,
    t0: f64,
    h: f64,
    s: usize,
    f_expr: String,
    df_expr: Option<String>,
}

fn parse_number(raw: &str, name: &str) -> Result<f64> {
    raw.parse()
        .with_context(|| format!("{name} must be a number, got '{raw}'"))
}

fn parse_args(args: &[String]) -> Result<Args> {
    if args.len() < 6 || args.len() > 7 {
        bail!("expected 6 or 7 arguments, got {}", args.len());
    }
    let method = Method::parse(&args[0])?;
    let y0 = parse_number(&args[1], "y0")?;
    let t0 = parse_number(&args[2], "t0")?;
    let h = parse_number(&args[3], "h")?;
    let s: usize = args[4]
        .parse()
        .with_context(|| format!("s must be a non-negative integer, got '{}'", args[4]))?;
    let f_expr = args[5].clone();
    let df_expr = args.get(6).cloned();

    if method.runs_implicit() && df_expr.is_none() {
        bail!("the implicit method needs the derivative expression for f as the last argument");
    }

    Ok(Args {
        method,
        y0,
        t0,
        h,
        s,
        f_expr,
        df_expr,
    })
}

fn run(args: &Args) -> Result<()> {
    let f_expr = Expression::<f64>::parse(&args.f_expr)
        .with_context(|| format!("invalid expression for f: '{}'", args.f_expr))?;
    let f = |_t: f64, y: f64| f_expr.eval(y);

    let mut columns: Vec<(&str, Vec<Sample<f64>>)> = Vec::new();
    let mut failure = None;

    if args.method.runs_explicit() {
        let samples = step_explicit(&f, args.y0, args.t0, args.h, args.s)?;
        columns.push(("Explicit Euler", samples));
    }

    if args.method.runs_implicit() {
        let df_text = args
            .df_expr
            .as_deref()
            .ok_or_else(|| anyhow!("missing derivative expression for f"))?;
        let df_expr = Expression::<f64>::parse(df_text)
            .with_context(|| format!("invalid expression for df: '{df_text}'"))?;
        let df = |_t: f64, y: f64| df_expr.eval(y);

        match step_implicit(&f, &df, args.y0, args.t0, args.h, args.s) {
            Ok(samples) => columns.push(("Implicit Euler", samples)),
            Err(StepError::SolverFailed {
                step,
                source,
                partial,
            }) => {
                // Report whatever was computed before the failing step, then
                // surface the failure itself.
                columns.push(("Implicit Euler", partial));
                failure = Some((step, source));
            }
            Err(err) => return Err(err.into()),
        }
    }

    let mut headers = vec!["Time"];
    headers.extend(columns.iter().map(|(name, _)| *name));

    let depth = columns
        .iter()
        .map(|(_, samples)| samples.len())
        .min()
        .unwrap_or(0);
    let mut rows = Vec::with_capacity(depth + 1);
    let mut initial = vec![args.t0];
    initial.extend(columns.iter().map(|_| args.y0));
    rows.push(initial);
    for i in 0..depth {
        let mut row = vec![columns[0].1[i].t];
        row.extend(columns.iter().map(|(_, samples)| samples[i].y));
        rows.push(row);
    }
    print!("{}", table::render_table(&headers, &rows, DECIMALS));

    if let Some((step, source)) = failure {
        bail!("implicit Euler stopped at step {step}: {source}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{USAGE}");
            return Err(err);
        }
    };
    run(&args)
}
