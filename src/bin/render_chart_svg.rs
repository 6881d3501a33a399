use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use vchart_rs::api::{ChartHost, ChartHostConfig};
use vchart_rs::core::ChartSpec;
use vchart_rs::render::SvgDecorator;

const USAGE: &str = "usage: render_chart_svg <spec.json> <out.svg> [--snapshot <path>]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    snapshot: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = vchart_rs::telemetry::init_default_tracing();
    let args = parse_args(std::env::args().skip(1))?;

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let spec = ChartSpec::from_json_str(&raw).map_err(|err| err.to_string())?;

    // Files get the settled geometry, not the first transition frame.
    let config = ChartHostConfig::new().with_transition_duration(Duration::ZERO);
    let mut host = ChartHost::new(SvgDecorator, config);
    host.mount(spec).map_err(|err| err.to_string())?;

    fs::write(&args.output, host.surface().to_svg_string())
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;

    if let Some(path) = args.snapshot {
        let json = host
            .snapshot()
            .and_then(|snapshot| snapshot.to_json_contract_v1_pretty())
            .map_err(|err| err.to_string())?;
        fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut positional = Vec::new();
    let mut snapshot = None::<PathBuf>;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--snapshot" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --snapshot".to_owned())?;
                snapshot = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other if other.starts_with("--") => {
                return Err(format!("unknown flag `{other}`\n{USAGE}"));
            }
            other => positional.push(PathBuf::from(other)),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(input), Some(output), None) => Ok(CliArgs {
            input,
            output,
            snapshot,
        }),
        _ => Err(USAGE.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        parse_args(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn two_positionals_name_input_and_output() {
        let args = parse(&["spec.json", "out.svg"]).expect("args");
        assert_eq!(
            args,
            CliArgs {
                input: PathBuf::from("spec.json"),
                output: PathBuf::from("out.svg"),
                snapshot: None,
            }
        );
    }

    #[test]
    fn snapshot_flag_may_appear_anywhere() {
        let leading = parse(&["--snapshot", "snap.json", "spec.json", "out.svg"]).expect("args");
        let trailing = parse(&["spec.json", "out.svg", "--snapshot", "snap.json"]).expect("args");

        assert_eq!(leading, trailing);
        assert_eq!(leading.snapshot, Some(PathBuf::from("snap.json")));
        assert_eq!(leading.input, PathBuf::from("spec.json"));
    }

    #[test]
    fn snapshot_flag_requires_a_value() {
        let err = parse(&["spec.json", "out.svg", "--snapshot"]).expect_err("missing value");
        assert_eq!(err, "missing value for --snapshot");
    }

    #[test]
    fn wrong_positional_count_prints_usage() {
        assert_eq!(parse(&[]), Err(USAGE.to_owned()));
        assert_eq!(parse(&["spec.json"]), Err(USAGE.to_owned()));
        assert_eq!(parse(&["a.json", "b.svg", "c.svg"]), Err(USAGE.to_owned()));
    }

    #[test]
    fn help_and_unknown_flags_are_usage_errors() {
        assert_eq!(parse(&["--help"]), Err(USAGE.to_owned()));
        assert_eq!(parse(&["-h", "spec.json", "out.svg"]), Err(USAGE.to_owned()));

        let err = parse(&["spec.json", "out.svg", "--pretty"]).expect_err("unknown flag");
        assert!(err.starts_with("unknown flag `--pretty`"), "{err}");
        assert!(err.ends_with(USAGE), "{err}");
    }
}
