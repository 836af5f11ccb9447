use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Default)]
pub struct CliArgs {
    pub base_url: Option<String>,
    pub product_id: Option<String>,
    pub page_size: Option<u32>,
    pub json: bool,
    pub no_ai: bool,
    pub help: bool,
}

/// Parse groom arguments.
///
/// Supported forms:
///   groom
///   groom --base-url https://acme.aha.io --product PRJ1
///   groom --product PRJ1 --page-size 50 --json
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--base-url" => {
                i += 1;
                if i < args.len() {
                    parsed.base_url = Some(args[i].clone());
                } else {
                    bail!("Missing value for --base-url flag");
                }
            }
            "--product" => {
                i += 1;
                if i < args.len() {
                    parsed.product_id = Some(args[i].clone());
                } else {
                    bail!("Missing value for --product flag");
                }
            }
            "--page-size" => {
                i += 1;
                if i >= args.len() {
                    bail!("Missing value for --page-size flag");
                }
                let size: u32 = match args[i].parse() {
                    Ok(n) => n,
                    Err(_) => bail!("Invalid page size: {}", args[i]),
                };
                if size == 0 {
                    bail!("Page size must be at least 1");
                }
                parsed.page_size = Some(size);
            }
            "--json" => parsed.json = true,
            "--no-ai" => parsed.no_ai = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument: {other}"),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Print a label and read one trimmed line from stdin. Used for values that
/// are neither passed as flags nor configured. The label goes to stderr so
/// stdout stays reserved for the report, `--json` redirection in particular.
pub fn prompt(label: &str) -> Result<String> {
    prompt_from(label, &mut std::io::stderr(), std::io::stdin().lock())
}

fn prompt_from(label: &str, out: &mut impl Write, mut input: impl BufRead) -> Result<String> {
    write!(out, "{label}").context("Failed to write prompt")?;
    out.flush().context("Failed to flush prompt")?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

pub fn print_help() {
    println!("groom — fetch, classify, and summarize a product backlog\n");
    println!("USAGE:");
    println!("  groom [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --base-url <url>   Aha! base URL (e.g., https://yourcompany.aha.io)");
    println!("  --product <id>     Product reference to fetch features for");
    println!("  --page-size <n>    Features per request page (default: 20)");
    println!("  --json             Print the report as JSON instead of a table");
    println!("  --no-ai            Skip the OpenAI summary and use the keyword fallback");
    println!("  -h, --help         Show this help");
    println!();
    println!("Values not passed as flags are read from ~/.groom/config.toml;");
    println!("the base URL and product ID are prompted for when still missing.");
    println!();
    println!("EXAMPLES:");
    println!("  groom --product PRJ1");
    println!("  groom --base-url https://acme.aha.io --product PRJ1 --json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_no_args_gives_defaults() {
        let parsed = parse_args(&args(&[])).unwrap();
        assert_eq!(parsed.base_url, None);
        assert_eq!(parsed.product_id, None);
        assert_eq!(parsed.page_size, None);
        assert!(!parsed.json);
        assert!(!parsed.no_ai);
        assert!(!parsed.help);
    }

    #[test]
    fn parse_base_url_and_product() {
        let parsed =
            parse_args(&args(&["--base-url", "https://acme.aha.io", "--product", "PRJ1"])).unwrap();
        assert_eq!(parsed.base_url, Some("https://acme.aha.io".to_string()));
        assert_eq!(parsed.product_id, Some("PRJ1".to_string()));
    }

    #[test]
    fn parse_page_size() {
        let parsed = parse_args(&args(&["--page-size", "50"])).unwrap();
        assert_eq!(parsed.page_size, Some(50));
    }

    #[test]
    fn parse_output_flags() {
        let parsed = parse_args(&args(&["--json", "--no-ai"])).unwrap();
        assert!(parsed.json);
        assert!(parsed.no_ai);
    }

    #[test]
    fn parse_help_short_and_long() {
        assert!(parse_args(&args(&["-h"])).unwrap().help);
        assert!(parse_args(&args(&["--help"])).unwrap().help);
    }

    #[test]
    fn parse_missing_value_fails() {
        let result = parse_args(&args(&["--product"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing value"));
    }

    #[test]
    fn parse_unknown_flag_fails() {
        let result = parse_args(&args(&["--verbose"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown argument"));
    }

    #[test]
    fn parse_zero_page_size_fails() {
        let result = parse_args(&args(&["--page-size", "0"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn parse_non_numeric_page_size_fails() {
        let result = parse_args(&args(&["--page-size", "many"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid page size"));
    }

    #[test]
    fn parse_stray_positional_fails() {
        assert!(parse_args(&args(&["PRJ1"])).is_err());
    }

    #[test]
    fn prompt_writes_label_to_the_given_stream_and_trims() {
        let mut out = Vec::new();
        let input = std::io::Cursor::new(b"  PRJ1  \n".to_vec());
        let answer = prompt_from("Product: ", &mut out, input).unwrap();
        assert_eq!(answer, "PRJ1");
        assert_eq!(String::from_utf8(out).unwrap(), "Product: ");
    }

    #[test]
    fn prompt_returns_empty_on_closed_input() {
        let mut out = Vec::new();
        let input = std::io::Cursor::new(Vec::new());
        let answer = prompt_from("x: ", &mut out, input).unwrap();
        assert_eq!(answer, "");
    }
}
