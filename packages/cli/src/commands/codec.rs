use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use polyedit_codec::{deserialize, serialize, try_deserialize};
use std::io::Read;
use std::path::PathBuf;

/// Where polygon text comes from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Polygon text, or `-` to read stdin
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read polygon text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// Read the input, dropping a trailing line ending left by editors or `echo`
    pub fn read(&self) -> Result<String> {
        let mut text = self.read_raw()?;
        let trimmed = text.trim_end_matches(&['\n', '\r'][..]).len();
        text.truncate(trimmed);
        Ok(text)
    }

    fn read_raw(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (_, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display())),
            (Some(text), None) if text == "-" => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Cannot read stdin")?;
                Ok(buffer)
            }
            (Some(text), None) => Ok(text.clone()),
            (None, None) => Err(anyhow::anyhow!("No input: pass polygon text, `-`, or --file")),
        }
    }
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Print the decoded rings as JSON. Malformed text prints `[]`.
pub fn parse(args: ParseArgs) -> Result<()> {
    let text = args.input.read()?;
    let set = deserialize(&text);

    let json = if args.pretty {
        serde_json::to_string_pretty(&set)?
    } else {
        serde_json::to_string(&set)?
    };
    println!("{}", json);
    Ok(())
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Print the canonical form of the input
pub fn format(args: FormatArgs) -> Result<()> {
    let text = args.input.read()?;
    println!("{}", serialize(&deserialize(&text)));
    Ok(())
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Fail with the parse error if the input is malformed
pub fn check(args: CheckArgs) -> Result<()> {
    let text = args.input.read()?;

    match try_deserialize(&text) {
        Ok(set) => {
            let vertices: usize = set.iter().map(|ring| ring.len()).sum();
            println!(
                "{} {} ring(s), {} vertices",
                "✓".green(),
                set.len(),
                vertices
            );
            Ok(())
        }
        Err(e) => {
            println!("   {}", text);
            println!("   {}{}", " ".repeat(e.pos()), "^".red().bold());
            Err(anyhow::anyhow!(e))
        }
    }
}
