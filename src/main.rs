// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sigil_cfg::ast::to_json_pretty;
use sigil_cfg::{CompileOptions, Compiler, PlatformTag};

#[derive(Parser, Debug)]
#[command(
    name = "sigil",
    version,
    about = "Compile sigil configuration files to canonical JSON."
)]
struct Cli {
    /// Input files or directories
    #[arg(short = 'i', long = "input", value_name = "PATH", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Extra import search directories, tried in order
    #[arg(short = 'I', long = "import-dir", value_name = "DIR")]
    import_dirs: Vec<PathBuf>,

    /// Output file or directory
    #[arg(short = 'o', long = "output", value_name = "PATH", required = true)]
    output: PathBuf,

    /// Print each compiled document to stdout
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Override the platform tag instead of detecting the host
    #[arg(long = "platform", value_name = "TAG")]
    platform: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let compiler = Compiler::new(CompileOptions {
        import_dirs: cli.import_dirs.clone(),
        platform: match &cli.platform {
            Some(tag) => PlatformTag::Named(tag.clone()),
            None => PlatformTag::Host,
        },
    });

    let mut failures = 0usize;
    for input in &cli.inputs {
        if input.is_dir() {
            failures += compile_dir(&compiler, input, &cli.output, cli.print);
        } else {
            failures += compile_one(&compiler, input, &output_for(input, &cli.output), cli.print);
        }
    }
    if failures > 0 {
        tracing::error!(failures, "compilation finished with errors");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Compile every file under `dir`, mirroring the directory layout below the
/// output root with extensions rewritten to `.json`. A failing file is
/// reported and its siblings still compile.
fn compile_dir(compiler: &Compiler, dir: &Path, out_root: &Path, print: bool) -> usize {
    let mut files = Vec::new();
    collect_files(dir, &mut files);
    files.sort();
    let mut failures = 0;
    for file in files {
        let rel = file.strip_prefix(dir).unwrap_or(&file);
        let dest = out_root.join(rel).with_extension("json");
        failures += compile_one(compiler, &file, &dest, print);
    }
    failures
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "cannot read directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}

fn compile_one(compiler: &Compiler, input: &Path, dest: &Path, print: bool) -> usize {
    let doc = match compiler.compile_file(input) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{}", err);
            return 1;
        }
    };
    let rendered = to_json_pretty(&doc);
    if print {
        println!("{}", rendered);
    }
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                eprintln!("[SIGIL] File Error '{}': {}", parent.display(), err);
                return 1;
            }
        }
    }
    if let Err(err) = fs::write(dest, rendered) {
        eprintln!("[SIGIL] File Error '{}': {}", dest.display(), err);
        return 1;
    }
    tracing::info!(input = %input.display(), output = %dest.display(), "compiled");
    0
}

/// A single input file maps either onto an explicit output file, or into an
/// output directory under its own name with a `.json` extension. An output
/// path with an extension is taken to be a file.
fn output_for(input: &Path, output: &Path) -> PathBuf {
    if output.extension().is_some() {
        return output.to_path_buf();
    }
    let name = input
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out"));
    output.join(name).with_extension("json")
}
