use clap::{Parser, Subcommand};
use mason_cargo::{wrap, Manifest, ManifestConverter};
use mason_common::Diagnostic;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mason")]
#[command(author, version, about = "Convert Cargo manifests to Meson build definitions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate meson.build and meson.options from a Cargo.toml
    Convert {
        /// Crate directory containing Cargo.toml
        dir: PathBuf,

        /// Directory to write the generated files into (defaults to the
        /// crate directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the build definition instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Generate .wrap files for git and path dependencies
    Wrap {
        /// Crate directory containing Cargo.toml
        dir: PathBuf,

        /// Directory whose subprojects/ receives the wrap files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate or update a dub.json package file
    DubFile {
        /// Package name
        name: String,

        /// Directory holding dub.json
        dir: PathBuf,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        license: Option<String>,

        /// Dependency as name=version, repeatable
        #[arg(long = "dependency")]
        dependencies: Vec<String>,
    },

    /// Print the analysis of a cfg() expression
    Dump {
        /// A cfg expression, e.g. 'cfg(all(unix, target_arch = "x86_64"))'
        expr: String,

        /// What to print
        #[arg(long, default_value = "meson")]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DumpFormat {
    /// Dump the token stream
    Tokens,
    /// Dump the parsed expression
    Ast,
    /// Dump the lowered Meson condition
    Meson,
}

fn print_warnings(warnings: &[Diagnostic]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            dir,
            output,
            stdout,
        } => {
            let manifest = Manifest::from_dir(&dir).into_diagnostic()?;
            let conversion = ManifestConverter::new(&manifest, &dir)
                .convert()
                .into_diagnostic()?;
            print_warnings(&conversion.warnings);

            if stdout {
                print!("{}", conversion.build.render());
                if !conversion.options.is_empty() {
                    print!("{}", conversion.options.render());
                }
            } else {
                let output = output.unwrap_or_else(|| dir.clone());
                let build_path = output.join("meson.build");
                std::fs::write(&build_path, conversion.build.render())
                    .map_err(|e| miette::miette!("failed to write {}: {e}", build_path.display()))?;
                println!("Wrote {}", build_path.display());

                if !conversion.options.is_empty() {
                    let options_path = output.join("meson.options");
                    std::fs::write(&options_path, conversion.options.render()).map_err(|e| {
                        miette::miette!("failed to write {}: {e}", options_path.display())
                    })?;
                    println!("Wrote {}", options_path.display());
                }
            }
        }

        Commands::Wrap { dir, output } => {
            let manifest = Manifest::from_dir(&dir).into_diagnostic()?;
            let mut warnings = Vec::new();
            let wraps = wrap::wraps_for_manifest(&manifest, &mut warnings);
            print_warnings(&warnings);

            let output = output.unwrap_or_else(|| dir.clone());
            wrap::write_all(&wraps, &output).into_diagnostic()?;
            for file in &wraps {
                println!(
                    "Wrote {}",
                    output.join("subprojects").join(file.file_name()).display()
                );
            }
        }

        Commands::DubFile {
            name,
            dir,
            description,
            license,
            dependencies,
        } => {
            let mut generator = mason_toolchain::DubFileGenerator::new(name, &dir);
            if let Some(description) = description {
                generator = generator.description(description);
            }
            if let Some(license) = license {
                generator = generator.license(license);
            }
            for dependency in &dependencies {
                let (dep_name, version) = dependency
                    .split_once('=')
                    .ok_or_else(|| miette::miette!("--dependency expects name=version"))?;
                generator = generator.dependency(dep_name, version);
            }

            let mut warnings = Vec::new();
            let path = generator.generate(&mut warnings).into_diagnostic()?;
            print_warnings(&warnings);
            println!("Wrote {}", path.display());
        }

        Commands::Dump { expr, format } => match format {
            DumpFormat::Tokens => {
                let tokens = mason_cargo::cfg::lex(&expr).into_diagnostic()?;
                println!("{tokens:#?}");
            }
            DumpFormat::Ast => {
                let ast = mason_cargo::cfg::parse(&expr).into_diagnostic()?;
                println!("{ast:#?}");
            }
            DumpFormat::Meson => {
                let mut warnings = Vec::new();
                let condition =
                    mason_cargo::lower::condition_for(&expr, &mut warnings).into_diagnostic()?;
                print_warnings(&warnings);
                let mut builder = mason_ast::BlockBuilder::new();
                builder.expr(condition);
                print!("{}", builder.finish().render());
            }
        },
    }

    Ok(())
}
