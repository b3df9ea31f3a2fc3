use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::assembly::{Assembler, AssemblyContext, SourceSet};
use crate::artifacts::{Artifact, DOCS_ARTIFACT};
use crate::classifier::{CandidatePath, Classifier};
use crate::config::{load_config, AppConfig};
use crate::generator::{write_descriptors, DescriptorModel};

/// Command-line interface for the webapp assembly tool.
#[derive(Parser)]
#[command(name = "warpack")]
#[command(about = "warpack CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full assembly: generate, compile, build, package
    Assemble {
        /// Path to the assembly configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Build classpath, platform separator-delimited
        #[arg(long, env = "CLASSPATH", default_value = "")]
        classpath: String,

        /// Scratch directory for the step outputs
        #[arg(short, long, default_value = "target/warpack")]
        work_dir: PathBuf,

        /// Source directory compiled into the webapp (repeatable)
        #[arg(long)]
        sources: Vec<PathBuf>,

        /// Documentation directory exported into the webapp
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Client application directory copied into the webapp (repeatable)
        #[arg(long)]
        client_app: Vec<PathBuf>,
    },
    /// Show how the lib rules partition the classpath
    Classify {
        /// Path to the assembly configuration file (YAML); the built-in
        /// defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Build classpath, platform separator-delimited
        #[arg(long, env = "CLASSPATH", default_value = "")]
        classpath: String,
    },
    /// Render the deployment descriptors only
    Generate {
        /// Path to the assembly configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for the descriptors
        #[arg(short, long, default_value = "target/warpack/generate/config")]
        out: PathBuf,
    },
}

/// Execute the CLI command provided by the user.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or validated, or
/// if any assembly step fails.
pub fn run_cli() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Assemble {
            config,
            classpath,
            work_dir,
            sources,
            docs,
            client_app,
        } => {
            let app_config = load_config(&config)?;
            let mut ctx = AssemblyContext::new(work_dir, config_base(&config));
            ctx.set_classpath_from_str(&classpath);
            ctx.source_sets = sources
                .into_iter()
                .map(|dir| SourceSet {
                    name: dir
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "sources".to_string()),
                    dir,
                    companion_classes: None,
                })
                .collect();
            ctx.client_app_dirs = client_app;
            if let Some(docs_dir) = docs {
                ctx.registry
                    .add(Artifact::new("docs", DOCS_ARTIFACT, docs_dir));
            }

            let mut assembler = Assembler::new(app_config, ctx);
            assembler.generate()?;
            assembler.compile()?;
            let build_dir = assembler.build()?;
            match assembler.package()? {
                Some(war) => println!("📦 packaged {}", war.display()),
                None => println!("✅ assembled {}", build_dir.display()),
            }
            Ok(())
        }
        Commands::Classify { config, classpath } => {
            let app_config = match config {
                Some(path) => load_config(&path)?,
                None => AppConfig::default(),
            };
            let classifier = Classifier::from_war_config(app_config.war.as_ref())?;
            let candidates: Vec<CandidatePath> = std::env::split_paths(&classpath)
                .filter(|p| p.exists())
                .map(CandidatePath::new)
                .collect();
            let result = classifier.classify(&candidates);

            for dir in &result.bundle_dirs {
                println!("bundle (classes)  {}", dir.display());
            }
            for lib in &result.bundle_files {
                println!("bundle (lib)      {}", lib.display());
            }
            for excluded in &result.excluded {
                println!("exclude           {} ({})", excluded.path.display(), excluded.reason);
            }
            if !result.manifest_classpath.is_empty() {
                println!("manifest Class-Path: {}", result.manifest_classpath.join(" "));
            }
            Ok(())
        }
        Commands::Generate { config, out } => {
            let app_config = load_config(&config)?;
            let model = DescriptorModel::from_config(&app_config)?;
            let written = write_descriptors(&model, &out)?;
            for path in written {
                println!("generated {}", path.display());
            }
            Ok(())
        }
    }
}

fn config_base(config: &Path) -> PathBuf {
    config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
